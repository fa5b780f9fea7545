//! OpenAI-Compatible Provider
//!
//! Implementation of the LlmProvider trait for any endpoint speaking the
//! OpenAI chat-completions protocol (OpenAI itself, LLM7, local gateways).
//! Non-streaming only: the preview needs the whole component before it can
//! render anything.

use async_trait::async_trait;

use super::provider::{parse_http_error, LlmProvider};
use super::types::{
    extract_completion, CompletionResponse, GenerationRequest, LlmError, LlmResult,
    ProviderConfig,
};
use crate::http_client::build_http_client;

/// OpenAI-compatible chat-completion provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    /// Create a new provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(&config)?;
        Ok(Self { config, client })
    }

    fn network_error(&self, err: reqwest::Error) -> LlmError {
        let message = if err.is_timeout() {
            format!("Request timed out after {}s", self.config.timeout_secs)
        } else {
            err.to_string()
        };
        LlmError::NetworkError { message }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn send_request(&self, request: &GenerationRequest) -> LlmResult<CompletionResponse> {
        tracing::debug!(
            "[OpenAIProvider] POST {} (model={}, messages={})",
            request.endpoint,
            request.model,
            request.messages.len()
        );

        let response = self
            .client
            .post(&request.endpoint)
            .header("Authorization", request.authorization())
            .header("Content-Type", "application/json")
            .json(&request.body())
            .send()
            .await
            .map_err(|e| self.network_error(e))?;

        let status = response.status();
        let body_text = response.text().await.map_err(|e| self.network_error(e))?;

        if !status.is_success() {
            tracing::warn!(
                "[OpenAIProvider] HTTP {} from {}",
                status.as_u16(),
                request.endpoint
            );
            return Err(parse_http_error(status.as_u16(), &body_text, self.name()));
        }

        let completion = extract_completion(&body_text, &request.extraction_path)?;
        tracing::debug!(
            "[OpenAIProvider] HTTP {} (requested={}, served={}, {} chars)",
            status.as_u16(),
            request.model,
            completion.model.as_deref().unwrap_or("unknown"),
            completion.content.len()
        );
        if completion.content.is_empty() {
            tracing::warn!(
                "[OpenAIProvider] Response had no text at {}",
                request.extraction_path
            );
        }

        Ok(completion)
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}
