//! LLM Provider Trait
//!
//! Defines the common interface for chat-completion providers.

use async_trait::async_trait;

use super::types::{CompletionResponse, GenerationRequest, LlmError, LlmResult, ProviderConfig};

/// Trait that all LLM providers must implement.
///
/// A provider performs exactly one network round trip per `send_request`
/// call and never retries on its own.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the model configured for this provider.
    fn model(&self) -> &str;

    /// Send a built request and extract the completion.
    ///
    /// # Errors
    /// - transport failures and non-2xx statuses map through [`parse_http_error`]
    ///   or to `NetworkError`
    /// - an unparseable body is `ParseError`
    ///
    /// A parseable body without completion text is **not** an error; it
    /// yields an empty `content`.
    async fn send_request(&self, request: &GenerationRequest) -> LlmResult<CompletionResponse>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Helper function to parse HTTP error status codes
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        429 => LlmError::RateLimited {
            message: body.to_string(),
        },
        400 | 404 | 422 => LlmError::InvalidRequest {
            message: body.to_string(),
        },
        500..=599 => LlmError::ServerError {
            message: body.to_string(),
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, body),
        },
    }
}
