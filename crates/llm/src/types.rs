//! LLM Types
//!
//! Provider configuration, the outbound chat-completion request, and the
//! error type shared by every provider.

use serde::{Deserialize, Serialize};

/// Default chat-completion endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.llm7.io/v1/chat/completions";

/// Default model identifier
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Credential sent when no API key is configured
pub const PLACEHOLDER_API_KEY: &str = "unused";

/// JSON pointer to the completion text in a chat-completion response
pub const COMPLETION_TEXT_PATH: &str = "/choices/0/message/content";

/// Provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Full URL of the chat-completion endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// API key; the placeholder credential is sent when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Model name to use
    #[serde(default = "default_model")]
    pub model: String,
    /// Sampling temperature; omitted from the request body when `None`
    #[serde(default = "default_temperature")]
    pub temperature: Option<f64>,
    /// Whole-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Proxy URL (`http://`, `https://` or `socks5://`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> Option<f64> {
    Some(0.7)
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            model: default_model(),
            temperature: default_temperature(),
            timeout_secs: default_timeout_secs(),
            proxy_url: None,
        }
    }
}

impl ProviderConfig {
    /// The credential placed in the `Authorization` header.
    pub fn credential(&self) -> &str {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .unwrap_or(PLACEHOLDER_API_KEY)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let endpoint = url::Url::parse(&self.endpoint)
            .map_err(|e| format!("Invalid endpoint '{}': {}", self.endpoint, e))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(format!(
                "Endpoint must use http or https, got '{}'",
                endpoint.scheme()
            ));
        }

        if self.model.trim().is_empty() {
            return Err("Model cannot be empty".to_string());
        }

        if let Some(t) = self.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(format!("Temperature must be between 0 and 2, got {}", t));
            }
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be at least 1".to_string());
        }

        if let Some(proxy) = &self.proxy_url {
            url::Url::parse(proxy).map_err(|e| format!("Invalid proxy URL '{}': {}", proxy, e))?;
        }

        Ok(())
    }
}

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
}

/// A single chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// A fully built chat-completion request. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f64>,
    /// JSON pointer locating the completion text in the response body
    pub extraction_path: String,
}

impl GenerationRequest {
    /// Value of the `Authorization` header
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.api_key)
    }

    /// JSON request body
    pub fn body(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": self.messages,
        });

        if let Some(t) = self.temperature {
            body["temperature"] = serde_json::json!(t);
        }

        body
    }
}

/// Completion extracted from a provider response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionResponse {
    /// Completion text; empty when the response carried none
    pub content: String,
    /// Model reported by the provider, if any
    pub model: Option<String>,
}

/// Parse a response body and pull out the completion text.
///
/// An unparseable body is a `ParseError`. A body that parses but lacks the
/// path (or holds a non-string there) yields empty content.
pub fn extract_completion(body: &str, extraction_path: &str) -> LlmResult<CompletionResponse> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| LlmError::ParseError {
            message: format!("Failed to parse response: {}", e),
        })?;

    let content = value
        .pointer(extraction_path)
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let model = value
        .get("model")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    Ok(CompletionResponse { content, model })
}

/// Errors from LLM operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Authentication failed (invalid API key)
    AuthenticationFailed { message: String },
    /// Rate limit exceeded
    RateLimited { message: String },
    /// Invalid request (bad parameters)
    InvalidRequest { message: String },
    /// Server error from the provider
    ServerError {
        message: String,
        status: Option<u16>,
    },
    /// Network/connection error, including timeouts
    NetworkError { message: String },
    /// Response parsing error
    ParseError { message: String },
    /// HTTP client could not be constructed
    ClientConfig { message: String },
    /// Other error
    Other { message: String },
}

impl LlmError {
    /// Whether the response arrived but could not be understood
    pub fn is_parse_error(&self) -> bool {
        matches!(self, LlmError::ParseError { .. })
    }
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmError::AuthenticationFailed { message } => {
                write!(f, "Authentication failed: {}", message)
            }
            LlmError::RateLimited { message } => {
                write!(f, "Rate limited: {}", message)
            }
            LlmError::InvalidRequest { message } => {
                write!(f, "Invalid request: {}", message)
            }
            LlmError::ServerError { message, status } => {
                if let Some(s) = status {
                    write!(f, "Server error ({}): {}", s, message)
                } else {
                    write!(f, "Server error: {}", message)
                }
            }
            LlmError::NetworkError { message } => {
                write!(f, "Network error: {}", message)
            }
            LlmError::ParseError { message } => {
                write!(f, "Parse error: {}", message)
            }
            LlmError::ClientConfig { message } => {
                write!(f, "Client configuration error: {}", message)
            }
            LlmError::Other { message } => {
                write!(f, "Error: {}", message)
            }
        }
    }
}

impl std::error::Error for LlmError {}

/// Result type for LLM operations
pub type LlmResult<T> = Result<T, LlmError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> GenerationRequest {
        GenerationRequest {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![ChatMessage::user("hello")],
            temperature: Some(0.7),
            extraction_path: COMPLETION_TEXT_PATH.to_string(),
        }
    }

    #[test]
    fn test_provider_config_default() {
        let config = ProviderConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.temperature, Some(0.7));
        assert_eq!(config.credential(), PLACEHOLDER_API_KEY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_credential_prefers_configured_key() {
        let config = ProviderConfig {
            api_key: Some("sk-live".to_string()),
            ..Default::default()
        };
        assert_eq!(config.credential(), "sk-live");

        let blank = ProviderConfig {
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(blank.credential(), PLACEHOLDER_API_KEY);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_endpoint = ProviderConfig {
            endpoint: "not a url".to_string(),
            ..Default::default()
        };
        assert!(bad_endpoint.validate().is_err());

        let ftp = ProviderConfig {
            endpoint: "ftp://example.com/v1".to_string(),
            ..Default::default()
        };
        assert!(ftp.validate().is_err());

        let hot = ProviderConfig {
            temperature: Some(3.5),
            ..Default::default()
        };
        assert!(hot.validate().is_err());

        let no_timeout = ProviderConfig {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(no_timeout.validate().is_err());
    }

    #[test]
    fn test_provider_config_deserializes_with_defaults() {
        let config: ProviderConfig = serde_json::from_str(r#"{"model": "gpt-4o-mini"}"#).unwrap();
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_request_body_shape() {
        let body = request().body();
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "hello");
        assert_eq!(body["temperature"], 0.7);
    }

    #[test]
    fn test_request_body_omits_missing_temperature() {
        let req = GenerationRequest {
            temperature: None,
            ..request()
        };
        assert!(req.body().get("temperature").is_none());
    }

    #[test]
    fn test_authorization_header() {
        assert_eq!(request().authorization(), "Bearer sk-test");
    }

    #[test]
    fn test_extract_completion() {
        let body = r#"{"model":"gpt-3.5-turbo","choices":[{"message":{"role":"assistant","content":"hi"}}]}"#;
        let completion = extract_completion(body, COMPLETION_TEXT_PATH).unwrap();
        assert_eq!(completion.content, "hi");
        assert_eq!(completion.model.as_deref(), Some("gpt-3.5-turbo"));
    }

    #[test]
    fn test_extract_completion_missing_path_is_empty() {
        for body in [
            r#"{}"#,
            r#"{"choices":[]}"#,
            r#"{"choices":[{"message":{}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
        ] {
            let completion = extract_completion(body, COMPLETION_TEXT_PATH).unwrap();
            assert_eq!(completion.content, "", "body: {}", body);
        }
    }

    #[test]
    fn test_extract_completion_unparseable_body() {
        let err = extract_completion("<html>502</html>", COMPLETION_TEXT_PATH).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_error_display() {
        let err = LlmError::ServerError {
            message: "boom".to_string(),
            status: Some(503),
        };
        assert_eq!(err.to_string(), "Server error (503): boom");
        assert!(!err.is_parse_error());
    }
}
