//! Prompt-to-App LLM
//!
//! Chat-completion plumbing for Prompt-to-App:
//! - `types` - provider configuration, `GenerationRequest`, response extraction, `LlmError`
//! - `provider` - the `LlmProvider` trait and HTTP status mapping
//! - `http_client` - reqwest client factory (timeout, proxy)
//! - `openai` - provider for OpenAI-compatible endpoints

pub mod http_client;
pub mod openai;
pub mod provider;
pub mod types;

// Re-export main types
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::LlmProvider;
pub use types::*;
