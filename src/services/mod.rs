//! Services
//!
//! The prompt-to-source pipeline: request construction, response
//! sanitization, template persistence, preview payloads, and the
//! orchestrator tying them to one session.

pub mod orchestrator;
pub mod preview;
pub mod request_builder;
pub mod sanitizer;
pub mod templates;

pub use orchestrator::{GenerationOrchestrator, OrchestratorOptions};
pub use preview::{PreviewPayload, PreviewRenderer};
pub use request_builder::RequestBuilder;
pub use sanitizer::sanitize;
pub use templates::TemplateStore;
