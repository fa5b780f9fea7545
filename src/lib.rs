//! Prompt-to-App - Rust Backend Library
//!
//! Turns natural-language UI descriptions into a single renderable React
//! component. It includes:
//! - The generation orchestrator and its session state
//! - Request building and response sanitization
//! - Storage layer (SQLite key/value store, JSON config)
//! - Data models and utilities
//!
//! The library installs no tracing subscriber; the embedding host does.

pub mod models;
pub mod services;
pub mod storage;
pub mod utils;

pub use prompt_to_app_core::{HistoryEntry, Prompt, Template, DEFAULT_SOURCE, ERROR_SOURCE};
pub use prompt_to_app_llm::{LlmProvider, OpenAIProvider, ProviderConfig};

pub use models::generation::{
    CurrentSource, GenerationError, GenerationErrorKind, GenerationResult, SelectionPolicy,
    SessionEvent, SourceOrigin,
};
pub use models::preview::PreviewOptions;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use services::{
    sanitize, GenerationOrchestrator, OrchestratorOptions, PreviewPayload, PreviewRenderer,
    RequestBuilder, TemplateStore,
};
pub use storage::{ConfigService, Database, KeyValueStore};
pub use utils::error::{AppError, AppResult};
