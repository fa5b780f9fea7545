//! Generation Orchestrator Module
//!
//! Single-flight coordination of prompt-to-source generations over an
//! explicit session state (current source, history, templates).

mod service;
mod state;

pub use service::{GenerationOrchestrator, OrchestratorOptions};
pub use state::{GenerationTicket, SessionState};
