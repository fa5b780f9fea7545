//! Generation Models
//!
//! Errors, notifications and the current-source record produced by the
//! generation orchestrator.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use prompt_to_app_core::{DEFAULT_SOURCE, ERROR_SOURCE};
use prompt_to_app_llm::LlmError;

// ============================================================================
// Errors
// ============================================================================

/// Why a generation produced no new source.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Blank prompt; no request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Another generation is still in flight; nothing was changed
    #[error("A generation is already in progress")]
    Busy,

    /// Network failure, timeout or non-2xx response
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response body could not be parsed
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Outcome of one `generate` call: sanitized, non-empty source on success.
pub type GenerationResult = Result<String, GenerationError>;

/// Error category, as reported in notifications and logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationErrorKind {
    Validation,
    Busy,
    Transport,
    Parse,
}

impl GenerationError {
    pub fn kind(&self) -> GenerationErrorKind {
        match self {
            GenerationError::Validation(_) => GenerationErrorKind::Validation,
            GenerationError::Busy => GenerationErrorKind::Busy,
            GenerationError::Transport(_) => GenerationErrorKind::Transport,
            GenerationError::Parse(_) => GenerationErrorKind::Parse,
        }
    }
}

impl From<LlmError> for GenerationError {
    fn from(err: LlmError) -> Self {
        if err.is_parse_error() {
            GenerationError::Parse(err.to_string())
        } else {
            GenerationError::Transport(err.to_string())
        }
    }
}

impl std::fmt::Display for GenerationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationErrorKind::Validation => write!(f, "validation"),
            GenerationErrorKind::Busy => write!(f, "busy"),
            GenerationErrorKind::Transport => write!(f, "transport"),
            GenerationErrorKind::Parse => write!(f, "parse"),
        }
    }
}

// ============================================================================
// Selection policy
// ============================================================================

/// What happens when a generation completes after the user picked a
/// history entry or template while it was in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// The completion overwrites the selection (completion order wins)
    #[default]
    LastWriterWins,
    /// The selection stays; the completion is only recorded in history
    PreferSelection,
}

impl std::fmt::Display for SelectionPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SelectionPolicy::LastWriterWins => write!(f, "last_writer_wins"),
            SelectionPolicy::PreferSelection => write!(f, "prefer_selection"),
        }
    }
}

impl std::str::FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "last_writer_wins" => Ok(SelectionPolicy::LastWriterWins),
            "prefer_selection" => Ok(SelectionPolicy::PreferSelection),
            _ => Err(format!("Unknown selection policy: {}", s)),
        }
    }
}

// ============================================================================
// Current source
// ============================================================================

/// Where the current source came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceOrigin {
    /// Built-in placeholder shown before anything else
    Default,
    /// Result of generation `generation_id`
    Generated { generation_id: u64 },
    /// Replayed from history
    History { index: usize },
    /// Loaded from a saved template
    Template { index: usize },
    /// Error placeholder after a failed generation
    Error,
}

/// The single artifact the preview shows. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentSource {
    pub source_text: String,
    pub origin: SourceOrigin,
}

impl CurrentSource {
    pub fn placeholder() -> Self {
        Self {
            source_text: DEFAULT_SOURCE.to_string(),
            origin: SourceOrigin::Default,
        }
    }

    pub fn error() -> Self {
        Self {
            source_text: ERROR_SOURCE.to_string(),
            origin: SourceOrigin::Error,
        }
    }
}

impl Default for CurrentSource {
    fn default() -> Self {
        Self::placeholder()
    }
}

// ============================================================================
// Notifications
// ============================================================================

/// Notifications published by the orchestrator for its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A request is about to be sent
    GenerationStarted { generation_id: u64, prompt: String },
    /// A generation produced source. `applied` is false when a manual
    /// selection kept the preview under `PreferSelection`.
    GenerationCompleted {
        generation_id: u64,
        source_text: String,
        applied: bool,
    },
    /// A generation failed. `generation_id` is absent when the failure
    /// happened before a request was started.
    GenerationFailed {
        generation_id: Option<u64>,
        kind: GenerationErrorKind,
        message: String,
    },
    /// Durable storage could not be read or written
    PersistenceFailed { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_llm_error_classification() {
        let parse: GenerationError = LlmError::ParseError {
            message: "eof".to_string(),
        }
        .into();
        assert_eq!(parse.kind(), GenerationErrorKind::Parse);

        let network: GenerationError = LlmError::NetworkError {
            message: "refused".to_string(),
        }
        .into();
        assert_eq!(network.kind(), GenerationErrorKind::Transport);

        let status: GenerationError = LlmError::ServerError {
            message: "down".to_string(),
            status: Some(502),
        }
        .into();
        assert_eq!(status.kind(), GenerationErrorKind::Transport);
        assert!(status.to_string().contains("502"));
    }

    #[test]
    fn test_selection_policy_roundtrip() {
        assert_eq!(SelectionPolicy::default(), SelectionPolicy::LastWriterWins);
        for policy in [SelectionPolicy::LastWriterWins, SelectionPolicy::PreferSelection] {
            assert_eq!(policy.to_string().parse::<SelectionPolicy>().unwrap(), policy);
        }
        assert!("newest".parse::<SelectionPolicy>().is_err());

        let json = serde_json::to_string(&SelectionPolicy::PreferSelection).unwrap();
        assert_eq!(json, "\"prefer_selection\"");
    }

    #[test]
    fn test_current_source_defaults() {
        let current = CurrentSource::default();
        assert_eq!(current.source_text, DEFAULT_SOURCE);
        assert_eq!(current.origin, SourceOrigin::Default);
        assert_eq!(CurrentSource::error().source_text, ERROR_SOURCE);
    }

    #[test]
    fn test_session_event_serialization() {
        let event = SessionEvent::GenerationFailed {
            generation_id: Some(3),
            kind: GenerationErrorKind::Transport,
            message: "timed out".to_string(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "generation_failed");
        assert_eq!(json["kind"], "transport");
        assert_eq!(json["generation_id"], 3);
    }
}
