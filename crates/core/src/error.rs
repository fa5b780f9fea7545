//! Core Error Types
//!
//! Errors raised by the artifact model and the history log. These are kept
//! dependency-free (only thiserror + std) so the core crate stays lightweight.
//! The application crate wraps them in `AppError`.

use thiserror::Error;

/// Core error type for the Prompt-to-App workspace.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Input rejected before any work was done
    #[error("Validation error: {0}")]
    Validation(String),

    /// A lookup by index or name found nothing
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for core errors
pub type CoreResult<T> = Result<T, CoreError>;

impl CoreError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }
}

impl From<CoreError> for String {
    fn from(err: CoreError) -> String {
        err.to_string()
    }
}
