//! Source Artifacts
//!
//! The prompt a user submits and the component source it turns into. Every
//! artifact the preview can show is one of:
//! - a freshly generated source (recorded as a `HistoryEntry`)
//! - a saved `Template`
//! - one of the two built-in placeholders below

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// The import declaration every renderable source must carry exactly once.
pub const REQUIRED_IMPORT: &str = r#"import React from "react";"#;

/// Shown before the first generation, and whenever a generation yields no code.
pub const DEFAULT_SOURCE: &str = r#"import React from "react";

export default function App() {
  return <h1>Start typing a prompt above!</h1>;
}"#;

/// Shown after a failed generation.
pub const ERROR_SOURCE: &str = r#"import React from "react";

export default function App() {
  return <h1>⚠️ API Error</h1>;
}"#;

// ============================================================================
// Prompt
// ============================================================================

/// A trimmed, non-blank UI description.
///
/// The only way to obtain a `Prompt` is [`Prompt::new`], so anything holding
/// one can rely on it being non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Trim `raw` and reject it if nothing is left.
    pub fn new(raw: &str) -> CoreResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::validation("Prompt cannot be empty"));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Prompt {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// HistoryEntry
// ============================================================================

/// One successful generation: the prompt and the source it produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub prompt: String,
    pub source_text: String,
    pub timestamp: DateTime<Utc>,
}

impl HistoryEntry {
    /// Record a generation that completed now.
    pub fn new(prompt: &Prompt, source_text: impl Into<String>) -> Self {
        Self {
            prompt: prompt.as_str().to_string(),
            source_text: source_text.into(),
            timestamp: Utc::now(),
        }
    }
}

// ============================================================================
// Template
// ============================================================================

/// A user-named source snapshot. Names are not unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub name: String,
    pub source_text: String,
}

impl Template {
    pub fn new(name: impl Into<String>, source_text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source_text: source_text.into(),
        }
    }
}
