//! Prompt-to-App Core
//!
//! Foundational types shared by the Prompt-to-App workspace. This crate has no
//! dependency on the network layer, storage, or configuration.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `artifact` - The source artifact model (`Prompt`, `HistoryEntry`, `Template`)
//!   and the built-in placeholder components
//! - `history` - The bounded, insertion-ordered generation log (`HistoryLog`)
//!
//! ## Design Principles
//!
//! 1. **Validated constructors** - a `Prompt` can only exist if it is non-blank
//! 2. **Immutable records** - history entries and templates are never edited in place
//! 3. **Unidirectional dependency** - this crate depends on nothing else in the workspace

pub mod artifact;
pub mod error;
pub mod history;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Source Artifacts ───────────────────────────────────────────────────
pub use artifact::{
    HistoryEntry, Prompt, Template, DEFAULT_SOURCE, ERROR_SOURCE, REQUIRED_IMPORT,
};

// ── History ────────────────────────────────────────────────────────────
pub use history::{HistoryLog, DEFAULT_HISTORY_LIMIT};
