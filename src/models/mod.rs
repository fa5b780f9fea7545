//! Data Models
//!
//! Contains the data structures exchanged between the orchestrator, its host
//! and the preview renderer.

pub mod generation;
pub mod preview;
pub mod settings;

pub use generation::*;
pub use preview::*;
pub use settings::*;
