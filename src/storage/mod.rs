//! Storage Layer
//!
//! Handles all data persistence: the SQLite key/value store backing saved
//! templates, and the JSON config file.

pub mod config;
pub mod database;
pub mod kv;

pub use config::*;
pub use database::*;
pub use kv::*;
