//! Integration Tests Module
//!
//! End-to-end tests driven through the public API: the generation pipeline
//! against a local chat-completion server, template persistence across
//! restarts, and configuration round trips.

// Prompt-to-source pipeline over real HTTP
mod generation_test;

// Template persistence across database reopen
mod templates_test;

// Config file round trips feeding the orchestrator
mod config_test;
