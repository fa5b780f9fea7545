//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

use prompt_to_app_core::DEFAULT_HISTORY_LIMIT;
use prompt_to_app_llm::ProviderConfig;

use super::generation::SelectionPolicy;
use super::preview::PreviewOptions;

/// Upper bound on the configurable history size
pub const MAX_HISTORY_LIMIT: usize = 100;

/// Application configuration stored in config.json
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat-completion endpoint, model and transport settings
    #[serde(default)]
    pub provider: ProviderConfig,
    /// Number of generations kept in history
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
    /// Precedence between an in-flight completion and a manual selection
    #[serde(default)]
    pub selection_policy: SelectionPolicy,
    /// Options passed through to the preview renderer
    #[serde(default)]
    pub preview: PreviewOptions,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderConfig::default(),
            history_limit: default_history_limit(),
            selection_policy: SelectionPolicy::default(),
            preview: PreviewOptions::default(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub timeout_secs: Option<u64>,
    pub proxy_url: Option<String>,
    pub history_limit: Option<usize>,
    pub selection_policy: Option<SelectionPolicy>,
    pub preview_theme: Option<String>,
    pub editor_height: Option<u32>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(endpoint) = update.endpoint {
            self.provider.endpoint = endpoint;
        }
        if let Some(api_key) = update.api_key {
            // An empty key clears the stored one
            self.provider.api_key = if api_key.trim().is_empty() {
                None
            } else {
                Some(api_key)
            };
        }
        if let Some(model) = update.model {
            self.provider.model = model;
        }
        if let Some(temperature) = update.temperature {
            self.provider.temperature = Some(temperature);
        }
        if let Some(timeout) = update.timeout_secs {
            self.provider.timeout_secs = timeout;
        }
        if let Some(proxy_url) = update.proxy_url {
            self.provider.proxy_url = if proxy_url.trim().is_empty() {
                None
            } else {
                Some(proxy_url)
            };
        }
        if let Some(limit) = update.history_limit {
            self.history_limit = limit;
        }
        if let Some(policy) = update.selection_policy {
            self.selection_policy = policy;
        }
        if let Some(theme) = update.preview_theme {
            self.preview.theme = theme;
        }
        if let Some(height) = update.editor_height {
            self.preview.editor_height = height;
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.provider.validate()?;

        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(format!(
                "history_limit must be between 1 and {}, got {}",
                MAX_HISTORY_LIMIT, self.history_limit
            ));
        }

        self.preview.validate()?;

        Ok(())
    }
}
