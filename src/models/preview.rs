//! Preview Models
//!
//! Configuration bag handed to the external preview renderer.

use serde::{Deserialize, Serialize};

/// Virtual path the generated component is mounted at
pub const APP_FILE_PATH: &str = "/App.js";

/// Renderer options, serialized in the renderer's camelCase vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewOptions {
    /// Renderer project template
    #[serde(default = "default_template")]
    pub template: String,
    /// Renderer colour theme
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default = "default_editor_height")]
    pub editor_height: u32,
    #[serde(default = "default_true")]
    pub show_tabs: bool,
    #[serde(default = "default_true")]
    pub show_line_numbers: bool,
    #[serde(default = "default_true")]
    pub wrap_content: bool,
    /// When the renderer boots the bundle: "lazy", "immediate" or "user-visible"
    #[serde(default = "default_init_mode")]
    pub init_mode: String,
}

fn default_template() -> String {
    "react".to_string()
}

fn default_theme() -> String {
    "amethyst".to_string()
}

fn default_editor_height() -> u32 {
    700
}

fn default_true() -> bool {
    true
}

fn default_init_mode() -> String {
    "user-visible".to_string()
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            template: default_template(),
            theme: default_theme(),
            editor_height: default_editor_height(),
            show_tabs: true,
            show_line_numbers: true,
            wrap_content: true,
            init_mode: default_init_mode(),
        }
    }
}

impl PreviewOptions {
    pub fn validate(&self) -> Result<(), String> {
        if !["lazy", "immediate", "user-visible"].contains(&self.init_mode.as_str()) {
            return Err(format!(
                "Invalid init_mode: {}. Must be 'lazy', 'immediate', or 'user-visible'",
                self.init_mode
            ));
        }
        if self.editor_height == 0 {
            return Err("editor_height must be greater than 0".to_string());
        }
        if self.template.trim().is_empty() {
            return Err("template cannot be empty".to_string());
        }
        Ok(())
    }
}
