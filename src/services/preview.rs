//! Preview Payload
//!
//! Shapes the current source into what the external preview renderer
//! consumes: a map of virtual file paths plus its configuration bag.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::preview::{PreviewOptions, APP_FILE_PATH};

/// Input for one render of the preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewPayload {
    pub files: BTreeMap<String, String>,
    pub configuration: PreviewOptions,
}

impl PreviewPayload {
    /// Mount `source_text` as the single app file.
    pub fn new(source_text: &str, options: &PreviewOptions) -> Self {
        let mut files = BTreeMap::new();
        files.insert(APP_FILE_PATH.to_string(), source_text.to_string());
        Self {
            files,
            configuration: options.clone(),
        }
    }

    /// Source mounted at the app path
    pub fn app_source(&self) -> Option<&str> {
        self.files.get(APP_FILE_PATH).map(String::as_str)
    }
}

/// The embedding UI's live preview.
///
/// Render failures are opaque to this crate; they are logged and passed
/// back to the caller without touching session state.
pub trait PreviewRenderer: Send + Sync {
    fn render(&self, payload: &PreviewPayload) -> anyhow::Result<()>;
}
