//! Template Store
//!
//! User-named source snapshots, kept in memory and mirrored to durable
//! storage as one JSON array under [`TEMPLATES_KEY`].
//!
//! The in-memory collection is authoritative for the running session:
//! a failed read starts from an empty collection, and a failed write keeps
//! the new template in memory.

use std::sync::Arc;

use prompt_to_app_core::Template;

use crate::storage::kv::KeyValueStore;
use crate::utils::error::{AppError, AppResult};

/// Storage slot holding the serialized template collection
pub const TEMPLATES_KEY: &str = "templates";

/// Saved templates backed by a key/value store.
pub struct TemplateStore {
    storage: Arc<dyn KeyValueStore>,
    templates: Vec<Template>,
}

impl TemplateStore {
    /// Read the persisted collection once.
    ///
    /// Never fails: a missing slot yields an empty collection silently, an
    /// unreadable or corrupt slot yields an empty collection plus a warning.
    pub fn load(storage: Arc<dyn KeyValueStore>) -> (Self, Vec<String>) {
        let mut warnings = Vec::new();

        let templates = match storage.get(TEMPLATES_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Template>>(&raw) {
                Ok(templates) => templates,
                Err(e) => {
                    warnings.push(format!("Saved templates are corrupt, starting empty: {}", e));
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warnings.push(format!("Failed to read saved templates: {}", e));
                Vec::new()
            }
        };

        for warning in &warnings {
            tracing::warn!("[TemplateStore] {}", warning);
        }
        tracing::debug!("[TemplateStore] Loaded {} templates", templates.len());

        (Self { storage, templates }, warnings)
    }

    /// Append a template and persist the whole collection.
    ///
    /// Returns `Ok(false)` without touching anything when `name` is blank.
    /// When storage is unavailable the template is still kept in memory and
    /// the error is returned for reporting. Any other failure (the store
    /// rejecting the value) drops the template again.
    pub fn save_template(&mut self, name: &str, source_text: &str) -> AppResult<bool> {
        let name = name.trim();
        if name.is_empty() {
            return Ok(false);
        }

        self.templates.push(Template::new(name, source_text));
        if let Err(e) = self.persist() {
            if !e.is_persistence() {
                self.templates.pop();
            }
            return Err(e);
        }
        Ok(true)
    }

    fn persist(&self) -> AppResult<()> {
        let serialized = serde_json::to_string(&self.templates)?;
        self.storage.set(TEMPLATES_KEY, &serialized).map_err(|e| {
            tracing::error!("[TemplateStore] Failed to persist templates: {}", e);
            e
        })
    }

    /// Look up a template by position.
    pub fn select(&self, index: usize) -> AppResult<&Template> {
        self.templates.get(index).ok_or_else(|| {
            AppError::not_found(format!(
                "Template {} (store holds {})",
                index,
                self.templates.len()
            ))
        })
    }

    /// All templates in save order. Names may repeat.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl std::fmt::Debug for TemplateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateStore")
            .field("templates", &self.templates.len())
            .finish()
    }
}
