//! Generation Orchestrator
//!
//! Runs one prompt-to-source generation at a time: validates the prompt,
//! sends exactly one request, sanitizes the completion and commits it to
//! the session. Every failure ends in a renderable current source and a
//! notification rather than an error the host has to recover from.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, RwLock};

use prompt_to_app_core::{CoreError, HistoryEntry, Prompt, Template, DEFAULT_SOURCE};
use prompt_to_app_llm::{LlmProvider, OpenAIProvider};

use super::state::SessionState;
use crate::models::generation::{
    CurrentSource, GenerationError, GenerationResult, SelectionPolicy, SessionEvent,
};
use crate::models::preview::PreviewOptions;
use crate::models::settings::AppConfig;
use crate::services::preview::{PreviewPayload, PreviewRenderer};
use crate::services::request_builder::RequestBuilder;
use crate::services::sanitizer::sanitize;
use crate::services::templates::TemplateStore;
use crate::storage::kv::KeyValueStore;
use crate::utils::error::{AppError, AppResult};

/// Session options for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Number of generations kept in history
    pub history_limit: usize,
    /// Precedence between completions and manual selections
    pub selection_policy: SelectionPolicy,
    /// Renderer configuration used for preview payloads
    pub preview: PreviewOptions,
    /// Where notifications go; `None` drops them
    pub events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            history_limit: prompt_to_app_core::DEFAULT_HISTORY_LIMIT,
            selection_policy: SelectionPolicy::default(),
            preview: PreviewOptions::default(),
            events: None,
        }
    }
}

impl OrchestratorOptions {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            history_limit: config.history_limit,
            selection_policy: config.selection_policy,
            preview: config.preview.clone(),
            events: None,
        }
    }

    pub fn with_events(mut self, events: mpsc::UnboundedSender<SessionEvent>) -> Self {
        self.events = Some(events);
        self
    }
}

/// Holds the busy flag for the lifetime of one generation.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Single-flight prompt-to-source pipeline over one session.
pub struct GenerationOrchestrator {
    provider: Arc<dyn LlmProvider>,
    builder: RequestBuilder,
    state: RwLock<SessionState>,
    busy: AtomicBool,
    policy: SelectionPolicy,
    preview: PreviewOptions,
    events: Option<mpsc::UnboundedSender<SessionEvent>>,
}

impl GenerationOrchestrator {
    /// Create an orchestrator and load saved templates from `template_storage`.
    ///
    /// Template load problems never fail construction; they are reported as
    /// `PersistenceFailed` notifications.
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        template_storage: Arc<dyn KeyValueStore>,
        options: OrchestratorOptions,
    ) -> Self {
        let builder = RequestBuilder::new(provider.config());
        let (templates, warnings) = TemplateStore::load(template_storage);

        let orchestrator = Self {
            provider,
            builder,
            state: RwLock::new(SessionState::new(options.history_limit, templates)),
            busy: AtomicBool::new(false),
            policy: options.selection_policy,
            preview: options.preview,
            events: options.events,
        };

        for message in warnings {
            orchestrator.emit(SessionEvent::PersistenceFailed { message });
        }

        tracing::info!(
            "[Orchestrator] Ready: provider={}, model={}, policy={}",
            orchestrator.provider.name(),
            orchestrator.provider.model(),
            orchestrator.policy
        );

        orchestrator
    }

    /// Create an orchestrator talking to the configured chat-completion endpoint.
    pub fn from_config(
        config: &AppConfig,
        template_storage: Arc<dyn KeyValueStore>,
        events: Option<mpsc::UnboundedSender<SessionEvent>>,
    ) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;
        let provider = OpenAIProvider::new(config.provider.clone())
            .map_err(|e| AppError::config(e.to_string()))?;

        let mut options = OrchestratorOptions::from_config(config);
        options.events = events;

        Ok(Self::new(Arc::new(provider), template_storage, options))
    }

    // ========================================================================
    // Generation
    // ========================================================================

    /// Turn `raw_prompt` into source and make it current.
    ///
    /// Rejected with `Busy` (and no side effects) while another call is in
    /// flight. Otherwise every outcome clears the busy flag, and every error
    /// leaves the error placeholder as the current source.
    pub async fn generate(&self, raw_prompt: &str) -> GenerationResult {
        let Some(_busy) = BusyGuard::acquire(&self.busy) else {
            tracing::warn!("[Orchestrator] Generation rejected: another generation is in flight");
            return Err(GenerationError::Busy);
        };

        let prompt = match Prompt::new(raw_prompt) {
            Ok(prompt) => prompt,
            Err(e) => {
                let message = match e {
                    CoreError::Validation(msg) => msg,
                    other => other.to_string(),
                };
                let err = GenerationError::Validation(message);
                self.state.write().await.fail_before_start();
                self.report_failure(None, &err);
                return Err(err);
            }
        };

        let ticket = self.state.write().await.start_generation();
        tracing::info!(
            "[Orchestrator] Generation {} started ({} chars)",
            ticket.generation_id,
            prompt.as_str().len()
        );
        self.emit(SessionEvent::GenerationStarted {
            generation_id: ticket.generation_id,
            prompt: prompt.as_str().to_string(),
        });

        let request = self.builder.build(&prompt);
        let outcome = self
            .provider
            .send_request(&request)
            .await
            .map(|response| {
                let source = sanitize(&response.content);
                if source.is_empty() {
                    tracing::debug!(
                        "[Orchestrator] Generation {} returned no code, using placeholder",
                        ticket.generation_id
                    );
                    DEFAULT_SOURCE.to_string()
                } else {
                    source
                }
            })
            .map_err(GenerationError::from);

        match outcome {
            Ok(source_text) => {
                let applied = self.state.write().await.complete_generation(
                    &ticket,
                    Ok(HistoryEntry::new(&prompt, source_text.clone())),
                    self.policy,
                );
                if !applied {
                    tracing::info!(
                        "[Orchestrator] Generation {} kept out of the preview by a newer selection",
                        ticket.generation_id
                    );
                }
                tracing::info!(
                    "[Orchestrator] Generation {} completed ({} chars)",
                    ticket.generation_id,
                    source_text.len()
                );
                self.emit(SessionEvent::GenerationCompleted {
                    generation_id: ticket.generation_id,
                    source_text: source_text.clone(),
                    applied,
                });
                Ok(source_text)
            }
            Err(err) => {
                self.state
                    .write()
                    .await
                    .complete_generation(&ticket, Err(&err), self.policy);
                self.report_failure(Some(ticket.generation_id), &err);
                Err(err)
            }
        }
    }

    /// Whether a generation is in flight
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Make history entry `index` (0 = oldest retained) current and return its source.
    pub async fn select_history(&self, index: usize) -> AppResult<String> {
        let mut state = self.state.write().await;
        let current = state.select_history(index)?;
        tracing::debug!("[Orchestrator] Selected history entry {}", index);
        Ok(current.source_text.clone())
    }

    /// Make template `index` current and return its source.
    pub async fn select_template(&self, index: usize) -> AppResult<String> {
        let mut state = self.state.write().await;
        let current = state.select_template(index)?;
        tracing::debug!("[Orchestrator] Selected template {}", index);
        Ok(current.source_text.clone())
    }

    // ========================================================================
    // Templates
    // ========================================================================

    /// Save `source_text` as a named template.
    ///
    /// Returns false when `name` is blank or the store rejected the value.
    /// Failures are reported on the notification channel. When storage is
    /// merely unavailable the template stays available for the session and
    /// this returns true.
    pub async fn save_template(&self, name: &str, source_text: &str) -> bool {
        let result = self
            .state
            .write()
            .await
            .templates_mut()
            .save_template(name, source_text);

        match result {
            Ok(saved) => saved,
            Err(e) => {
                let kept = e.is_persistence();
                if !kept {
                    tracing::warn!("[Orchestrator] Template '{}' not saved: {}", name.trim(), e);
                }
                self.emit(SessionEvent::PersistenceFailed {
                    message: e.to_string(),
                });
                kept
            }
        }
    }

    /// Save whatever is currently shown as a named template.
    pub async fn save_current_as_template(&self, name: &str) -> bool {
        let source_text = self.state.read().await.current().source_text.clone();
        self.save_template(name, &source_text).await
    }

    // ========================================================================
    // Read access
    // ========================================================================

    pub async fn current_source(&self) -> CurrentSource {
        self.state.read().await.current().clone()
    }

    /// History entries, oldest first
    pub async fn history(&self) -> Vec<HistoryEntry> {
        self.state.read().await.history().to_vec()
    }

    pub async fn templates(&self) -> Vec<Template> {
        self.state.read().await.templates().templates().to_vec()
    }

    pub fn selection_policy(&self) -> SelectionPolicy {
        self.policy
    }

    // ========================================================================
    // Preview
    // ========================================================================

    /// Renderer input for the current source
    pub async fn preview_payload(&self) -> PreviewPayload {
        let state = self.state.read().await;
        PreviewPayload::new(&state.current().source_text, &self.preview)
    }

    /// Hand the current source to `renderer`. Render errors are passed through.
    pub async fn render_current(&self, renderer: &dyn PreviewRenderer) -> anyhow::Result<()> {
        let payload = self.preview_payload().await;
        renderer.render(&payload).map_err(|e| {
            tracing::warn!("[Orchestrator] Preview render failed: {}", e);
            e
        })
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    fn report_failure(&self, generation_id: Option<u64>, err: &GenerationError) {
        tracing::error!(
            "[Orchestrator] Generation {} failed ({}): {}",
            generation_id.map_or_else(|| "-".to_string(), |id| id.to_string()),
            err.kind(),
            err
        );
        self.emit(SessionEvent::GenerationFailed {
            generation_id,
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                tracing::debug!("[Orchestrator] Notification dropped: receiver closed");
            }
        }
    }
}
