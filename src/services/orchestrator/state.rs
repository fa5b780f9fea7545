//! Session State
//!
//! The explicit container behind the orchestrator: current source, bounded
//! history and saved templates, plus the counters that order generations
//! against manual selections.

use prompt_to_app_core::{HistoryEntry, HistoryLog};

use crate::models::generation::{CurrentSource, GenerationError, SelectionPolicy, SourceOrigin};
use crate::services::templates::TemplateStore;
use crate::utils::error::AppResult;

/// Issued by [`SessionState::start_generation`] and handed back on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket {
    pub generation_id: u64,
    /// Selection counter observed when the generation started
    selection_seq: u64,
}

#[derive(Debug)]
pub struct SessionState {
    current: CurrentSource,
    history: HistoryLog,
    templates: TemplateStore,
    next_generation_id: u64,
    selection_seq: u64,
}

impl SessionState {
    pub fn new(history_limit: usize, templates: TemplateStore) -> Self {
        Self {
            current: CurrentSource::placeholder(),
            history: HistoryLog::with_limit(history_limit),
            templates,
            next_generation_id: 1,
            selection_seq: 0,
        }
    }

    pub fn current(&self) -> &CurrentSource {
        &self.current
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn templates(&self) -> &TemplateStore {
        &self.templates
    }

    pub fn templates_mut(&mut self) -> &mut TemplateStore {
        &mut self.templates
    }

    /// Allocate a generation id and remember the current selection counter.
    pub fn start_generation(&mut self) -> GenerationTicket {
        let ticket = GenerationTicket {
            generation_id: self.next_generation_id,
            selection_seq: self.selection_seq,
        };
        self.next_generation_id += 1;
        ticket
    }

    /// Whether a manual selection happened after `ticket` was issued
    pub fn is_superseded(&self, ticket: &GenerationTicket) -> bool {
        self.selection_seq != ticket.selection_seq
    }

    /// Commit the outcome of a started generation.
    ///
    /// A successful entry always lands in history. The current source is
    /// replaced (by the result or the error placeholder) unless `policy` is
    /// `PreferSelection` and the user selected something in the meantime.
    /// Returns whether the current source was replaced.
    pub fn complete_generation(
        &mut self,
        ticket: &GenerationTicket,
        outcome: Result<HistoryEntry, &GenerationError>,
        policy: SelectionPolicy,
    ) -> bool {
        let apply = match policy {
            SelectionPolicy::LastWriterWins => true,
            SelectionPolicy::PreferSelection => !self.is_superseded(ticket),
        };

        match outcome {
            Ok(entry) => {
                if apply {
                    self.current = CurrentSource {
                        source_text: entry.source_text.clone(),
                        origin: SourceOrigin::Generated {
                            generation_id: ticket.generation_id,
                        },
                    };
                }
                self.history.append(entry);
            }
            Err(_) => {
                if apply {
                    self.current = CurrentSource::error();
                }
            }
        }

        apply
    }

    /// Show the error placeholder for a failure that never started a request.
    pub fn fail_before_start(&mut self) {
        self.current = CurrentSource::error();
    }

    /// Make history entry `index` (0 = oldest retained) the current source.
    pub fn select_history(&mut self, index: usize) -> AppResult<&CurrentSource> {
        let source_text = self.history.select(index)?.source_text.clone();
        Ok(self.select(source_text, SourceOrigin::History { index }))
    }

    /// Make template `index` the current source.
    pub fn select_template(&mut self, index: usize) -> AppResult<&CurrentSource> {
        let source_text = self.templates.select(index)?.source_text.clone();
        Ok(self.select(source_text, SourceOrigin::Template { index }))
    }

    fn select(&mut self, source_text: String, origin: SourceOrigin) -> &CurrentSource {
        self.selection_seq += 1;
        self.current = CurrentSource {
            source_text,
            origin,
        };
        &self.current
    }
}
