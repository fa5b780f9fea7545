//! Generation History
//!
//! An insertion-ordered log of successful generations, capped at the most
//! recent `limit` entries. When an append pushes the log past its limit the
//! oldest entries are evicted first.

use std::collections::VecDeque;

use crate::artifact::HistoryEntry;
use crate::error::{CoreError, CoreResult};

/// Number of generations kept when no limit is configured.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Bounded FIFO log of `HistoryEntry` values.
///
/// Index 0 is the oldest retained entry.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl HistoryLog {
    /// Create an empty log holding at most `limit` entries (minimum 1).
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Append at the tail, evicting from the head until the limit holds.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
    }

    /// Look up a retained entry without changing the log.
    pub fn select(&self, index: usize) -> CoreResult<&HistoryEntry> {
        self.entries.get(index).ok_or_else(|| {
            CoreError::not_found(format!(
                "History entry {} (history holds {})",
                index,
                self.entries.len()
            ))
        })
    }

    /// The most recently appended entry.
    pub fn latest(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Snapshot of the retained entries, oldest first.
    pub fn to_vec(&self) -> Vec<HistoryEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl Default for HistoryLog {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}
