//! Selection Queue — the bounded working set of keywords shown to the user.
//!
//! The queue draws lazily from a `RankedCandidateList` through a cursor that
//! only moves forward. A candidate equal to one already selected is skipped for
//! good, so duplicate rows surface at most once per session. Removing an entry
//! immediately backfills from the next unread position.

use serde::Serialize;
use thiserror::Error;

use crate::keywords::models::KeywordCandidate;

/// Maximum number of keywords on display at once.
pub const QUEUE_CAPACITY: usize = 5;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueueError {
    #[error("Selection index {index} out of range (queue holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueueState {
    /// Below capacity with unread source rows left.
    Filling,
    /// At capacity.
    Saturated,
    /// Below capacity and the source has nothing unread.
    Exhausted,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionQueue {
    selected: Vec<KeywordCandidate>,
    cursor: usize,
}

impl SelectionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> &[KeywordCandidate] {
        &self.selected
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Pulls from `source` until the queue is full or the source runs out.
    ///
    /// The cursor advances past every row it reads, accepted or not.
    pub fn fill(&mut self, source: &[KeywordCandidate]) {
        while self.selected.len() < QUEUE_CAPACITY && self.cursor < source.len() {
            let candidate = &source[self.cursor];
            self.cursor += 1;
            if !self.selected.contains(candidate) {
                self.selected.push(candidate.clone());
            }
        }
    }

    /// Drops the entry at `index`, then backfills. Out-of-range indices leave
    /// the queue untouched.
    pub fn remove(
        &mut self,
        index: usize,
        source: &[KeywordCandidate],
    ) -> Result<KeywordCandidate, QueueError> {
        if index >= self.selected.len() {
            return Err(QueueError::IndexOutOfRange {
                index,
                len: self.selected.len(),
            });
        }

        let removed = self.selected.remove(index);
        self.fill(source);
        Ok(removed)
    }

    pub fn state(&self, source: &[KeywordCandidate]) -> QueueState {
        if self.selected.len() >= QUEUE_CAPACITY {
            QueueState::Saturated
        } else if self.cursor >= source.len() {
            QueueState::Exhausted
        } else {
            QueueState::Filling
        }
    }

    /// Back to the empty start state.
    pub fn reset(&mut self) {
        self.selected.clear();
        self.cursor = 0;
    }
}
