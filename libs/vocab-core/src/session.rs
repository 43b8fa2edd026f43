//! Running a practice session.
//!
//! The engine keeps no state between calls. A [`Session`] is a value owned by
//! the caller; every answer returns the updated record so the caller can fold
//! it into its authoritative collection right away.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::algorithm::ProgressAlgorithm;
use crate::stats::SessionSummary;
use crate::types::WordRecord;

/// An in-flight practice run over a fixed list of words.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    words: Vec<WordRecord>,
    started: Vec<WordRecord>,
    position: usize,
    answered_current: bool,
}

impl Session {
    pub fn new(words: Vec<WordRecord>) -> Self {
        Self {
            started: words.clone(),
            words,
            position: 0,
            answered_current: false,
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Zero-based index of the current question.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&WordRecord> {
        self.words.get(self.position)
    }

    pub fn words(&self) -> &[WordRecord] {
        &self.words
    }

    /// Record an answer to the current question.
    ///
    /// Returns the updated record, or `None` when the session is finished or
    /// the current question was already answered.
    pub fn answer(
        &mut self,
        algorithm: &dyn ProgressAlgorithm,
        was_correct: bool,
        today: NaiveDate,
    ) -> Option<WordRecord> {
        if self.answered_current {
            return None;
        }
        let current = self.words.get_mut(self.position)?;
        let updated = algorithm.record_answer(current, was_correct, today);
        *current = updated.clone();
        self.answered_current = true;
        Some(updated)
    }

    /// Move to the next question. Returns false once past the last one.
    pub fn advance(&mut self) -> bool {
        if self.position < self.words.len() {
            self.position += 1;
            self.answered_current = false;
        }
        self.position < self.words.len()
    }

    pub fn is_complete(&self) -> bool {
        self.position >= self.words.len()
    }

    /// Summary of the records as they stand now.
    ///
    /// Can be called at any time; an abandoned session summarizes what was
    /// answered so far.
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::from_records(&self.started, &self.words)
    }

    /// Consume the session, returning the final records and their summary.
    pub fn finish(self) -> (Vec<WordRecord>, SessionSummary) {
        let summary = self.summary();
        (self.words, summary)
    }
}

/// Replace the record with the same id in `collection`.
///
/// Returns whether a record was replaced.
pub fn apply_update(collection: &mut [WordRecord], updated: &WordRecord) -> bool {
    match collection.iter_mut().find(|w| w.id == updated.id) {
        Some(slot) => {
            *slot = updated.clone();
            true
        }
        None => false,
    }
}
