//! Progress tracking algorithms.

pub mod streak;

use crate::types::WordRecord;
use chrono::NaiveDate;

pub use streak::StreakWeight;

/// Trait for the rule that updates a word's learning state after an answer.
pub trait ProgressAlgorithm: Send + Sync {
    /// Algorithm identifier.
    fn name(&self) -> &'static str;

    /// Return the word updated for one answer given on `today`.
    ///
    /// The argument is left untouched; callers replace their stored copy.
    fn record_answer(&self, word: &WordRecord, was_correct: bool, today: NaiveDate) -> WordRecord;

    /// Apply the explicit reset, restoring the initial learning state.
    fn reset(&self, word: &WordRecord) -> WordRecord;
}

/// Get algorithm by name.
pub fn get_algorithm(name: &str) -> Option<Box<dyn ProgressAlgorithm>> {
    match name {
        "streak_weight" => Some(Box::new(StreakWeight::default())),
        _ => None,
    }
}

/// Update `word` for one answer given today, using the default algorithm.
pub fn record_answer(word: &WordRecord, was_correct: bool) -> WordRecord {
    StreakWeight::default().record_answer(word, was_correct, crate::dates::study_day(0))
}
