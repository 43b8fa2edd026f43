//! Session and collection statistics.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{WordRecord, GRADUATION_STREAK};

/// End-of-session figures shown to the learner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_questions: usize,
    /// Records whose lifetime correct count grew during the session.
    pub correct_count: usize,
    /// Records at or past the graduation streak.
    pub mastered_count: usize,
    pub accuracy_percent: u32,
}

impl SessionSummary {
    /// Compare records at session start with their final state.
    pub fn from_records(started: &[WordRecord], finished: &[WordRecord]) -> Self {
        let baseline: HashMap<&str, u32> = started
            .iter()
            .map(|w| (w.id.as_str(), w.total_correct))
            .collect();

        let correct_count = finished
            .iter()
            .filter(|w| w.total_correct > baseline.get(w.id.as_str()).copied().unwrap_or(0))
            .count();
        let mastered_count = finished
            .iter()
            .filter(|w| w.streak >= GRADUATION_STREAK)
            .count();

        let total_questions = started.len();
        let accuracy_percent = if total_questions == 0 {
            0
        } else {
            ((correct_count as f64 / total_questions as f64) * 100.0).round() as u32
        };

        Self {
            total_questions,
            correct_count,
            mastered_count,
            accuracy_percent,
        }
    }
}

/// Overview of a whole collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total: usize,
    pub graduated: usize,
    pub started: usize,
    /// Not graduated, so still selectable.
    pub eligible: usize,
    /// Eligible and not yet seen today.
    pub due_today: usize,
}

impl CollectionStats {
    pub fn compute(words: &[WordRecord], today: NaiveDate) -> Self {
        let graduated = words.iter().filter(|w| w.is_graduated).count();
        let started = words.iter().filter(|w| w.is_started()).count();
        let due_today = words
            .iter()
            .filter(|w| !w.is_graduated && w.last_seen != Some(today))
            .count();

        Self {
            total: words.len(),
            graduated,
            started,
            eligible: words.len() - graduated,
            due_today,
        }
    }
}
