//! Streak and weight progress tracking.
//!
//! A word graduates after a run of consecutive correct answers. Misses bump
//! its priority weight, which ranks it higher the next time it is cold.

use super::ProgressAlgorithm;
use crate::types::{EngineSettings, WordRecord, DEFAULT_WEIGHT, GRADUATION_STREAK};
use chrono::NaiveDate;

/// Streak/weight heuristic with configurable parameters.
#[derive(Debug, Clone)]
pub struct StreakWeight {
    pub graduation_streak: u32,
    pub miss_weight_increment: f64,
    pub streak_after_miss: u32,
    pub default_weight: f64,
}

impl Default for StreakWeight {
    fn default() -> Self {
        Self {
            graduation_streak: GRADUATION_STREAK,
            miss_weight_increment: 0.1,
            streak_after_miss: 1,
            default_weight: DEFAULT_WEIGHT,
        }
    }
}

impl From<&EngineSettings> for StreakWeight {
    fn from(settings: &EngineSettings) -> Self {
        Self {
            graduation_streak: settings.graduation_streak,
            miss_weight_increment: settings.miss_weight_increment,
            streak_after_miss: settings.streak_after_miss,
            default_weight: settings.default_weight,
        }
    }
}

impl ProgressAlgorithm for StreakWeight {
    fn name(&self) -> &'static str {
        "streak_weight"
    }

    fn record_answer(&self, word: &WordRecord, was_correct: bool, today: NaiveDate) -> WordRecord {
        let mut next = word.clone();
        next.total_attempts = word.total_attempts.saturating_add(1);
        next.last_seen = Some(today);

        if was_correct {
            next.total_correct = word.total_correct.saturating_add(1);
            next.streak = word.streak.saturating_add(1);
            if next.streak >= self.graduation_streak {
                next.is_graduated = true;
            }
        } else {
            // A miss still counts as one recent touch.
            next.streak = self.streak_after_miss;
            next.weight = round2(word.weight + self.miss_weight_increment);
        }

        next
    }

    fn reset(&self, word: &WordRecord) -> WordRecord {
        let mut next = word.clone();
        next.reset_progress();
        next.weight = self.default_weight;
        next
    }
}

/// Round to two decimals so repeated increments stay stable.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
