//! Session selection.
//!
//! Picks which words to practise next. Graduated words are never offered.
//! Words not seen today are preferred. Among the rest, roughly three quarters
//! of a session comes from the cold pool (not seen for a while, ranked by
//! weight) and the remainder is a random sample of recently reviewed words.

use std::collections::HashSet;

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::dates::days_since;
use crate::error::{EngineError, Result};
use crate::types::{EngineSettings, WordRecord};

/// Session selector with configurable pool thresholds.
#[derive(Debug, Clone)]
pub struct SessionSelector {
    pub cold_after_days: i64,
    pub cold_share: f64,
}

impl Default for SessionSelector {
    fn default() -> Self {
        Self::from(&EngineSettings::default())
    }
}

impl From<&EngineSettings> for SessionSelector {
    fn from(settings: &EngineSettings) -> Self {
        Self {
            cold_after_days: settings.cold_after_days,
            cold_share: settings.cold_share,
        }
    }
}

impl SessionSelector {
    /// Select up to `desired_count` words for a session, in random order.
    ///
    /// Returns `InvalidArgument` when `desired_count` is zero. The input is
    /// never modified; the returned records are clones.
    pub fn select<R: Rng + ?Sized>(
        &self,
        collection: &[WordRecord],
        desired_count: usize,
        today: NaiveDate,
        rng: &mut R,
    ) -> Result<Vec<WordRecord>> {
        if desired_count == 0 {
            return Err(EngineError::InvalidArgument(
                "session size must be at least 1".to_string(),
            ));
        }

        let active = eligible(collection);
        let not_today: Vec<&WordRecord> = active
            .iter()
            .copied()
            .filter(|w| w.last_seen != Some(today))
            .collect();

        let mut pool = if not_today.len() < desired_count {
            active
        } else {
            not_today
        };

        if pool.len() <= desired_count {
            pool.shuffle(rng);
            return Ok(pool.into_iter().cloned().collect());
        }

        let (mut cold, mut review): (Vec<&WordRecord>, Vec<&WordRecord>) =
            pool.iter().copied().partition(|w| self.is_cold(w, today));

        let cold_target = self.cold_target(desired_count);
        let review_target = desired_count - cold_target;

        // Stable sort keeps collection order among equal weights.
        cold.sort_by(|a, b| b.weight.total_cmp(&a.weight));
        review.shuffle(rng);

        let mut selection: Vec<&WordRecord> = cold
            .into_iter()
            .take(cold_target)
            .chain(review.into_iter().take(review_target))
            .collect();

        if selection.len() < desired_count {
            let chosen: HashSet<&str> = selection.iter().copied().map(|w| w.id.as_str()).collect();
            let mut remaining: Vec<&WordRecord> = pool
                .into_iter()
                .filter(|w| !chosen.contains(w.id.as_str()))
                .collect();
            remaining.shuffle(rng);
            let needed = desired_count - selection.len();
            selection.extend(remaining.into_iter().take(needed));
        }

        tracing::debug!(
            requested = desired_count,
            selected = selection.len(),
            cold_target,
            review_target,
            "selected session"
        );

        selection.shuffle(rng);
        Ok(selection.into_iter().cloned().collect())
    }

    /// Whether the word has gone unseen long enough to count as cold.
    pub fn is_cold(&self, word: &WordRecord, today: NaiveDate) -> bool {
        match days_since(word.last_seen, today) {
            Some(days) => days > self.cold_after_days,
            None => true,
        }
    }

    fn cold_target(&self, desired_count: usize) -> usize {
        let target = (desired_count as f64 * self.cold_share).ceil() as usize;
        target.min(desired_count)
    }
}

/// Select a session using the default thresholds.
pub fn select_session<R: Rng + ?Sized>(
    collection: &[WordRecord],
    desired_count: usize,
    today: NaiveDate,
    rng: &mut R,
) -> Result<Vec<WordRecord>> {
    SessionSelector::default().select(collection, desired_count, today, rng)
}

/// Hand-picked session: the listed ids in collection order.
///
/// Unknown ids are skipped. Graduated words are allowed here because the
/// learner chose them explicitly.
pub fn select_by_ids(collection: &[WordRecord], ids: &[String]) -> Vec<WordRecord> {
    let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
    let mut seen = HashSet::new();
    let mut picked = Vec::new();
    for word in collection {
        if wanted.contains(word.id.as_str()) && seen.insert(word.id.as_str()) {
            picked.push(word.clone());
        }
    }
    picked
}

/// Non-graduated records, first occurrence per id.
fn eligible(collection: &[WordRecord]) -> Vec<&WordRecord> {
    let mut seen = HashSet::new();
    let mut active = Vec::new();
    for word in collection {
        if !word.is_graduated && seen.insert(word.id.as_str()) {
            active.push(word);
        }
    }
    active
}
