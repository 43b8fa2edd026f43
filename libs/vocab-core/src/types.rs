//! Core types for the vocabulary trainer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Streak at which a word counts as mastered.
pub const GRADUATION_STREAK: u32 = 5;

/// Priority weight given to new or reset words.
pub const DEFAULT_WEIGHT: f64 = 0.5;

/// Blank marker used in cloze sentences.
pub const CLOZE_BLANK: &str = "___";

fn default_weight() -> f64 {
    DEFAULT_WEIGHT
}

/// One vocabulary item and its learning state.
///
/// Field names follow the saved progress file, so a collection written by
/// [`crate::parser::export_history`] reads back with no field loss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordRecord {
    pub id: String,
    /// Dictionary form, also the dedup key when merging.
    #[serde(rename = "word")]
    pub lemma: String,
    #[serde(default)]
    pub part_of_speech: Option<String>,
    /// Surface form expected as the answer in `sentence`.
    #[serde(default)]
    pub answer_form: String,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub sentence: String,
    #[serde(default)]
    pub cloze_sentence: String,

    #[serde(default)]
    pub streak: u32,
    /// Always serialized, `null` when never attempted.
    #[serde(default)]
    pub last_seen: Option<NaiveDate>,
    #[serde(default = "default_weight")]
    pub weight: f64,
    #[serde(default)]
    pub total_attempts: u32,
    #[serde(default)]
    pub total_correct: u32,
    #[serde(default)]
    pub is_graduated: bool,
}

impl WordRecord {
    /// Build a record from draft content with the default learning state.
    pub fn from_draft(id: String, draft: DraftWord) -> Self {
        let answer_form = match draft.answer_form {
            Some(form) if !form.trim().is_empty() => form,
            _ => draft.lemma.clone(),
        };
        Self {
            id,
            lemma: draft.lemma,
            part_of_speech: draft.part_of_speech,
            answer_form,
            meaning: draft.meaning,
            sentence: draft.sentence,
            cloze_sentence: draft.cloze_sentence.unwrap_or_default(),
            streak: 0,
            last_seen: None,
            weight: DEFAULT_WEIGHT,
            total_attempts: 0,
            total_correct: 0,
            is_graduated: false,
        }
    }

    /// The string a correct answer must equal.
    pub fn answer_text(&self) -> &str {
        if self.answer_form.trim().is_empty() {
            &self.lemma
        } else {
            &self.answer_form
        }
    }

    /// Lowercased lemma, the merge key.
    pub fn key(&self) -> String {
        self.lemma.trim().to_lowercase()
    }

    /// Whether the word has ever been attempted.
    pub fn is_started(&self) -> bool {
        self.total_attempts > 0
    }

    /// Restore the default learning state, keeping id and content.
    pub fn reset_progress(&mut self) {
        self.streak = 0;
        self.last_seen = None;
        self.weight = DEFAULT_WEIGHT;
        self.total_attempts = 0;
        self.total_correct = 0;
        self.is_graduated = false;
    }

    /// Check the record invariants that make it usable as a quiz item.
    ///
    /// The answer form must occur in the sentence once a sentence is set.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| EngineError::InvalidRecord {
            lemma: self.lemma.clone(),
            reason: reason.to_string(),
        };

        if self.lemma.trim().is_empty() {
            return Err(invalid("lemma is empty"));
        }
        let answer = self.answer_text();
        if answer.trim().is_empty() {
            return Err(invalid("answer form is empty"));
        }
        // A blank sentence is content still to be filled in.
        if !self.sentence.trim().is_empty()
            && !self.sentence.to_lowercase().contains(&answer.to_lowercase())
        {
            return Err(invalid(&format!(
                "answer form '{}' does not occur in the example sentence",
                answer
            )));
        }
        if self.total_correct > self.total_attempts {
            return Err(invalid("total_correct exceeds total_attempts"));
        }
        if !self.weight.is_finite() || self.weight < 0.0 {
            return Err(invalid("weight must be a non-negative number"));
        }
        Ok(())
    }
}

/// Imported word content with no learning state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftWord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "word")]
    pub lemma: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer_form: Option<String>,
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloze_sentence: Option<String>,
}

impl DraftWord {
    pub fn new(lemma: impl Into<String>) -> Self {
        Self {
            lemma: lemma.into(),
            ..Default::default()
        }
    }

    pub fn key(&self) -> String {
        self.lemma.trim().to_lowercase()
    }
}

/// One line of a plain-text word list, before any enrichment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawWord {
    #[serde(rename = "word")]
    pub lemma: String,
    pub meaning: String,
    pub sentence: String,
}

/// Engine tunables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineSettings {
    pub graduation_streak: u32,
    pub miss_weight_increment: f64,
    pub streak_after_miss: u32,
    pub default_weight: f64,
    /// Words seen more than this many days ago are cold.
    pub cold_after_days: i64,
    /// Share of a session drawn from the cold pool.
    pub cold_share: f64,
    pub wrong_options: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            graduation_streak: GRADUATION_STREAK,
            miss_weight_increment: 0.1,
            streak_after_miss: 1,
            default_weight: DEFAULT_WEIGHT,
            cold_after_days: 3,
            cold_share: 0.75,
            wrong_options: 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> WordRecord {
        WordRecord::from_draft(
            "w1".to_string(),
            DraftWord {
                answer_form: Some("suis".to_string()),
                meaning: "to be".to_string(),
                sentence: "Je suis content.".to_string(),
                cloze_sentence: Some("Je ___ content.".to_string()),
                ..DraftWord::new("être")
            },
        )
    }

    #[test]
    fn draft_gets_default_learning_state() {
        let word = sample();
        assert_eq!(word.streak, 0);
        assert_eq!(word.weight, DEFAULT_WEIGHT);
        assert_eq!(word.total_attempts, 0);
        assert_eq!(word.total_correct, 0);
        assert!(!word.is_graduated);
        assert_eq!(word.last_seen, None);
    }

    #[test]
    fn answer_form_defaults_to_lemma() {
        let word = WordRecord::from_draft("w2".to_string(), DraftWord::new("chat"));
        assert_eq!(word.answer_form, "chat");
        assert_eq!(word.answer_text(), "chat");
    }

    #[test]
    fn validate_accepts_form_in_sentence_ignoring_case() {
        let mut word = sample();
        word.sentence = "SUIS-je prêt ?".to_string();
        assert!(word.validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_answer_form() {
        let mut word = sample();
        word.sentence = "No sentence available.".to_string();
        let err = word.validate().unwrap_err();
        assert!(matches!(err, EngineError::InvalidRecord { ref lemma, .. } if lemma == "être"));
    }

    #[test]
    fn validate_accepts_blank_sentence() {
        let mut word = sample();
        word.sentence = "  ".to_string();
        assert!(word.validate().is_ok());
    }

    #[test]
    fn validate_rejects_inconsistent_counters() {
        let mut word = sample();
        word.total_correct = 2;
        word.total_attempts = 1;
        assert!(word.validate().is_err());
    }

    #[test]
    fn reset_keeps_content() {
        let mut word = sample();
        word.streak = 5;
        word.is_graduated = true;
        word.weight = 1.3;
        word.total_attempts = 9;
        word.total_correct = 7;
        word.last_seen = NaiveDate::from_ymd_opt(2024, 3, 1);

        word.reset_progress();

        assert_eq!(word, sample());
    }

    #[test]
    fn last_seen_is_serialized_as_null() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("last_seen").unwrap().is_null());
        assert_eq!(json["word"], "être");
    }

    #[test]
    fn missing_stats_use_defaults_on_read() {
        let json = r#"{"id":"a","word":"chat","sentence":"Le chat dort."}"#;
        let word: WordRecord = serde_json::from_str(json).unwrap();
        assert_eq!(word.weight, DEFAULT_WEIGHT);
        assert_eq!(word.total_attempts, 0);
        assert_eq!(word.last_seen, None);
    }
}
