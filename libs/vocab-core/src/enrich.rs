//! Turning raw word lists into drafts.
//!
//! Filling in missing meanings, example sentences and decoy answers is the
//! job of an external text generator described by [`TextGenerator`]. This
//! module also provides the offline path used when no generator is
//! configured.

use crate::error::GenerationError;
use crate::types::{DraftWord, RawWord};

/// External collaborator that supplies generated text.
pub trait TextGenerator: Send + Sync {
    /// Complete a batch of raw words: meaning, part of speech, example
    /// sentence, answer form and cloze sentence.
    fn enrich(&self, raw: &[RawWord]) -> Result<Vec<DraftWord>, GenerationError>;

    /// Exactly `count` plausible wrong answers for `answer`.
    fn distractors(&self, answer: &str, count: usize) -> Result<Vec<String>, GenerationError>;
}

/// Generator that never reaches a service. Enrichment uses [`fill_defaults`]
/// and distractor requests always fail, so callers fall back to placeholders.
#[derive(Debug, Clone, Default)]
pub struct OfflineGenerator;

impl TextGenerator for OfflineGenerator {
    fn enrich(&self, raw: &[RawWord]) -> Result<Vec<DraftWord>, GenerationError> {
        Ok(raw.iter().map(fill_defaults).collect())
    }

    fn distractors(&self, _answer: &str, _count: usize) -> Result<Vec<String>, GenerationError> {
        Err(GenerationError::Unavailable("offline".to_string()))
    }
}

/// Minimal draft for a raw word without calling a generator.
///
/// A missing sentence becomes the lemma itself. When the sentence does not
/// contain the lemma, the closest inflected token is used as the answer form
/// if one shares a long enough prefix.
pub fn fill_defaults(raw: &RawWord) -> DraftWord {
    let lemma = raw.lemma.trim().to_string();
    let sentence = if raw.sentence.trim().is_empty() {
        lemma.clone()
    } else {
        raw.sentence.trim().to_string()
    };
    let answer_form = guess_answer_form(&lemma, &sentence);

    DraftWord {
        id: None,
        lemma,
        part_of_speech: None,
        answer_form,
        meaning: raw.meaning.trim().to_string(),
        sentence,
        cloze_sentence: None,
    }
}

/// Minimum shared prefix, in characters, for an inflected form to match.
const MIN_STEM: usize = 3;

/// The surface form of `lemma` used in `sentence`, if one can be found.
///
/// `None` means the lemma itself occurs in the sentence (or nothing usable
/// does); the draft then defaults its answer form to the lemma.
pub fn guess_answer_form(lemma: &str, sentence: &str) -> Option<String> {
    if sentence.to_lowercase().contains(&lemma.to_lowercase()) {
        return None;
    }

    let stem: Vec<char> = lemma.to_lowercase().chars().collect();
    sentence
        .split(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
        .filter(|token| !token.is_empty())
        .map(|token| (shared_prefix(&stem, token), token))
        .filter(|(shared, _)| *shared >= MIN_STEM)
        .max_by_key(|(shared, _)| *shared)
        .map(|(_, token)| token.to_string())
}

fn shared_prefix(stem: &[char], token: &str) -> usize {
    token
        .to_lowercase()
        .chars()
        .zip(stem.iter())
        .take_while(|(a, b)| a == *b)
        .count()
}
