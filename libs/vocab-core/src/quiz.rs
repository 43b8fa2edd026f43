//! Multiple-choice question building and answer checking.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::enrich::TextGenerator;
use crate::types::WordRecord;

/// Used when neither the collection nor the generator can supply decoys.
pub const PLACEHOLDER_OPTIONS: [&str; 3] = ["dire", "faire", "aller"];

/// A question ready to show: the cloze prompt and shuffled options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub word_id: String,
    pub prompt: String,
    pub meaning: String,
    pub options: Vec<String>,
    pub correct: String,
    /// Where the wrong options came from.
    pub source: OptionSource,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionSource {
    Collection,
    Generator,
    Placeholder,
}

/// Build the question for `target`.
///
/// Wrong options are other lemmas from the collection when at least
/// `wrong_count` distinct ones exist. Otherwise the generator is asked, and if
/// it fails or returns nothing usable the fixed placeholders are used. The
/// correct answer appears exactly once.
pub fn build_question<R: Rng + ?Sized>(
    target: &WordRecord,
    collection: &[WordRecord],
    wrong_count: usize,
    generator: &dyn TextGenerator,
    rng: &mut R,
) -> QuizQuestion {
    let correct = target.answer_text().to_string();

    let mut candidates: Vec<String> = Vec::new();
    for word in collection.iter().filter(|w| w.id != target.id) {
        push_distinct(&mut candidates, &word.lemma, &correct);
    }

    let (wrong, source) = if candidates.len() >= wrong_count {
        let picked = candidates
            .choose_multiple(rng, wrong_count)
            .cloned()
            .collect();
        (picked, OptionSource::Collection)
    } else {
        generated_or_placeholder(&correct, wrong_count, generator)
    };

    let mut options = Vec::with_capacity(wrong.len() + 1);
    options.push(correct.clone());
    options.extend(wrong);
    options.shuffle(rng);

    let prompt = if target.cloze_sentence.trim().is_empty() {
        target.sentence.clone()
    } else {
        target.cloze_sentence.clone()
    };

    QuizQuestion {
        word_id: target.id.clone(),
        prompt,
        meaning: target.meaning.clone(),
        options,
        correct,
        source,
    }
}

fn generated_or_placeholder(
    correct: &str,
    wrong_count: usize,
    generator: &dyn TextGenerator,
) -> (Vec<String>, OptionSource) {
    match generator.distractors(correct, wrong_count) {
        Ok(generated) => {
            let mut wrong = Vec::new();
            for option in &generated {
                push_distinct(&mut wrong, option, correct);
            }
            wrong.truncate(wrong_count);
            if !wrong.is_empty() {
                return (wrong, OptionSource::Generator);
            }
            tracing::warn!(answer = correct, "generator returned no usable distractors");
        }
        Err(e) => {
            tracing::warn!(answer = correct, error = %e, "distractor generation failed");
        }
    }

    let mut wrong = Vec::new();
    for option in PLACEHOLDER_OPTIONS {
        push_distinct(&mut wrong, option, correct);
    }
    wrong.truncate(wrong_count);
    (wrong, OptionSource::Placeholder)
}

/// Append `option` unless it is blank, already present, or the answer.
fn push_distinct(options: &mut Vec<String>, option: &str, correct: &str) {
    let option = option.trim();
    if option.is_empty() || option == correct || options.iter().any(|o| o == option) {
        return;
    }
    options.push(option.to_string());
}

/// Whether the chosen option is the word's answer.
///
/// Surrounding and repeated whitespace is ignored; case is significant.
pub fn check_answer(word: &WordRecord, chosen: &str) -> bool {
    normalize_whitespace(chosen) == normalize_whitespace(word.answer_text())
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
