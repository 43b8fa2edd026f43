//! Word list and progress file parsing.
//!
//! # Plain text format
//! ```text
//! être # to be # Je suis content.
//! chat # cat
//! aller
//! ```
//! One word per line, fields separated by `#`: lemma, meaning, example
//! sentence. Missing fields are left empty and blank lines are ignored.
//!
//! # Progress file
//! A JSON array of word records as written by [`export_history`].

use crate::error::ParseError;
use crate::types::{RawWord, WordRecord};

const FIELD_SEPARATOR: char = '#';

/// Parse a plain-text word list.
pub fn parse_raw(content: &str) -> Vec<RawWord> {
    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(parse_line)
        .collect()
}

fn parse_line(line: &str) -> Option<RawWord> {
    let mut fields = line.split(FIELD_SEPARATOR).map(str::trim);
    let lemma = fields.next().unwrap_or_default();
    if lemma.is_empty() {
        return None;
    }
    let meaning = fields.next().unwrap_or_default();
    let sentence = fields.next().unwrap_or_default();

    Some(RawWord {
        lemma: lemma.to_string(),
        meaning: meaning.to_string(),
        sentence: sentence.to_string(),
    })
}

/// Read a saved progress file.
///
/// Records missing an answer form get their lemma, so older files load
/// unchanged.
pub fn parse_history(content: &str) -> Result<Vec<WordRecord>, ParseError> {
    if content.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(ParseError::NotAnArray);
    }

    let mut words: Vec<WordRecord> = serde_json::from_value(value)?;
    for word in &mut words {
        if word.answer_form.trim().is_empty() {
            word.answer_form = word.lemma.clone();
        }
    }
    Ok(words)
}

/// Write the collection as a pretty-printed progress file.
pub fn export_history(words: &[WordRecord]) -> Result<String, ParseError> {
    Ok(serde_json::to_string_pretty(words)?)
}
