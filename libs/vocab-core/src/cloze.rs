//! Cloze sentence construction.

use regex::{NoExpand, RegexBuilder};

use crate::types::CLOZE_BLANK;

/// Replace the first occurrence of `answer_form` in `sentence` with the blank.
///
/// Matching ignores case. Returns `None` when the form does not occur or is
/// blank.
pub fn make_cloze(sentence: &str, answer_form: &str) -> Option<String> {
    let form = answer_form.trim();
    if form.is_empty() {
        return None;
    }

    let pattern = RegexBuilder::new(&regex::escape(form))
        .case_insensitive(true)
        .build()
        .ok()?;

    if !pattern.is_match(sentence) {
        return None;
    }
    Some(pattern.replacen(sentence, 1, NoExpand(CLOZE_BLANK)).into_owned())
}

/// Whether the sentence contains the answer form, ignoring case.
pub fn contains_form(sentence: &str, answer_form: &str) -> bool {
    let form = answer_form.trim();
    !form.is_empty() && sentence.to_lowercase().contains(&form.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_inflected_form() {
        assert_eq!(
            make_cloze("Je suis content.", "suis").as_deref(),
            Some("Je ___ content.")
        );
    }

    #[test]
    fn matching_ignores_case() {
        assert_eq!(
            make_cloze("Être ou ne pas être.", "être").as_deref(),
            Some("___ ou ne pas être.")
        );
    }

    #[test]
    fn only_first_occurrence_replaced() {
        assert_eq!(
            make_cloze("le chat et le chat", "chat").as_deref(),
            Some("le ___ et le chat")
        );
    }

    #[test]
    fn special_characters_are_literal() {
        assert_eq!(
            make_cloze("Combien ($) ?", "($)").as_deref(),
            Some("Combien ___ ?")
        );
    }

    #[test]
    fn missing_form_gives_none() {
        assert_eq!(make_cloze("Le chien dort.", "chat"), None);
        assert_eq!(make_cloze("Le chien dort.", "  "), None);
    }

    #[test]
    fn contains_form_ignores_case() {
        assert!(contains_form("Le CHAT dort.", "chat"));
        assert!(!contains_form("Le chien dort.", "chat"));
    }
}
