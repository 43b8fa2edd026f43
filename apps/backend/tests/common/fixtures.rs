//! Test fixtures and factory functions for creating test data.

#![allow(dead_code)]

use serde_json::json;

/// Create a device register request body.
pub fn device_register_request(name: Option<&str>) -> serde_json::Value {
    match name {
        Some(n) => json!({ "name": n }),
        None => json!({}),
    }
}

/// Raw word list with `count` lines of `word # meaning # sentence`.
pub fn raw_word_list(count: usize) -> String {
    (0..count)
        .map(|i| format!("mot{} # meaning {} # Je dis mot{} ici.", i, i, i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Import request from raw text.
pub fn import_raw_request(text: &str) -> serde_json::Value {
    json!({ "raw_text": text })
}

/// Import request from drafts.
pub fn import_drafts_request(drafts: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "drafts": drafts })
}

/// Import request that loads a progress file.
pub fn import_history_request(history: Vec<serde_json::Value>) -> serde_json::Value {
    json!({ "history": history })
}

/// A draft with the lemma as answer form.
pub fn draft(lemma: &str) -> serde_json::Value {
    json!({
        "word": lemma,
        "meaning": format!("meaning of {}", lemma),
        "sentence": format!("Il faut {} maintenant.", lemma),
    })
}

/// A saved record with learning history, as found in a progress file.
pub fn history_record(id: &str, lemma: &str, streak: u32, last_seen: Option<&str>) -> serde_json::Value {
    json!({
        "id": id,
        "word": lemma,
        "part_of_speech": "verb",
        "answer_form": lemma,
        "meaning": format!("meaning of {}", lemma),
        "sentence": format!("Il faut {} maintenant.", lemma),
        "cloze_sentence": "Il faut ___ maintenant.",
        "streak": streak,
        "last_seen": last_seen,
        "weight": 0.5,
        "total_attempts": streak,
        "total_correct": streak,
        "is_graduated": streak >= 5,
    })
}

/// Answer with a verdict.
pub fn answer_request(word_id: &str, was_correct: bool) -> serde_json::Value {
    json!({ "word_id": word_id, "was_correct": was_correct })
}

/// Answer with the option the learner picked.
pub fn chosen_answer_request(word_id: &str, chosen: &str) -> serde_json::Value {
    json!({ "word_id": word_id, "chosen": chosen })
}

/// Session start request.
pub fn session_request(count: Option<i64>) -> serde_json::Value {
    match count {
        Some(c) => json!({ "count": c }),
        None => json!({}),
    }
}
