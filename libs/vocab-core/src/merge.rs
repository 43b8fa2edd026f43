//! Dataset merging.
//!
//! Reconciles a saved collection with newly imported drafts. Records are
//! keyed by lowercase lemma; whatever is already in the collection keeps its
//! learning history and a re-imported draft for the same lemma is dropped.

use indexmap::map::Entry;
use indexmap::IndexMap;
use uuid::Uuid;

use crate::cloze::make_cloze;
use crate::error::EngineError;
use crate::types::{DraftWord, WordRecord};

/// Outcome of a merge with bookkeeping for the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeReport {
    pub words: Vec<WordRecord>,
    pub added: usize,
    pub skipped: usize,
    /// Drafts left out because they failed [`WordRecord::validate`].
    pub rejected: Vec<EngineError>,
}

/// Merge drafts into an existing collection.
///
/// Order is the existing records in their original order, then new drafts in
/// input order. Duplicate lemmas within `drafts` keep the first occurrence.
/// Should `existing` itself repeat a lemma, the later record replaces the
/// earlier one in place. Drafts that fail validation are dropped; use
/// [`merge_with_report`] to see them.
pub fn merge(existing: &[WordRecord], drafts: &[DraftWord]) -> Vec<WordRecord> {
    merge_with_report(existing, drafts).words
}

/// Same as [`merge`], also counting inserted and discarded drafts.
///
/// Inserted drafts get an id when they carry none, an answer form defaulting
/// to the lemma, and a cloze sentence when none was supplied. Each candidate
/// record must pass [`WordRecord::validate`]; one that fails is reported in
/// `rejected` and the rest of the batch still merges. Existing records are
/// trusted.
pub fn merge_with_report(existing: &[WordRecord], drafts: &[DraftWord]) -> MergeReport {
    let mut map: IndexMap<String, WordRecord> = IndexMap::with_capacity(existing.len() + drafts.len());
    // A repeated lemma in `existing` keeps its first slot and its last value.
    for word in existing {
        map.insert(word.key(), word.clone());
    }

    let mut added = 0;
    let mut skipped = 0;
    let mut rejected = Vec::new();

    for draft in drafts {
        match map.entry(draft.key()) {
            Entry::Occupied(entry) => {
                tracing::debug!(lemma = %draft.lemma, kept = %entry.get().id, "lemma already present, draft discarded");
                skipped += 1;
            }
            Entry::Vacant(entry) => {
                let record = build_record(draft.clone());
                match record.validate() {
                    Ok(()) => {
                        entry.insert(record);
                        added += 1;
                    }
                    Err(e) => {
                        tracing::warn!(lemma = %draft.lemma, error = %e, "draft rejected");
                        rejected.push(e);
                    }
                }
            }
        }
    }

    MergeReport {
        words: map.into_values().collect(),
        added,
        skipped,
        rejected,
    }
}

fn build_record(draft: DraftWord) -> WordRecord {
    let id = match draft.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => Uuid::new_v4().to_string(),
    };
    let mut record = WordRecord::from_draft(id, draft);
    if record.cloze_sentence.trim().is_empty() {
        if let Some(cloze) = make_cloze(&record.sentence, record.answer_text()) {
            record.cloze_sentence = cloze;
        }
    }
    record
}
