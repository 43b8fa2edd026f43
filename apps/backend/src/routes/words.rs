//! Word collection endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use std::collections::HashSet;

use vocab_core::cloze::make_cloze;
use vocab_core::{build_question, fill_defaults, merge_with_report, parse_raw, ProgressAlgorithm, RawWord, TextGenerator};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// GET /api/words
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<WordsResponse>> {
    let words = state.db.get_words(auth.device_id).await?;
    Ok(Json(WordsResponse { words }))
}

/// POST /api/words/import
///
/// A supplied history becomes the merge base in place of the stored
/// collection. Raw text and drafts are then merged onto it.
pub async fn import(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Json(payload): Json<ImportRequest>,
) -> Result<Json<ImportResponse>> {
    if payload.history.is_none() && payload.raw_text.is_none() && payload.drafts.is_none() {
        return Err(ApiError::BadRequest(
            "Import needs history, raw_text or drafts".to_string(),
        ));
    }

    let mut drafts = Vec::new();
    if let Some(text) = payload.raw_text.as_deref() {
        let raw = parse_raw(text);
        drafts.extend(enrich_raw(state.generator.as_ref(), &raw));
    }
    drafts.extend(payload.drafts.unwrap_or_default());

    let _guard = state.write_lock.lock().await;

    let base = match payload.history {
        Some(history) => {
            check_storable(&history)?;
            history
        }
        None => state.db.get_words(auth.device_id).await?,
    };

    let report = merge_with_report(&base, &drafts);
    check_storable(&report.words)?;
    state.db.replace_words(auth.device_id, &report.words).await?;

    tracing::info!(
        device_id = %auth.device_id,
        total = report.words.len(),
        added = report.added,
        skipped = report.skipped,
        rejected = report.rejected.len(),
        "Imported words"
    );

    Ok(Json(ImportResponse {
        rejected: report.rejected.iter().map(RejectedWord::from).collect(),
        words: report.words,
        added: report.added,
        skipped: report.skipped,
    }))
}

/// PUT /api/words/:id
pub async fn update(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(word_id): Path<String>,
    Json(payload): Json<UpdateWordRequest>,
) -> Result<Json<WordRecord>> {
    let _guard = state.write_lock.lock().await;

    let words = state.db.get_words(auth.device_id).await?;
    let current = words
        .iter()
        .find(|w| w.id == word_id)
        .ok_or_else(|| ApiError::NotFound(format!("Word {}", word_id)))?;

    let updated = apply_edit(current, payload);
    updated.validate()?;

    if words
        .iter()
        .any(|w| w.id != updated.id && w.key() == updated.key())
    {
        return Err(ApiError::Conflict(format!(
            "Word '{}' already exists",
            updated.lemma
        )));
    }

    let stored = state.db.update_word(auth.device_id, &updated).await?;
    ensure_found(stored, &word_id)?;
    Ok(Json(updated))
}

/// DELETE /api/words/:id
pub async fn delete(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(word_id): Path<String>,
) -> Result<StatusCode> {
    let _guard = state.write_lock.lock().await;

    let deleted = state.db.delete_word(auth.device_id, &word_id).await?;
    ensure_found(deleted, &word_id)?;
    tracing::info!(device_id = %auth.device_id, %word_id, "Deleted word");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/words/:id/reset
pub async fn reset_one(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(word_id): Path<String>,
) -> Result<Json<WordRecord>> {
    let _guard = state.write_lock.lock().await;

    let word = state
        .db
        .get_word(auth.device_id, &word_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word {}", word_id)))?;

    let reset = state.algorithm().reset(&word);
    let stored = state.db.update_word(auth.device_id, &reset).await?;
    ensure_found(stored, &word_id)?;
    Ok(Json(reset))
}

/// POST /api/words/reset
pub async fn reset_all(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<WordsResponse>> {
    let _guard = state.write_lock.lock().await;

    let algorithm = state.algorithm();
    let words: Vec<WordRecord> = state
        .db
        .get_words(auth.device_id)
        .await?
        .iter()
        .map(|w| algorithm.reset(w))
        .collect();

    state.db.replace_words(auth.device_id, &words).await?;
    tracing::info!(device_id = %auth.device_id, count = words.len(), "Reset all progress");

    Ok(Json(WordsResponse { words }))
}

/// GET /api/words/:id/options
pub async fn options(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Path(word_id): Path<String>,
) -> Result<Json<QuizQuestion>> {
    let words = state.db.get_words(auth.device_id).await?;
    let target = words
        .iter()
        .find(|w| w.id == word_id)
        .ok_or_else(|| ApiError::NotFound(format!("Word {}", word_id)))?;

    let question = build_question(
        target,
        &words,
        state.config.engine.wrong_options,
        state.generator.as_ref(),
        &mut rand::rng(),
    );

    Ok(Json(question))
}

/// Enrich raw words, falling back to offline defaults when the generator
/// fails or answers for a different number of words.
fn enrich_raw(generator: &dyn TextGenerator, raw: &[RawWord]) -> Vec<DraftWord> {
    if raw.is_empty() {
        return Vec::new();
    }
    match generator.enrich(raw) {
        Ok(drafts) if drafts.len() == raw.len() => drafts,
        Ok(drafts) => {
            tracing::warn!(
                expected = raw.len(),
                got = drafts.len(),
                "Generator returned a partial batch, using offline defaults"
            );
            raw.iter().map(fill_defaults).collect()
        }
        Err(e) => {
            tracing::warn!(error = %e, "Enrichment failed, using offline defaults");
            raw.iter().map(fill_defaults).collect()
        }
    }
}

/// Map a write that matched no row to `NotFound`.
pub(crate) fn ensure_found(affected: bool, word_id: &str) -> Result<()> {
    if affected {
        Ok(())
    } else {
        Err(ApiError::NotFound(format!("Word {}", word_id)))
    }
}

/// Reject collections the words table cannot hold.
fn check_storable(words: &[WordRecord]) -> Result<()> {
    let mut ids = HashSet::new();
    for word in words {
        if word.id.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("Word '{}' has no id", word.lemma)));
        }
        if !ids.insert(word.id.as_str()) {
            return Err(ApiError::BadRequest(format!("Duplicate word id {}", word.id)));
        }
        let max = i32::MAX as u32;
        if word.streak > max || word.total_attempts > max || word.total_correct > max {
            return Err(ApiError::BadRequest(format!(
                "Word '{}' has a counter above {}",
                word.lemma, max
            )));
        }
        if word.total_correct > word.total_attempts {
            return Err(ApiError::BadRequest(format!(
                "Word '{}' has more correct answers than attempts",
                word.lemma
            )));
        }
    }
    Ok(())
}

/// Apply content edits. The cloze sentence is rebuilt when the sentence or
/// answer changes and no cloze was supplied.
fn apply_edit(current: &WordRecord, edit: UpdateWordRequest) -> WordRecord {
    let mut word = current.clone();
    let mut rebuild_cloze = false;

    if let Some(lemma) = edit.word {
        word.lemma = lemma.trim().to_string();
    }
    if let Some(pos) = edit.part_of_speech {
        let pos = pos.trim().to_string();
        word.part_of_speech = (!pos.is_empty()).then_some(pos);
    }
    if let Some(form) = edit.answer_form {
        word.answer_form = form.trim().to_string();
        rebuild_cloze = true;
    }
    if let Some(meaning) = edit.meaning {
        word.meaning = meaning.trim().to_string();
    }
    if let Some(sentence) = edit.sentence {
        word.sentence = sentence.trim().to_string();
        rebuild_cloze = true;
    }

    match edit.cloze_sentence {
        Some(cloze) => word.cloze_sentence = cloze.trim().to_string(),
        None if rebuild_cloze => {
            word.cloze_sentence = make_cloze(&word.sentence, word.answer_text()).unwrap_or_default();
        }
        None => {}
    }

    word
}
