//! Practice session endpoints
//!
//! Sessions live on the client. The service picks the words, scores each
//! answer against the stored record and saves it at once, so an abandoned
//! session keeps the progress made so far.

use axum::{extract::State, Extension, Json};

use vocab_core::{check_answer, select_by_ids, ProgressAlgorithm};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedDevice;
use crate::routes::words::ensure_found;
use crate::AppState;

/// POST /api/session
pub async fn start(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Json(payload): Json<SessionRequest>,
) -> Result<Json<SessionResponse>> {
    let count = session_size(payload.count, state.config.default_session_size)?;
    let words = state.db.get_words(auth.device_id).await?;
    let today = state.today();

    let selected = state
        .selector()
        .select(&words, count, today, &mut rand::rng())?;

    tracing::info!(
        device_id = %auth.device_id,
        requested = count,
        selected = selected.len(),
        "Started session"
    );

    Ok(Json(SessionResponse {
        words: selected,
        today,
    }))
}

/// POST /api/session/custom
pub async fn custom(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Json(payload): Json<CustomSessionRequest>,
) -> Result<Json<SessionResponse>> {
    if payload.word_ids.is_empty() {
        return Err(ApiError::BadRequest("word_ids must not be empty".to_string()));
    }

    let words = state.db.get_words(auth.device_id).await?;
    let selected = select_by_ids(&words, &payload.word_ids);

    Ok(Json(SessionResponse {
        words: selected,
        today: state.today(),
    }))
}

/// POST /api/session/answer
pub async fn answer(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
    Json(payload): Json<AnswerRequest>,
) -> Result<Json<AnswerResponse>> {
    let _guard = state.write_lock.lock().await;

    let word = state
        .db
        .get_word(auth.device_id, &payload.word_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Word {}", payload.word_id)))?;

    let was_correct = match (payload.chosen.as_deref(), payload.was_correct) {
        (Some(chosen), _) => check_answer(&word, chosen),
        (None, Some(verdict)) => verdict,
        (None, None) => {
            return Err(ApiError::BadRequest(
                "Either chosen or was_correct is required".to_string(),
            ))
        }
    };

    let updated = state
        .algorithm()
        .record_answer(&word, was_correct, state.today());
    let stored = state.db.update_word(auth.device_id, &updated).await?;
    ensure_found(stored, &updated.id)?;

    tracing::debug!(
        device_id = %auth.device_id,
        word_id = %updated.id,
        was_correct,
        streak = updated.streak,
        weight = updated.weight,
        "Recorded answer"
    );

    Ok(Json(AnswerResponse {
        correct_answer: word.answer_text().to_string(),
        word: updated,
        was_correct,
    }))
}

/// POST /api/session/summary
pub async fn summary(Json(payload): Json<SummaryRequest>) -> Json<SessionSummary> {
    Json(SessionSummary::from_records(&payload.started, &payload.finished))
}

/// Requested session size, or the configured default when none was given.
fn session_size(requested: Option<i64>, default: usize) -> Result<usize> {
    match requested {
        None => Ok(default),
        Some(n) if n > 0 => Ok(n as usize),
        Some(n) => Err(ApiError::BadRequest(format!(
            "count must be at least 1, got {}",
            n
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_size_default() {
        assert_eq!(session_size(None, 10).unwrap(), 10);
    }

    #[test]
    fn test_session_size_explicit() {
        assert_eq!(session_size(Some(4), 10).unwrap(), 4);
    }

    #[test]
    fn test_session_size_rejects_zero_and_negative() {
        assert!(matches!(session_size(Some(0), 10), Err(ApiError::BadRequest(_))));
        assert!(matches!(session_size(Some(-2), 10), Err(ApiError::BadRequest(_))));
    }
}
