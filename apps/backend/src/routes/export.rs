//! Progress export and backup endpoints

use axum::{
    extract::State,
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::IntoResponse,
    Extension, Json,
};

use crate::error::{ApiError, Result};
use crate::models::BackupResponse;
use crate::routes::auth::AuthenticatedDevice;
use crate::services::backup::ProgressSnapshot;
use crate::AppState;

/// GET /api/export
/// Downloads the collection as a progress file
pub async fn download(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<impl IntoResponse> {
    let words = state.db.get_words(auth.device_id).await?;
    let snapshot = ProgressSnapshot::new(&words, state.today())?;

    let disposition = format!("attachment; filename=\"vocab_{}\"", snapshot.file_name);

    Ok((
        [
            (CONTENT_TYPE, "application/json".to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        snapshot.content,
    ))
}

/// POST /api/export/backup
/// Uploads the collection to object storage
pub async fn backup(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<BackupResponse>> {
    let storage = state
        .storage
        .as_ref()
        .ok_or_else(|| ApiError::Storage("Backup storage is not configured".to_string()))?;

    let words = state.db.get_words(auth.device_id).await?;
    let snapshot = ProgressSnapshot::new(&words, state.today())?;
    let key = snapshot.object_key(&auth.device_id.to_string());

    storage
        .upload_file(&key, snapshot.content.as_bytes(), Some("application/json"))
        .await?;

    let record = state
        .db
        .record_backup(auth.device_id, &key, &snapshot.content_hash, snapshot.word_count)
        .await?;

    Ok(Json(BackupResponse {
        key,
        content_hash: snapshot.content_hash,
        word_count: snapshot.word_count,
        created_at: record.created_at,
    }))
}
