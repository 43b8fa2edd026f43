//! Collection statistics and settings endpoints

use axum::{extract::State, Extension, Json};

use crate::error::Result;
use crate::models::*;
use crate::routes::auth::AuthenticatedDevice;
use crate::AppState;

/// GET /api/stats
pub async fn stats(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedDevice>,
) -> Result<Json<StatsResponse>> {
    let words = state.db.get_words(auth.device_id).await?;
    let today = state.today();

    Ok(Json(StatsResponse {
        stats: CollectionStats::compute(&words, today),
        today,
    }))
}

/// GET /api/settings
pub async fn settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    Json(SettingsResponse {
        engine: state.config.engine.clone(),
        daily_reset_hour: state.config.daily_reset_hour,
        default_session_size: state.config.default_session_size,
    })
}
