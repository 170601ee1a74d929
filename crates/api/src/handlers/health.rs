//! Health check handler.

use axum::extract::State;
use axum::Json;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /healthz
///
/// Reports database connectivity.
pub async fn healthz(State(state): State<AppState>) -> AppResult<Json<serde_json::Value>> {
    surveykit_db::health_check(&state.pool)
        .await
        .map_err(AppError::Database)?;
    Ok(Json(serde_json::json!({ "status": "ok" })))
}
