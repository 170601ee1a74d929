//! Route definitions for the submission and export resources.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{export, submission};
use crate::state::AppState;

/// Routes mounted at `/api/v1`.
///
/// ```text
/// POST /surveys/{survey_id}/submissions      -> create_submission
/// GET  /surveys/{survey_id}/export/csv       -> export_csv
/// GET  /surveys/{survey_id}/export/geometry  -> export_geometry
/// GET  /submissions/unfinished/{token}       -> get_unfinished_entries
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/surveys/{survey_id}/submissions",
            post(submission::create_submission),
        )
        .route("/surveys/{survey_id}/export/csv", get(export::export_csv))
        .route(
            "/surveys/{survey_id}/export/geometry",
            get(export::export_geometry),
        )
        .route(
            "/submissions/unfinished/{token}",
            get(submission::get_unfinished_entries),
        )
}
