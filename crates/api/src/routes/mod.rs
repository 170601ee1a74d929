pub mod health;
pub mod submission;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /surveys/{survey_id}/submissions        POST   store answer set
/// /surveys/{survey_id}/export/csv         GET    tabular export
/// /surveys/{survey_id}/export/geometry    GET    geospatial export
/// /submissions/unfinished/{token}         GET    resume a draft
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(submission::router())
}
