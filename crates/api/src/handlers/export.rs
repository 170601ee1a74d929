//! Handlers for the `/surveys/{id}/export` resources.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use surveykit_core::error::CoreError;
use surveykit_core::export::{geometry, tabular};
use surveykit_core::types::DbId;
use surveykit_db::repositories::{AnswerRowRepo, SectionRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/v1/surveys/{survey_id}/export/csv
///
/// Export every finished submission as CSV. Returns `text/csv`, or 204
/// when the survey has no stored answers — an empty survey is a valid
/// state, not an error.
pub async fn export_csv(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<Response> {
    let sections = SectionRepo::map_by_survey(&state.pool, survey_id).await?;
    if sections.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            key: survey_id.to_string(),
        }));
    }

    let rows = AnswerRowRepo::list_finished_by_survey(&state.pool, survey_id).await?;
    match tabular::to_csv(&rows, &sections).map_err(AppError::Core)? {
        Some(csv) => Ok((
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv")],
            csv,
        )
            .into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// GET /api/v1/surveys/{survey_id}/export/geometry
///
/// Export every finished submission's drawn geometries as a binary
/// stream produced by the configured geometry-format converter. Returns
/// 204 when no submission carries a geometry.
pub async fn export_geometry(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
) -> AppResult<Response> {
    let sections = SectionRepo::map_by_survey(&state.pool, survey_id).await?;
    if sections.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            key: survey_id.to_string(),
        }));
    }

    let rows = AnswerRowRepo::list_finished_by_survey(&state.pool, survey_id).await?;
    match geometry::to_feature_collection(&rows, &sections) {
        Some(collection) => {
            let bytes = state.converter.convert(&collection).map_err(AppError::Core)?;
            Ok((
                StatusCode::OK,
                [(header::CONTENT_TYPE, state.converter.content_type())],
                bytes,
            )
                .into_response())
        }
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}
