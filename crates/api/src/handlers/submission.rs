//! Handlers for the `/surveys/{id}/submissions` and `/submissions`
//! resources: storing a respondent's answer set and resuming an
//! unfinished draft.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use uuid::Uuid;

use surveykit_core::error::CoreError;
use surveykit_core::submission::answer::AnswerEntry;
use surveykit_core::submission::codec;
use surveykit_core::submission::section::section_kinds;
use surveykit_core::submission::validate::validate_submission;
use surveykit_core::types::DbId;
use surveykit_db::models::submission::{CreateSubmission, Submission};
use surveykit_db::repositories::{AnswerRowRepo, SectionRepo, SubmissionRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for creating (or overwriting) a submission.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubmissionRequest {
    pub entries: Vec<AnswerEntry>,
    /// When true the submission is stored as a resumable draft and a
    /// resume token is returned.
    #[serde(default)]
    pub unfinished: bool,
    /// Resume token of a previously stored draft to overwrite.
    pub unfinished_token: Option<String>,
}

/// POST /api/v1/surveys/{survey_id}/submissions
///
/// Validate and store a full answer set. With `unfinished: true` the
/// answer set is stored as a draft and the response carries a resume
/// token; with a token in the body, the prior draft's rows are replaced.
/// Validation runs to completion before any row is written.
pub async fn create_submission(
    State(state): State<AppState>,
    Path(survey_id): Path<DbId>,
    Json(body): Json<CreateSubmissionRequest>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let sections = SectionRepo::map_by_survey(&state.pool, survey_id).await?;
    if sections.is_empty() {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Survey",
            key: survey_id.to_string(),
        }));
    }

    let validation = validate_submission(&body.entries, &sections).map_err(AppError::Core)?;
    if !validation.is_valid() {
        return Err(AppError::Validation(validation.violations));
    }

    let mut tx = state.pool.begin().await.map_err(AppError::Database)?;

    let submission = match &body.unfinished_token {
        Some(token) => {
            let token = parse_token(token)?;
            let submission = SubmissionRepo::find_by_token(&mut *tx, token)
                .await
                .map_err(AppError::Database)?
                .filter(|s| owned_by_survey(s, survey_id))
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "Submission",
                    key: token.to_string(),
                }))?;
            // Batch replace: a resubmission deletes the prior row set
            // and inserts a fresh one inside the same transaction.
            AnswerRowRepo::delete_by_submission(&mut *tx, submission.id)
                .await
                .map_err(AppError::Database)?;
            if body.unfinished {
                SubmissionRepo::touch(&mut *tx, submission.id)
                    .await
                    .map_err(AppError::Database)?;
                submission
            } else {
                SubmissionRepo::finish(&mut *tx, submission.id)
                    .await
                    .map_err(AppError::Database)?
                    .ok_or_else(|| {
                        AppError::InternalError(format!(
                            "submission {} vanished mid-transaction",
                            submission.id
                        ))
                    })?
            }
        }
        None => {
            let input = CreateSubmission {
                survey_id,
                unfinished: body.unfinished,
                unfinished_token: body.unfinished.then(Uuid::new_v4),
            };
            SubmissionRepo::create(&mut *tx, &input)
                .await
                .map_err(AppError::Database)?
        }
    };

    AnswerRowRepo::save_entries(&mut tx, submission.id, &body.entries).await?;
    tx.commit().await.map_err(AppError::Database)?;

    tracing::info!(
        submission_id = submission.id,
        survey_id,
        unfinished = body.unfinished,
        "Submission stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "data": { "token": submission.unfinished_token } })),
    ))
}

/// GET /api/v1/submissions/unfinished/{token}
///
/// Decode an unfinished draft's stored rows back into answer entries so
/// the client can restore the respondent's session.
pub async fn get_unfinished_entries(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let token = parse_token(&token)?;
    let submission = SubmissionRepo::find_by_token(&state.pool, token)
        .await
        .map_err(AppError::Database)?
        .filter(|s| s.unfinished)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Submission",
            key: token.to_string(),
        }))?;

    let sections = SectionRepo::map_by_survey(&state.pool, submission.survey_id).await?;
    let rows = AnswerRowRepo::list_by_submission(&state.pool, submission.id).await?;
    let entries = codec::decode(&rows, &section_kinds(&sections), None).map_err(AppError::Core)?;

    Ok(Json(serde_json::json!({ "data": entries })))
}

fn parse_token(token: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(token)
        .map_err(|_| AppError::BadRequest(format!("malformed resume token '{token}'")))
}

/// A resume token is only honored within the survey it was issued for;
/// presented at another survey's endpoint it behaves as unknown, so an
/// overwrite can never touch a different survey's rows.
fn owned_by_survey(submission: &Submission, survey_id: DbId) -> bool {
    submission.survey_id == survey_id
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
