//! Submission entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use surveykit_core::types::{DbId, Timestamp};

/// A row from the `submissions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: DbId,
    pub survey_id: DbId,
    /// True while the respondent may still resume and overwrite.
    pub unfinished: bool,
    /// Opaque resume token; present only while `unfinished` is true.
    pub unfinished_token: Option<Uuid>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new submission.
#[derive(Debug, Clone)]
pub struct CreateSubmission {
    pub survey_id: DbId,
    pub unfinished: bool,
    pub unfinished_token: Option<Uuid>,
}
