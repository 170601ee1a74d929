//! Repository for the `submissions` table.

use uuid::Uuid;

use surveykit_core::types::DbId;

use crate::models::submission::{CreateSubmission, Submission};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, survey_id, unfinished, unfinished_token, created_at, updated_at";

/// Provides submission lifecycle operations.
pub struct SubmissionRepo;

impl SubmissionRepo {
    /// Insert a new submission, returning the created row.
    pub async fn create(
        executor: impl sqlx::PgExecutor<'_>,
        input: &CreateSubmission,
    ) -> Result<Submission, sqlx::Error> {
        let query = format!(
            "INSERT INTO submissions (survey_id, unfinished, unfinished_token)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(input.survey_id)
            .bind(input.unfinished)
            .bind(input.unfinished_token)
            .fetch_one(executor)
            .await
    }

    /// Find a submission by its resume token.
    pub async fn find_by_token(
        executor: impl sqlx::PgExecutor<'_>,
        token: Uuid,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM submissions WHERE unfinished_token = $1");
        sqlx::query_as::<_, Submission>(&query)
            .bind(token)
            .fetch_optional(executor)
            .await
    }

    /// Finalize a previously unfinished submission: clear the resume
    /// token so the draft can no longer be overwritten.
    pub async fn finish(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Submission>, sqlx::Error> {
        let query = format!(
            "UPDATE submissions
             SET unfinished = FALSE, unfinished_token = NULL, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Submission>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Bump `updated_at` on a resumed draft.
    pub async fn touch(
        executor: impl sqlx::PgExecutor<'_>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE submissions SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await
            .map(|_| ())
    }
}
