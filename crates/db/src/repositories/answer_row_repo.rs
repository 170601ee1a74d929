//! Repository for the `answer_entries` table.
//!
//! Persisting a submission is a two-pass write: the top-level batch is
//! inserted first so the database assigns row ids, then each map row's
//! sub-question answers are encoded against that generated id and
//! inserted. Parent rows are always in the transaction before any child
//! row references them.

use sqlx::{PgConnection, Postgres, Transaction};

use surveykit_core::error::CoreError;
use surveykit_core::submission::answer::AnswerEntry;
use surveykit_core::submission::codec::{self, NewAnswerRow, StoredAnswerRow};
use surveykit_core::types::DbId;

use crate::models::answer_row::AnswerRowRecord;
use crate::DbError;

/// Column list shared across read queries; the geometry column is
/// projected back to GeoJSON text.
const COLUMNS: &str = "id, submission_id, section_id, parent_entry_id, value_text, \
    value_option_id, ST_AsGeoJSON(value_geometry) AS value_geometry, value_numeric, \
    value_json, value_file, value_file_name";

/// Provides answer-row persistence for the submission engine.
pub struct AnswerRowRepo;

impl AnswerRowRepo {
    /// Encode and insert a full answer set for a submission.
    ///
    /// Runs inside the caller's transaction so a failed write never
    /// leaves a partial row set behind. Validation must have passed
    /// before this is called; nothing here re-checks business rules.
    pub async fn save_entries(
        tx: &mut Transaction<'_, Postgres>,
        submission_id: DbId,
        entries: &[AnswerEntry],
    ) -> Result<(), DbError> {
        let batch = codec::encode(submission_id, entries, None)?;
        let ids = Self::insert_batch(&mut **tx, &batch.rows, batch.srid).await?;

        for (index, sub_entries) in &batch.sub_answers {
            let parent_id = ids.get(*index).copied().ok_or_else(|| {
                CoreError::Internal(format!(
                    "insert returned no id for map row {index} of submission {submission_id}"
                ))
            })?;
            let sub_batch = codec::encode(submission_id, sub_entries, Some(parent_id))?;
            Self::insert_batch(&mut **tx, &sub_batch.rows, sub_batch.srid).await?;
        }

        tracing::debug!(
            submission_id,
            rows = batch.rows.len(),
            map_parents = batch.sub_answers.len(),
            "Answer rows stored"
        );
        Ok(())
    }

    /// Insert a batch of rows, returning the generated ids in row order.
    ///
    /// When `srid` is set, geometries are tagged with that coordinate
    /// system; otherwise the column default applies.
    pub async fn insert_batch(
        conn: &mut PgConnection,
        rows: &[NewAnswerRow],
        srid: Option<i32>,
    ) -> Result<Vec<DbId>, DbError> {
        let mut ids = Vec::with_capacity(rows.len());
        for row in rows {
            let geometry_json = row
                .value_geometry
                .as_ref()
                .map(|g| g.to_string());
            let id: DbId = sqlx::query_scalar(
                "INSERT INTO answer_entries
                    (submission_id, section_id, parent_entry_id, value_text, value_option_id,
                     value_geometry, value_numeric, value_json, value_file, value_file_name)
                 VALUES ($1, $2, $3, $4, $5,
                         CASE
                             WHEN $6::text IS NULL THEN NULL
                             WHEN $7::int4 IS NULL THEN ST_GeomFromGeoJSON($6)
                             ELSE ST_SetSRID(ST_GeomFromGeoJSON($6), $7)
                         END,
                         $8, $9, $10, $11)
                 RETURNING id",
            )
            .bind(row.submission_id)
            .bind(row.section_id)
            .bind(row.parent_entry_id)
            .bind(&row.value_text)
            .bind(row.value_option_id)
            .bind(geometry_json)
            .bind(srid)
            .bind(row.value_numeric)
            .bind(&row.value_json)
            .bind(&row.value_file)
            .bind(&row.value_file_name)
            .fetch_one(&mut *conn)
            .await?;
            ids.push(id);
        }
        Ok(ids)
    }

    /// Delete every answer row of a submission (batch replace on resume).
    pub async fn delete_by_submission(
        executor: impl sqlx::PgExecutor<'_>,
        submission_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM answer_entries WHERE submission_id = $1")
            .bind(submission_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// Fetch the complete row set of one submission, in insertion order.
    pub async fn list_by_submission(
        executor: impl sqlx::PgExecutor<'_>,
        submission_id: DbId,
    ) -> Result<Vec<StoredAnswerRow>, DbError> {
        let query = format!(
            "SELECT {COLUMNS} FROM answer_entries WHERE submission_id = $1 ORDER BY id"
        );
        let records = sqlx::query_as::<_, AnswerRowRecord>(&query)
            .bind(submission_id)
            .fetch_all(executor)
            .await?;
        records
            .into_iter()
            .map(|r| r.into_core().map_err(DbError::from))
            .collect()
    }

    /// Fetch the rows of every finished submission of a survey, grouped
    /// by submission in insertion order. Unfinished drafts are excluded
    /// from exports.
    pub async fn list_finished_by_survey(
        executor: impl sqlx::PgExecutor<'_>,
        survey_id: DbId,
    ) -> Result<Vec<StoredAnswerRow>, DbError> {
        let query = format!(
            "SELECT {} FROM answer_entries e
             JOIN submissions s ON s.id = e.submission_id
             WHERE s.survey_id = $1 AND NOT s.unfinished
             ORDER BY e.submission_id, e.id",
            prefixed_columns("e")
        );
        let records = sqlx::query_as::<_, AnswerRowRecord>(&query)
            .bind(survey_id)
            .fetch_all(executor)
            .await?;
        records
            .into_iter()
            .map(|r| r.into_core().map_err(DbError::from))
            .collect()
    }
}

/// `COLUMNS` with a table alias prefix for joined queries.
fn prefixed_columns(alias: &str) -> String {
    format!(
        "{alias}.id, {alias}.submission_id, {alias}.section_id, {alias}.parent_entry_id, \
         {alias}.value_text, {alias}.value_option_id, \
         ST_AsGeoJSON({alias}.value_geometry) AS value_geometry, {alias}.value_numeric, \
         {alias}.value_json, {alias}.value_file, {alias}.value_file_name"
    )
}
