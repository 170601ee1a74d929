//! Repository for the `survey_sections` table.
//!
//! Read-only: section definitions are owned by the survey-editing
//! subsystem, the submission engine only looks them up.

use surveykit_core::submission::section::SectionMap;
use surveykit_core::types::DbId;

use crate::models::section::SectionRecord;
use crate::DbError;

const COLUMNS: &str = "id, survey_id, kind, title, required, min_answers, max_answers, \
    options, subjects, classes, display_order";

/// Provides section metadata lookups.
pub struct SectionRepo;

impl SectionRepo {
    /// Load a survey's section metadata, keyed by section id in display
    /// order. An empty map means the survey does not exist (or has no
    /// questions, which callers treat the same way).
    pub async fn map_by_survey(
        executor: impl sqlx::PgExecutor<'_>,
        survey_id: DbId,
    ) -> Result<SectionMap, DbError> {
        let query = format!(
            "SELECT {COLUMNS} FROM survey_sections
             WHERE survey_id = $1
             ORDER BY display_order, id"
        );
        let records = sqlx::query_as::<_, SectionRecord>(&query)
            .bind(survey_id)
            .fetch_all(executor)
            .await?;

        let mut sections = SectionMap::with_capacity(records.len());
        for record in records {
            let info = record.into_core()?;
            sections.insert(info.id, info);
        }
        Ok(sections)
    }
}
