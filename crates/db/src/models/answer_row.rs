//! Answer row model (`answer_entries` table).

use sqlx::FromRow;

use surveykit_core::error::CoreError;
use surveykit_core::submission::codec::StoredAnswerRow;
use surveykit_core::types::DbId;

/// A row from the `answer_entries` table as sqlx reads it. The geometry
/// column comes back as GeoJSON text (`ST_AsGeoJSON`) and is parsed into
/// a JSON value by [`AnswerRowRecord::into_core`].
#[derive(Debug, Clone, FromRow)]
pub struct AnswerRowRecord {
    pub id: DbId,
    pub submission_id: DbId,
    pub section_id: DbId,
    pub parent_entry_id: Option<DbId>,
    pub value_text: Option<String>,
    pub value_option_id: Option<DbId>,
    pub value_geometry: Option<String>,
    pub value_numeric: Option<f64>,
    pub value_json: Option<String>,
    pub value_file: Option<String>,
    pub value_file_name: Option<String>,
}

impl AnswerRowRecord {
    /// Convert into the core row shape the codec and exporters operate on.
    pub fn into_core(self) -> Result<StoredAnswerRow, CoreError> {
        let value_geometry = match self.value_geometry {
            Some(text) => Some(serde_json::from_str(&text).map_err(|e| {
                CoreError::Internal(format!(
                    "stored geometry for row {} is not valid GeoJSON: {e}",
                    self.id
                ))
            })?),
            None => None,
        };
        Ok(StoredAnswerRow {
            id: self.id,
            submission_id: self.submission_id,
            section_id: self.section_id,
            parent_entry_id: self.parent_entry_id,
            value_text: self.value_text,
            value_option_id: self.value_option_id,
            value_geometry,
            value_numeric: self.value_numeric,
            value_json: self.value_json,
            value_file: self.value_file,
            value_file_name: self.value_file_name,
        })
    }
}
