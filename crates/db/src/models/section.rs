//! Survey section (question) metadata model.

use std::collections::HashMap;

use sqlx::FromRow;

use surveykit_core::error::CoreError;
use surveykit_core::submission::section::{AnswerLimits, SectionInfo, SectionKind};
use surveykit_core::types::DbId;

/// A row from the `survey_sections` table.
#[derive(Debug, Clone, FromRow)]
pub struct SectionRecord {
    pub id: DbId,
    pub survey_id: DbId,
    pub kind: String,
    pub title: String,
    pub required: bool,
    pub min_answers: Option<i32>,
    pub max_answers: Option<i32>,
    /// Option id → label, keys stored as strings (JSONB object keys).
    pub options: serde_json::Value,
    /// Array of subject label strings.
    pub subjects: serde_json::Value,
    /// Class id → label.
    pub classes: serde_json::Value,
    pub display_order: i32,
}

impl SectionRecord {
    /// Convert into the core metadata shape.
    pub fn into_core(self) -> Result<SectionInfo, CoreError> {
        let kind = SectionKind::from_str(&self.kind).ok_or_else(|| {
            CoreError::Internal(format!(
                "section {} has unknown kind '{}'",
                self.id, self.kind
            ))
        })?;

        let raw_options: HashMap<String, String> =
            serde_json::from_value(self.options).unwrap_or_default();
        let mut options = HashMap::with_capacity(raw_options.len());
        for (key, label) in raw_options {
            let id: DbId = key.parse().map_err(|_| {
                CoreError::Internal(format!(
                    "section {} has non-numeric option id '{key}'",
                    self.id
                ))
            })?;
            options.insert(id, label);
        }

        let answer_limits = if self.min_answers.is_some() || self.max_answers.is_some() {
            Some(AnswerLimits {
                min: self.min_answers.map(|n| n.max(0) as u32),
                max: self.max_answers.map(|n| n.max(0) as u32),
            })
        } else {
            None
        };

        Ok(SectionInfo {
            id: self.id,
            kind,
            title: self.title,
            required: self.required,
            answer_limits,
            options,
            subjects: serde_json::from_value(self.subjects).unwrap_or_default(),
            classes: serde_json::from_value(self.classes).unwrap_or_default(),
        })
    }
}
