//! Section (question) metadata consumed by the submission engine.
//!
//! The survey-definition subsystem owns this data; the engine only needs
//! the per-question type, constraint flags, and label lookups.

use std::collections::HashMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// The nine question types the submission engine stores answers for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    FreeText,
    Radio,
    Checkbox,
    GroupedCheckbox,
    Numeric,
    Slider,
    Sorting,
    Matrix,
    Attachment,
    Map,
}

impl SectionKind {
    /// All valid section kinds, in wire-string form.
    pub const ALL: &'static [&'static str] = &[
        "free-text",
        "radio",
        "checkbox",
        "grouped-checkbox",
        "numeric",
        "slider",
        "sorting",
        "matrix",
        "attachment",
        "map",
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::FreeText => "free-text",
            SectionKind::Radio => "radio",
            SectionKind::Checkbox => "checkbox",
            SectionKind::GroupedCheckbox => "grouped-checkbox",
            SectionKind::Numeric => "numeric",
            SectionKind::Slider => "slider",
            SectionKind::Sorting => "sorting",
            SectionKind::Matrix => "matrix",
            SectionKind::Attachment => "attachment",
            SectionKind::Map => "map",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "free-text" => Some(SectionKind::FreeText),
            "radio" => Some(SectionKind::Radio),
            "checkbox" => Some(SectionKind::Checkbox),
            "grouped-checkbox" => Some(SectionKind::GroupedCheckbox),
            "numeric" => Some(SectionKind::Numeric),
            "slider" => Some(SectionKind::Slider),
            "sorting" => Some(SectionKind::Sorting),
            "matrix" => Some(SectionKind::Matrix),
            "attachment" => Some(SectionKind::Attachment),
            "map" => Some(SectionKind::Map),
            _ => None,
        }
    }

    /// Whether this kind carries multiple selected values per answer.
    pub fn is_checkbox_family(&self) -> bool {
        matches!(self, SectionKind::Checkbox | SectionKind::GroupedCheckbox)
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selection-count bounds on a checkbox-family question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerLimits {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Everything the submission engine needs to know about one question.
#[derive(Debug, Clone)]
pub struct SectionInfo {
    pub id: DbId,
    pub kind: SectionKind,
    /// Localized question title, used for export headers and feature
    /// attribution.
    pub title: String,
    pub required: bool,
    pub answer_limits: Option<AnswerLimits>,
    /// Option id → localized label (choice and sorting questions).
    pub options: HashMap<DbId, String>,
    /// Matrix subject (row) labels, in display order.
    pub subjects: Vec<String>,
    /// Matrix class id → localized label.
    pub classes: HashMap<String, String>,
}

impl SectionInfo {
    /// A bare section with no constraints or labels; tests and callers
    /// fill in what they need.
    pub fn new(id: DbId, kind: SectionKind) -> Self {
        Self {
            id,
            kind,
            title: String::new(),
            required: false,
            answer_limits: None,
            options: HashMap::new(),
            subjects: Vec::new(),
            classes: HashMap::new(),
        }
    }
}

/// Section metadata for one survey, keyed by section id in display order.
pub type SectionMap = IndexMap<DbId, SectionInfo>;

/// Project a [`SectionMap`] down to the id → kind lookup the codec needs.
pub fn section_kinds(sections: &SectionMap) -> HashMap<DbId, SectionKind> {
    sections.iter().map(|(id, s)| (*id, s.kind)).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trip() {
        for s in SectionKind::ALL {
            let kind = SectionKind::from_str(s).unwrap();
            assert_eq!(kind.as_str(), *s);
        }
    }

    #[test]
    fn kind_unknown_returns_none() {
        assert!(SectionKind::from_str("dropdown").is_none());
    }

    #[test]
    fn kind_all_has_nine_question_types_plus_grouped_checkbox() {
        assert_eq!(SectionKind::ALL.len(), 10);
    }

    #[test]
    fn checkbox_family_membership() {
        assert!(SectionKind::Checkbox.is_checkbox_family());
        assert!(SectionKind::GroupedCheckbox.is_checkbox_family());
        assert!(!SectionKind::Radio.is_checkbox_family());
    }
}
