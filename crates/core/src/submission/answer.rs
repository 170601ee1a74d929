//! The answer model: one respondent's answer to one survey question.

use serde::{Deserialize, Serialize};

use crate::submission::section::SectionKind;
use crate::types::DbId;

/// One answer to one survey question.
///
/// Wire shape: `{ "sectionId": 7, "type": "radio", "value": 3 }` — the
/// `type`/`value` pair is the flattened [`AnswerValue`] union.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerEntry {
    /// Id of the question (section) this answer belongs to.
    pub section_id: DbId,
    #[serde(flatten)]
    pub value: AnswerValue,
}

/// The closed union of answer payloads, discriminated by question type.
///
/// `Map` is the only recursive variant, and only one nesting level is
/// permitted: a map answer's sub-question answers cannot themselves be
/// of type `map`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum AnswerValue {
    FreeText(String),
    Radio(Option<SelectionValue>),
    Checkbox(Vec<SelectionValue>),
    GroupedCheckbox(Vec<SelectionValue>),
    Numeric(Option<f64>),
    Slider(f64),
    /// Option ids in respondent-chosen order.
    Sorting(Vec<DbId>),
    /// One element per matrix subject: the selected class id, or `None`
    /// when the subject was left unanswered.
    Matrix(Vec<Option<String>>),
    Attachment(Vec<FileAttachment>),
    Map(Vec<MapAnswer>),
}

impl AnswerValue {
    /// The section kind this payload belongs to.
    pub fn kind(&self) -> SectionKind {
        match self {
            AnswerValue::FreeText(_) => SectionKind::FreeText,
            AnswerValue::Radio(_) => SectionKind::Radio,
            AnswerValue::Checkbox(_) => SectionKind::Checkbox,
            AnswerValue::GroupedCheckbox(_) => SectionKind::GroupedCheckbox,
            AnswerValue::Numeric(_) => SectionKind::Numeric,
            AnswerValue::Slider(_) => SectionKind::Slider,
            AnswerValue::Sorting(_) => SectionKind::Sorting,
            AnswerValue::Matrix(_) => SectionKind::Matrix,
            AnswerValue::Attachment(_) => SectionKind::Attachment,
            AnswerValue::Map(_) => SectionKind::Map,
        }
    }
}

/// A selected value on a choice question: either a known option id or a
/// free-form "other" answer.
///
/// Untagged so that a JSON number deserializes as an option id and a
/// JSON string as "other" text. The literal `0` is a valid option id and
/// must never be read as an empty selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectionValue {
    OptionId(DbId),
    Other(String),
}

/// One uploaded file on an attachment question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttachment {
    pub file_name: String,
    /// File payload, base64-encoded by the client.
    pub file_content: String,
}

/// One drawn geometry on a map question, with the answers to the
/// sub-questions asked about that geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MapAnswer {
    pub selection_type: MapSelectionType,
    /// GeoJSON feature as drawn on the map, optionally carrying an
    /// explicit `crs` member.
    pub geometry: serde_json::Value,
    #[serde(default)]
    pub sub_question_answers: Vec<AnswerEntry>,
}

/// The drawing tool a map geometry was created with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapSelectionType {
    Point,
    Line,
    Area,
}

impl MapSelectionType {
    /// Derive the selection type from a GeoJSON geometry `type` tag.
    ///
    /// This derivation — not a stored column — is the source of truth
    /// when reading geometries back out of storage.
    pub fn from_geojson_type(geometry_type: &str) -> Option<Self> {
        match geometry_type {
            "Point" => Some(MapSelectionType::Point),
            "LineString" => Some(MapSelectionType::Line),
            "Polygon" => Some(MapSelectionType::Area),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn radio_wire_shape_with_option_id() {
        let entry = AnswerEntry {
            section_id: 7,
            value: AnswerValue::Radio(Some(SelectionValue::OptionId(3))),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json, json!({ "sectionId": 7, "type": "radio", "value": 3 }));
    }

    #[test]
    fn radio_zero_option_id_is_a_selection() {
        let entry: AnswerEntry =
            serde_json::from_value(json!({ "sectionId": 1, "type": "radio", "value": 0 })).unwrap();
        assert_eq!(
            entry.value,
            AnswerValue::Radio(Some(SelectionValue::OptionId(0)))
        );
    }

    #[test]
    fn radio_string_value_is_other_text() {
        let entry: AnswerEntry = serde_json::from_value(
            json!({ "sectionId": 1, "type": "radio", "value": "something else" }),
        )
        .unwrap();
        assert_eq!(
            entry.value,
            AnswerValue::Radio(Some(SelectionValue::Other("something else".into())))
        );
    }

    #[test]
    fn checkbox_mixes_option_ids_and_other_text() {
        let entry: AnswerEntry = serde_json::from_value(
            json!({ "sectionId": 2, "type": "checkbox", "value": [1, "other answer", 0] }),
        )
        .unwrap();
        assert_eq!(
            entry.value,
            AnswerValue::Checkbox(vec![
                SelectionValue::OptionId(1),
                SelectionValue::Other("other answer".into()),
                SelectionValue::OptionId(0),
            ])
        );
    }

    #[test]
    fn grouped_checkbox_uses_kebab_case_tag() {
        let entry = AnswerEntry {
            section_id: 4,
            value: AnswerValue::GroupedCheckbox(vec![]),
        };
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "grouped-checkbox");
    }

    #[test]
    fn map_answer_round_trips_through_json() {
        let entry = AnswerEntry {
            section_id: 9,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Point,
                geometry: json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": [24.9, 60.2] },
                    "properties": {},
                }),
                sub_question_answers: vec![AnswerEntry {
                    section_id: 10,
                    value: AnswerValue::FreeText("a note".into()),
                }],
            }]),
        };
        let json = serde_json::to_value(&entry).unwrap();
        let back: AnswerEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }

    #[test]
    fn selection_type_derivation_from_geometry_type() {
        assert_eq!(
            MapSelectionType::from_geojson_type("Point"),
            Some(MapSelectionType::Point)
        );
        assert_eq!(
            MapSelectionType::from_geojson_type("LineString"),
            Some(MapSelectionType::Line)
        );
        assert_eq!(
            MapSelectionType::from_geojson_type("Polygon"),
            Some(MapSelectionType::Area)
        );
        assert_eq!(MapSelectionType::from_geojson_type("MultiPolygon"), None);
    }
}
