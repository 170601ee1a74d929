//! Bidirectional mapping between answer entries and flat storage rows.
//!
//! `encode` expands one submission's polymorphic answer set into
//! normalized rows; `decode` folds the rows back into the same answer
//! structure, recursing through map-answer sub-questions. Both are pure:
//! the persistence layer owns id assignment and threads generated parent
//! ids through the pending sub-answer lists `encode` exposes.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde_json::{json, Value};

use crate::error::CoreError;
use crate::submission::answer::{
    AnswerEntry, AnswerValue, FileAttachment, MapAnswer, MapSelectionType, SelectionValue,
};
use crate::submission::section::SectionKind;
use crate::types::DbId;

/// A storage row ready for insertion. The id is assigned by the database.
///
/// Exactly one value column is populated per row, except for the
/// all-null placeholder a visited-but-empty checkbox answer produces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewAnswerRow {
    pub submission_id: DbId,
    pub section_id: DbId,
    pub parent_entry_id: Option<DbId>,
    pub value_text: Option<String>,
    pub value_option_id: Option<DbId>,
    /// GeoJSON geometry object (not the enclosing feature).
    pub value_geometry: Option<Value>,
    pub value_numeric: Option<f64>,
    /// JSON-serialized array (sorting and matrix answers).
    pub value_json: Option<String>,
    pub value_file: Option<String>,
    pub value_file_name: Option<String>,
}

/// A persisted storage row read back from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAnswerRow {
    pub id: DbId,
    pub submission_id: DbId,
    pub section_id: DbId,
    pub parent_entry_id: Option<DbId>,
    pub value_text: Option<String>,
    pub value_option_id: Option<DbId>,
    pub value_geometry: Option<Value>,
    pub value_numeric: Option<f64>,
    pub value_json: Option<String>,
    pub value_file: Option<String>,
    pub value_file_name: Option<String>,
}

/// Result of encoding one batch of entries.
#[derive(Debug)]
pub struct EncodedBatch {
    pub rows: Vec<NewAnswerRow>,
    /// Map-answer sub-questions, keyed by index into `rows`. Once the
    /// insert returns generated ids, the caller re-encodes each list
    /// with that row's id as `parent_entry_id` — parent rows must be in
    /// the database before any child row references them.
    pub sub_answers: HashMap<usize, Vec<AnswerEntry>>,
    /// SRID declared by the first map geometry in the batch. `None`
    /// means the storage default coordinate system applies.
    pub srid: Option<i32>,
}

/// Expand answer entries into storage rows.
///
/// Row counts per entry: scalar kinds produce exactly one row; checkbox
/// kinds one row per selected value (or a single all-null placeholder
/// for an empty selection); attachments one row per file (zero rows when
/// empty); map answers one row per drawn geometry.
pub fn encode(
    submission_id: DbId,
    entries: &[AnswerEntry],
    parent_entry_id: Option<DbId>,
) -> Result<EncodedBatch, CoreError> {
    let mut rows = Vec::new();
    let mut sub_answers = HashMap::new();
    let mut srid = None;
    let mut first_geometry_seen = false;

    let blank = |section_id: DbId| NewAnswerRow {
        submission_id,
        section_id,
        parent_entry_id,
        ..NewAnswerRow::default()
    };

    for entry in entries {
        match &entry.value {
            AnswerValue::FreeText(text) => {
                rows.push(NewAnswerRow {
                    value_text: Some(text.clone()),
                    ..blank(entry.section_id)
                });
            }
            AnswerValue::Radio(selection) => {
                let mut row = blank(entry.section_id);
                if let Some(selection) = selection {
                    apply_selection(&mut row, selection);
                }
                rows.push(row);
            }
            AnswerValue::Checkbox(selections) | AnswerValue::GroupedCheckbox(selections) => {
                if selections.is_empty() {
                    // Placeholder row: the question was visited with
                    // nothing selected, which is distinct from no row
                    // at all.
                    rows.push(blank(entry.section_id));
                } else {
                    for selection in selections {
                        let mut row = blank(entry.section_id);
                        apply_selection(&mut row, selection);
                        rows.push(row);
                    }
                }
            }
            AnswerValue::Numeric(number) => {
                rows.push(NewAnswerRow {
                    value_numeric: *number,
                    ..blank(entry.section_id)
                });
            }
            AnswerValue::Slider(number) => {
                rows.push(NewAnswerRow {
                    value_numeric: Some(*number),
                    ..blank(entry.section_id)
                });
            }
            AnswerValue::Sorting(option_ids) => {
                rows.push(NewAnswerRow {
                    value_json: Some(to_json_string(option_ids)?),
                    ..blank(entry.section_id)
                });
            }
            AnswerValue::Matrix(cells) => {
                rows.push(NewAnswerRow {
                    value_json: Some(to_json_string(cells)?),
                    ..blank(entry.section_id)
                });
            }
            AnswerValue::Attachment(files) => {
                for file in files {
                    rows.push(NewAnswerRow {
                        value_file: Some(file.file_content.clone()),
                        value_file_name: Some(file.file_name.clone()),
                        ..blank(entry.section_id)
                    });
                }
            }
            AnswerValue::Map(map_answers) => {
                for map_answer in map_answers {
                    if map_answer
                        .sub_question_answers
                        .iter()
                        .any(|sub| matches!(sub.value, AnswerValue::Map(_)))
                    {
                        return Err(CoreError::BadRequest(format!(
                            "map answer for section {} nests another map answer",
                            entry.section_id
                        )));
                    }
                    if !first_geometry_seen {
                        first_geometry_seen = true;
                        srid = extract_srid(&map_answer.geometry)?;
                    }
                    let index = rows.len();
                    rows.push(NewAnswerRow {
                        value_geometry: Some(feature_geometry(&map_answer.geometry)),
                        ..blank(entry.section_id)
                    });
                    if !map_answer.sub_question_answers.is_empty() {
                        sub_answers.insert(index, map_answer.sub_question_answers.clone());
                    }
                }
            }
        }
    }

    Ok(EncodedBatch {
        rows,
        sub_answers,
        srid,
    })
}

/// Fold storage rows back into answer entries.
///
/// The caller supplies the complete row set for a submission; filtering
/// by `parent_entry_id` happens here, including for the recursive calls
/// that rebuild map-answer sub-questions. Rows alone do not carry the
/// schema, so the section id → kind lookup comes from the caller.
pub fn decode(
    rows: &[StoredAnswerRow],
    kinds: &HashMap<DbId, SectionKind>,
    parent_entry_id: Option<DbId>,
) -> Result<Vec<AnswerEntry>, CoreError> {
    // Group in first-seen row order so decode output is deterministic.
    let mut grouped: IndexMap<DbId, Vec<&StoredAnswerRow>> = IndexMap::new();
    for row in rows.iter().filter(|r| r.parent_entry_id == parent_entry_id) {
        grouped.entry(row.section_id).or_default().push(row);
    }

    let mut entries = Vec::with_capacity(grouped.len());
    for (section_id, section_rows) in grouped {
        let kind = kinds.get(&section_id).copied().ok_or_else(|| {
            CoreError::BadRequest(format!("answer row references unknown section {section_id}"))
        })?;
        let value = decode_section(kind, &section_rows, rows, kinds)?;
        entries.push(AnswerEntry { section_id, value });
    }
    Ok(entries)
}

fn decode_section(
    kind: SectionKind,
    section_rows: &[&StoredAnswerRow],
    all_rows: &[StoredAnswerRow],
    kinds: &HashMap<DbId, SectionKind>,
) -> Result<AnswerValue, CoreError> {
    let first = section_rows[0];
    match kind {
        SectionKind::FreeText => Ok(AnswerValue::FreeText(
            first.value_text.clone().unwrap_or_default(),
        )),
        SectionKind::Radio => Ok(AnswerValue::Radio(read_selection(first))),
        SectionKind::Checkbox | SectionKind::GroupedCheckbox => {
            // All-null placeholder rows contribute nothing to the array
            // but still establish that the section was answered.
            let selections = section_rows.iter().filter_map(|r| read_selection(r)).collect();
            if kind == SectionKind::Checkbox {
                Ok(AnswerValue::Checkbox(selections))
            } else {
                Ok(AnswerValue::GroupedCheckbox(selections))
            }
        }
        SectionKind::Numeric => Ok(AnswerValue::Numeric(first.value_numeric)),
        SectionKind::Slider => first.value_numeric.map(AnswerValue::Slider).ok_or_else(|| {
            CoreError::Internal(format!("slider row {} has no numeric value", first.id))
        }),
        SectionKind::Sorting => Ok(AnswerValue::Sorting(from_json_column(first)?)),
        SectionKind::Matrix => Ok(AnswerValue::Matrix(from_json_column(first)?)),
        SectionKind::Attachment => Ok(AnswerValue::Attachment(
            section_rows
                .iter()
                .map(|r| FileAttachment {
                    file_name: r.value_file_name.clone().unwrap_or_default(),
                    file_content: r.value_file.clone().unwrap_or_default(),
                })
                .collect(),
        )),
        SectionKind::Map => {
            let mut map_answers = Vec::with_capacity(section_rows.len());
            for row in section_rows {
                let geometry = row.value_geometry.clone().ok_or_else(|| {
                    CoreError::Internal(format!("map row {} has no geometry value", row.id))
                })?;
                let geometry_type = geometry
                    .get("type")
                    .and_then(Value::as_str)
                    .unwrap_or_default();
                let selection_type = MapSelectionType::from_geojson_type(geometry_type)
                    .ok_or_else(|| {
                        CoreError::Internal(format!(
                            "map row {} has unsupported geometry type '{geometry_type}'",
                            row.id
                        ))
                    })?;
                let sub_question_answers = decode(all_rows, kinds, Some(row.id))?;
                map_answers.push(MapAnswer {
                    selection_type,
                    geometry: json!({
                        "type": "Feature",
                        "geometry": geometry,
                        "properties": {},
                    }),
                    sub_question_answers,
                });
            }
            Ok(AnswerValue::Map(map_answers))
        }
    }
}

/// Split a selection into the text or option-id column. Option id `0`
/// is a real selection; only an absent selection leaves both columns
/// null, so presence checks below are explicit null checks.
fn apply_selection(row: &mut NewAnswerRow, selection: &SelectionValue) {
    match selection {
        SelectionValue::OptionId(id) => row.value_option_id = Some(*id),
        SelectionValue::Other(text) => row.value_text = Some(text.clone()),
    }
}

fn read_selection(row: &StoredAnswerRow) -> Option<SelectionValue> {
    if let Some(id) = row.value_option_id {
        Some(SelectionValue::OptionId(id))
    } else {
        row.value_text.clone().map(SelectionValue::Other)
    }
}

/// The GeoJSON geometry object inside a feature; a bare geometry passed
/// without the feature wrapper is stored as-is.
fn feature_geometry(feature: &Value) -> Value {
    feature
        .get("geometry")
        .cloned()
        .unwrap_or_else(|| feature.clone())
}

/// Pull the EPSG SRID out of a GeoJSON feature's `crs` member.
///
/// The `crs` object is accepted on the feature itself or on its
/// `geometry`; the identifier may be an OGC URN
/// (`urn:ogc:def:crs:EPSG::3067`) or a bare numeric string. A missing
/// `crs` is fine — the storage default applies — but a present,
/// unparseable one is an error.
fn extract_srid(feature: &Value) -> Result<Option<i32>, CoreError> {
    let name = feature
        .get("crs")
        .or_else(|| feature.get("geometry").and_then(|g| g.get("crs")))
        .and_then(|crs| crs.get("properties"))
        .and_then(|props| props.get("name"))
        .and_then(Value::as_str);
    let Some(name) = name else {
        return Ok(None);
    };
    let code = name.rsplit(':').next().unwrap_or(name);
    code.parse::<i32>().map(Some).map_err(|_| {
        CoreError::BadRequest(format!("unrecognized geometry CRS identifier '{name}'"))
    })
}

fn to_json_string<T: serde::Serialize>(value: &T) -> Result<String, CoreError> {
    serde_json::to_string(value)
        .map_err(|e| CoreError::Internal(format!("failed to serialize answer value: {e}")))
}

fn from_json_column<T: serde::de::DeserializeOwned>(
    row: &StoredAnswerRow,
) -> Result<T, CoreError> {
    let json = row.value_json.as_deref().ok_or_else(|| {
        CoreError::Internal(format!("row {} has no serialized array value", row.id))
    })?;
    serde_json::from_str(json).map_err(|e| {
        CoreError::Internal(format!("row {} has a malformed array value: {e}", row.id))
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    const SUBMISSION: DbId = 100;

    fn kinds() -> HashMap<DbId, SectionKind> {
        HashMap::from([
            (1, SectionKind::FreeText),
            (2, SectionKind::Radio),
            (3, SectionKind::Checkbox),
            (4, SectionKind::GroupedCheckbox),
            (5, SectionKind::Numeric),
            (6, SectionKind::Slider),
            (7, SectionKind::Sorting),
            (8, SectionKind::Matrix),
            (9, SectionKind::Attachment),
            (10, SectionKind::Map),
            (11, SectionKind::FreeText),
        ])
    }

    /// Simulate the persistence layer: assign sequential ids to the
    /// batch, then encode and "insert" each pending sub-answer list with
    /// its parent's generated id.
    fn persist(entries: &[AnswerEntry]) -> Vec<StoredAnswerRow> {
        let batch = encode(SUBMISSION, entries, None).unwrap();
        let mut next_id = 1;
        let mut stored = Vec::new();
        let mut parents = Vec::new();
        for (index, row) in batch.rows.iter().enumerate() {
            stored.push(store(row, next_id));
            if let Some(sub) = batch.sub_answers.get(&index) {
                parents.push((next_id, sub.clone()));
            }
            next_id += 1;
        }
        for (parent_id, sub_entries) in parents {
            let sub_batch = encode(SUBMISSION, &sub_entries, Some(parent_id)).unwrap();
            assert!(sub_batch.sub_answers.is_empty());
            for row in &sub_batch.rows {
                stored.push(store(row, next_id));
                next_id += 1;
            }
        }
        stored
    }

    fn store(row: &NewAnswerRow, id: DbId) -> StoredAnswerRow {
        StoredAnswerRow {
            id,
            submission_id: row.submission_id,
            section_id: row.section_id,
            parent_entry_id: row.parent_entry_id,
            value_text: row.value_text.clone(),
            value_option_id: row.value_option_id,
            value_geometry: row.value_geometry.clone(),
            value_numeric: row.value_numeric,
            value_json: row.value_json.clone(),
            value_file: row.value_file.clone(),
            value_file_name: row.value_file_name.clone(),
        }
    }

    fn round_trip(entries: Vec<AnswerEntry>) -> Vec<AnswerEntry> {
        decode(&persist(&entries), &kinds(), None).unwrap()
    }

    fn point_feature(x: f64, y: f64) -> Value {
        json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [x, y] },
            "properties": {},
        })
    }

    // -- Round trips per section kind ----------------------------------------

    #[test]
    fn free_text_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 1,
            value: AnswerValue::FreeText("hello".into()),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn radio_option_id_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 2,
            value: AnswerValue::Radio(Some(SelectionValue::OptionId(0))),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn radio_other_text_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 2,
            value: AnswerValue::Radio(Some(SelectionValue::Other("my own words".into()))),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn checkbox_mixed_values_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 3,
            value: AnswerValue::Checkbox(vec![
                SelectionValue::OptionId(0),
                SelectionValue::OptionId(5),
                SelectionValue::Other("other".into()),
            ]),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn grouped_checkbox_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 4,
            value: AnswerValue::GroupedCheckbox(vec![SelectionValue::OptionId(2)]),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn numeric_round_trip_including_zero() {
        let entries = vec![AnswerEntry {
            section_id: 5,
            value: AnswerValue::Numeric(Some(0.0)),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn slider_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 6,
            value: AnswerValue::Slider(42.5),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn sorting_preserves_order() {
        let entries = vec![AnswerEntry {
            section_id: 7,
            value: AnswerValue::Sorting(vec![3, 1, 2]),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn matrix_preserves_subject_order_and_gaps() {
        let entries = vec![AnswerEntry {
            section_id: 8,
            value: AnswerValue::Matrix(vec![Some("1".into()), None, Some("3".into())]),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn attachment_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 9,
            value: AnswerValue::Attachment(vec![
                FileAttachment {
                    file_name: "a.png".into(),
                    file_content: "aGVsbG8=".into(),
                },
                FileAttachment {
                    file_name: "b.pdf".into(),
                    file_content: "d29ybGQ=".into(),
                },
            ]),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    #[test]
    fn map_round_trip() {
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Point,
                geometry: point_feature(24.9, 60.2),
                sub_question_answers: vec![],
            }]),
        }];
        assert_eq!(round_trip(entries.clone()), entries);
    }

    // -- Map nesting ---------------------------------------------------------

    #[test]
    fn map_sub_answers_attributed_to_matching_parent() {
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![
                MapAnswer {
                    selection_type: MapSelectionType::Point,
                    geometry: point_feature(1.0, 1.0),
                    sub_question_answers: vec![AnswerEntry {
                        section_id: 11,
                        value: AnswerValue::FreeText("first geometry".into()),
                    }],
                },
                MapAnswer {
                    selection_type: MapSelectionType::Point,
                    geometry: point_feature(2.0, 2.0),
                    sub_question_answers: vec![AnswerEntry {
                        section_id: 11,
                        value: AnswerValue::FreeText("second geometry".into()),
                    }],
                },
            ]),
        }];
        let decoded = round_trip(entries.clone());
        assert_eq!(decoded, entries);
    }

    #[test]
    fn nested_map_answer_rejected() {
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Point,
                geometry: point_feature(1.0, 1.0),
                sub_question_answers: vec![AnswerEntry {
                    section_id: 10,
                    value: AnswerValue::Map(vec![]),
                }],
            }]),
        }];
        let err = encode(SUBMISSION, &entries, None).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(_));
    }

    // -- Checkbox placeholder ------------------------------------------------

    #[test]
    fn empty_checkbox_produces_single_all_null_row() {
        let entries = vec![AnswerEntry {
            section_id: 3,
            value: AnswerValue::Checkbox(vec![]),
        }];
        let batch = encode(SUBMISSION, &entries, None).unwrap();
        assert_eq!(batch.rows.len(), 1);
        let row = &batch.rows[0];
        assert!(row.value_text.is_none());
        assert!(row.value_option_id.is_none());
        assert!(row.value_json.is_none());
    }

    #[test]
    fn empty_checkbox_decodes_to_empty_array_not_null_element() {
        let entries = vec![AnswerEntry {
            section_id: 3,
            value: AnswerValue::Checkbox(vec![]),
        }];
        let decoded = round_trip(entries);
        assert_eq!(
            decoded,
            vec![AnswerEntry {
                section_id: 3,
                value: AnswerValue::Checkbox(vec![]),
            }]
        );
    }

    // -- Row expansion shapes ------------------------------------------------

    #[test]
    fn checkbox_expands_one_row_per_selection() {
        let entries = vec![AnswerEntry {
            section_id: 3,
            value: AnswerValue::Checkbox(vec![
                SelectionValue::OptionId(1),
                SelectionValue::OptionId(2),
                SelectionValue::Other("x".into()),
            ]),
        }];
        let batch = encode(SUBMISSION, &entries, None).unwrap();
        assert_eq!(batch.rows.len(), 3);
        // Text and option id never share a row.
        for row in &batch.rows {
            assert!(row.value_text.is_none() || row.value_option_id.is_none());
        }
    }

    #[test]
    fn empty_attachment_produces_no_rows() {
        let entries = vec![AnswerEntry {
            section_id: 9,
            value: AnswerValue::Attachment(vec![]),
        }];
        let batch = encode(SUBMISSION, &entries, None).unwrap();
        assert!(batch.rows.is_empty());
    }

    #[test]
    fn map_row_stores_geometry_object_not_feature() {
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Point,
                geometry: point_feature(24.9, 60.2),
                sub_question_answers: vec![],
            }]),
        }];
        let batch = encode(SUBMISSION, &entries, None).unwrap();
        let geometry = batch.rows[0].value_geometry.as_ref().unwrap();
        assert_eq!(geometry["type"], "Point");
        assert!(geometry.get("properties").is_none());
    }

    // -- SRID handling -------------------------------------------------------

    #[test]
    fn srid_extracted_from_first_geometry_urn() {
        let mut feature = point_feature(330000.0, 6820000.0);
        feature["crs"] = json!({
            "type": "name",
            "properties": { "name": "urn:ogc:def:crs:EPSG::3067" },
        });
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Point,
                geometry: feature,
                sub_question_answers: vec![],
            }]),
        }];
        let batch = encode(SUBMISSION, &entries, None).unwrap();
        assert_eq!(batch.srid, Some(3067));
    }

    #[test]
    fn missing_crs_omits_srid_hint() {
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Point,
                geometry: point_feature(24.9, 60.2),
                sub_question_answers: vec![],
            }]),
        }];
        let batch = encode(SUBMISSION, &entries, None).unwrap();
        assert_eq!(batch.srid, None);
    }

    #[test]
    fn unparseable_crs_rejected() {
        let mut feature = point_feature(1.0, 1.0);
        feature["crs"] = json!({
            "type": "name",
            "properties": { "name": "not-a-crs" },
        });
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Point,
                geometry: feature,
                sub_question_answers: vec![],
            }]),
        }];
        let err = encode(SUBMISSION, &entries, None).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(_));
    }

    // -- Decode integrity ----------------------------------------------------

    #[test]
    fn decode_rejects_unknown_section() {
        let rows = persist(&[AnswerEntry {
            section_id: 1,
            value: AnswerValue::FreeText("x".into()),
        }]);
        let err = decode(&rows, &HashMap::new(), None).unwrap_err();
        assert_matches!(err, CoreError::BadRequest(_));
    }

    #[test]
    fn decode_filters_by_parent_entry_id() {
        let entries = vec![AnswerEntry {
            section_id: 10,
            value: AnswerValue::Map(vec![MapAnswer {
                selection_type: MapSelectionType::Line,
                geometry: json!({
                    "type": "Feature",
                    "geometry": { "type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]] },
                    "properties": {},
                }),
                sub_question_answers: vec![AnswerEntry {
                    section_id: 11,
                    value: AnswerValue::FreeText("along the road".into()),
                }],
            }]),
        }];
        let rows = persist(&entries);
        // Top-level decode must not surface the sub-question answer.
        let top = decode(&rows, &kinds(), None).unwrap();
        assert_eq!(top.len(), 1);
        assert_matches!(top[0].value, AnswerValue::Map(_));
    }
}
