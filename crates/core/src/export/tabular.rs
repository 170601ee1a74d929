//! Tabular (CSV) export of stored submissions.
//!
//! Folds a survey's answer rows into one record per submission. Matrix
//! questions expand into one synthetic column per subject; multi-valued
//! answers collapse into a single delimited cell; geometry-bearing rows
//! are excluded entirely (they belong to the geometry export).

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::CoreError;
use crate::submission::codec::StoredAnswerRow;
use crate::submission::section::{SectionInfo, SectionKind, SectionMap};
use crate::types::DbId;

/// Separator between the values of a multi-valued answer within one cell.
pub const MULTI_VALUE_DELIMITER: &str = "::";

/// Sentinel that replaces delimiter sequences occurring inside a label,
/// so the delimited cell stays unambiguous. The transform is
/// one-directional: CSV output is terminal and never re-ingested.
pub const DELIMITER_ESCAPE: &str = "//";

/// Leading column of every export.
pub const SUBMISSION_ID_HEADER: &str = "Submission ID";

/// One column of the export: the section it projects, the matrix subject
/// index when the section expands into synthetic columns, and the header
/// label.
#[derive(Debug, Clone)]
struct Column {
    section_id: DbId,
    subject: Option<usize>,
    header: String,
}

/// Project a survey's stored rows into a CSV string.
///
/// Returns `Ok(None)` when there are no rows — an unanswered survey is a
/// valid state, not an error.
pub fn to_csv(rows: &[StoredAnswerRow], sections: &SectionMap) -> Result<Option<String>, CoreError> {
    if rows.is_empty() {
        return Ok(None);
    }

    let columns = build_columns(sections);

    // Group non-geometry rows per submission, preserving row order.
    let mut by_submission: IndexMap<DbId, Vec<&StoredAnswerRow>> = IndexMap::new();
    for row in rows.iter().filter(|r| r.value_geometry.is_none()) {
        by_submission.entry(row.submission_id).or_default().push(row);
    }

    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut headers = Vec::with_capacity(columns.len() + 1);
    headers.push(SUBMISSION_ID_HEADER.to_string());
    headers.extend(columns.iter().map(|c| c.header.clone()));
    writer
        .write_record(&headers)
        .map_err(|e| CoreError::Internal(format!("failed to write CSV header: {e}")))?;

    for (submission_id, submission_rows) in &by_submission {
        let cells = fold_submission(submission_rows, sections)?;
        let mut record = Vec::with_capacity(columns.len() + 1);
        record.push(submission_id.to_string());
        for column in &columns {
            record.push(
                cells
                    .get(&(column.section_id, column.subject))
                    .cloned()
                    .unwrap_or_default(),
            );
        }
        writer
            .write_record(&record)
            .map_err(|e| CoreError::Internal(format!("failed to write CSV record: {e}")))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| CoreError::Internal(format!("failed to flush CSV output: {e}")))?;
    let csv = String::from_utf8(bytes)
        .map_err(|e| CoreError::Internal(format!("CSV output is not valid UTF-8: {e}")))?;
    Ok(Some(csv))
}

/// Build the header map in section display order. Map sections have no
/// tabular projection; matrix sections expand into one synthetic column
/// per subject, labeled `"<question title>: <subject label>"`.
fn build_columns(sections: &SectionMap) -> Vec<Column> {
    let mut columns = Vec::new();
    for section in sections.values() {
        match section.kind {
            SectionKind::Map => {}
            SectionKind::Matrix => {
                for (index, subject) in section.subjects.iter().enumerate() {
                    columns.push(Column {
                        section_id: section.id,
                        subject: Some(index),
                        header: format!("{}: {}", section.title, subject),
                    });
                }
            }
            _ => columns.push(Column {
                section_id: section.id,
                subject: None,
                header: section.title.clone(),
            }),
        }
    }
    columns
}

/// Fold one submission's rows into cell values keyed by
/// `(section id, matrix subject index)`.
fn fold_submission(
    rows: &[&StoredAnswerRow],
    sections: &SectionMap,
) -> Result<HashMap<(DbId, Option<usize>), String>, CoreError> {
    let mut grouped: IndexMap<DbId, Vec<&StoredAnswerRow>> = IndexMap::new();
    for row in rows {
        grouped.entry(row.section_id).or_default().push(row);
    }

    let mut cells = HashMap::new();
    for (section_id, section_rows) in grouped {
        let Some(section) = sections.get(&section_id) else {
            // Rows for sections no longer in the survey definition have
            // no column to land in.
            continue;
        };
        match section.kind {
            SectionKind::Matrix => {
                let row = section_rows[0];
                let answers: Vec<Option<String>> = parse_json_cell(row)?;
                for (index, class_id) in answers.iter().enumerate() {
                    let label = class_id
                        .as_ref()
                        .map(|id| class_label(section, id))
                        .unwrap_or_default();
                    cells.insert((section_id, Some(index)), label);
                }
            }
            _ => {
                let cell = format_cell(section, &section_rows)?;
                cells.insert((section_id, None), cell);
            }
        }
    }
    Ok(cells)
}

fn format_cell(section: &SectionInfo, rows: &[&StoredAnswerRow]) -> Result<String, CoreError> {
    let first = rows[0];
    match section.kind {
        // Scalar kinds can still land several rows in one cell: a map
        // sub-question produces one row per drawn geometry.
        SectionKind::FreeText => {
            let texts: Vec<String> = rows
                .iter()
                .filter_map(|r| r.value_text.as_deref())
                .map(escape_delimiter)
                .collect();
            Ok(texts.join(MULTI_VALUE_DELIMITER))
        }
        SectionKind::Radio | SectionKind::Checkbox | SectionKind::GroupedCheckbox => {
            let labels: Vec<String> = rows
                .iter()
                .filter(|r| r.value_option_id.is_some() || r.value_text.is_some())
                .map(|r| escape_delimiter(&selection_label(section, r)))
                .collect();
            Ok(labels.join(MULTI_VALUE_DELIMITER))
        }
        SectionKind::Numeric | SectionKind::Slider => {
            let numbers: Vec<String> = rows
                .iter()
                .filter_map(|r| r.value_numeric)
                .map(format_number)
                .collect();
            Ok(numbers.join(MULTI_VALUE_DELIMITER))
        }
        SectionKind::Sorting => {
            let order: Vec<DbId> = parse_json_cell(first)?;
            let labels: Vec<String> = order
                .iter()
                .map(|id| {
                    escape_delimiter(
                        &section
                            .options
                            .get(id)
                            .cloned()
                            .unwrap_or_else(|| id.to_string()),
                    )
                })
                .collect();
            Ok(labels.join(MULTI_VALUE_DELIMITER))
        }
        SectionKind::Attachment => {
            let names: Vec<String> = rows
                .iter()
                .filter_map(|r| r.value_file_name.as_deref())
                .map(escape_delimiter)
                .collect();
            Ok(names.join(MULTI_VALUE_DELIMITER))
        }
        // Matrix is handled by the caller; map rows never reach the
        // tabular export.
        SectionKind::Matrix | SectionKind::Map => Ok(String::new()),
    }
}

/// The localized label of a selected option, falling back to the row's
/// free-text value — this covers "other, please specify" answers.
fn selection_label(section: &SectionInfo, row: &StoredAnswerRow) -> String {
    row.value_option_id
        .and_then(|id| section.options.get(&id).cloned())
        .or_else(|| row.value_text.clone())
        .unwrap_or_default()
}

fn class_label(section: &SectionInfo, class_id: &str) -> String {
    section
        .classes
        .get(class_id)
        .cloned()
        .unwrap_or_else(|| class_id.to_string())
}

fn escape_delimiter(label: &str) -> String {
    label.replace(MULTI_VALUE_DELIMITER, DELIMITER_ESCAPE)
}

/// Whole numbers print without a trailing `.0` so option-id-like values
/// stay readable in spreadsheet tools.
fn format_number(number: f64) -> String {
    if number.fract() == 0.0 && number.abs() < 1e15 {
        format!("{}", number as i64)
    } else {
        number.to_string()
    }
}

fn parse_json_cell<T: serde::de::DeserializeOwned>(row: &StoredAnswerRow) -> Result<T, CoreError> {
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
