//! Submission validation — pure logic, no database access.
//!
//! Two independent rule passes run over the full answer set before
//! anything may be persisted: the answer-limit pass (selection-count
//! bounds on checkbox-family questions) and the required pass. Both
//! passes always run; violations are collected, not short-circuited.

use serde::Serialize;

use crate::error::CoreError;
use crate::submission::answer::{AnswerEntry, AnswerValue, SelectionValue};
use crate::submission::section::{SectionInfo, SectionMap};
use crate::types::DbId;

/// Which rule a violation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationRule {
    Required,
    AnswerLimit,
}

/// A single rule violation, carrying the offending question id.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationViolation {
    pub section_id: DbId,
    pub rule: ViolationRule,
    pub message: String,
}

/// Aggregated result of validating one submission.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubmissionValidation {
    pub violations: Vec<ValidationViolation>,
}

impl SubmissionValidation {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Validate an answer set against a survey's section constraints.
///
/// Both rule passes see map sub-question answers as peers of the
/// top-level entries: a required section answered on any drawn geometry
/// counts as answered, and each per-geometry checkbox answer is checked
/// against the section's limits individually.
///
/// Data-integrity problems — an entry referencing an unknown section, a
/// payload whose type does not match the section's declared kind, or a
/// map answer nesting another map answer — are errors, not rule
/// violations: they indicate a broken client, not an incomplete
/// respondent.
pub fn validate_submission(
    entries: &[AnswerEntry],
    sections: &SectionMap,
) -> Result<SubmissionValidation, CoreError> {
    check_integrity(entries, sections)?;

    let all_entries = with_sub_answers(entries);
    let mut violations = Vec::new();

    // Answer-limit pass.
    for entry in &all_entries {
        let section = &sections[&entry.section_id];
        let Some(limits) = section.answer_limits else {
            continue;
        };
        let Some(count) = selection_count(&entry.value) else {
            continue;
        };
        if let Some(min) = limits.min {
            if count < min as usize {
                violations.push(limit_violation(section, count, &limits));
                continue;
            }
        }
        if let Some(max) = limits.max {
            if count > max as usize {
                violations.push(limit_violation(section, count, &limits));
            }
        }
    }

    // Required pass. Runs regardless of answer-limit outcomes.
    for section in sections.values().filter(|s| s.required) {
        let answered = all_entries
            .iter()
            .filter(|e| e.section_id == section.id)
            .any(|e| is_answered(&e.value));
        if !answered {
            violations.push(ValidationViolation {
                section_id: section.id,
                rule: ViolationRule::Required,
                message: format!("question {} requires an answer", section.id),
            });
        }
    }

    Ok(SubmissionValidation { violations })
}

/// Top-level entries plus every map entry's sub-question answers, in
/// encounter order. Nesting stops at one level (`check_integrity`
/// rejects deeper map answers before this runs).
fn with_sub_answers(entries: &[AnswerEntry]) -> Vec<&AnswerEntry> {
    let mut all = Vec::with_capacity(entries.len());
    for entry in entries {
        all.push(entry);
        if let AnswerValue::Map(map_answers) = &entry.value {
            for map_answer in map_answers {
                all.extend(map_answer.sub_question_answers.iter());
            }
        }
    }
    all
}

fn check_integrity(entries: &[AnswerEntry], sections: &SectionMap) -> Result<(), CoreError> {
    for entry in entries {
        if !sections.contains_key(&entry.section_id) {
            return Err(CoreError::BadRequest(format!(
                "answer references unknown section {}",
                entry.section_id
            )));
        }
        if let AnswerValue::Map(map_answers) = &entry.value {
            for map_answer in map_answers {
                for sub in &map_answer.sub_question_answers {
                    if !sections.contains_key(&sub.section_id) {
                        return Err(CoreError::BadRequest(format!(
                            "sub-question answer references unknown section {}",
                            sub.section_id
                        )));
                    }
                    if matches!(sub.value, AnswerValue::Map(_)) {
                        return Err(CoreError::BadRequest(format!(
                            "map answer for section {} nests another map answer",
                            entry.section_id
                        )));
                    }
                }
            }
        }
    }
    Ok(())
}

fn limit_violation(
    section: &SectionInfo,
    count: usize,
    limits: &crate::submission::section::AnswerLimits,
) -> ValidationViolation {
    let bounds = match (limits.min, limits.max) {
        (Some(min), Some(max)) => format!("between {min} and {max}"),
        (Some(min), None) => format!("at least {min}"),
        (None, Some(max)) => format!("at most {max}"),
        (None, None) => "any number of".to_string(),
    };
    ValidationViolation {
        section_id: section.id,
        rule: ViolationRule::AnswerLimit,
        message: format!(
            "question {} requires {bounds} selections, got {count}",
            section.id
        ),
    }
}

/// Count the selected values on a checkbox-family answer, excluding
/// empty-string placeholders. Returns `None` for kinds the answer-limit
/// rule does not apply to.
fn selection_count(value: &AnswerValue) -> Option<usize> {
    match value {
        AnswerValue::Checkbox(selections) | AnswerValue::GroupedCheckbox(selections) => Some(
            selections
                .iter()
                .filter(|s| match s {
                    SelectionValue::OptionId(_) => true,
                    SelectionValue::Other(text) => !text.is_empty(),
                })
                .count(),
        ),
        _ => None,
    }
}

/// The required rule's emptiness check.
///
/// A numeric `0` is an answer; only a null scalar, empty string, or
/// empty array is emptiness. Matrix and sorting answers use the same
/// generic non-empty-array check — there is no per-subject completeness
/// requirement.
fn is_answered(value: &AnswerValue) -> bool {
    match value {
        AnswerValue::FreeText(text) => !text.is_empty(),
        AnswerValue::Radio(selection) => match selection {
            Some(SelectionValue::Other(text)) => !text.is_empty(),
            Some(SelectionValue::OptionId(_)) => true,
            None => false,
        },
        AnswerValue::Checkbox(selections) | AnswerValue::GroupedCheckbox(selections) => {
            !selections.is_empty()
        }
        AnswerValue::Numeric(number) => number.is_some(),
        AnswerValue::Slider(_) => true,
        AnswerValue::Sorting(order) => !order.is_empty(),
        AnswerValue::Matrix(cells) => !cells.is_empty(),
        AnswerValue::Attachment(files) => !files.is_empty(),
        AnswerValue::Map(map_answers) => !map_answers.is_empty(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
