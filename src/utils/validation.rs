//! Centralized validation of records entering the matching core.

use std::collections::HashSet;

use crate::core::types::{MarkSchemeEntry, Question};

/// Maximum number of questions or entries in one run; the assignment solve is
/// cubic in the larger list
pub const MAX_RECORDS: usize = 5_000;

/// Check whether a record count is within the allowed maximum.
///
/// Returns an error message if the limit is exceeded, None if the count is acceptable.
#[must_use]
pub fn check_record_limit(count: usize) -> Option<String> {
    if count > MAX_RECORDS {
        Some(format!(
            "Too many records: {count} exceeds maximum of {MAX_RECORDS}"
        ))
    } else {
        None
    }
}

/// Boundary validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Too many {kind}: {count} exceeds maximum of {MAX_RECORDS}")]
    TooManyRecords { kind: &'static str, count: usize },

    #[error("Question '{question_id}' has non-finite marks available: {value}")]
    NonFiniteMarks { question_id: String, value: f64 },
}

/// Validate questions before they enter the core.
///
/// Duplicate identifiers are allowed but logged.
///
/// # Errors
///
/// Returns `ValidationError::TooManyRecords` if the list exceeds [`MAX_RECORDS`],
/// or `ValidationError::NonFiniteMarks` for NaN or infinite marks.
pub fn validate_questions(questions: &[Question]) -> Result<(), ValidationError> {
    if check_record_limit(questions.len()).is_some() {
        return Err(ValidationError::TooManyRecords {
            kind: "questions",
            count: questions.len(),
        });
    }

    for q in questions {
        if let Some(marks) = q.marks_available {
            if !marks.is_finite() {
                return Err(ValidationError::NonFiniteMarks {
                    question_id: q.id.clone(),
                    value: marks,
                });
            }
        }
    }

    warn_duplicates("question", questions.iter().map(|q| q.id.as_str()));
    Ok(())
}

/// Validate mark-scheme entries before they enter the core.
///
/// # Errors
///
/// Returns `ValidationError::TooManyRecords` if the list exceeds [`MAX_RECORDS`].
pub fn validate_entries(entries: &[MarkSchemeEntry]) -> Result<(), ValidationError> {
    if check_record_limit(entries.len()).is_some() {
        return Err(ValidationError::TooManyRecords {
            kind: "mark scheme entries",
            count: entries.len(),
        });
    }

    warn_duplicates(
        "mark scheme entry",
        entries.iter().map(|e| e.identifier.as_str()),
    );
    Ok(())
}

fn warn_duplicates<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            tracing::warn!("Duplicate {kind} identifier '{id}'");
        }
    }
}
