use std::path::Path;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::core::types::{MarkSchemeEntry, Question};
use crate::matching::scoring::ScoringWeights;
use crate::utils::validation::{validate_entries, validate_questions, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid document format: {0}")]
    InvalidFormat(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Parse a question document from a file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_questions_text`].
pub fn parse_questions_file(path: &Path) -> Result<Vec<Question>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_questions_text(&content)
}

/// Parse a question document: a JSON array of questions, or an object with a
/// `questions` array
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON or records,
/// `ParseError::InvalidFormat` if no question array is found, or
/// `ParseError::Validation` if the records fail boundary validation.
pub fn parse_questions_text(text: &str) -> Result<Vec<Question>, ParseError> {
    let questions: Vec<Question> = parse_records(text, "questions")?;
    validate_questions(&questions)?;
    Ok(questions)
}

/// Parse a mark-scheme document from a file
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or any error from
/// [`parse_mark_schemes_text`].
pub fn parse_mark_schemes_file(path: &Path) -> Result<Vec<MarkSchemeEntry>, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_mark_schemes_text(&content)
}

/// Parse a mark-scheme document: a JSON array of entries, or an object with a
/// `mark_schemes` array
///
/// # Errors
///
/// Returns `ParseError::Json` for malformed JSON or records,
/// `ParseError::InvalidFormat` if no entry array is found, or
/// `ParseError::Validation` if the records fail boundary validation.
pub fn parse_mark_schemes_text(text: &str) -> Result<Vec<MarkSchemeEntry>, ParseError> {
    let entries: Vec<MarkSchemeEntry> = parse_records(text, "mark_schemes")?;
    validate_entries(&entries)?;
    Ok(entries)
}

/// Load scoring weights from a JSON object; missing fields keep their defaults
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read or `ParseError::Json`
/// if it is not a valid weights object.
pub fn parse_weights_file(path: &Path) -> Result<ScoringWeights, ParseError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Extract the record array from the document root or from `key`
fn parse_records<T: DeserializeOwned>(text: &str, key: &str) -> Result<Vec<T>, ParseError> {
    let root: Value = serde_json::from_str(text)?;
    let records = match root {
        Value::Array(items) => Value::Array(items),
        Value::Object(mut map) => match map.remove(key) {
            Some(array @ Value::Array(_)) => array,
            Some(_) => {
                return Err(ParseError::InvalidFormat(format!(
                    "'{key}' must be an array"
                )))
            }
            None => {
                return Err(ParseError::InvalidFormat(format!(
                    "expected an array or an object with a '{key}' array"
                )))
            }
        },
        _ => {
            return Err(ParseError::InvalidFormat(format!(
                "expected an array or an object with a '{key}' array"
            )))
        }
    };
    Ok(serde_json::from_value(records)?)
}
