use serde::{Deserialize, Deserializer, Serialize};

/// Question type that, paired with a `generic` mark scheme, raises the type hint signal
pub const MULTIPLE_CHOICE: &str = "multiple_choice";

/// Mark-scheme classification that, paired with a multiple-choice question, raises the
/// type hint signal
pub const GENERIC_SCHEME: &str = "generic";

/// A single assessment question, as produced by the upstream extraction pipeline.
///
/// Field names follow the canonical model; the extraction pipeline's names
/// (`question_id`, `question`, `total_marks_available`, `question_type`) are accepted
/// as aliases when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Full hierarchical identifier as printed in the paper (e.g. "2bii", "4.1")
    #[serde(alias = "question_id")]
    pub id: String,

    /// Question wording
    #[serde(alias = "question", default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Marks available, if stated
    #[serde(alias = "total_marks_available", default)]
    pub marks_available: Option<f64>,

    /// Question type label (e.g. "multiple_choice", "long_answer")
    #[serde(
        rename = "type",
        alias = "question_type",
        default,
        deserialize_with = "null_as_default"
    )]
    pub question_type: String,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            marks_available: None,
            question_type: String::new(),
        }
    }

    #[must_use]
    pub fn with_marks(mut self, marks: f64) -> Self {
        self.marks_available = Some(marks);
        self
    }

    #[must_use]
    pub fn with_type(mut self, question_type: impl Into<String>) -> Self {
        self.question_type = question_type.into();
        self
    }

    /// Trimmed question text used for similarity scoring
    #[must_use]
    pub fn comparable_text(&self) -> &str {
        self.text.trim()
    }
}

/// One entry of an ingested mark scheme.
///
/// `identifier` plays the same role as [`Question::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkSchemeEntry {
    #[serde(alias = "question_number")]
    pub identifier: String,

    /// Question wording reproduced in the mark scheme, if any
    #[serde(alias = "question_text", default)]
    pub text: Option<String>,

    #[serde(default)]
    pub marks_available: Option<u32>,

    /// Raw mark-scheme content, used when `text` is missing
    #[serde(alias = "mark_scheme_information", default)]
    pub raw_info: Option<String>,

    /// Scheme classification (e.g. "generic", "levelled", "rubric")
    #[serde(alias = "type", default, deserialize_with = "null_as_default")]
    pub classification: String,
}

impl MarkSchemeEntry {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            text: None,
            marks_available: None,
            raw_info: None,
            classification: String::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_raw_info(mut self, raw_info: impl Into<String>) -> Self {
        self.raw_info = Some(raw_info.into());
        self
    }

    #[must_use]
    pub fn with_marks(mut self, marks: u32) -> Self {
        self.marks_available = Some(marks);
        self
    }

    #[must_use]
    pub fn with_classification(mut self, classification: impl Into<String>) -> Self {
        self.classification = classification.into();
        self
    }

    /// Text to compare against a question: `text` when non-empty, else `raw_info`,
    /// else the empty string. Always trimmed.
    #[must_use]
    pub fn comparable_text(&self) -> &str {
        [self.text.as_deref(), self.raw_info.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|t| !t.is_empty())
            .unwrap_or("")
    }
}

/// Why a question did not receive a confident match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchNote {
    /// The best raw candidate scored below the threshold
    #[serde(rename = "no match ≥ threshold")]
    BelowThreshold,
    /// The best raw candidate was given to another question by the global assignment
    #[serde(rename = "optimal assignment favored a different pairing")]
    AssignedElsewhere,
    /// There were no mark-scheme entries at all
    #[serde(rename = "no mark schemes to match against")]
    NoEntries,
}

impl std::fmt::Display for MatchNote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BelowThreshold => write!(f, "no match ≥ threshold"),
            Self::AssignedElsewhere => {
                write!(f, "optimal assignment favored a different pairing")
            }
            Self::NoEntries => write!(f, "no mark schemes to match against"),
        }
    }
}

/// Outcome for one input question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub question_id: String,

    /// Identifier of the matched (or best-effort) mark-scheme entry
    pub matched_identifier: Option<String>,

    /// Pair score rounded to 3 decimals
    pub score: f64,

    /// `None` for confident matches
    pub note: Option<MatchNote>,
}

impl MatchRecord {
    /// True when the record came out of the accepted assignment
    #[must_use]
    pub fn is_confident(&self) -> bool {
        self.note.is_none()
    }
}

/// Round a score to 3 decimal places for reporting
#[must_use]
pub fn round_score(score: f64) -> f64 {
    (score * 1000.0).round() / 1000.0
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
