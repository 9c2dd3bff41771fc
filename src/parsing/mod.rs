//! Loaders for question and mark-scheme documents.
//!
//! Both loaders accept either a bare JSON array of records or an object
//! wrapping the array under a well-known key:
//!
//! | Document     | Wrapper key    | Record type          |
//! |--------------|----------------|----------------------|
//! | Questions    | `questions`    | [`Question`]         |
//! | Mark schemes | `mark_schemes` | [`MarkSchemeEntry`]  |
//!
//! Field names from the extraction pipeline (`question_id`, `question`,
//! `total_marks_available`, `question_number`, `mark_scheme_information`, ...)
//! are accepted alongside the canonical ones.
//!
//! ## Example
//!
//! ```rust
//! use markscheme_matcher::parsing::json::parse_questions_text;
//!
//! let questions = parse_questions_text(r#"{"questions": [{"question_id": "2bii", "question": "Explain"}]}"#).unwrap();
//! assert_eq!(questions[0].id, "2bii");
//! ```
//!
//! [`Question`]: crate::core::types::Question
//! [`MarkSchemeEntry`]: crate::core::types::MarkSchemeEntry

pub mod json;
