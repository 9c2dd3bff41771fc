//! Question / mark-scheme matching engine and scoring algorithms.
//!
//! This module provides the core matching functionality:
//!
//! - [`MatchingEngine`]: Main entry point, produces one [`MatchRecord`] per question
//! - [`PairScore`]: Signal breakdown for a single (question, entry) pair
//! - [`CandidateTable`]: Ranked candidates per question for inspection
//!
//! ## Matching Algorithm
//!
//! 1. **Pair scoring**: every question is scored against every entry
//! 2. **Padding**: the score matrix is padded to square with dummy cells
//!    scored just below the threshold
//! 3. **Assignment**: Kuhn-Munkres finds the minimum total cost pairing
//! 4. **Filtering**: pairs on padding or below the threshold are dropped
//! 5. **Reporting**: unmatched questions get their best raw candidate and a note
//!
//! ## Scoring
//!
//! The composite score is a weighted mean of:
//!
//! - **Exact**: tokenized identifiers are identical
//! - **Root**: identifiers share the same leading number
//! - **Prefix**: longest common token prefix, relative to the longer identifier
//! - **Jaccard**: overlap of identifier token sets
//! - **Text**: fuzzy text similarity (dropped when either side has no text)
//! - **Marks**: proximity of marks available
//!
//! ## Example
//!
//! ```rust
//! use markscheme_matcher::{MarkSchemeEntry, MatchingEngine, Question};
//!
//! let questions = vec![Question::new("3", "Explain osmosis")];
//! let entries = vec![
//!     MarkSchemeEntry::new("3").with_text("Explain osmosis"),
//!     MarkSchemeEntry::new("4").with_text("unrelated"),
//! ];
//!
//! let records = MatchingEngine::new().match_all(&questions, &entries);
//! assert_eq!(records[0].matched_identifier.as_deref(), Some("3"));
//! ```
//!
//! [`MatchRecord`]: crate::core::types::MatchRecord

pub mod assignment;
pub mod diagnosis;
pub mod engine;
pub mod matrix;
pub mod report;
pub mod scoring;
pub mod text;

pub use diagnosis::{Candidate, CandidateTable};
pub use engine::{ConfigError, MatchingConfig, MatchingEngine};
pub use scoring::{PairScore, ScoringWeights};

/// Convert a count to f64 for ratio calculations
#[inline]
pub(crate) fn count_to_f64(count: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        count as f64
    }
}
