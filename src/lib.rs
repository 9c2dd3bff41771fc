//! # markscheme-matcher
//!
//! A library for aligning assessment questions with mark-scheme entries.
//!
//! Questions and mark schemes are usually extracted independently from
//! separate documents, so their labels drift apart: `"2bii"` in the paper may
//! be `"2(b)(ii)"` in the mark scheme, entries may be missing or split, and
//! the question wording is often truncated or paraphrased.
//!
//! `markscheme-matcher` scores every question against every entry and picks the
//! globally best one-to-one pairing.
//!
//! ## Features
//!
//! - **Identifier tokenization**: `"02(b)(ii)"`, `"2.b.ii"` and `"2bii"` all become `2 / b / ii`
//! - **Fuzzy text scoring**: token-set ratio, partial ratio and subset Jaccard
//! - **Marks proximity**: agreement of the marks available
//! - **Optimal assignment**: Kuhn-Munkres over the padded score matrix
//! - **Transparent results**: one record per question, with a note when unmatched
//!
//! ## Example
//!
//! ```rust
//! use markscheme_matcher::{MarkSchemeEntry, MatchingConfig, MatchingEngine, Question};
//!
//! let questions = vec![
//!     Question::new("1a", "Define osmosis").with_marks(2.0),
//!     Question::new("1b", "Explain why the cell bursts").with_marks(3.0),
//! ];
//! let entries = vec![
//!     MarkSchemeEntry::new("1(b)").with_raw_info("water enters by osmosis; no cell wall").with_marks(3),
//!     MarkSchemeEntry::new("1(a)").with_text("Define osmosis").with_marks(2),
//! ];
//!
//! let engine = MatchingEngine::with_config(MatchingConfig::default()).unwrap();
//! for record in engine.match_all(&questions, &entries) {
//!     println!("{} -> {:?} ({:.3})", record.question_id, record.matched_identifier, record.score);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Data model and identifier tokenization
//! - [`matching`]: Scoring, assignment and reporting
//! - [`parsing`]: JSON loaders for question and mark-scheme documents
//! - [`utils`]: Boundary validation
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod matching;
pub mod parsing;
pub mod utils;

// Re-export commonly used types for convenience
pub use crate::core::identifier::tokenize;
pub use crate::core::types::*;
pub use matching::engine::{ConfigError, MatchingConfig, MatchingEngine};
pub use matching::scoring::{mark_proximity, PairScore, ScoringWeights};
pub use matching::text::text_similarity;
