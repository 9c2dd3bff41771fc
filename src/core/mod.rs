//! Core data types for question / mark-scheme alignment.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Question`]: An assessment question with its hierarchical identifier
//! - [`MarkSchemeEntry`]: One entry of an ingested mark scheme
//! - [`MatchRecord`], [`MatchNote`]: Per-question matching outcome
//! - [`identifier::tokenize`]: Identifier normalization into semantic tokens
//!
//! ## Identifier Styles
//!
//! Papers and mark schemes rarely agree on how sub-questions are written:
//!
//! | Style    | Example    | Tokens            |
//! |----------|------------|-------------------|
//! | Compact  | `2bii`     | `2`, `b`, `ii`    |
//! | Dotted   | `2.b.ii`   | `2`, `b`, `ii`    |
//! | Bracketed| `02(b)(ii)`| `2`, `b`, `ii`    |
//! | Numeric  | `6.4.2`    | `6`, `4`, `2`     |
//!
//! [`Question`]: types::Question
//! [`MarkSchemeEntry`]: types::MarkSchemeEntry
//! [`MatchRecord`]: types::MatchRecord
//! [`MatchNote`]: types::MatchNote

pub mod identifier;
pub mod types;
