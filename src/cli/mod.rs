//! Command-line interface for markscheme-matcher.
//!
//! This module implements the CLI using clap. Available commands:
//!
//! - **match**: Align every question with a mark-scheme entry
//! - **score**: Show the signal breakdown of one question against every entry
//!
//! ## Usage
//!
//! ```text
//! # Match an assessment against its mark scheme
//! markscheme-matcher match assessment.json mark_schemes.json
//!
//! # Stricter threshold, JSON output for scripting
//! markscheme-matcher match assessment.json mark_schemes.json --threshold 0.75 --format json
//!
//! # Write results to a file and show candidate tables
//! markscheme-matcher --verbose match assessment.json mark_schemes.json --output matches.json
//!
//! # Why did question 2bii match what it did?
//! markscheme-matcher score assessment.json mark_schemes.json --question 2bii
//! ```

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::core::types::{MarkSchemeEntry, Question};
use crate::matching::engine::MatchingConfig;
use crate::matching::scoring::ScoringWeights;
use crate::parsing::json::{parse_mark_schemes_file, parse_questions_file, parse_weights_file};

pub mod matches;
pub mod score;

#[derive(Parser)]
#[command(name = "markscheme-matcher")]
#[command(version)]
#[command(about = "Match assessment questions to mark-scheme entries")]
#[command(
    long_about = "markscheme-matcher aligns a list of assessment questions with a list of mark-scheme entries.\n\nEach pair is scored from identifier tokens, fuzzy text similarity and marks available, then a globally optimal one-to-one assignment is chosen:\n- Confident matches at or above the threshold\n- Best-effort candidates with a note for everything else\n- Exactly one result per question, in input order"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Match questions to mark-scheme entries
    Match(matches::MatchArgs),

    /// Score one question against every mark-scheme entry
    Score(score::ScoreArgs),
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Tsv,
}

/// Load both input documents
pub(crate) fn load_inputs(
    questions_path: &Path,
    mark_schemes_path: &Path,
) -> anyhow::Result<(Vec<Question>, Vec<MarkSchemeEntry>)> {
    let questions = parse_questions_file(questions_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load questions from {}: {e}",
            questions_path.display()
        )
    })?;
    let entries = parse_mark_schemes_file(mark_schemes_path).map_err(|e| {
        anyhow::anyhow!(
            "Failed to load mark schemes from {}: {e}",
            mark_schemes_path.display()
        )
    })?;
    Ok((questions, entries))
}

/// Default weights, or the validated ones in `path`
pub(crate) fn load_weights(path: Option<&PathBuf>) -> anyhow::Result<ScoringWeights> {
    let weights = match path {
        Some(path) => parse_weights_file(path)
            .map_err(|e| anyhow::anyhow!("Failed to load weights from {}: {e}", path.display()))?,
        None => ScoringWeights::default(),
    };
    let config = MatchingConfig {
        weights,
        ..MatchingConfig::default()
    };
    config.validate()?;
    Ok(config.weights)
}
