//! Match command - align every question with a mark-scheme entry.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_inputs, load_weights, OutputFormat};
use crate::core::types::MatchRecord;
use crate::matching::engine::{MatchingConfig, MatchingEngine, DEFAULT_THRESHOLD, DEFAULT_TOP_K};
use crate::matching::report::MatchSummary;

/// Arguments for the match command
#[derive(Args)]
pub struct MatchArgs {
    /// Question document (JSON array, or object with a "questions" array)
    #[arg(required = true)]
    pub questions: PathBuf,

    /// Mark-scheme document (JSON array, or object with a "`mark_schemes`" array)
    #[arg(required = true)]
    pub mark_schemes: PathBuf,

    /// Minimum pair score for a confident match (0-1)
    #[arg(short, long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Candidates per question shown with --verbose
    #[arg(long, default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// JSON file overriding scoring weights
    #[arg(long)]
    pub weights: Option<PathBuf>,

    /// Write results as JSON to this file instead of printing them
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Execute the match command
///
/// # Errors
///
/// Returns an error if the configuration is invalid, inputs cannot be loaded,
/// or the output cannot be written.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: MatchArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let config = MatchingConfig {
        threshold: args.threshold,
        top_k: args.top_k,
        verbose,
        weights: load_weights(args.weights.as_ref())?,
    };
    let engine = MatchingEngine::with_config(config)?;

    let (questions, entries) = load_inputs(&args.questions, &args.mark_schemes)?;
    if verbose {
        eprintln!(
            "Loaded {} questions and {} mark-scheme entries",
            questions.len(),
            entries.len()
        );
    }

    let records = engine.match_all(&questions, &entries);

    if let Some(path) = &args.output {
        std::fs::write(path, serde_json::to_string_pretty(&records)?)?;
        if verbose {
            eprintln!("Wrote {} results to {}", records.len(), path.display());
        }
        return Ok(());
    }

    match format {
        OutputFormat::Text => print_text_results(&records, args.threshold),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&records)?),
        OutputFormat::Tsv => print_tsv_results(&records),
    }

    Ok(())
}

fn print_text_results(records: &[MatchRecord], threshold: f64) {
    println!("Match Results (threshold {threshold:.2})");
    println!("{}", "=".repeat(60));

    if records.is_empty() {
        println!("\nNo questions to match.");
        return;
    }

    let id_width = records
        .iter()
        .map(|r| r.question_id.chars().count())
        .chain(std::iter::once("Question".len()))
        .max()
        .unwrap_or(0);
    let ms_width = records
        .iter()
        .filter_map(|r| r.matched_identifier.as_ref())
        .map(|m| m.chars().count())
        .chain(std::iter::once("Mark scheme".len()))
        .max()
        .unwrap_or(0);

    println!(
        "\n{:<id_width$}  {:<ms_width$}  {:>6}  Note",
        "Question", "Mark scheme", "Score"
    );
    for record in records {
        println!(
            "{:<id_width$}  {:<ms_width$}  {:>6.3}  {}",
            record.question_id,
            record.matched_identifier.as_deref().unwrap_or("-"),
            record.score,
            record.note.map(|n| n.to_string()).unwrap_or_default(),
        );
    }

    println!("\nSummary: {}", MatchSummary::from_records(records));
}

fn print_tsv_results(records: &[MatchRecord]) {
    println!("question_id\tmatched_identifier\tscore\tnote");
    for record in records {
        println!(
            "{}\t{}\t{:.3}\t{}",
            record.question_id,
            record.matched_identifier.as_deref().unwrap_or(""),
            record.score,
            record.note.map(|n| n.to_string()).unwrap_or_default(),
        );
    }
}
