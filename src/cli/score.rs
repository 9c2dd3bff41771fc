//! Score command - break down how one question scores against every entry.
//!
//! Useful for understanding why a question matched (or failed to match) a
//! particular mark-scheme entry without running the full assignment.

use std::path::PathBuf;

use clap::Args;

use crate::cli::{load_inputs, load_weights, OutputFormat};
use crate::core::types::MarkSchemeEntry;
use crate::matching::scoring::{PairScore, ScoringWeights};

/// Arguments for the score command
#[derive(Args)]
pub struct ScoreArgs {
    /// Question document (JSON array, or object with a "questions" array)
    #[arg(required = true)]
    pub questions: PathBuf,

    /// Mark-scheme document (JSON array, or object with a "`mark_schemes`" array)
    #[arg(required = true)]
    pub mark_schemes: PathBuf,

    /// Identifier of the question to score, exactly as it appears in the document
    #[arg(short, long, required = true)]
    pub question: String,

    /// JSON file overriding scoring weights
    #[arg(long)]
    pub weights: Option<PathBuf>,
}

/// Execute the score command
///
/// # Errors
///
/// Returns an error if the weights are invalid, inputs cannot be loaded, or
/// the question is not found.
#[allow(clippy::needless_pass_by_value)]
pub fn run(args: ScoreArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<()> {
    let weights = load_weights(args.weights.as_ref())?;
    let (questions, entries) = load_inputs(&args.questions, &args.mark_schemes)?;

    let question = questions
        .iter()
        .find(|q| q.id == args.question)
        .ok_or_else(|| anyhow::anyhow!("Question '{}' not found", args.question))?;

    if verbose {
        eprintln!(
            "Scoring question {} against {} entries",
            question.id,
            entries.len()
        );
    }

    let mut scored: Vec<(&MarkSchemeEntry, PairScore)> = entries
        .iter()
        .map(|e| (e, PairScore::calculate(question, e, &weights)))
        .collect();
    scored.sort_by(|a, b| {
        b.1.composite
            .partial_cmp(&a.1.composite)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    match format {
        OutputFormat::Text => print_text_breakdown(&question.id, &scored, &weights),
        OutputFormat::Json => print_json_breakdown(&question.id, &scored, &weights)?,
        OutputFormat::Tsv => print_tsv_breakdown(&scored),
    }

    Ok(())
}

fn print_text_breakdown(
    question_id: &str,
    scored: &[(&MarkSchemeEntry, PairScore)],
    weights: &ScoringWeights,
) {
    println!("Score breakdown for question {question_id}");
    println!("{}", "=".repeat(60));

    if scored.is_empty() {
        println!("\nNo mark-scheme entries to score against.");
        return;
    }

    println!(
        "\nweights: exact {:.2}, root {:.2}, prefix {:.2}, jaccard {:.2}, text {:.2}, marks {:.2}, type {:.2}",
        weights.exact,
        weights.root,
        weights.prefix,
        weights.jaccard,
        weights.text,
        weights.marks,
        weights.type_hint,
    );

    for (entry, score) in scored {
        println!("\n   {}: {:.3}", entry.identifier, score.composite);
        println!(
            "      identifier: exact {:.0}, root {:.0}, prefix {:.2}, jaccard {:.2}",
            score.exact, score.root, score.prefix, score.jaccard
        );
        if score.has_text {
            println!(
                "      text: {:.3} (contributes {:.3})",
                score.text,
                score.text_contribution(weights)
            );
        } else {
            println!("      text: n/a (weight dropped)");
        }
        println!("      marks: {:.3}", score.marks);
    }
}

fn print_json_breakdown(
    question_id: &str,
    scored: &[(&MarkSchemeEntry, PairScore)],
    weights: &ScoringWeights,
) -> anyhow::Result<()> {
    let candidates: Vec<serde_json::Value> = scored
        .iter()
        .map(|(entry, score)| {
            serde_json::json!({
                "identifier": entry.identifier,
                "score": score,
                "text_contribution": score.text_contribution(weights),
            })
        })
        .collect();

    let output = serde_json::json!({
        "question_id": question_id,
        "weights": weights,
        "candidates": candidates,
    });

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_tsv_breakdown(scored: &[(&MarkSchemeEntry, PairScore)]) {
    println!("identifier\tcomposite\texact\troot\tprefix\tjaccard\ttext\tmarks\ttype_hint");
    for (entry, score) in scored {
        println!(
            "{}\t{:.4}\t{:.0}\t{:.0}\t{:.4}\t{:.4}\t{:.4}\t{:.4}\t{:.0}",
            entry.identifier,
            score.composite,
            score.exact,
            score.root,
            score.prefix,
            score.jaccard,
            score.text,
            score.marks,
            score.type_hint,
        );
    }
}
