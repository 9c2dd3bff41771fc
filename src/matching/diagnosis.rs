use serde::Serialize;

use crate::core::types::{MarkSchemeEntry, Question};
use crate::matching::matrix::ScoreMatrix;
use crate::matching::scoring::{PairScore, ScoringWeights};
use crate::matching::text::canonical_text;

/// Characters of canonical question text shown in a candidate table
pub const PREVIEW_CHARS: usize = 50;

/// One ranked mark-scheme candidate for a question
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Candidate {
    pub identifier: String,
    pub score: f64,
    pub text_similarity: f64,
    /// Text signal's share of the composite
    pub text_contribution: f64,
}

/// Top-k candidates for a question, before the global assignment
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateTable {
    pub question_id: String,
    pub question_preview: String,
    pub candidates: Vec<Candidate>,
}

impl CandidateTable {
    /// Rank the entries for question `row` by raw score and keep the best `top_k`
    #[must_use]
    pub fn build(
        row: usize,
        question: &Question,
        entries: &[MarkSchemeEntry],
        scores: &ScoreMatrix,
        weights: &ScoringWeights,
        top_k: usize,
    ) -> Self {
        let candidates = scores
            .ranked_row(row)
            .into_iter()
            .take(top_k)
            .map(|j| {
                let entry = &entries[j];
                let pair = PairScore::calculate(question, entry, weights);
                Candidate {
                    identifier: entry.identifier.clone(),
                    score: scores.get(row, j),
                    text_similarity: pair.text,
                    text_contribution: pair.text_contribution(weights),
                }
            })
            .collect();

        let mut question_preview = canonical_text(Some(&question.text));
        question_preview.truncate(PREVIEW_CHARS);

        Self {
            question_id: question.id.clone(),
            question_preview,
            candidates,
        }
    }

    /// Plain-text grid for logs and terminal output
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = format!(
            "Question {} (Text: '{}...')\n",
            self.question_id, self.question_preview
        );
        if self.candidates.is_empty() {
            out.push_str("  no candidates\n");
            return out;
        }

        let id_width = self
            .candidates
            .iter()
            .map(|c| c.identifier.chars().count())
            .chain(std::iter::once("Candidate".len()))
            .max()
            .unwrap_or(0);

        out.push_str(&format!(
            "  {:<id_width$}  {:>7}  {:>9}  {:>7}\n",
            "Candidate", "Score", "Text Sim.", "Δ(Text)"
        ));
        for c in &self.candidates {
            out.push_str(&format!(
                "  {:<id_width$}  {:>7.3}  {:>9.3}  {:>7.3}\n",
                c.identifier, c.score, c.text_similarity, c.text_contribution
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> (Vec<Question>, Vec<MarkSchemeEntry>) {
        let questions = vec![Question::new("1a", "Explain osmosis in plant cells")];
        let entries = vec![
            MarkSchemeEntry::new("2").with_text("Calculate the magnification"),
            MarkSchemeEntry::new("1a").with_text("Explain osmosis in plant cells"),
            MarkSchemeEntry::new("1b").with_raw_info("Water moves by diffusion"),
        ];
        (questions, entries)
    }

    #[test]
    fn test_candidates_ranked_and_truncated() {
        let (questions, entries) = fixture();
        let weights = ScoringWeights::default();
        let scores = ScoreMatrix::build(&questions, &entries, &weights);

        let table = CandidateTable::build(0, &questions[0], &entries, &scores, &weights, 2);
        assert_eq!(table.candidates.len(), 2);
        assert_eq!(table.candidates[0].identifier, "1a");
        assert!(table.candidates[0].score >= table.candidates[1].score);
        assert!((table.candidates[0].text_similarity - 1.0).abs() < 1e-9);
        assert!((table.candidates[0].text_contribution - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_top_k_larger_than_entries() {
        let (questions, entries) = fixture();
        let weights = ScoringWeights::default();
        let scores = ScoreMatrix::build(&questions, &entries, &weights);
        let table = CandidateTable::build(0, &questions[0], &entries, &scores, &weights, 10);
        assert_eq!(table.candidates.len(), 3);
    }

    #[test]
    fn test_render() {
        let (questions, entries) = fixture();
        let weights = ScoringWeights::default();
        let scores = ScoreMatrix::build(&questions, &entries, &weights);
        let table = CandidateTable::build(0, &questions[0], &entries, &scores, &weights, 3);

        let text = table.render();
        assert!(text.starts_with("Question 1a (Text: 'explain osmosis in plant cells...')"));
        assert!(text.contains("Candidate"));
        assert!(text.contains("1.000"));
    }

    #[test]
    fn test_render_without_candidates() {
        let q = Question::new("4", "");
        let scores = ScoreMatrix::build(std::slice::from_ref(&q), &[], &ScoringWeights::default());
        let table = CandidateTable::build(0, &q, &[], &scores, &ScoringWeights::default(), 3);
        assert!(table.render().contains("no candidates"));
    }
}
