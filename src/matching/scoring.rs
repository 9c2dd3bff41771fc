use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::identifier::{is_numeric_token, tokenize};
use crate::core::types::{MarkSchemeEntry, Question, GENERIC_SCHEME, MULTIPLE_CHOICE};
use crate::matching::count_to_f64;
use crate::matching::text::text_similarity;

/// Configurable weights for the pair scoring signals.
///
/// Passed by value into the scorer; nothing is global. Fields missing from a
/// deserialized weights file take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Token sequences identical
    pub exact: f64,
    /// Same leading numeric token
    pub root: f64,
    /// Longest common token prefix
    pub prefix: f64,
    /// Jaccard similarity of token sets
    pub jaccard: f64,
    /// Text similarity
    pub text: f64,
    /// Marks proximity
    pub marks: f64,
    /// Question type vs scheme classification
    pub type_hint: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            exact: 0.35,
            root: 0.20,
            prefix: 0.10,
            jaccard: 0.05,
            text: 0.25,
            marks: 0.05,
            type_hint: 0.00,
        }
    }
}

impl ScoringWeights {
    /// Named view of every weight, in declaration order
    #[must_use]
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("exact", self.exact),
            ("root", self.root),
            ("prefix", self.prefix),
            ("jaccard", self.jaccard),
            ("text", self.text),
            ("marks", self.marks),
            ("type_hint", self.type_hint),
        ]
    }

    /// Sum of weights, leaving out the text weight when there is no text to compare
    #[must_use]
    pub fn total(&self, include_text: bool) -> f64 {
        self.entries()
            .iter()
            .filter(|(name, _)| include_text || *name != "text")
            .map(|(_, w)| w)
            .sum()
    }
}

/// Closeness of two "marks available" values.
///
/// Returns `1 - |q - ms| / ms`, or 0.0 when either is missing or `ms` is zero.
/// Large mismatches go negative on purpose and act as a penalty.
#[must_use]
pub fn mark_proximity(question_marks: Option<f64>, scheme_marks: Option<u32>) -> f64 {
    match (question_marks, scheme_marks) {
        (Some(q), Some(ms)) if ms != 0 => {
            let ms = f64::from(ms);
            1.0 - (q - ms).abs() / ms
        }
        _ => 0.0,
    }
}

/// Identifier signals derived from two token sequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdentifierSignals {
    pub exact: f64,
    pub root: f64,
    pub prefix: f64,
    pub jaccard: f64,
}

impl IdentifierSignals {
    #[must_use]
    pub fn compare(tokens_q: &[String], tokens_ms: &[String]) -> Self {
        let exact = if tokens_q == tokens_ms { 1.0 } else { 0.0 };

        let root = match (tokens_q.first(), tokens_ms.first()) {
            (Some(a), Some(b)) if a == b && is_numeric_token(a) => 1.0,
            _ => 0.0,
        };

        let common_prefix = tokens_q
            .iter()
            .zip(tokens_ms)
            .take_while(|(a, b)| a == b)
            .count();
        let longest = tokens_q.len().max(tokens_ms.len()).max(1);
        let prefix = count_to_f64(common_prefix) / count_to_f64(longest);

        let set_q: HashSet<&String> = tokens_q.iter().collect();
        let set_ms: HashSet<&String> = tokens_ms.iter().collect();
        let intersection = set_q.intersection(&set_ms).count();
        let union = set_q.union(&set_ms).count().max(1);
        let jaccard = count_to_f64(intersection) / count_to_f64(union);

        Self {
            exact,
            root,
            prefix,
            jaccard,
        }
    }
}

/// Signal breakdown and weighted composite for one (question, entry) pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairScore {
    pub exact: f64,
    pub root: f64,
    pub prefix: f64,
    pub jaccard: f64,

    /// Text similarity; 0.0 when either side has no text
    pub text: f64,

    /// Marks proximity, possibly negative
    pub marks: f64,

    pub type_hint: f64,

    /// Both texts non-empty, so the text weight took part
    pub has_text: bool,

    /// Weighted sum of active signals over the sum of active weights
    pub composite: f64,
}

impl PairScore {
    /// Score a question against one mark-scheme entry
    #[must_use]
    pub fn calculate(
        question: &Question,
        entry: &MarkSchemeEntry,
        weights: &ScoringWeights,
    ) -> Self {
        let ids = IdentifierSignals::compare(
            &tokenize(&question.id),
            &tokenize(&entry.identifier),
        );

        let q_text = question.comparable_text();
        let ms_text = entry.comparable_text();
        let has_text = !q_text.is_empty() && !ms_text.is_empty();
        let text = if has_text {
            text_similarity(Some(q_text), Some(ms_text))
        } else {
            0.0
        };

        let marks = mark_proximity(question.marks_available, entry.marks_available);

        let type_hint = if question.question_type == MULTIPLE_CHOICE
            && entry.classification == GENERIC_SCHEME
        {
            1.0
        } else {
            0.0
        };

        let total_weight = weights.total(has_text);
        let composite = if total_weight > 0.0 {
            let text_term = if has_text { weights.text * text } else { 0.0 };
            (weights.exact * ids.exact
                + weights.root * ids.root
                + weights.prefix * ids.prefix
                + weights.jaccard * ids.jaccard
                + text_term
                + weights.marks * marks
                + weights.type_hint * type_hint)
                / total_weight
        } else {
            0.0
        };

        if has_text {
            tracing::trace!(
                question = %question.id,
                entry = %entry.identifier,
                text_similarity = text,
                "text similarity"
            );
        }

        Self {
            exact: ids.exact,
            root: ids.root,
            prefix: ids.prefix,
            jaccard: ids.jaccard,
            text,
            marks,
            type_hint,
            has_text,
            composite,
        }
    }

    /// Share of the text signal in the composite, over the full weight total
    #[must_use]
    pub fn text_contribution(&self, weights: &ScoringWeights) -> f64 {
        let total = weights.total(true);
        if !self.has_text || total <= 0.0 {
            return 0.0;
        }
        weights.text * self.text / total
    }
}

/// Composite compatibility of a question with a mark-scheme entry
#[must_use]
pub fn pair_score(question: &Question, entry: &MarkSchemeEntry, weights: &ScoringWeights) -> f64 {
    PairScore::calculate(question, entry, weights).composite
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toks(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_mark_proximity() {
        assert!((mark_proximity(Some(4.0), Some(4)) - 1.0).abs() < 1e-9);
        assert_eq!(mark_proximity(None, Some(4)), 0.0);
        assert_eq!(mark_proximity(Some(4.0), None), 0.0);
        assert_eq!(mark_proximity(Some(2.0), Some(0)), 0.0);
        assert!((mark_proximity(Some(3.0), Some(4)) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_mark_proximity_unclamped() {
        // 10 marks vs 2 marks: 1 - 8/2 = -3, deliberately not floored at zero
        assert!((mark_proximity(Some(10.0), Some(2)) + 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_identifier_signals_exact() {
        let s = IdentifierSignals::compare(&toks(&["2", "b", "ii"]), &toks(&["2", "b", "ii"]));
        assert_eq!(s.exact, 1.0);
        assert_eq!(s.root, 1.0);
        assert!((s.prefix - 1.0).abs() < 1e-9);
        assert!((s.jaccard - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_identifier_signals_partial() {
        let s = IdentifierSignals::compare(&toks(&["2", "b", "ii"]), &toks(&["2", "b"]));
        assert_eq!(s.exact, 0.0);
        assert_eq!(s.root, 1.0);
        assert!((s.prefix - 2.0 / 3.0).abs() < 1e-9);
        assert!((s.jaccard - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_root_requires_numeric_token() {
        let s = IdentifierSignals::compare(&toks(&["a", "1"]), &toks(&["a", "2"]));
        assert_eq!(s.root, 0.0);
        assert!((s.prefix - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_empty_identifiers() {
        let empty: Vec<String> = Vec::new();
        let s = IdentifierSignals::compare(&empty, &toks(&["1"]));
        assert_eq!(s.exact, 0.0);
        assert_eq!(s.root, 0.0);
        assert_eq!(s.prefix, 0.0);
        assert_eq!(s.jaccard, 0.0);
    }

    #[test]
    fn test_identical_pair_scores_one() {
        let q = Question::new("3", "Explain osmosis").with_marks(2.0);
        let e = MarkSchemeEntry::new("3").with_text("Explain osmosis").with_marks(2);
        let score = pair_score(&q, &e, &ScoringWeights::default());
        assert!((score - 1.0).abs() < 1e-9, "score = {score}");
    }

    #[test]
    fn test_text_weight_dropped_without_text() {
        let q = Question::new("3", "");
        let e = MarkSchemeEntry::new("3").with_text("Explain osmosis");
        let score = PairScore::calculate(&q, &e, &ScoringWeights::default());
        assert!(!score.has_text);
        // exact + root + prefix + jaccard = 0.70 over 0.75 (no text weight)
        assert!((score.composite - 0.70 / 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_falls_back_to_raw_info() {
        let q = Question::new("1", "Define diffusion");
        let e = MarkSchemeEntry::new("9").with_raw_info("Define diffusion");
        let score = PairScore::calculate(&q, &e, &ScoringWeights::default());
        assert!(score.has_text);
        assert!((score.text - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_marks_penalty_can_push_below_zero() {
        let weights = ScoringWeights {
            exact: 0.0,
            root: 0.0,
            prefix: 0.0,
            jaccard: 0.0,
            text: 0.0,
            marks: 1.0,
            type_hint: 0.0,
        };
        let q = Question::new("1", "").with_marks(12.0);
        let e = MarkSchemeEntry::new("7").with_marks(2);
        let score = pair_score(&q, &e, &weights);
        assert!(score < 0.0, "unclamped penalty expected, got {score}");
    }

    #[test]
    fn test_zero_weights_guarded() {
        let weights = ScoringWeights {
            exact: 0.0,
            root: 0.0,
            prefix: 0.0,
            jaccard: 0.0,
            text: 1.0,
            marks: 0.0,
            type_hint: 0.0,
        };
        let q = Question::new("1", "");
        let e = MarkSchemeEntry::new("1");
        assert_eq!(pair_score(&q, &e, &weights), 0.0);
    }

    #[test]
    fn test_type_hint_signal() {
        let weights = ScoringWeights {
            type_hint: 1.0,
            ..ScoringWeights::default()
        };
        let q = Question::new("1", "").with_type(MULTIPLE_CHOICE);
        let generic = MarkSchemeEntry::new("2").with_classification(GENERIC_SCHEME);
        let levelled = MarkSchemeEntry::new("2").with_classification("levelled");
        let a = PairScore::calculate(&q, &generic, &weights);
        let b = PairScore::calculate(&q, &levelled, &weights);
        assert_eq!(a.type_hint, 1.0);
        assert_eq!(b.type_hint, 0.0);
        assert!(a.composite > b.composite);
    }

    #[test]
    fn test_text_contribution() {
        let weights = ScoringWeights::default();
        let q = Question::new("1", "Explain osmosis");
        let e = MarkSchemeEntry::new("1").with_text("Explain osmosis");
        let score = PairScore::calculate(&q, &e, &weights);
        assert!((score.text_contribution(&weights) - 0.25).abs() < 1e-9);

        let no_text = PairScore::calculate(&Question::new("1", ""), &e, &weights);
        assert_eq!(no_text.text_contribution(&weights), 0.0);
    }

    #[test]
    fn test_weights_deserialize_partial() {
        let w: ScoringWeights = serde_json::from_str(r#"{"text": 0.5}"#).unwrap();
        assert!((w.text - 0.5).abs() < 1e-9);
        assert!((w.exact - 0.35).abs() < 1e-9);
        assert!((ScoringWeights::default().total(true) - 1.0).abs() < 1e-9);
    }
}
