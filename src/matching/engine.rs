use tracing::{debug, info};

use crate::core::types::{MarkSchemeEntry, MatchRecord, Question};
use crate::matching::assignment;
use crate::matching::diagnosis::CandidateTable;
use crate::matching::matrix::ScoreMatrix;
use crate::matching::report::{build_records, MatchSummary};
use crate::matching::scoring::ScoringWeights;

/// Default minimum pair score for an accepted match
pub const DEFAULT_THRESHOLD: f64 = 0.60;

/// Default number of candidates in diagnostic tables
pub const DEFAULT_TOP_K: usize = 3;

/// Rejected configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("threshold must be a number within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("scoring weight '{name}' must be finite and non-negative, got {value}")]
    InvalidWeight { name: &'static str, value: f64 },
}

/// Configuration for the matching engine
#[derive(Debug, Clone)]
pub struct MatchingConfig {
    /// Minimum score for a pair to be accepted
    pub threshold: f64,
    /// Candidates per question in diagnostic tables
    pub top_k: usize,
    /// Log candidate tables while matching; never changes the results
    pub verbose: bool,
    /// Pair scoring weights
    pub weights: ScoringWeights,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            verbose: false,
            weights: ScoringWeights::default(),
        }
    }
}

impl MatchingConfig {
    /// Check every value before any scoring happens
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ThresholdOutOfRange` if the threshold is outside
    /// [0, 1] or not a number, or `ConfigError::InvalidWeight` for a negative
    /// or non-finite weight.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(ConfigError::ThresholdOutOfRange(self.threshold));
        }
        for (name, value) in self.weights.entries() {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidWeight { name, value });
            }
        }
        Ok(())
    }
}

/// The main matching engine
#[derive(Debug, Clone, Default)]
pub struct MatchingEngine {
    config: MatchingConfig,
}

impl MatchingEngine {
    /// Create a new matching engine with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new matching engine with custom configuration
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the configuration is invalid.
    pub fn with_config(config: MatchingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    #[must_use]
    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Score every question against every entry
    #[must_use]
    pub fn score_matrix(&self, questions: &[Question], entries: &[MarkSchemeEntry]) -> ScoreMatrix {
        ScoreMatrix::build(questions, entries, &self.config.weights)
    }

    /// Match questions to mark-scheme entries.
    ///
    /// Returns exactly one record per question, in input order. No entry is
    /// accepted for more than one question.
    #[must_use]
    pub fn match_all(&self, questions: &[Question], entries: &[MarkSchemeEntry]) -> Vec<MatchRecord> {
        info!(
            questions = questions.len(),
            entries = entries.len(),
            threshold = self.config.threshold,
            "Starting matching"
        );

        let scores = self.score_matrix(questions, entries);
        debug!(rows = scores.rows(), cols = scores.cols(), "Score matrix built");

        if self.config.verbose {
            for table in self.tables_from_matrix(questions, entries, &scores) {
                info!("\n{}", table.render());
            }
        }

        let accepted = assignment::solve(&scores, self.config.threshold);
        debug!(
            size = scores.rows().max(scores.cols()),
            accepted = accepted.iter().flatten().count(),
            "Assignment solved"
        );

        let records = build_records(questions, entries, &scores, &accepted, self.config.threshold);

        let summary = MatchSummary::from_records(&records);
        info!("Matching completed: {summary}");
        records
    }

    /// Top-k candidates per question by raw score, before assignment
    #[must_use]
    pub fn candidate_tables(
        &self,
        questions: &[Question],
        entries: &[MarkSchemeEntry],
    ) -> Vec<CandidateTable> {
        let scores = self.score_matrix(questions, entries);
        self.tables_from_matrix(questions, entries, &scores)
    }

    fn tables_from_matrix(
        &self,
        questions: &[Question],
        entries: &[MarkSchemeEntry],
        scores: &ScoreMatrix,
    ) -> Vec<CandidateTable> {
        questions
            .iter()
            .enumerate()
            .map(|(i, q)| {
                CandidateTable::build(i, q, entries, scores, &self.config.weights, self.config.top_k)
            })
            .collect()
    }
}
