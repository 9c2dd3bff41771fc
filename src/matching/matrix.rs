use crate::core::types::{MarkSchemeEntry, Question};
use crate::matching::scoring::{pair_score, ScoringWeights};

/// Dense `rows × cols` matrix of pair scores, row-major.
///
/// Row `i` is question `i`, column `j` is entry `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl ScoreMatrix {
    /// Score every (question, entry) pair
    #[must_use]
    pub fn build(
        questions: &[Question],
        entries: &[MarkSchemeEntry],
        weights: &ScoringWeights,
    ) -> Self {
        let data = questions
            .iter()
            .flat_map(|q| entries.iter().map(move |e| pair_score(q, e, weights)))
            .collect();

        Self {
            rows: questions.len(),
            cols: entries.len(),
            data,
        }
    }

    /// Build from explicit rows; every row must have the same length
    ///
    /// # Panics
    ///
    /// Panics if the rows have differing lengths.
    #[must_use]
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let cols = rows.first().map_or(0, Vec::len);
        assert!(
            rows.iter().all(|r| r.len() == cols),
            "score matrix rows must have equal length"
        );
        Self {
            rows: rows.len(),
            cols,
            data: rows.into_iter().flatten().collect(),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Column index and score of the best entry for a question.
    ///
    /// Ties resolve to the lowest column. `None` when there are no columns.
    #[must_use]
    pub fn best_in_row(&self, row: usize) -> Option<(usize, f64)> {
        self.row(row)
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (j, s)| match best {
                Some((_, b)) if b >= s => best,
                _ => Some((j, s)),
            })
    }

    /// Column indices of a row sorted by descending score, ties by column
    #[must_use]
    pub fn ranked_row(&self, row: usize) -> Vec<usize> {
        let scores = self.row(row);
        let mut order: Vec<usize> = (0..self.cols).collect();
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_dimensions() {
        let questions = vec![Question::new("1", "a"), Question::new("2", "b")];
        let entries = vec![
            MarkSchemeEntry::new("1"),
            MarkSchemeEntry::new("2"),
            MarkSchemeEntry::new("3"),
        ];
        let m = ScoreMatrix::build(&questions, &entries, &ScoringWeights::default());
        assert_eq!(m.rows(), 2);
        assert_eq!(m.cols(), 3);
        assert_eq!(m.row(1).len(), 3);
        assert!(m.get(0, 0) > m.get(0, 1));
        assert!(m.get(1, 1) > m.get(1, 2));
    }

    #[test]
    fn test_build_without_entries() {
        let questions = vec![Question::new("1", "a")];
        let m = ScoreMatrix::build(&questions, &[], &ScoringWeights::default());
        assert_eq!(m.rows(), 1);
        assert_eq!(m.cols(), 0);
        assert!(m.row(0).is_empty());
        assert!(m.best_in_row(0).is_none());
    }

    #[test]
    fn test_best_in_row_first_on_tie() {
        let m = ScoreMatrix::from_rows(vec![vec![0.2, 0.7, 0.7, 0.1]]);
        assert_eq!(m.best_in_row(0), Some((1, 0.7)));
    }

    #[test]
    fn test_ranked_row() {
        let m = ScoreMatrix::from_rows(vec![vec![0.2, 0.9, 0.5, 0.9]]);
        assert_eq!(m.ranked_row(0), vec![1, 3, 2, 0]);
    }
}
