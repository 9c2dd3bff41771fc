//! Globally optimal one-to-one assignment of questions to entries.
//!
//! The rectangular score matrix is padded to a square cost matrix and solved
//! with Kuhn-Munkres. Padding cells cost just a little more than a pair
//! scoring exactly at the threshold.

use pathfinding::kuhn_munkres::kuhn_munkres_min;
use pathfinding::matrix::Matrix;

use crate::matching::matrix::ScoreMatrix;

/// Padding cells score this far below the threshold
pub const PADDING_EPSILON: f64 = 1e-6;

/// Fixed-point scale for integer costs; far finer than the epsilon above
const COST_SCALE: f64 = 1e9;

/// Largest cost magnitude for a `k × k` problem such that the solver's
/// running sums stay within `i64`
fn cost_bound(k: usize) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        i64::MAX as f64 / (COST_SCALE * 4.0 * (k + 1) as f64)
    }
}

fn to_fixed(cost: f64, bound: f64) -> i64 {
    #[allow(clippy::cast_possible_truncation)]
    {
        (cost.clamp(-bound, bound) * COST_SCALE).round() as i64
    }
}

/// Square `k × k` cost matrix with `k = max(rows, cols)`.
///
/// Real cells cost `1 - score`; padding cells cost `1 - (threshold - ε)`.
/// Costs are clamped to a magnitude that depends on `k`, so a heavily
/// penalized pair stays the most expensive without overflowing the solve.
#[must_use]
pub fn padded_cost_matrix(scores: &ScoreMatrix, threshold: f64) -> Matrix<i64> {
    let k = scores.rows().max(scores.cols());
    let bound = cost_bound(k);
    let padding = to_fixed(1.0 - (threshold - PADDING_EPSILON), bound);

    let mut costs = Matrix::new(k, k, padding);
    for i in 0..scores.rows() {
        for j in 0..scores.cols() {
            costs[(i, j)] = to_fixed(1.0 - scores.get(i, j), bound);
        }
    }
    costs
}

/// Optimal assignment filtered by the acceptance threshold.
///
/// Element `i` of the result is the entry accepted for question `i`, if any.
/// No entry appears twice. Pairs that land on padding or score below
/// `threshold` are dropped.
#[must_use]
pub fn solve(scores: &ScoreMatrix, threshold: f64) -> Vec<Option<usize>> {
    let mut accepted = vec![None; scores.rows()];
    if scores.rows() == 0 || scores.cols() == 0 {
        return accepted;
    }

    let costs = padded_cost_matrix(scores, threshold);
    let (_, columns) = kuhn_munkres_min(&costs);

    for (i, &j) in columns.iter().enumerate() {
        if i >= scores.rows() || j >= scores.cols() {
            continue; // padding
        }
        if scores.get(i, j) >= threshold {
            accepted[i] = Some(j);
        }
    }
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(scores: &ScoreMatrix, assignment: &[Option<usize>]) -> f64 {
        assignment
            .iter()
            .enumerate()
            .filter_map(|(i, j)| j.map(|j| scores.get(i, j)))
            .sum()
    }

    fn assert_injective(assignment: &[Option<usize>]) {
        let mut seen = std::collections::HashSet::new();
        for j in assignment.iter().flatten() {
            assert!(seen.insert(*j), "entry {j} assigned twice");
        }
    }

    #[test]
    fn test_square_identity() {
        let m = ScoreMatrix::from_rows(vec![
            vec![0.9, 0.1, 0.2],
            vec![0.1, 0.8, 0.3],
            vec![0.2, 0.3, 0.7],
        ]);
        assert_eq!(solve(&m, 0.5), vec![Some(0), Some(1), Some(2)]);
    }

    #[test]
    fn test_global_optimum_beats_greedy() {
        // Greedy would give q0 -> e0 (0.9) and leave q1 with 0.1
        let m = ScoreMatrix::from_rows(vec![vec![0.9, 0.8], vec![0.85, 0.1]]);
        let a = solve(&m, 0.0);
        assert_eq!(a, vec![Some(1), Some(0)]);
        assert!((total(&m, &a) - 1.65).abs() < 1e-9);
    }

    #[test]
    fn test_more_questions_than_entries() {
        let m = ScoreMatrix::from_rows(vec![vec![0.7], vec![0.65], vec![0.2]]);
        let a = solve(&m, 0.6);
        assert_eq!(a, vec![Some(0), None, None]);
    }

    #[test]
    fn test_more_entries_than_questions() {
        let m = ScoreMatrix::from_rows(vec![vec![0.1, 0.2, 0.95, 0.3]]);
        assert_eq!(solve(&m, 0.6), vec![Some(2)]);
    }

    #[test]
    fn test_threshold_filters_pairs() {
        let m = ScoreMatrix::from_rows(vec![vec![0.59, 0.1], vec![0.1, 0.61]]);
        assert_eq!(solve(&m, 0.6), vec![None, Some(1)]);
    }

    #[test]
    fn test_score_exactly_at_threshold_accepted() {
        let m = ScoreMatrix::from_rows(vec![vec![0.6]]);
        assert_eq!(solve(&m, 0.6), vec![Some(0)]);
    }

    #[test]
    fn test_padding_not_preferred_over_acceptable_pair() {
        // q1 has a single acceptable pair just above threshold; padding must not steal it
        let m = ScoreMatrix::from_rows(vec![vec![0.95, 0.2], vec![0.3, 0.600_01], vec![0.9, 0.1]]);
        let a = solve(&m, 0.6);
        assert_injective(&a);
        assert_eq!(a[1], Some(1));
        assert_eq!(a[0], Some(0));
        assert_eq!(a[2], None);
    }

    #[test]
    fn test_empty_inputs() {
        let no_rows = ScoreMatrix::from_rows(vec![]);
        assert!(solve(&no_rows, 0.6).is_empty());

        let no_cols = ScoreMatrix::from_rows(vec![vec![], vec![]]);
        assert_eq!(solve(&no_cols, 0.6), vec![None, None]);
    }

    #[test]
    fn test_negative_scores_tolerated() {
        let m = ScoreMatrix::from_rows(vec![vec![-0.4, 0.8], vec![0.7, -1.2]]);
        assert_eq!(solve(&m, 0.5), vec![Some(1), Some(0)]);
    }

    #[test]
    fn test_huge_penalties_do_not_overflow() {
        let m = ScoreMatrix::from_rows(vec![
            vec![-1e15, 0.9, -1e15],
            vec![0.8, -1e15, f64::MIN],
            vec![-1e15, -1e15, 0.1],
        ]);
        assert_eq!(solve(&m, 0.5), vec![Some(1), Some(0), None]);

        let costs = padded_cost_matrix(&m, 0.5);
        let k = 3;
        for i in 0..k {
            let row_sum: i128 = (0..k).map(|j| i128::from(costs[(i, j)])).sum();
            assert!(row_sum.abs() * 4 < i128::from(i64::MAX));
        }
        assert!(costs[(0, 0)] > costs[(0, 1)]);
    }

    #[test]
    fn test_padded_cost_matrix_shape() {
        let m = ScoreMatrix::from_rows(vec![vec![1.0, 0.5, 0.0]]);
        let costs = padded_cost_matrix(&m, 0.6);
        assert_eq!(costs.rows, 3);
        assert_eq!(costs.columns, 3);
        assert_eq!(costs[(0, 0)], 0);
        assert_eq!(costs[(0, 1)], 500_000_000);
        assert_eq!(costs[(1, 0)], 400_001_000);
        assert_eq!(costs[(2, 2)], 400_001_000);
    }

    #[test]
    fn test_brute_force_agreement() {
        // Exhaustive check on a small square matrix
        let rows = vec![
            vec![0.62, 0.91, 0.15, 0.77],
            vec![0.88, 0.64, 0.72, 0.05],
            vec![0.33, 0.81, 0.93, 0.61],
            vec![0.71, 0.12, 0.68, 0.66],
        ];
        let m = ScoreMatrix::from_rows(rows);
        let a = solve(&m, 0.0);
        assert_injective(&a);

        let mut best = f64::MIN;
        let mut perm = [0usize, 1, 2, 3];
        permutations(&mut perm, 0, &mut |p| {
            let s: f64 = p.iter().enumerate().map(|(i, &j)| m.get(i, j)).sum();
            best = best.max(s);
        });
        assert!((total(&m, &a) - best).abs() < 1e-6);
    }

    fn permutations(p: &mut [usize; 4], k: usize, visit: &mut dyn FnMut(&[usize; 4])) {
        if k == p.len() {
            visit(p);
            return;
        }
        for i in k..p.len() {
            p.swap(k, i);
            permutations(p, k + 1, visit);
            p.swap(k, i);
        }
    }
}
