//! Crisp TOPSIS
//!
//! Ranks alternatives by relative closeness to the ideal point and distance
//! from the anti-ideal point in weighted, vector-normalized criteria space.
//!
//! Steps:
//! 1. Vector-normalize each column (zero-norm columns stay as they are)
//! 2. Multiply column j by `weight_j`
//! 3. Ideal = column max for benefit criteria (min for cost); anti-ideal the opposite
//! 4. Euclidean distances `D+` (to ideal) and `D-` (to anti-ideal)
//! 5. Closeness `D- / (D+ + D-)`, 0 when both distances are 0

use crate::utils::normalization::vector_normalize;
use crate::utils::parallel::Execution;

/// Whether higher values of a criterion are better
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CriterionKind {
    Benefit,
    Cost,
}

/// Reference points of a weighted decision matrix
#[derive(Debug, Clone, PartialEq)]
pub struct IdealPoints {
    pub ideal: Vec<f64>,
    pub anti_ideal: Vec<f64>,
}

/// Closeness coefficient, defined as 0 when the item is both ideal and anti-ideal
pub fn closeness(d_plus: f64, d_minus: f64) -> f64 {
    let denominator = d_plus + d_minus;
    if denominator > 0.0 {
        d_minus / denominator
    } else {
        0.0
    }
}

/// Score every row of `matrix`; output follows input order (unsorted)
///
/// # Panics
/// If row lengths, `weights` and `kinds` disagree on the number of criteria.
pub fn topsis_scores<R>(
    matrix: &[R],
    weights: &[f64],
    kinds: &[CriterionKind],
    execution: Execution,
) -> Vec<f64>
where
    R: AsRef<[f64]> + Sync,
{
    if matrix.is_empty() {
        return Vec::new();
    }
    let m = weights.len();
    assert_eq!(kinds.len(), m, "topsis: {} weights but {} criterion kinds", m, kinds.len());
    assert!(
        matrix.iter().all(|row| row.as_ref().len() == m),
        "topsis: every row must have {} criteria",
        m
    );

    let normalized = vector_normalize(matrix, execution);
    let weighted: Vec<Vec<f64>> = execution.map_indexed(normalized.len(), |i| {
        normalized[i].iter().zip(weights).map(|(v, w)| v * w).collect()
    });

    let points = ideal_points(&weighted, kinds);

    execution.map_indexed(weighted.len(), |i| {
        let mut d_plus = 0.0;
        let mut d_minus = 0.0;
        for j in 0..m {
            let to_ideal = weighted[i][j] - points.ideal[j];
            let to_anti = weighted[i][j] - points.anti_ideal[j];
            d_plus += to_ideal * to_ideal;
            d_minus += to_anti * to_anti;
        }
        closeness(d_plus.sqrt(), d_minus.sqrt())
    })
}

/// Per-column ideal and anti-ideal values of a weighted matrix
pub fn ideal_points(weighted: &[Vec<f64>], kinds: &[CriterionKind]) -> IdealPoints {
    let mut ideal = Vec::with_capacity(kinds.len());
    let mut anti_ideal = Vec::with_capacity(kinds.len());

    for (j, kind) in kinds.iter().enumerate() {
        let max = weighted.iter().map(|row| row[j]).fold(f64::NEG_INFINITY, f64::max);
        let min = weighted.iter().map(|row| row[j]).fold(f64::INFINITY, f64::min);
        match kind {
            CriterionKind::Benefit => {
                ideal.push(max);
                anti_ideal.push(min);
            }
            CriterionKind::Cost => {
                ideal.push(min);
                anti_ideal.push(max);
            }
        }
    }

    IdealPoints { ideal, anti_ideal }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const BENEFIT2: [CriterionKind; 2] = [CriterionKind::Benefit, CriterionKind::Benefit];

    #[test]
    fn test_dominant_item_scores_one() {
        let matrix = vec![[1.0, 1.0], [2.0, 3.0], [0.5, 0.5]];
        let scores = topsis_scores(&matrix, &[0.5, 0.5], &BENEFIT2, Execution::Sequential);
        assert_relative_eq!(scores[1], 1.0);
        assert_relative_eq!(scores[2], 0.0);
        assert!(scores[0] > 0.0 && scores[0] < 1.0);
    }

    #[test]
    fn test_cost_criterion_inverts_preference() {
        let matrix = vec![[1.0], [2.0]];
        let benefit = topsis_scores(&matrix, &[1.0], &[CriterionKind::Benefit], Execution::Sequential);
        let cost = topsis_scores(&matrix, &[1.0], &[CriterionKind::Cost], Execution::Sequential);
        assert_eq!(benefit, vec![0.0, 1.0]);
        assert_eq!(cost, vec![1.0, 0.0]);
    }

    #[test]
    fn test_identical_rows_score_zero() {
        let matrix = vec![[0.3, 0.7]; 4];
        let scores = topsis_scores(&matrix, &[0.5, 0.5], &BENEFIT2, Execution::Sequential);
        assert_eq!(scores, vec![0.0; 4]);
    }

    #[test]
    fn test_zero_weight_column_ignored() {
        let matrix = vec![[1.0, 9.0], [2.0, 1.0]];
        let scores = topsis_scores(&matrix, &[1.0, 0.0], &BENEFIT2, Execution::Sequential);
        assert_eq!(scores, vec![0.0, 1.0]);
    }

    #[test]
    fn test_closeness_fallback() {
        assert_eq!(closeness(0.0, 0.0), 0.0);
        assert_relative_eq!(closeness(1.0, 3.0), 0.75);
    }

    #[test]
    fn test_parallel_is_bit_identical() {
        let matrix: Vec<[f64; 3]> = (0..3000)
            .map(|i| [(i % 13) as f64, (i % 29) as f64 * 0.1, 1.0 / (1.0 + i as f64)])
            .collect();
        let kinds = [CriterionKind::Benefit; 3];
        let w = [0.2, 0.5, 0.3];
        assert_eq!(
            topsis_scores(&matrix, &w, &kinds, Execution::Sequential),
            topsis_scores(&matrix, &w, &kinds, Execution::Parallel)
        );
    }

    #[test]
    #[should_panic(expected = "every row must have")]
    fn test_shape_mismatch_panics() {
        let matrix = vec![[1.0, 2.0, 3.0]];
        topsis_scores(&matrix, &[0.5, 0.5], &BENEFIT2, Execution::Sequential);
    }
}
