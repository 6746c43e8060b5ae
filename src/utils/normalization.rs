//! Normalization Utilities
//!
//! Two rescalings are used by the pipeline:
//! - min-max over the whole batch for the continuous attributes (stock, usage,
//!   lead time, cost), mapping each attribute onto [0, 1]
//! - vector (Euclidean) normalization of each decision-matrix column before TOPSIS

use crate::utils::parallel::Execution;

/// Value assigned to every item when an attribute has no spread
pub const ZERO_VARIANCE_VALUE: f64 = 0.5;

/// Min-max normalize a batch of values onto [0, 1]
///
/// Algorithm:
/// 1. Find `min` and `max` of the batch
/// 2. `(v - min) / (max - min)` for every value
/// 3. If `max == min` (including a single-item batch) every output is 0.5,
///    the attribute carries no discriminative information
pub fn min_max_normalize(values: &[f64]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if max == min {
        return vec![ZERO_VARIANCE_VALUE; values.len()];
    }

    let range = max - min;
    values.iter().map(|v| (v - min) / range).collect()
}

/// Euclidean norm of every column, `sqrt(Σ_i x[i][j]²)`
///
/// Sums run over rows in input order.
pub fn column_norms<R>(matrix: &[R], n_cols: usize, execution: Execution) -> Vec<f64>
where
    R: AsRef<[f64]> + Sync,
{
    execution.map_indexed(n_cols, |j| {
        let mut sum_of_squares = 0.0;
        for row in matrix {
            let x = row.as_ref()[j];
            sum_of_squares += x * x;
        }
        sum_of_squares.sqrt()
    })
}

/// Vector-normalize each column: `x[i][j] / ||x[.][j]||`
///
/// Columns with a zero norm are returned unchanged (they are all zero).
///
/// # Panics
/// If rows do not all have the same length.
pub fn vector_normalize<R>(matrix: &[R], execution: Execution) -> Vec<Vec<f64>>
where
    R: AsRef<[f64]> + Sync,
{
    let Some(first) = matrix.first() else {
        return Vec::new();
    };
    let n_cols = first.as_ref().len();
    assert!(
        matrix.iter().all(|row| row.as_ref().len() == n_cols),
        "vector_normalize: every row must have {} columns",
        n_cols
    );

    let norms = column_norms(matrix, n_cols, execution);

    execution.map_indexed(matrix.len(), |i| {
        matrix[i]
            .as_ref()
            .iter()
            .zip(&norms)
            .map(|(&x, &norm)| if norm > 0.0 { x / norm } else { x })
            .collect()
    })
}
