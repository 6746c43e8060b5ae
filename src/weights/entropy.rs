//! Entropy Weight Engine
//!
//! Derives a data-driven importance weight per criterion from how much its
//! values vary across the batch (Shannon entropy method). Criteria with more
//! dispersion carry more information and receive more weight.
//!
//! Algorithm, for an n × m matrix of non-negative values:
//! 1. `p[i][j] = (x[i][j] + ε) / Σ_i (x[i][j] + ε)` with ε = 0.0001
//! 2. `E_j = -k · Σ_i p[i][j] · ln p[i][j]`, `k = 1 / ln n`, terms with p = 0 skipped
//! 3. `d_j = 1 - E_j`
//! 4. `w_j = d_j / Σ_j d_j`, uniform `1/m` when there is no diversity at all
//!
//! Every sum walks the item axis in input order, so results are bit-identical
//! across runs and across execution modes.

use crate::utils::parallel::Execution;

/// Additive smoothing applied to every cell before column normalization
pub const SMOOTHING_EPSILON: f64 = 0.0001;

/// Total diversity at or below this is treated as "no information"
pub const MIN_TOTAL_DIVERSITY: f64 = 1e-12;

/// Compute entropy weights for the columns of `matrix`
///
/// Returns an empty vector for an empty matrix. A single-row matrix has no
/// defined entropy (`ln 1 = 0`) and yields uniform weights.
///
/// # Panics
/// If rows do not all have the same, non-zero length.
pub fn entropy_weights<R>(matrix: &[R], execution: Execution) -> Vec<f64>
where
    R: AsRef<[f64]> + Sync,
{
    let n = matrix.len();
    let Some(first) = matrix.first() else {
        return Vec::new();
    };
    let m = first.as_ref().len();
    assert!(m > 0, "entropy_weights: matrix has no criteria");
    assert!(
        matrix.iter().all(|row| row.as_ref().len() == m),
        "entropy_weights: every row must have {} criteria",
        m
    );

    let uniform = vec![1.0 / m as f64; m];
    if n < 2 {
        return uniform;
    }

    let entropy = column_entropies(matrix, m, execution);

    let diversity: Vec<f64> = entropy.iter().map(|e| (1.0 - e).max(0.0)).collect();
    let diversity_sum: f64 = diversity.iter().sum();

    if diversity_sum > MIN_TOTAL_DIVERSITY {
        diversity.iter().map(|d| d / diversity_sum).collect()
    } else {
        uniform
    }
}

/// Normalized Shannon entropy `E_j` of every column
pub fn column_entropies<R>(matrix: &[R], n_cols: usize, execution: Execution) -> Vec<f64>
where
    R: AsRef<[f64]> + Sync,
{
    let k = 1.0 / (matrix.len() as f64).ln();

    execution.map_indexed(n_cols, |j| {
        let mut col_sum = 0.0;
        for row in matrix {
            col_sum += row.as_ref()[j] + SMOOTHING_EPSILON;
        }

        let mut e = 0.0;
        for row in matrix {
            let p = (row.as_ref()[j] + SMOOTHING_EPSILON) / col_sum;
            if p > 0.0 {
                e -= k * p * p.ln();
            }
        }
        e
    })
}
