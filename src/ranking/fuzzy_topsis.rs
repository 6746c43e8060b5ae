//! Fuzzy TOPSIS (vertex method)
//!
//! Same structure as crisp TOPSIS, but each criterion value is a triangular
//! fuzzy number. Unlike the crisp path the reference points are fixed rather
//! than derived from the data: the ideal is `[1, 1, 1]` and the anti-ideal
//! `[0, 0, 0]` for every criterion.
//!
//! Per item: `D+ = Σ_j d(w_j · x_ij, [1,1,1])`, `D- = Σ_j d(w_j · x_ij, [0,0,0])`
//! with `d` the vertex distance, and closeness `D- / (D+ + D-)`.

use crate::ranking::topsis::closeness;
use crate::utils::fuzzy::Tfn;
use crate::utils::parallel::Execution;

/// Score every row of a fuzzy decision matrix; output follows input order
///
/// # Panics
/// If a row's length differs from `weights.len()`.
pub fn fuzzy_topsis_scores<R>(matrix: &[R], weights: &[f64], execution: Execution) -> Vec<f64>
where
    R: AsRef<[Tfn]> + Sync,
{
    let m = weights.len();
    assert!(
        matrix.iter().all(|row| row.as_ref().len() == m),
        "fuzzy_topsis: every row must have {} criteria",
        m
    );

    execution.map_indexed(matrix.len(), |i| {
        let mut d_plus = 0.0;
        let mut d_minus = 0.0;
        for (tfn, &w) in matrix[i].as_ref().iter().zip(weights) {
            let weighted = tfn.scale(w);
            d_plus += weighted.vertex_distance(&Tfn::IDEAL);
            d_minus += weighted.vertex_distance(&Tfn::ANTI_IDEAL);
        }
        closeness(d_plus, d_minus)
    })
}
