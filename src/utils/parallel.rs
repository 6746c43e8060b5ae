//! Sequential / Rayon execution
//!
//! Stages fan out over independent items (or independent columns) only. Every sum
//! or norm is a left-to-right loop inside a single closure, so a parallel run
//! produces the same bits as a sequential one.

use rayon::prelude::*;

/// Batches at least this large default to parallel execution
pub const PARALLEL_MIN_ITEMS: usize = 2048;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Execution {
    #[default]
    Sequential,
    Parallel,
}

impl Execution {
    /// Pick parallel execution for large batches only
    pub fn for_batch(n_items: usize) -> Self {
        if n_items >= PARALLEL_MIN_ITEMS {
            Execution::Parallel
        } else {
            Execution::Sequential
        }
    }

    /// Evaluate `f(0..len)` and collect the results in index order
    pub fn map_indexed<T, F>(self, len: usize, f: F) -> Vec<T>
    where
        T: Send,
        F: Fn(usize) -> T + Sync + Send,
    {
        match self {
            Execution::Sequential => (0..len).map(f).collect(),
            Execution::Parallel => (0..len).into_par_iter().map(f).collect(),
        }
    }
}
