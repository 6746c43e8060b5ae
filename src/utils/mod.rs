//! Utility modules shared across pipeline stages
//!
//! - Normalization: min-max and vector normalization
//! - Fuzzy: triangular fuzzy numbers and the vertex distance
//! - Parallel: sequential / rayon execution with a fixed reduction order

pub mod normalization;
pub mod fuzzy;
pub mod parallel;

// Re-export commonly used types
pub use normalization::{min_max_normalize, vector_normalize, column_norms};
pub use fuzzy::Tfn;
pub use parallel::Execution;
