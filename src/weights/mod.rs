//! Criterion weighting

pub mod entropy;

pub use entropy::{entropy_weights, column_entropies};
