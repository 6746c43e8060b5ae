//! Error types for the collaborators around the pipeline
//!
//! The scoring pipeline itself is infallible. Threshold validation and the
//! analysis store report failures through these enums.

use std::path::PathBuf;

/// Rejected `{A, B}` threshold configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ThresholdError {
    #[error("thresholds must be finite numbers (A = {a}, B = {b})")]
    NotFinite { a: f64, b: f64 },
    #[error("threshold A must be greater than 0 (got {0})")]
    ANotPositive(f64),
    #[error("threshold B must be greater than A (A = {a}, B = {b})")]
    BNotAboveA { a: f64, b: f64 },
    #[error("threshold B must be at most 100 (got {0})")]
    BAboveHundred(f64),
}

/// Failure of an [`AnalysisStore`](crate::storage::AnalysisStore) operation
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("analysis {0} not found")]
    NotFound(String),
    #[error("invalid analysis id: {0:?}")]
    InvalidId(String),
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to (de)serialize analysis: {0}")]
    Serialization(#[from] serde_json::Error),
}
