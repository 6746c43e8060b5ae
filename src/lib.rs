//! Inventory Ranker
//!
//! Multi-criteria ABC classification of inventory items. Each batch is scored by
//! two independent rankings: crisp TOPSIS over three aggregated criteria plus unit
//! cost and size, and fuzzy TOPSIS over eight raw criteria expressed as
//! triangular fuzzy numbers. Criterion weights come from Shannon entropy of the
//! batch itself, so every result is relative to the items scored together.
//!
//! Layout:
//! - `criteria/`: lookup tables, categorical mapping, normalization, aggregates
//! - `weights/`: entropy weighting
//! - `ranking/`: crisp TOPSIS, fuzzy TOPSIS, ABC classifier
//! - `scorer`: pipeline coordinator (sequential and Rayon variants)
//! - `data`, `sample_data`, `storage`, `summary`: collaborators around the pipeline
//! - `api_server`: Axum transport (feature `api`)

pub mod types;
pub mod error;
pub mod utils;
pub mod criteria;
pub mod weights;
pub mod ranking;
pub mod scorer;
pub mod summary;
pub mod sample_data;
pub mod data;
pub mod storage;
pub mod config;
pub mod telemetry;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use types::{
    AbcClass, AnalysisResult, CrispWeights, FuzzyWeights, InventoryRecord, ScoredRecord, Thresholds,
};
pub use error::{StoreError, ThresholdError};
pub use scorer::{process, InventoryScorer};
pub use summary::{summarize, AnalysisSummary};
pub use sample_data::{generate_sample_data, SAMPLE_CSV};
pub use storage::{AnalysisStore, InMemoryStore, JsonFileStore, StoredAnalysis};
pub use utils::Execution;

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
