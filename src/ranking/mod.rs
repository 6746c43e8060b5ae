//! Ranking engines and ABC classification
//!
//! Crisp and fuzzy TOPSIS score items independently; the classifier then
//! turns each score vector into A/B/C tiers.

pub mod topsis;
pub mod fuzzy_topsis;
pub mod classifier;

pub use topsis::{topsis_scores, closeness, CriterionKind};
pub use fuzzy_topsis::fuzzy_topsis_scores;
pub use classifier::{classify, classify_ranked, rank_descending, TierSizes};
