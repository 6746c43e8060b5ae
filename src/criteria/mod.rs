//! Criteria construction
//!
//! Turns raw inventory records into numeric criteria, leaves first:
//! lookup tables and mapping, batch normalization, then the fixed aggregates.

pub mod tables;
pub mod mapping;
pub mod quantities;
pub mod aggregation;

pub use mapping::{map_categories, map_fuzzy_categories, unknown_categories, CategoryScores, FuzzyCategoryScores};
pub use quantities::{normalize_quantities, NormalizedQuantities};
pub use aggregation::{aggregate, AggregateCriteria};
