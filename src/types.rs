//! Inventory Records, Scored Records and Weight Vectors
//!
//! Field names on the wire are the stable keys shared with CSV import and storage
//! (`Risk`, `Demand fluctuation`, ..., `TOPSIS_Score`, `Fuzzy_Class`).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ThresholdError;

/// Default category used when a record omits `Risk`
pub const DEFAULT_RISK: &str = "Normal";
/// Default category used when a record omits `Demand fluctuation`
pub const DEFAULT_DEMAND_FLUCTUATION: &str = "Stable";
/// Default category used when a record omits `Consignment stock`
pub const DEFAULT_CONSIGNMENT_STOCK: &str = "No";
/// Default category used when a record omits `Unit size`
pub const DEFAULT_UNIT_SIZE: &str = "Medium";

/// One inventory item as handed to the pipeline
///
/// Categorical fields are kept as the observed text so that an unknown category
/// reaches the criteria mapper and takes the table fallback instead of failing
/// at deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryRecord {
    #[serde(rename = "Risk")]
    pub risk: String,
    #[serde(rename = "Demand fluctuation")]
    pub demand_fluctuation: String,
    #[serde(rename = "Average stock")]
    pub average_stock: f64,
    #[serde(rename = "Daily usage")]
    pub daily_usage: f64,
    #[serde(rename = "Unit cost")]
    pub unit_cost: f64,
    /// Days
    #[serde(rename = "Lead time")]
    pub lead_time: u32,
    #[serde(rename = "Consignment stock")]
    pub consignment_stock: String,
    #[serde(rename = "Unit size")]
    pub unit_size: String,
}

impl Default for InventoryRecord {
    fn default() -> Self {
        Self {
            risk: DEFAULT_RISK.to_string(),
            demand_fluctuation: DEFAULT_DEMAND_FLUCTUATION.to_string(),
            average_stock: 0.0,
            daily_usage: 0.0,
            unit_cost: 0.0,
            lead_time: 0,
            consignment_stock: DEFAULT_CONSIGNMENT_STOCK.to_string(),
            unit_size: DEFAULT_UNIT_SIZE.to_string(),
        }
    }
}

/// Strategic tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

impl AbcClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AbcClass::A => "A",
            AbcClass::B => "B",
            AbcClass::C => "C",
        }
    }
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rank-percentage cutoffs: top `a`% are class A, the next `b - a`% class B
///
/// Expected to satisfy `0 < a < b <= 100`. The pipeline itself does not check this;
/// callers use [`Thresholds::validate`] before starting work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(rename = "A")]
    pub a: f64,
    #[serde(rename = "B")]
    pub b: f64,
}

impl Thresholds {
    pub const fn new(a: f64, b: f64) -> Self {
        Self { a, b }
    }

    /// Check `0 < A < B <= 100`
    pub fn validate(&self) -> Result<(), ThresholdError> {
        let Self { a, b } = *self;
        if !a.is_finite() || !b.is_finite() {
            return Err(ThresholdError::NotFinite { a, b });
        }
        if a <= 0.0 {
            return Err(ThresholdError::ANotPositive(a));
        }
        if b <= a {
            return Err(ThresholdError::BNotAboveA { a, b });
        }
        if b > 100.0 {
            return Err(ThresholdError::BAboveHundred(b));
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { a: 20.0, b: 50.0 }
    }
}

/// Fully scored inventory item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredRecord {
    /// 1-based position in the input batch
    pub id: usize,
    #[serde(flatten)]
    pub record: InventoryRecord,

    #[serde(rename = "Risk_Score")]
    pub risk_score: f64,
    #[serde(rename = "Fluctuation_Score")]
    pub fluctuation_score: f64,
    #[serde(rename = "Consignment_Score")]
    pub consignment_score: f64,
    #[serde(rename = "Size_Score")]
    pub size_score: f64,

    #[serde(rename = "Norm_Usage")]
    pub norm_usage: f64,
    #[serde(rename = "Norm_Stock")]
    pub norm_stock: f64,
    #[serde(rename = "Norm_LeadTime")]
    pub norm_lead_time: f64,
    #[serde(rename = "Norm_Cost")]
    pub norm_cost: f64,

    #[serde(rename = "Criticality_Agg")]
    pub criticality_agg: f64,
    #[serde(rename = "Demand_Agg")]
    pub demand_agg: f64,
    #[serde(rename = "Supply_Agg")]
    pub supply_agg: f64,

    /// Crisp closeness coefficient in [0, 1]
    #[serde(rename = "TOPSIS_Score")]
    pub topsis_score: f64,
    /// Fuzzy closeness coefficient in [0, 1]
    #[serde(rename = "Fuzzy_TOPSIS_Score")]
    pub fuzzy_topsis_score: f64,

    #[serde(rename = "Class")]
    pub class: AbcClass,
    #[serde(rename = "Fuzzy_Class")]
    pub fuzzy_class: AbcClass,
}

/// Entropy weights of the five crisp TOPSIS criteria
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrispWeights {
    #[serde(rename = "Criticality_Agg")]
    pub criticality: f64,
    #[serde(rename = "Demand_Agg")]
    pub demand: f64,
    #[serde(rename = "Supply_Agg")]
    pub supply: f64,
    #[serde(rename = "Unit_cost")]
    pub unit_cost: f64,
    #[serde(rename = "Size_Score")]
    pub size: f64,
}

impl CrispWeights {
    pub const KEYS: [&'static str; 5] =
        ["Criticality_Agg", "Demand_Agg", "Supply_Agg", "Unit_cost", "Size_Score"];

    /// Build from a weight vector in matrix column order
    pub fn from_slice(weights: &[f64]) -> Self {
        assert_eq!(weights.len(), 5, "crisp weight vector must have 5 entries");
        Self {
            criticality: weights[0],
            demand: weights[1],
            supply: weights[2],
            unit_cost: weights[3],
            size: weights[4],
        }
    }

    pub fn to_array(&self) -> [f64; 5] {
        [self.criticality, self.demand, self.supply, self.unit_cost, self.size]
    }

    /// (key, weight) pairs in column order
    pub fn entries(&self) -> [(&'static str, f64); 5] {
        let values = self.to_array();
        std::array::from_fn(|j| (Self::KEYS[j], values[j]))
    }

    pub fn sum(&self) -> f64 {
        self.to_array().iter().sum()
    }
}

/// Entropy weights of the eight fuzzy TOPSIS criteria
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FuzzyWeights {
    pub risk: f64,
    pub fluctuation: f64,
    pub stock: f64,
    pub usage: f64,
    pub cost: f64,
    pub lead_time: f64,
    pub consignment: f64,
    pub size: f64,
}

impl FuzzyWeights {
    pub const KEYS: [&'static str; 8] = [
        "Risk",
        "Fluctuation",
        "Stock",
        "Usage",
        "Cost",
        "LeadTime",
        "Consignment",
        "Size",
    ];

    /// Build from a weight vector in matrix column order
    pub fn from_slice(weights: &[f64]) -> Self {
        assert_eq!(weights.len(), 8, "fuzzy weight vector must have 8 entries");
        Self {
            risk: weights[0],
            fluctuation: weights[1],
            stock: weights[2],
            usage: weights[3],
            cost: weights[4],
            lead_time: weights[5],
            consignment: weights[6],
            size: weights[7],
        }
    }

    pub fn to_array(&self) -> [f64; 8] {
        [
            self.risk,
            self.fluctuation,
            self.stock,
            self.usage,
            self.cost,
            self.lead_time,
            self.consignment,
            self.size,
        ]
    }

    pub fn entries(&self) -> [(&'static str, f64); 8] {
        let values = self.to_array();
        std::array::from_fn(|j| (Self::KEYS[j], values[j]))
    }

    pub fn sum(&self) -> f64 {
        self.to_array().iter().sum()
    }
}

/// Output of one pipeline run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Scored items in crisp rank order (best first, ties by input order)
    #[serde(rename = "processedItems")]
    pub scored: Vec<ScoredRecord>,
    pub crisp_weights: CrispWeights,
    pub fuzzy_weights: FuzzyWeights,
}

impl AnalysisResult {
    /// Result for an empty batch: no items, all-zero weights
    pub fn empty() -> Self {
        Self {
            scored: Vec::new(),
            crisp_weights: CrispWeights::default(),
            fuzzy_weights: FuzzyWeights::default(),
        }
    }

    pub fn len(&self) -> usize {
        self.scored.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scored.is_empty()
    }
}
