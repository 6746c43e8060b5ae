//! Criteria Lookup Tables
//!
//! Fixed numeric scores (crisp path) and triangular fuzzy numbers (fuzzy path)
//! for the four categorical attributes. Lookups are exact and case-sensitive;
//! only an absent category takes the table's neutral fallback.

use crate::utils::fuzzy::Tfn;

/// Categorical attribute → crisp score
#[derive(Debug)]
pub struct CrispTable {
    pub name: &'static str,
    pub entries: &'static [(&'static str, f64)],
    pub fallback: f64,
}

impl CrispTable {
    /// Score for `category`, or the fallback when the category is unknown
    pub fn score(&self, category: &str) -> f64 {
        self.entries
            .iter()
            .find(|(label, _)| *label == category)
            .map(|&(_, score)| score)
            .unwrap_or(self.fallback)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.entries.iter().any(|(label, _)| *label == category)
    }
}

/// Categorical attribute → triangular fuzzy number
#[derive(Debug)]
pub struct FuzzyTable {
    pub name: &'static str,
    pub entries: &'static [(&'static str, Tfn)],
    pub fallback: Tfn,
}

impl FuzzyTable {
    pub fn tfn(&self, category: &str) -> Tfn {
        self.entries
            .iter()
            .find(|(label, _)| *label == category)
            .map(|&(_, tfn)| tfn)
            .unwrap_or(self.fallback)
    }
}

// ============================================================================
// Crisp scores
// ============================================================================

pub static RISK: CrispTable = CrispTable {
    name: "Risk",
    entries: &[("High", 0.47), ("Normal", 0.35), ("Low", 0.18)],
    fallback: 0.35,
};

pub static DEMAND_FLUCTUATION: CrispTable = CrispTable {
    name: "Demand fluctuation",
    entries: &[
        ("Increasing", 0.36),
        ("Stable", 0.28),
        ("Unknown", 0.20),
        ("Decreasing", 0.16),
        ("Ending", 0.00),
    ],
    fallback: 0.20,
};

pub static CONSIGNMENT_STOCK: CrispTable = CrispTable {
    name: "Consignment stock",
    entries: &[("No", 0.80), ("Yes", 0.20)],
    fallback: 0.80,
};

pub static UNIT_SIZE: CrispTable = CrispTable {
    name: "Unit size",
    entries: &[("Large", 0.53), ("Medium", 0.31), ("Small", 0.13)],
    fallback: 0.31,
};

// ============================================================================
// Fuzzy scores (TFN [lower, mode, upper])
// ============================================================================

pub static FUZZY_RISK: FuzzyTable = FuzzyTable {
    name: "Risk",
    entries: &[
        ("High", Tfn::new(0.7, 0.9, 1.0)),
        ("Normal", Tfn::new(0.3, 0.5, 0.7)),
        ("Low", Tfn::new(0.0, 0.1, 0.3)),
    ],
    fallback: Tfn::new(0.3, 0.5, 0.7),
};

pub static FUZZY_DEMAND_FLUCTUATION: FuzzyTable = FuzzyTable {
    name: "Demand fluctuation",
    entries: &[
        ("Increasing", Tfn::new(0.7, 0.85, 1.0)),
        ("Stable", Tfn::new(0.4, 0.55, 0.7)),
        ("Unknown", Tfn::new(0.3, 0.45, 0.6)),
        ("Decreasing", Tfn::new(0.1, 0.25, 0.4)),
        ("Ending", Tfn::new(0.0, 0.0, 0.1)),
    ],
    fallback: Tfn::new(0.3, 0.45, 0.6),
};

pub static FUZZY_CONSIGNMENT_STOCK: FuzzyTable = FuzzyTable {
    name: "Consignment stock",
    entries: &[
        ("No", Tfn::new(0.6, 0.8, 1.0)),
        ("Yes", Tfn::new(0.0, 0.2, 0.4)),
    ],
    fallback: Tfn::new(0.6, 0.8, 1.0),
};

pub static FUZZY_UNIT_SIZE: FuzzyTable = FuzzyTable {
    name: "Unit size",
    entries: &[
        ("Large", Tfn::new(0.6, 0.8, 1.0)),
        ("Medium", Tfn::new(0.3, 0.5, 0.7)),
        ("Small", Tfn::new(0.0, 0.2, 0.4)),
    ],
    fallback: Tfn::new(0.3, 0.5, 0.7),
};
