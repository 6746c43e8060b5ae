//! Criteria Mapper
//!
//! Converts the categorical attributes of a record into numeric criteria:
//! crisp scores for the crisp TOPSIS path and triangular fuzzy numbers for the
//! fuzzy path. Unknown categories never fail; they take the table fallback.

use crate::criteria::tables::{
    CONSIGNMENT_STOCK, DEMAND_FLUCTUATION, FUZZY_CONSIGNMENT_STOCK, FUZZY_DEMAND_FLUCTUATION,
    FUZZY_RISK, FUZZY_UNIT_SIZE, RISK, UNIT_SIZE,
};
use crate::types::InventoryRecord;
use crate::utils::fuzzy::Tfn;

/// Crisp scores of the four categorical attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScores {
    pub risk: f64,
    pub fluctuation: f64,
    pub consignment: f64,
    pub size: f64,
}

/// Fuzzy scores of the four categorical attributes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyCategoryScores {
    pub risk: Tfn,
    pub fluctuation: Tfn,
    pub consignment: Tfn,
    pub size: Tfn,
}

pub fn map_categories(record: &InventoryRecord) -> CategoryScores {
    CategoryScores {
        risk: RISK.score(&record.risk),
        fluctuation: DEMAND_FLUCTUATION.score(&record.demand_fluctuation),
        consignment: CONSIGNMENT_STOCK.score(&record.consignment_stock),
        size: UNIT_SIZE.score(&record.unit_size),
    }
}

pub fn map_fuzzy_categories(record: &InventoryRecord) -> FuzzyCategoryScores {
    FuzzyCategoryScores {
        risk: FUZZY_RISK.tfn(&record.risk),
        fluctuation: FUZZY_DEMAND_FLUCTUATION.tfn(&record.demand_fluctuation),
        consignment: FUZZY_CONSIGNMENT_STOCK.tfn(&record.consignment_stock),
        size: FUZZY_UNIT_SIZE.tfn(&record.unit_size),
    }
}

/// Names of the categorical values that were not found in their table
///
/// Used for diagnostics only; scoring already applied the fallbacks.
pub fn unknown_categories(record: &InventoryRecord) -> Vec<&'static str> {
    [
        (&RISK, record.risk.as_str()),
        (&DEMAND_FLUCTUATION, record.demand_fluctuation.as_str()),
        (&CONSIGNMENT_STOCK, record.consignment_stock.as_str()),
        (&UNIT_SIZE, record.unit_size.as_str()),
    ]
    .into_iter()
    .filter(|(table, value)| !table.contains(value))
    .map(|(table, _)| table.name)
    .collect()
}
