//! Criteria Aggregator
//!
//! Combines mapped and normalized inputs into three composite criteria with
//! fixed linear weights:
//!
//! ```text
//! Criticality = 0.78·Risk       + 0.22·Fluctuation
//! Demand      = 0.71·NormUsage  + 0.29·NormStock
//! Supply      = 0.75·NormLead   + 0.25·Consignment
//! ```
//!
//! All inputs lie in [0, 1], so the aggregates do too; no further rescaling.

use crate::criteria::mapping::CategoryScores;
use crate::criteria::quantities::NormalizedQuantities;

/// (risk, fluctuation)
pub const CRITICALITY_WEIGHTS: (f64, f64) = (0.78, 0.22);
/// (normalized daily usage, normalized average stock)
pub const DEMAND_WEIGHTS: (f64, f64) = (0.71, 0.29);
/// (normalized lead time, consignment)
pub const SUPPLY_WEIGHTS: (f64, f64) = (0.75, 0.25);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateCriteria {
    pub criticality: f64,
    pub demand: f64,
    pub supply: f64,
}

pub fn aggregate(scores: &CategoryScores, quantities: &NormalizedQuantities) -> AggregateCriteria {
    AggregateCriteria {
        criticality: CRITICALITY_WEIGHTS.0 * scores.risk + CRITICALITY_WEIGHTS.1 * scores.fluctuation,
        demand: DEMAND_WEIGHTS.0 * quantities.usage + DEMAND_WEIGHTS.1 * quantities.stock,
        supply: SUPPLY_WEIGHTS.0 * quantities.lead_time + SUPPLY_WEIGHTS.1 * scores.consignment,
    }
}
