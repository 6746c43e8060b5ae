//! Quantitative Normalizer
//!
//! Min-max normalizes the four continuous attributes across the whole batch.
//! There is no incremental variant: a changed batch is renormalized from scratch.

use crate::types::InventoryRecord;
use crate::utils::normalization::min_max_normalize;

/// Batch-normalized continuous attributes of one item, each in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedQuantities {
    pub usage: f64,
    pub stock: f64,
    pub lead_time: f64,
    pub cost: f64,
}

/// Normalize daily usage, average stock, lead time and unit cost for every item
pub fn normalize_quantities(records: &[InventoryRecord]) -> Vec<NormalizedQuantities> {
    let usage = min_max_normalize(&column(records, |r| r.daily_usage));
    let stock = min_max_normalize(&column(records, |r| r.average_stock));
    let lead_time = min_max_normalize(&column(records, |r| f64::from(r.lead_time)));
    let cost = min_max_normalize(&column(records, |r| r.unit_cost));

    (0..records.len())
        .map(|i| NormalizedQuantities {
            usage: usage[i],
            stock: stock[i],
            lead_time: lead_time[i],
            cost: cost[i],
        })
        .collect()
}

fn column(records: &[InventoryRecord], field: impl Fn(&InventoryRecord) -> f64) -> Vec<f64> {
    records.iter().map(field).collect()
}
