//! Sample Inventory Data
//!
//! Deterministic demo batch: ten fixed reference items followed by rows drawn
//! from a seeded linear congruential generator, so every run (and every test)
//! sees the same data.

use crate::types::InventoryRecord;

/// Reference items as CSV text, header included
pub const SAMPLE_CSV: &str = "\
Risk,Demand fluctuation,Average stock,Daily usage,Unit cost,Lead time,Consignment stock,Unit size
High,Ending,110.34,4.94,7.64446,23,Yes,Large
Normal,Ending,183.26,1.58,2.50913,10,No,Large
Normal,Stable,115.42,3.29,6.25884,17,No,Medium
Low,Stable,113.85,0.26,4.95187,19,Yes,Large
Normal,Decreasing,149.02,4.93,6.48226,24,Yes,Small
High,Increasing,200.15,8.50,12.5432,28,No,Large
High,Increasing,175.32,7.25,9.87654,25,No,Large
Normal,Increasing,160.45,6.80,8.12345,20,No,Large
High,Stable,145.67,5.50,10.2345,22,No,Large
Normal,Increasing,190.23,7.90,11.5678,26,No,Medium
";

/// Default size of a generated demo batch
pub const DEFAULT_SAMPLE_SIZE: usize = 700;

const SEED: u64 = 42;
const LCG_MULTIPLIER: u64 = 9301;
const LCG_INCREMENT: u64 = 49297;
const LCG_MODULUS: u64 = 233280;

const RISK_OPTIONS: [&str; 3] = ["High", "Normal", "Low"];
const DEMAND_OPTIONS: [&str; 5] = ["Increasing", "Stable", "Unknown", "Decreasing", "Ending"];
const CONSIGNMENT_OPTIONS: [&str; 2] = ["Yes", "No"];
const SIZE_OPTIONS: [&str; 3] = ["Large", "Medium", "Small"];

// (risk, fluctuation, stock, usage, cost, lead time, consignment, size)
type BaseRow = (&'static str, &'static str, f64, f64, f64, u32, &'static str, &'static str);

const BASE_ROWS: [BaseRow; 10] = [
    ("High", "Ending", 110.34, 4.94, 7.64446, 23, "Yes", "Large"),
    ("Normal", "Ending", 183.26, 1.58, 2.50913, 10, "No", "Large"),
    ("Normal", "Stable", 115.42, 3.29, 6.25884, 17, "No", "Medium"),
    ("Low", "Stable", 113.85, 0.26, 4.95187, 19, "Yes", "Large"),
    ("Normal", "Decreasing", 149.02, 4.93, 6.48226, 24, "Yes", "Small"),
    ("High", "Increasing", 200.15, 8.50, 12.5432, 28, "No", "Large"),
    ("High", "Increasing", 175.32, 7.25, 9.87654, 25, "No", "Large"),
    ("Normal", "Increasing", 160.45, 6.80, 8.12345, 20, "No", "Large"),
    ("High", "Stable", 145.67, 5.50, 10.2345, 22, "No", "Large"),
    ("Normal", "Increasing", 190.23, 7.90, 11.5678, 26, "No", "Medium"),
];

/// Seeded LCG yielding values in [0, 1)
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self { seed: seed % LCG_MODULUS }
    }

    pub fn next_f64(&mut self) -> f64 {
        self.seed = (self.seed * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.seed as f64 / LCG_MODULUS as f64
    }

    fn pick<'a>(&mut self, options: &[&'a str]) -> &'a str {
        let idx = (self.next_f64() * options.len() as f64).floor() as usize;
        options[idx.min(options.len() - 1)]
    }
}

fn base_record(row: &BaseRow) -> InventoryRecord {
    let &(risk, fluctuation, stock, usage, cost, lead_time, consignment, size) = row;
    InventoryRecord {
        risk: risk.to_string(),
        demand_fluctuation: fluctuation.to_string(),
        average_stock: stock,
        daily_usage: usage,
        unit_cost: cost,
        lead_time,
        consignment_stock: consignment.to_string(),
        unit_size: size.to_string(),
    }
}

/// The ten fixed reference items
pub fn reference_items() -> Vec<InventoryRecord> {
    BASE_ROWS.iter().map(base_record).collect()
}

/// Generate `count` items: the reference items first, then pseudo-random ones
pub fn generate_sample_data(count: usize) -> Vec<InventoryRecord> {
    let mut rng = SeededRandom::new(SEED);
    let mut items = Vec::with_capacity(count);

    for i in 0..count {
        if let Some(row) = BASE_ROWS.get(i) {
            items.push(base_record(row));
            continue;
        }

        // Draw order is fixed: categories first, then quantities
        let risk = rng.pick(&RISK_OPTIONS);
        let fluctuation = rng.pick(&DEMAND_OPTIONS);
        let consignment = rng.pick(&CONSIGNMENT_OPTIONS);
        let size = rng.pick(&SIZE_OPTIONS);

        items.push(InventoryRecord {
            risk: risk.to_string(),
            demand_fluctuation: fluctuation.to_string(),
            average_stock: 50.0 + rng.next_f64() * 200.0,
            daily_usage: rng.next_f64() * 10.0,
            unit_cost: 1.0 + rng.next_f64() * 15.0,
            lead_time: 5 + (rng.next_f64() * 25.0).floor() as u32,
            consignment_stock: consignment.to_string(),
            unit_size: size.to_string(),
        });
    }

    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::tables::{CONSIGNMENT_STOCK, DEMAND_FLUCTUATION, RISK, UNIT_SIZE};

    #[test]
    fn test_lcg_sequence() {
        let mut rng = SeededRandom::new(42);
        // (42·9301 + 49297) mod 233280 = 206659
        assert_eq!(rng.next_f64(), 206659.0 / 233280.0);
        for _ in 0..1000 {
            let r = rng.next_f64();
            assert!((0.0..1.0).contains(&r));
        }
    }

    #[test]
    fn test_reference_rows_first() {
        let items = generate_sample_data(12);
        assert_eq!(items.len(), 12);
        assert_eq!(&items[..10], &reference_items()[..]);
        assert_eq!(items[0].demand_fluctuation, "Ending");
        assert_eq!(items[9].unit_cost, 11.5678);
    }

    #[test]
    fn test_short_batch_is_prefix_of_reference() {
        let items = generate_sample_data(3);
        assert_eq!(items, reference_items()[..3].to_vec());
        assert!(generate_sample_data(0).is_empty());
    }

    #[test]
    fn test_generated_rows_in_range() {
        for item in generate_sample_data(DEFAULT_SAMPLE_SIZE).iter().skip(10) {
            assert!(RISK.contains(&item.risk));
            assert!(DEMAND_FLUCTUATION.contains(&item.demand_fluctuation));
            assert!(CONSIGNMENT_STOCK.contains(&item.consignment_stock));
            assert!(UNIT_SIZE.contains(&item.unit_size));
            assert!((50.0..250.0).contains(&item.average_stock));
            assert!((0.0..10.0).contains(&item.daily_usage));
            assert!((1.0..16.0).contains(&item.unit_cost));
            assert!((5..30).contains(&item.lead_time));
        }
    }

    #[test]
    fn test_generation_is_deterministic() {
        assert_eq!(generate_sample_data(200), generate_sample_data(200));
    }
}
