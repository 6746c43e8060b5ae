//! Inventory Scorer - pipeline coordinator
//!
//! Runs the five stages in dependency order over one batch:
//!
//! 1. Criteria mapping (categorical → crisp scores and TFNs)
//! 2. Min-max normalization of the continuous attributes
//! 3. Aggregation into Criticality / Demand / Supply
//! 4. Entropy weights, once over the 5 crisp criteria and once over the 8 raw criteria
//! 5. Crisp and fuzzy TOPSIS, then ABC classification of each ranking
//!
//! Every stage is a pure function of the batch. Both a sequential and a parallel
//! (Rayon) entry point are provided; they produce bit-identical results.

use crate::criteria::{
    aggregate, map_categories, map_fuzzy_categories, normalize_quantities, unknown_categories,
    AggregateCriteria, CategoryScores, FuzzyCategoryScores, NormalizedQuantities,
};
use crate::ranking::{classify_ranked, fuzzy_topsis_scores, rank_descending, topsis_scores, CriterionKind};
use crate::types::{
    AnalysisResult, CrispWeights, FuzzyWeights, InventoryRecord, ScoredRecord, Thresholds,
};
use crate::utils::fuzzy::Tfn;
use crate::utils::parallel::Execution;
use crate::weights::entropy_weights;

/// All five crisp criteria are benefit criteria (higher is better)
pub const CRISP_CRITERIA: [CriterionKind; 5] = [CriterionKind::Benefit; 5];

/// Stateless pipeline runner bound to one threshold configuration
#[derive(Debug, Clone, Copy, Default)]
pub struct InventoryScorer {
    thresholds: Thresholds,
}

/// Per-item criteria gathered before weighting
struct ItemCriteria {
    categories: CategoryScores,
    fuzzy: FuzzyCategoryScores,
    quantities: NormalizedQuantities,
    aggregates: AggregateCriteria,
}

impl ItemCriteria {
    /// Row of the crisp decision matrix
    ///
    /// Unit cost enters raw; vector normalization rescales it.
    fn crisp_row(&self, record: &InventoryRecord) -> [f64; 5] {
        [
            self.aggregates.criticality,
            self.aggregates.demand,
            self.aggregates.supply,
            record.unit_cost,
            self.categories.size,
        ]
    }

    /// Crisp values of the 8 raw criteria (input to the fuzzy entropy weights)
    fn raw_row(&self) -> [f64; 8] {
        [
            self.categories.risk,
            self.categories.fluctuation,
            self.quantities.stock,
            self.quantities.usage,
            self.quantities.cost,
            self.quantities.lead_time,
            self.categories.consignment,
            self.categories.size,
        ]
    }

    /// Row of the fuzzy decision matrix, same column order as `raw_row`
    fn fuzzy_row(&self) -> [Tfn; 8] {
        [
            self.fuzzy.risk,
            self.fuzzy.fluctuation,
            Tfn::crisp(self.quantities.stock),
            Tfn::crisp(self.quantities.usage),
            Tfn::crisp(self.quantities.cost),
            Tfn::crisp(self.quantities.lead_time),
            self.fuzzy.consignment,
            self.fuzzy.size,
        ]
    }
}

impl InventoryScorer {
    pub fn new(thresholds: Thresholds) -> Self {
        Self { thresholds }
    }

    /// Score a batch sequentially
    pub fn process(&self, items: &[InventoryRecord]) -> AnalysisResult {
        self.process_with(items, Execution::Sequential)
    }

    /// Score a batch, fanning per-item and per-column work out over Rayon
    pub fn process_parallel(&self, items: &[InventoryRecord]) -> AnalysisResult {
        self.process_with(items, Execution::Parallel)
    }

    pub fn process_with(&self, items: &[InventoryRecord], execution: Execution) -> AnalysisResult {
        if items.is_empty() {
            tracing::debug!("Empty batch, nothing to score");
            return AnalysisResult::empty();
        }

        let n = items.len();
        tracing::debug!("Scoring batch of {} items ({:?})", n, execution);

        let with_fallbacks = items.iter().filter(|r| !unknown_categories(r).is_empty()).count();
        if with_fallbacks > 0 {
            tracing::debug!("{} items scored with fallback categories", with_fallbacks);
        }

        // Stages 1-3: mapping, normalization, aggregation
        let quantities = normalize_quantities(items);
        let criteria: Vec<ItemCriteria> = execution.map_indexed(n, |i| {
            let categories = map_categories(&items[i]);
            ItemCriteria {
                categories,
                fuzzy: map_fuzzy_categories(&items[i]),
                quantities: quantities[i],
                aggregates: aggregate(&categories, &quantities[i]),
            }
        });

        // Stage 4: entropy weights for both paths
        let crisp_matrix: Vec<[f64; 5]> =
            criteria.iter().zip(items).map(|(c, r)| c.crisp_row(r)).collect();
        let raw_matrix: Vec<[f64; 8]> = criteria.iter().map(ItemCriteria::raw_row).collect();

        let crisp_weights = entropy_weights(&crisp_matrix, execution);
        let fuzzy_weights = entropy_weights(&raw_matrix, execution);
        tracing::debug!("Crisp entropy weights: {:?}", crisp_weights);
        tracing::debug!("Fuzzy entropy weights: {:?}", fuzzy_weights);

        // Stage 5: rankings and classes
        let crisp_scores = topsis_scores(&crisp_matrix, &crisp_weights, &CRISP_CRITERIA, execution);

        let fuzzy_matrix: Vec<[Tfn; 8]> = criteria.iter().map(ItemCriteria::fuzzy_row).collect();
        let fuzzy_scores = fuzzy_topsis_scores(&fuzzy_matrix, &fuzzy_weights, execution);

        let crisp_order = rank_descending(&crisp_scores);
        let fuzzy_order = rank_descending(&fuzzy_scores);
        let crisp_classes = classify_ranked(&crisp_order, &self.thresholds);
        let fuzzy_classes = classify_ranked(&fuzzy_order, &self.thresholds);

        let scored = crisp_order
            .iter()
            .map(|&i| {
                let c = &criteria[i];
                ScoredRecord {
                    id: i + 1,
                    record: items[i].clone(),
                    risk_score: c.categories.risk,
                    fluctuation_score: c.categories.fluctuation,
                    consignment_score: c.categories.consignment,
                    size_score: c.categories.size,
                    norm_usage: c.quantities.usage,
                    norm_stock: c.quantities.stock,
                    norm_lead_time: c.quantities.lead_time,
                    norm_cost: c.quantities.cost,
                    criticality_agg: c.aggregates.criticality,
                    demand_agg: c.aggregates.demand,
                    supply_agg: c.aggregates.supply,
                    topsis_score: crisp_scores[i],
                    fuzzy_topsis_score: fuzzy_scores[i],
                    class: crisp_classes[i],
                    fuzzy_class: fuzzy_classes[i],
                }
            })
            .collect();

        AnalysisResult {
            scored,
            crisp_weights: CrispWeights::from_slice(&crisp_weights),
            fuzzy_weights: FuzzyWeights::from_slice(&fuzzy_weights),
        }
    }
}

/// Score a batch with the given thresholds
///
/// Large batches run in parallel; the result is the same either way.
pub fn process(items: &[InventoryRecord], thresholds: Thresholds) -> AnalysisResult {
    InventoryScorer::new(thresholds).process_with(items, Execution::for_batch(items.len()))
}
