//! Result Summary
//!
//! Dashboard aggregates over one [`AnalysisResult`]: class distributions,
//! crisp/fuzzy agreement, top items, dominant criterion and mean scores.

use serde::Serialize;

use crate::types::{AbcClass, AnalysisResult, CrispWeights, ScoredRecord};

/// Display label for each crisp weight key, in key order
pub const CRISP_CRITERION_LABELS: [&str; 5] =
    ["Criticality", "Demand", "Supply", "Unit Cost", "Unit Size"];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassDistribution {
    pub a: usize,
    pub b: usize,
    pub c: usize,
}

impl ClassDistribution {
    pub fn from_classes<I: IntoIterator<Item = AbcClass>>(classes: I) -> Self {
        let mut dist = Self::default();
        for class in classes {
            match class {
                AbcClass::A => dist.a += 1,
                AbcClass::B => dist.b += 1,
                AbcClass::C => dist.c += 1,
            }
        }
        dist
    }
}

/// Crisp criterion with the largest entropy weight
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DominantCriterion {
    pub key: &'static str,
    pub label: &'static str,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSummary {
    pub total_items: usize,
    pub crisp_distribution: ClassDistribution,
    pub fuzzy_distribution: ClassDistribution,
    /// Percentage of items with `Class == Fuzzy_Class`
    pub agreement_pct: f64,
    /// 1-based id of the best item by crisp score
    pub top_crisp_id: Option<usize>,
    /// 1-based id of the best item by fuzzy score
    pub top_fuzzy_id: Option<usize>,
    pub dominant_criterion: DominantCriterion,
    pub mean_crisp_score: f64,
    pub mean_fuzzy_score: f64,
}

pub fn crisp_distribution(result: &AnalysisResult) -> ClassDistribution {
    ClassDistribution::from_classes(result.scored.iter().map(|s| s.class))
}

pub fn fuzzy_distribution(result: &AnalysisResult) -> ClassDistribution {
    ClassDistribution::from_classes(result.scored.iter().map(|s| s.fuzzy_class))
}

pub fn agreement_pct(result: &AnalysisResult) -> f64 {
    if result.is_empty() {
        return 0.0;
    }
    let agreeing = result.scored.iter().filter(|s| s.class == s.fuzzy_class).count();
    agreeing as f64 / result.len() as f64 * 100.0
}

/// Best item by crisp score; `scored` is already in crisp rank order
pub fn top_crisp(result: &AnalysisResult) -> Option<&ScoredRecord> {
    result.scored.first()
}

/// Best item by fuzzy score, ties going to the earlier item in crisp rank order
pub fn top_fuzzy(result: &AnalysisResult) -> Option<&ScoredRecord> {
    result.scored.iter().reduce(|best, s| {
        if s.fuzzy_topsis_score > best.fuzzy_topsis_score {
            s
        } else {
            best
        }
    })
}

pub fn dominant_criterion(weights: &CrispWeights) -> DominantCriterion {
    let values = weights.to_array();
    let mut best = 0;
    for (j, &w) in values.iter().enumerate().skip(1) {
        if w > values[best] {
            best = j;
        }
    }
    DominantCriterion {
        key: CrispWeights::KEYS[best],
        label: CRISP_CRITERION_LABELS[best],
        weight: values[best],
    }
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let n = values.len();
    if n == 0 {
        return 0.0;
    }
    values.sum::<f64>() / n as f64
}

pub fn summarize(result: &AnalysisResult) -> AnalysisSummary {
    AnalysisSummary {
        total_items: result.len(),
        crisp_distribution: crisp_distribution(result),
        fuzzy_distribution: fuzzy_distribution(result),
        agreement_pct: agreement_pct(result),
        top_crisp_id: top_crisp(result).map(|s| s.id),
        top_fuzzy_id: top_fuzzy(result).map(|s| s.id),
        dominant_criterion: dominant_criterion(&result.crisp_weights),
        mean_crisp_score: mean(result.scored.iter().map(|s| s.topsis_score)),
        mean_fuzzy_score: mean(result.scored.iter().map(|s| s.fuzzy_topsis_score)),
    }
}
