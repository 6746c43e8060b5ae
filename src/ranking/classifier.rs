//! ABC Classifier
//!
//! Buckets items into tiers by rank: the top `A`% are class A, the next
//! `B - A`% class B and the rest class C. Tier sizes are floored, so small
//! batches may have an empty A or B tier.

use crate::types::{AbcClass, Thresholds};

/// Number of items in tiers A and B for a batch of `n`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TierSizes {
    pub a: usize,
    pub b: usize,
}

impl TierSizes {
    /// `floor(A/100 · n)` and `floor((B - A)/100 · n)`
    ///
    /// Thresholds outside `0 < A < B <= 100` are not rejected; negative counts
    /// saturate to an empty tier.
    pub fn for_batch(thresholds: &Thresholds, n: usize) -> Self {
        let n = n as f64;
        Self {
            a: ((thresholds.a / 100.0) * n).floor() as usize,
            b: (((thresholds.b - thresholds.a) / 100.0) * n).floor() as usize,
        }
    }

    pub fn class_at(&self, rank: usize) -> AbcClass {
        if rank < self.a {
            AbcClass::A
        } else if rank < self.a.saturating_add(self.b) {
            AbcClass::B
        } else {
            AbcClass::C
        }
    }
}

/// Item indices ordered by score, best first
///
/// The sort is stable, so equal scores keep their input order.
pub fn rank_descending(scores: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..scores.len()).collect();
    order.sort_by(|&a, &b| scores[b].total_cmp(&scores[a]));
    order
}

/// Class label per item, indexed like `scores`
pub fn classify(scores: &[f64], thresholds: &Thresholds) -> Vec<AbcClass> {
    let order = rank_descending(scores);
    classify_ranked(&order, thresholds)
}

/// Class label per item from an existing rank order (`order[rank] = item index`)
pub fn classify_ranked(order: &[usize], thresholds: &Thresholds) -> Vec<AbcClass> {
    let sizes = TierSizes::for_batch(thresholds, order.len());
    let mut classes = vec![AbcClass::C; order.len()];
    for (rank, &item) in order.iter().enumerate() {
        classes[item] = sizes.class_at(rank);
    }
    classes
}
