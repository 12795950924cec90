//! Exact-equality weighted frequency accumulator

use ordered_float::OrderedFloat;

use crate::error::{add_weight, check_weight, StatsResult};
use crate::traits::{Accumulator, MergeError};

use super::histogram::{mode_of, DiscreteHistogram};

#[cfg(feature = "std")]
use std::collections::BTreeMap;

#[cfg(not(feature = "std"))]
use alloc::{collections::BTreeMap, vec::Vec};

/// Weighted frequency table keyed by exact value
///
/// Values are compared by exact equality, not binned. `-0.0` and `0.0`
/// share a bucket, and every NaN (including the
/// [`MISSING`](crate::MISSING) sentinel) lands in a single bucket ordered
/// after all numbers. A zero-weight observation still creates its bucket.
///
/// # Example
///
/// ```
/// use wtdstats::discrete::DiscreteAccumulator;
///
/// let mut acc = DiscreteAccumulator::new();
/// acc.push(0.0, 0.25).unwrap();
/// acc.push(1.0, 0.75).unwrap();
///
/// assert_eq!(acc.mode().unwrap(), 1.0);
/// assert_eq!(acc.pdf().frequency_of(0.0), 0.25);
/// ```
#[derive(Clone, Debug, Default)]
pub struct DiscreteAccumulator {
    /// Value to accumulated weight, ascending
    buckets: BTreeMap<OrderedFloat<f64>, f64>,
    /// Observations pushed
    count: u64,
    /// Total weight W
    weight: f64,
}

impl DiscreteAccumulator {
    /// Create an empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset the frequency mapping
    pub fn init(&mut self) {
        self.buckets.clear();
        self.count = 0;
        self.weight = 0.0;
        tracing::trace!(target: "wtdstats", accumulator = "discrete", "init");
    }

    /// Add `weight` to the bucket of `value`
    ///
    /// Fails with `TotalWeightOverflow`, changing nothing, if the total
    /// weight would leave the finite range.
    pub fn push(&mut self, value: f64, weight: f64) -> StatsResult<()> {
        check_weight(weight)?;
        let total = add_weight(self.weight, weight)?;
        // Fold -0.0 into 0.0 so the stored position prints without a sign
        let key = if value == 0.0 { 0.0 } else { value };
        *self.buckets.entry(OrderedFloat(key)).or_insert(0.0) += weight;
        self.count += 1;
        self.weight = total;
        Ok(())
    }

    /// Number of distinct values seen
    pub fn num_distinct(&self) -> usize {
        self.buckets.len()
    }

    /// Histogram of positions and aligned frequencies, ascending
    ///
    /// An empty stream gives an empty histogram.
    pub fn pdf(&self) -> DiscreteHistogram {
        let (positions, frequencies): (Vec<f64>, Vec<f64>) = self
            .buckets
            .iter()
            .map(|(k, &w)| (k.into_inner(), w))
            .unzip();
        DiscreteHistogram::from_sorted(positions, frequencies)
    }

    /// Value with the largest accumulated weight, ties toward the smallest
    ///
    /// Fails with `DegenerateInput` on an empty stream or zero total weight.
    pub fn mode(&self) -> StatsResult<f64> {
        mode_of(self.buckets.iter().map(|(k, &w)| (k.into_inner(), w)))
    }
}

impl Accumulator for DiscreteAccumulator {
    fn push(&mut self, value: f64, weight: f64) -> StatsResult<()> {
        DiscreteAccumulator::push(self, value, weight)
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        for (&key, &w) in &other.buckets {
            *self.buckets.entry(key).or_insert(0.0) += w;
        }
        self.count += other.count;
        self.weight += other.weight;
        tracing::trace!(
            target: "wtdstats",
            accumulator = "discrete",
            distinct = self.buckets.len(),
            total_weight = self.weight,
            "merge"
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.init();
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn total_weight(&self) -> f64 {
        self.weight
    }
}
