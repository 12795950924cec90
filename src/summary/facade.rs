//! Accumulation façade: one accumulator per request
//!
//! Each call validates its inputs, builds exactly one accumulator, feeds the
//! paired sequences in input order and extracts the caller's result shape.
//! No state survives between calls.

use crate::discrete::DiscreteAccumulator;
use crate::error::{StatsError, StatsResult};
use crate::moments::{FeatureSet, MomentAccumulator, StatTag};
use crate::quantiles::QuantileAccumulator;
use crate::traits::Accumulator;

use super::config::{StatsConfig, Verbosity};
use super::output::{MomentSummary, QuantileSummary, WeightedTable};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Entry point for weighted summary requests
///
/// # Example
///
/// ```
/// use wtdstats::summary::{StatsConfig, WeightedSummary};
///
/// let summary = WeightedSummary::new(StatsConfig::default());
/// let values = [1.0, 2.0, 3.0, 4.0];
/// let weights = [0.1, 0.2, 0.3, 0.4];
///
/// let stats = summary.stat(&values, &weights, 2).unwrap();
/// assert_eq!(stats.names(), vec!["mean", "var"]);
/// assert!((stats.values()[0] - 3.0).abs() < 1e-12);
///
/// assert_eq!(summary.median(&values, &weights).unwrap(), 3.0);
/// ```
#[derive(Clone, Debug, Default)]
pub struct WeightedSummary {
    config: StatsConfig,
}

impl WeightedSummary {
    pub fn new(config: StatsConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &StatsConfig {
        &self.config
    }

    /// Validate and feed one request's observations into `acc`.
    ///
    /// Lengths and weights are checked before the first push.
    fn accumulate<A: Accumulator>(
        &self,
        request: &'static str,
        acc: &mut A,
        values: &[f64],
        weights: &[f64],
    ) -> StatsResult<()> {
        if self.config.verbosity >= Verbosity::Verbose {
            tracing::trace!(
                target: "wtdstats",
                request,
                values = values.len(),
                weights = weights.len(),
                "accumulating"
            );
        }
        StatsError::check_lengths(values.len(), weights.len())?;
        acc.extend_pairs(values, weights)
    }

    /// Log the outcome of a request and pass it through.
    fn report<T>(
        &self,
        request: &'static str,
        observations: usize,
        result: StatsResult<T>,
    ) -> StatsResult<T> {
        if self.config.verbosity == Verbosity::Quiet {
            return result;
        }
        match &result {
            Ok(_) => tracing::debug!(
                target: "wtdstats",
                request,
                observations,
                "request complete"
            ),
            Err(err) => tracing::debug!(
                target: "wtdstats",
                request,
                observations,
                kind = ?err.kind(),
                error = %err,
                "request rejected"
            ),
        }
        result
    }

    fn moments(
        &self,
        request: &'static str,
        features: FeatureSet,
        values: &[f64],
        weights: &[f64],
    ) -> StatsResult<MomentAccumulator> {
        let mut acc = MomentAccumulator::with_features(features);
        self.accumulate(request, &mut acc, values, weights)?;
        Ok(acc)
    }

    /// The first `order` statistics among `mean, var, skew, kurt`
    ///
    /// Fails with `OrderOutOfRange` unless `order` is between 1 and 4.
    pub fn stat(
        &self,
        values: &[f64],
        weights: &[f64],
        order: usize,
    ) -> StatsResult<MomentSummary> {
        let result = StatsError::check_lengths(values.len(), weights.len())
            .and_then(|_| FeatureSet::up_to(order))
            .and_then(|features| {
                let acc = self.moments("stat", features, values, weights)?;
                let entries = features
                    .iter()
                    .map(|tag| acc.get(tag).map(|v| (tag, v)))
                    .collect::<StatsResult<Vec<_>>>()?;
                Ok(MomentSummary::new(entries))
            });
        self.report("stat", values.len(), result)
    }

    fn single(
        &self,
        request: &'static str,
        tag: StatTag,
        values: &[f64],
        weights: &[f64],
    ) -> StatsResult<f64> {
        let result = self
            .moments(request, tag.into(), values, weights)
            .and_then(|acc| acc.get(tag));
        self.report(request, values.len(), result)
    }

    /// Weighted mean
    pub fn mean(&self, values: &[f64], weights: &[f64]) -> StatsResult<f64> {
        self.single("mean", StatTag::Mean, values, weights)
    }

    /// Weighted population variance
    pub fn var(&self, values: &[f64], weights: &[f64]) -> StatsResult<f64> {
        self.single("var", StatTag::Variance, values, weights)
    }

    /// Weighted skewness
    pub fn skew(&self, values: &[f64], weights: &[f64]) -> StatsResult<f64> {
        self.single("skew", StatTag::Skewness, values, weights)
    }

    /// Weighted excess kurtosis
    pub fn kurt(&self, values: &[f64], weights: &[f64]) -> StatsResult<f64> {
        self.single("kurt", StatTag::Kurtosis, values, weights)
    }

    /// Quantiles at each level of `probs`, labeled by level
    pub fn quantile(
        &self,
        values: &[f64],
        weights: &[f64],
        probs: &[f64],
    ) -> StatsResult<QuantileSummary> {
        let result = StatsError::check_lengths(values.len(), weights.len())
            .and_then(|_| QuantileAccumulator::new(probs))
            .and_then(|mut acc| {
                self.accumulate("quantile", &mut acc, values, weights)?;
                let quantiles = (0..probs.len())
                    .map(|i| acc.quantile(i))
                    .collect::<StatsResult<Vec<_>>>()?;
                Ok(QuantileSummary::new(probs.to_vec(), quantiles))
            });
        self.report("quantile", values.len(), result)
    }

    /// Weighted median, the quantile at level 0.5
    pub fn median(&self, values: &[f64], weights: &[f64]) -> StatsResult<f64> {
        let result = QuantileAccumulator::new(&[0.5]).and_then(|mut acc| {
            self.accumulate("median", &mut acc, values, weights)?;
            acc.quantile(0)
        });
        self.report("median", values.len(), result)
    }

    fn discrete(
        &self,
        request: &'static str,
        values: &[f64],
        weights: &[f64],
    ) -> StatsResult<DiscreteAccumulator> {
        let mut acc = DiscreteAccumulator::new();
        self.accumulate(request, &mut acc, values, weights)?;
        Ok(acc)
    }

    /// Weighted frequency table over the distinct values
    ///
    /// Frequencies are normalized when the configuration asks for it; an
    /// empty stream gives an empty table either way.
    pub fn table(&self, values: &[f64], weights: &[f64]) -> StatsResult<WeightedTable> {
        let normalize = self.config.normalize_table;
        let result = self.discrete("table", values, weights).and_then(|acc| {
            let pdf = acc.pdf();
            if normalize && !pdf.is_empty() {
                Ok(WeightedTable::new(pdf.normalized()?, true))
            } else {
                Ok(WeightedTable::new(pdf, false))
            }
        });
        self.report("table", values.len(), result)
    }

    /// Value with the largest accumulated weight, ties toward the smallest
    pub fn mode(&self, values: &[f64], weights: &[f64]) -> StatsResult<f64> {
        let result = self
            .discrete("mode", values, weights)
            .and_then(|acc| acc.mode());
        self.report("mode", values.len(), result)
    }
}
