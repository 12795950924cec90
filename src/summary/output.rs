//! Result shapes handed back to the caller

use crate::discrete::DiscreteHistogram;
use crate::moments::StatTag;

#[cfg(not(feature = "std"))]
use alloc::{string::String, vec::Vec};

/// Render a number the way it is labeled in output: shortest round-trip
/// decimal, integers without a fractional part.
pub fn label(x: f64) -> String {
    fmt!("{}", x)
}

/// Named ordered moment statistics, a prefix of `mean, var, skew, kurt`
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MomentSummary {
    entries: Vec<(StatTag, f64)>,
}

impl MomentSummary {
    pub(crate) fn new(entries: Vec<(StatTag, f64)>) -> Self {
        Self { entries }
    }

    /// Labels in output order
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(t, _)| t.name()).collect()
    }

    /// Values in output order
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|&(_, v)| v).collect()
    }

    /// Value of one statistic, if it was requested
    pub fn get(&self, tag: StatTag) -> Option<f64> {
        self.entries
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|&(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (StatTag, f64)> + '_ {
        self.entries.iter().copied()
    }
}

/// Quantile estimates aligned with the requested probability levels
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QuantileSummary {
    probs: Vec<f64>,
    quantiles: Vec<f64>,
}

impl QuantileSummary {
    pub(crate) fn new(probs: Vec<f64>, quantiles: Vec<f64>) -> Self {
        debug_assert_eq!(probs.len(), quantiles.len());
        Self { probs, quantiles }
    }

    /// Requested levels, in request order
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Estimates, positionally aligned with [`probs`](Self::probs)
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    /// Each estimate's label: its probability level
    pub fn labels(&self) -> Vec<String> {
        self.probs.iter().map(|&p| label(p)).collect()
    }

    pub fn len(&self) -> usize {
        self.quantiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantiles.is_empty()
    }

    /// `(level, estimate)` pairs in request order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.probs
            .iter()
            .copied()
            .zip(self.quantiles.iter().copied())
    }
}

/// Table of distinct values with their accumulated weights
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeightedTable {
    histogram: DiscreteHistogram,
    normalized: bool,
}

impl WeightedTable {
    pub(crate) fn new(histogram: DiscreteHistogram, normalized: bool) -> Self {
        Self {
            histogram,
            normalized,
        }
    }

    /// Row labels: the distinct values, ascending
    pub fn labels(&self) -> Vec<String> {
        self.histogram.positions().iter().map(|&x| label(x)).collect()
    }

    pub fn positions(&self) -> &[f64] {
        self.histogram.positions()
    }

    /// Accumulated weight per row; sums to 1 when normalized
    pub fn frequencies(&self) -> &[f64] {
        self.histogram.frequencies()
    }

    /// Whether frequencies were divided by the total weight
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    pub fn histogram(&self) -> &DiscreteHistogram {
        &self.histogram
    }

    pub fn into_histogram(self) -> DiscreteHistogram {
        self.histogram
    }
}
