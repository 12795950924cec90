//! Exact weighted quantiles by inverse CDF
//!
//! Observations are kept in full; the first query sorts them by value and
//! builds the cumulative weight function, which is cached until the next
//! push. Memory is O(n) in the number of positive-weight observations.
//!
//! # Thread Safety
//!
//! `QuantileAccumulator` is `Send` but **not `Sync`**: the sort cache lives
//! in a `RefCell` so queries can run on `&self`.

use core::cell::RefCell;

use crate::error::{
    add_weight, check_probability, check_weight, Degeneracy, InvalidArgument, StatsResult,
};
use crate::traits::{Accumulator, MergeError};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Relative slack on the `p * W` threshold, absorbs summation rounding
const THRESHOLD_TOLERANCE: f64 = 16.0 * f64::EPSILON;

#[inline]
fn threshold(p: f64, total: f64) -> f64 {
    let target = p * total;
    target - THRESHOLD_TOLERANCE * target
}

/// Sorted view of the stream, rebuilt lazily on query.
#[derive(Clone, Debug, Default)]
struct QuantileInner {
    /// `(value, weight)` pairs with positive weight
    pairs: Vec<(f64, f64)>,
    /// Cumulative weight up to and including each sorted pair
    cumulative: Vec<f64>,
    /// Whether `pairs` is sorted and `cumulative` is current
    sorted: bool,
}

impl QuantileInner {
    fn ensure_sorted(&mut self) {
        if self.sorted {
            return;
        }
        // Stable sort keeps push order among equal values
        self.pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
        self.cumulative.clear();
        self.cumulative.reserve(self.pairs.len());
        let mut running = 0.0;
        for &(_, w) in &self.pairs {
            running += w;
            self.cumulative.push(running);
        }
        self.sorted = true;
    }

    /// Smallest value whose cumulative weight reaches `p * W`.
    ///
    /// `W` is the last prefix sum, accumulated in sorted order, so `p = 1`
    /// always lands on the largest value.
    fn inverse_cdf(&self, p: f64) -> Option<f64> {
        let total = *self.cumulative.last()?;
        let threshold = threshold(p, total);
        let idx = self
            .cumulative
            .partition_point(|&c| c < threshold)
            .min(self.pairs.len() - 1);
        Some(self.pairs[idx].0)
    }
}

/// Weighted quantile accumulator over a fixed set of probability levels
///
/// For a level `p` the estimate is the smallest value `x` whose cumulative
/// weight (values `<= x`, inclusive) is at least `p * W`. Observations with
/// zero weight carry no mass and never qualify. Ties between equal values
/// collapse naturally since they share one position in the sorted order.
///
/// # Example
///
/// ```
/// use wtdstats::quantiles::QuantileAccumulator;
///
/// let mut acc = QuantileAccumulator::new(&[0.25, 0.5, 1.0]).unwrap();
/// for (x, w) in [(10.0, 1.0), (20.0, 1.0), (30.0, 1.0), (40.0, 1.0)] {
///     acc.push(x, w).unwrap();
/// }
///
/// assert_eq!(acc.quantile(0).unwrap(), 10.0);
/// assert_eq!(acc.quantile(1).unwrap(), 20.0);
/// assert_eq!(acc.quantile(2).unwrap(), 40.0);
/// ```
#[derive(Clone, Debug)]
pub struct QuantileAccumulator {
    /// Probability levels, fixed at construction
    probs: Vec<f64>,
    /// Interior mutable state: pairs + sort cache
    inner: RefCell<QuantileInner>,
    /// Observations pushed, zero-weight ones included
    count: u64,
    /// Total weight W summed in push order; queries use the sorted prefix
    /// sum instead, which may differ in the last bits
    weight: f64,
}

impl QuantileAccumulator {
    /// Create an accumulator answering the given probability levels
    ///
    /// Fails with `ProbabilityOutOfRange` if any level lies outside [0, 1].
    pub fn new(probs: &[f64]) -> StatsResult<Self> {
        for &p in probs {
            check_probability(p)?;
        }
        Ok(Self {
            probs: probs.to_vec(),
            inner: RefCell::new(QuantileInner::default()),
            count: 0,
            weight: 0.0,
        })
    }

    /// Reset storage, keeping the probability levels
    pub fn init(&mut self) {
        *self.inner.get_mut() = QuantileInner::default();
        self.count = 0;
        self.weight = 0.0;
        tracing::trace!(
            target: "wtdstats",
            accumulator = "quantiles",
            levels = self.probs.len(),
            "init"
        );
    }

    /// Probability levels in construction order
    pub fn probs(&self) -> &[f64] {
        &self.probs
    }

    /// Store one observation
    ///
    /// A push that would overflow the total weight fails with
    /// `TotalWeightOverflow` and changes nothing.
    pub fn push(&mut self, value: f64, weight: f64) -> StatsResult<()> {
        check_weight(weight)?;
        let total = add_weight(self.weight, weight)?;
        self.count += 1;
        if weight == 0.0 {
            return Ok(());
        }
        // get_mut() bypasses RefCell runtime checks since we have &mut self
        let inner = self.inner.get_mut();
        inner.pairs.push((value, weight));
        inner.sorted = false;
        self.weight = total;
        Ok(())
    }

    fn check_mass(&self) -> StatsResult<()> {
        if self.count == 0 {
            Err(Degeneracy::EmptyStream.into())
        } else if !self.weight.is_finite() {
            Err(Degeneracy::TotalWeightOverflow.into())
        } else if self.inner.borrow().pairs.is_empty() {
            Err(Degeneracy::ZeroTotalWeight.into())
        } else {
            Ok(())
        }
    }

    /// Quantile for an arbitrary probability level
    pub fn quantile_at(&self, p: f64) -> StatsResult<f64> {
        check_probability(p)?;
        self.check_mass()?;

        let mut inner = self.inner.borrow_mut();
        inner.ensure_sorted();
        inner
            .inverse_cdf(p)
            .ok_or_else(|| Degeneracy::ZeroTotalWeight.into())
    }

    /// Quantile for the `index`-th configured level
    pub fn quantile(&self, index: usize) -> StatsResult<f64> {
        let p = *self
            .probs
            .get(index)
            .ok_or(InvalidArgument::QuantileIndexOutOfRange {
                index,
                len: self.probs.len(),
            })?;
        self.quantile_at(p)
    }

    /// Quantiles for every configured level, aligned with [`probs`](Self::probs)
    pub fn quantiles(&self) -> StatsResult<Vec<f64>> {
        self.probs.iter().map(|&p| self.quantile_at(p)).collect()
    }

    /// Weighted median, the quantile at 0.5
    pub fn median(&self) -> StatsResult<f64> {
        self.quantile_at(0.5)
    }
}

impl Accumulator for QuantileAccumulator {
    fn push(&mut self, value: f64, weight: f64) -> StatsResult<()> {
        QuantileAccumulator::push(self, value, weight)
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        let same_levels = self.probs.len() == other.probs.len()
            && self
                .probs
                .iter()
                .zip(&other.probs)
                .all(|(a, b)| a.to_bits() == b.to_bits());
        if !same_levels {
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("probs {:?}", self.probs),
                found: fmt!("probs {:?}", other.probs),
            });
        }

        let theirs = other.inner.borrow();
        let inner = self.inner.get_mut();
        inner.pairs.extend_from_slice(&theirs.pairs);
        inner.sorted = false;
        self.count += other.count;
        self.weight += other.weight;
        tracing::trace!(
            target: "wtdstats",
            accumulator = "quantiles",
            count = self.count,
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
