//! Weighted running moments (mean, variance, skewness, kurtosis)
//!
//! Single-pass weighted generalization of Welford's algorithm with the
//! Terriberry/Pébay recurrences for the third and fourth central power
//! sums. Each push is treated as merging a one-point batch of mass `w`, so
//! the same formulas drive both [`push`](MomentAccumulator::push) and
//! [`merge`](Accumulator::merge).

use crate::error::{add_weight, check_weight, Degeneracy, InvalidArgument, StatsResult};
use crate::math;
use crate::traits::{Accumulator, MergeError};

use super::{FeatureSet, StatTag};

/// Weighted moment accumulator
///
/// Register the statistics you need with [`add_feature`], call [`init`]
/// once, then [`push`] observations. Only the power sums required by the
/// highest requested statistic are updated.
///
/// All statistics are population (weight-normalized) quantities:
///
/// - variance = M2 / W
/// - skewness = (M3 / W) / variance^1.5
/// - kurtosis = (M4 / W) / variance^2 - 3 (excess kurtosis)
///
/// # Example
///
/// ```
/// use wtdstats::moments::{MomentAccumulator, StatTag};
///
/// let mut acc = MomentAccumulator::new();
/// acc.add_feature(StatTag::Variance).unwrap();
/// acc.init();
///
/// for (x, w) in [(1.0, 1.0), (2.0, 2.0), (3.0, 1.0)] {
///     acc.push(x, w).unwrap();
/// }
///
/// assert!((acc.mean().unwrap() - 2.0).abs() < 1e-12);
/// assert!((acc.variance().unwrap() - 0.5).abs() < 1e-12);
/// ```
///
/// [`add_feature`]: MomentAccumulator::add_feature
/// [`init`]: MomentAccumulator::init
/// [`push`]: MomentAccumulator::push
#[derive(Clone, Debug)]
pub struct MomentAccumulator {
    /// Requested statistics
    features: FeatureSet,
    /// Highest power sum tracked, fixed by `init`
    depth: u8,
    initialized: bool,
    /// Observations pushed, zero-weight ones included
    count: u64,
    /// Total weight W
    weight: f64,
    /// Weighted running mean
    mean: f64,
    /// Central power sums about the running mean
    m2: f64,
    m3: f64,
    m4: f64,
}

impl Default for MomentAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl MomentAccumulator {
    /// Create an accumulator with no features registered
    ///
    /// [`init`](Self::init) must be called before the first push.
    pub fn new() -> Self {
        Self {
            features: FeatureSet::empty(),
            depth: 1,
            initialized: false,
            count: 0,
            weight: 0.0,
            mean: 0.0,
            m2: 0.0,
            m3: 0.0,
            m4: 0.0,
        }
    }

    /// Create an initialized accumulator for a feature set
    pub fn with_features(features: FeatureSet) -> Self {
        let mut acc = Self::new();
        acc.features = features;
        acc.init();
        acc
    }

    /// Register interest in a statistic
    ///
    /// Fails with `FeatureAfterInit` once [`init`](Self::init) has run.
    pub fn add_feature(&mut self, tag: StatTag) -> StatsResult<()> {
        if self.initialized {
            return Err(InvalidArgument::FeatureAfterInit.into());
        }
        self.features.insert(tag);
        Ok(())
    }

    /// Seal the feature set and reset the power sums
    ///
    /// Calling it again resets the accumulator with the same features.
    pub fn init(&mut self) {
        self.depth = self.features.depth();
        self.initialized = true;
        self.reset_sums();
        tracing::trace!(
            target: "wtdstats",
            accumulator = "moments",
            features = %self.features,
            depth = self.depth,
            "init"
        );
    }

    /// Requested statistics
    pub fn features(&self) -> FeatureSet {
        self.features
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn reset_sums(&mut self) {
        self.count = 0;
        self.weight = 0.0;
        self.mean = 0.0;
        self.m2 = 0.0;
        self.m3 = 0.0;
        self.m4 = 0.0;
    }

    /// Fold one weighted observation in O(1)
    ///
    /// Fails with `NotInitialized` before [`init`](Self::init) and with
    /// `InvalidArgument` for a negative or non-finite weight. A push that
    /// would overflow the total weight fails with `TotalWeightOverflow` and
    /// changes nothing. Zero-weight observations are counted but carry no
    /// mass.
    pub fn push(&mut self, value: f64, weight: f64) -> StatsResult<()> {
        if !self.initialized {
            return Err(InvalidArgument::NotInitialized.into());
        }
        check_weight(weight)?;
        let na = self.weight;
        let n = add_weight(na, weight)?;

        self.count += 1;
        if weight == 0.0 {
            return Ok(());
        }

        if na == 0.0 {
            self.weight = n;
            self.mean = value;
            return Ok(());
        }

        let nb = weight;
        let delta = value - self.mean;
        let delta_n = delta / n;
        // delta^2 * na * nb / n
        let term = delta * delta_n * na * nb;

        // Higher sums first: each uses the previous lower-order sums
        if self.depth >= 4 {
            self.m4 += term * delta_n * delta_n * (na * na - na * nb + nb * nb)
                + 6.0 * delta_n * delta_n * nb * nb * self.m2
                - 4.0 * delta_n * nb * self.m3;
        }
        if self.depth >= 3 {
            self.m3 += term * delta_n * (na - nb) - 3.0 * delta_n * nb * self.m2;
        }
        if self.depth >= 2 {
            self.m2 += term;
        }

        self.mean += delta_n * nb;
        self.weight = n;
        Ok(())
    }

    /// Fail unless some positive mass was pushed
    fn check_mass(&self) -> StatsResult<()> {
        if !self.weight.is_finite() {
            // Only reachable through merge; push rejects the overflow
            Err(Degeneracy::TotalWeightOverflow.into())
        } else if self.weight > 0.0 {
            Ok(())
        } else if self.count == 0 {
            Err(Degeneracy::EmptyStream.into())
        } else {
            Err(Degeneracy::ZeroTotalWeight.into())
        }
    }

    fn check_tracked(&self, tag: StatTag) -> StatsResult<()> {
        if tag.order() <= self.depth && self.initialized {
            Ok(())
        } else {
            Err(InvalidArgument::FeatureNotTracked { tag }.into())
        }
    }

    /// Weighted mean `Σ w·x / W`
    pub fn mean(&self) -> StatsResult<f64> {
        self.check_mass()?;
        Ok(self.mean)
    }

    /// Weighted population variance `M2 / W`
    pub fn variance(&self) -> StatsResult<f64> {
        self.check_tracked(StatTag::Variance)?;
        self.check_mass()?;
        Ok(self.m2 / self.weight)
    }

    /// Square root of [`variance`](Self::variance)
    pub fn std_dev(&self) -> StatsResult<f64> {
        self.variance().map(math::sqrt)
    }

    /// Variance that higher moments can divide by
    fn nonzero_variance(&self) -> StatsResult<f64> {
        let var = self.m2 / self.weight;
        if var == 0.0 {
            Err(Degeneracy::ZeroVariance.into())
        } else {
            Ok(var)
        }
    }

    /// Weighted population skewness `(M3 / W) / variance^1.5`
    ///
    /// Fails with `ZeroVariance` when all mass sits on one value.
    pub fn skewness(&self) -> StatsResult<f64> {
        self.check_tracked(StatTag::Skewness)?;
        self.check_mass()?;
        let var = self.nonzero_variance()?;
        Ok((self.m3 / self.weight) / math::powf(var, 1.5))
    }

    /// Weighted excess kurtosis `(M4 / W) / variance^2 - 3`
    ///
    /// A normal reference sample gives roughly 0.
    pub fn kurtosis(&self) -> StatsResult<f64> {
        self.check_tracked(StatTag::Kurtosis)?;
        self.check_mass()?;
        let var = self.nonzero_variance()?;
        Ok((self.m4 / self.weight) / (var * var) - 3.0)
    }

    /// Value of one statistic by tag
    pub fn get(&self, tag: StatTag) -> StatsResult<f64> {
        match tag {
            StatTag::Mean => self.mean(),
            StatTag::Variance => self.variance(),
            StatTag::Skewness => self.skewness(),
            StatTag::Kurtosis => self.kurtosis(),
        }
    }

    /// Combine power sums of an independent partial stream
    fn merge_sums(&mut self, other: &Self) {
        self.count += other.count;
        if other.weight == 0.0 {
            return;
        }
        if self.weight == 0.0 {
            self.weight = other.weight;
            self.mean = other.mean;
            self.m2 = other.m2;
            self.m3 = other.m3;
            self.m4 = other.m4;
            return;
        }

        let na = self.weight;
        let nb = other.weight;
        let n = na + nb;
        let delta = other.mean - self.mean;
        let delta_n = delta / n;
        let term = delta * delta_n * na * nb;

        if self.depth >= 4 {
            self.m4 += other.m4
                + term * delta_n * delta_n * (na * na - na * nb + nb * nb)
                + 6.0 * delta_n * delta_n * (na * na * other.m2 + nb * nb * self.m2)
                + 4.0 * delta_n * (na * other.m3 - nb * self.m3);
        }
        if self.depth >= 3 {
            self.m3 += other.m3
                + term * delta_n * (na - nb)
                + 3.0 * delta_n * (na * other.m2 - nb * self.m2);
        }
        if self.depth >= 2 {
            self.m2 += other.m2 + term;
        }

        self.mean += delta_n * nb;
        self.weight = n;
    }
}

impl Accumulator for MomentAccumulator {
    fn push(&mut self, value: f64, weight: f64) -> StatsResult<()> {
        MomentAccumulator::push(self, value, weight)
    }

    fn merge(&mut self, other: &Self) -> Result<(), MergeError> {
        if self.depth != other.depth || self.initialized != other.initialized {
            return Err(MergeError::IncompatibleConfig {
                expected: fmt!("features {} (depth {})", self.features, self.depth),
                found: fmt!("features {} (depth {})", other.features, other.depth),
            });
        }
        self.merge_sums(other);
        tracing::trace!(
            target: "wtdstats",
            accumulator = "moments",
            count = self.count,
            total_weight = self.weight,
            "merge"
        );
        Ok(())
    }

    fn clear(&mut self) {
        self.reset_sums();
    }

    fn count(&self) -> u64 {
        self.count
    }

    fn total_weight(&self) -> f64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, StatsError};

    fn full() -> MomentAccumulator {
        MomentAccumulator::with_features(FeatureSet::up_to(4).unwrap())
    }

    fn naive(values: &[f64], weights: &[f64]) -> (f64, f64, f64, f64) {
        let w: f64 = weights.iter().sum();
        let mean = values.iter().zip(weights).map(|(x, w)| x * w).sum::<f64>() / w;
        let central = |k: i32| {
            values
                .iter()
                .zip(weights)
                .map(|(x, w)| w * (x - mean).powi(k))
                .sum::<f64>()
                / w
        };
        let var = central(2);
        (
            mean,
            var,
            central(3) / var.powf(1.5),
            central(4) / (var * var) - 3.0,
        )
    }

    #[test]
    fn test_basic() {
        let mut acc = full();
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        for v in values {
            acc.push(v, 1.0).unwrap();
        }

        assert_eq!(acc.count(), 8);
        assert!((acc.mean().unwrap() - 5.0).abs() < 1e-12);
        assert!((acc.variance().unwrap() - 4.0).abs() < 1e-12);
        assert!((acc.std_dev().unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_matches_naive_weighted() {
        let values = [1.5, -2.0, 3.25, 0.0, 7.0, 2.0];
        let weights = [0.1, 0.4, 0.05, 0.2, 0.15, 0.1];
        let mut acc = full();
        for (&x, &w) in values.iter().zip(&weights) {
            acc.push(x, w).unwrap();
        }
        let (mean, var, skew, kurt) = naive(&values, &weights);
        assert!((acc.mean().unwrap() - mean).abs() < 1e-12);
        assert!((acc.variance().unwrap() - var).abs() < 1e-12);
        assert!((acc.skewness().unwrap() - skew).abs() < 1e-10);
        assert!((acc.kurtosis().unwrap() - kurt).abs() < 1e-10);
    }

    #[test]
    fn test_integer_weights_equal_repetition() {
        let mut weighted = full();
        weighted.push(1.0, 3.0).unwrap();
        weighted.push(4.0, 1.0).unwrap();

        let mut repeated = full();
        for v in [1.0, 1.0, 1.0, 4.0] {
            repeated.push(v, 1.0).unwrap();
        }

        for tag in [StatTag::Mean, StatTag::Variance, StatTag::Skewness, StatTag::Kurtosis] {
            let a = weighted.get(tag).unwrap();
            let b = repeated.get(tag).unwrap();
            assert!((a - b).abs() < 1e-12, "{}: {} vs {}", tag, a, b);
        }
    }

    #[test]
    fn test_excess_kurtosis_convention() {
        // Two equal masses at ±1: variance 1, fourth moment 1, raw kurtosis 1
        let mut acc = full();
        acc.push(-1.0, 1.0).unwrap();
        acc.push(1.0, 1.0).unwrap();
        assert!((acc.variance().unwrap() - 1.0).abs() < 1e-15);
        assert!(acc.skewness().unwrap().abs() < 1e-15);
        assert!((acc.kurtosis().unwrap() - (-2.0)).abs() < 1e-12);
    }

    #[test]
    fn test_skewness_sign() {
        let mut acc = MomentAccumulator::with_features(StatTag::Skewness.into());
        for (x, w) in [(0.0, 5.0), (1.0, 3.0), (10.0, 1.0)] {
            acc.push(x, w).unwrap();
        }
        assert!(acc.skewness().unwrap() > 0.0);
    }

    #[test]
    fn test_empty_and_zero_weight() {
        let acc = full();
        let err = acc.mean().unwrap_err();
        assert_eq!(err, StatsError::DegenerateInput(Degeneracy::EmptyStream));

        let mut acc = full();
        acc.push(3.0, 0.0).unwrap();
        acc.push(4.0, 0.0).unwrap();
        assert_eq!(acc.count(), 2);
        assert_eq!(
            acc.variance().unwrap_err(),
            StatsError::DegenerateInput(Degeneracy::ZeroTotalWeight)
        );
    }

    #[test]
    fn test_zero_weight_ignored() {
        let mut acc = full();
        acc.push(100.0, 0.0).unwrap();
        acc.push(1.0, 1.0).unwrap();
        acc.push(3.0, 1.0).unwrap();
        assert!((acc.mean().unwrap() - 2.0).abs() < 1e-15);
        assert!((acc.variance().unwrap() - 1.0).abs() < 1e-15);
    }

    #[test]
    fn test_zero_variance_is_degenerate() {
        let mut acc = full();
        for w in [0.2, 0.3, 0.5] {
            acc.push(7.0, w).unwrap();
        }
        assert_eq!(acc.variance().unwrap(), 0.0);
        assert_eq!(
            acc.skewness().unwrap_err(),
            StatsError::DegenerateInput(Degeneracy::ZeroVariance)
        );
        assert_eq!(acc.kurtosis().unwrap_err().kind(), ErrorKind::DegenerateInput);
    }

    #[test]
    fn test_negative_weight_rejected() {
        let mut acc = full();
        acc.push(1.0, 1.0).unwrap();
        let err = acc.push(2.0, -1.0).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        // Rejected observation leaves state untouched
        assert_eq!(acc.count(), 1);
        assert_eq!(acc.mean().unwrap(), 1.0);
    }

    #[test]
    fn test_init_lifecycle() {
        let mut acc = MomentAccumulator::new();
        assert_eq!(
            acc.push(1.0, 1.0).unwrap_err(),
            StatsError::InvalidArgument(InvalidArgument::NotInitialized)
        );

        acc.add_feature(StatTag::Mean).unwrap();
        acc.init();
        assert_eq!(
            acc.add_feature(StatTag::Kurtosis).unwrap_err(),
            StatsError::InvalidArgument(InvalidArgument::FeatureAfterInit)
        );

        acc.push(1.0, 1.0).unwrap();
        acc.init();
        assert!(acc.is_empty());
    }

    #[test]
    fn test_untracked_statistic() {
        let mut acc = MomentAccumulator::with_features(StatTag::Mean.into());
        acc.push(1.0, 1.0).unwrap();
        acc.push(2.0, 1.0).unwrap();
        assert_eq!(
            acc.variance().unwrap_err(),
            StatsError::InvalidArgument(InvalidArgument::FeatureNotTracked {
                tag: StatTag::Variance
            })
        );
        // Lower-order statistics come for free with a higher request
        let mut acc = MomentAccumulator::with_features(StatTag::Kurtosis.into());
        acc.push(1.0, 1.0).unwrap();
        acc.push(2.0, 1.0).unwrap();
        assert!((acc.variance().unwrap() - 0.25).abs() < 1e-15);
    }

    #[test]
    fn test_subset_skips_higher_sums() {
        let mut acc = MomentAccumulator::with_features(StatTag::Variance.into());
        for (x, w) in [(1.0, 1.0), (5.0, 2.0), (-3.0, 0.5)] {
            acc.push(x, w).unwrap();
        }
        assert_eq!(acc.m3, 0.0);
        assert_eq!(acc.m4, 0.0);
    }

    #[test]
    fn test_merge() {
        let values = [1.0, 2.0, 3.0, 10.0, -4.0, 0.5];
        let weights = [0.3, 1.0, 2.0, 0.1, 0.7, 1.5];

        let mut whole = full();
        for (&x, &w) in values.iter().zip(&weights) {
            whole.push(x, w).unwrap();
        }

        let mut left = full();
        let mut right = full();
        for (&x, &w) in values[..2].iter().zip(&weights[..2]) {
            left.push(x, w).unwrap();
        }
        for (&x, &w) in values[2..].iter().zip(&weights[2..]) {
            right.push(x, w).unwrap();
        }
        left.merge(&right).unwrap();

        assert_eq!(left.count(), whole.count());
        for tag in [StatTag::Mean, StatTag::Variance, StatTag::Skewness, StatTag::Kurtosis] {
            let a = left.get(tag).unwrap();
            let b = whole.get(tag).unwrap();
            assert!((a - b).abs() < 1e-10, "{}: {} vs {}", tag, a, b);
        }
    }

    #[test]
    fn test_merge_empty_sides() {
        let mut a = full();
        let b = full();
        a.push(1.0, 1.0).unwrap();
        a.merge(&b).unwrap();
        assert_eq!(a.mean().unwrap(), 1.0);

        let mut c = full();
        c.merge(&a).unwrap();
        assert_eq!(c.mean().unwrap(), 1.0);
        assert_eq!(c.count(), 1);
    }

    #[test]
    fn test_merge_incompatible() {
        let mut a = MomentAccumulator::with_features(StatTag::Variance.into());
        let b = full();
        assert!(matches!(
            a.merge(&b),
            Err(MergeError::IncompatibleConfig { .. })
        ));
    }

    #[test]
    fn test_numerical_stability() {
        let mut acc = MomentAccumulator::with_features(StatTag::Variance.into());
        let base = 1e9;
        for i in 0..1000 {
            acc.push(base + (i % 2) as f64, 1.0).unwrap();
        }
        assert!((acc.variance().unwrap() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_total_weight_overflow_rejected() {
        let mut acc = full();
        acc.push(1.0, 1e308).unwrap();
        let err = acc.push(2.0, 1e308).unwrap_err();
        assert_eq!(err, StatsError::DegenerateInput(Degeneracy::TotalWeightOverflow));

        // The rejected push left the sums untouched
        assert_eq!(acc.count(), 1);
        assert_eq!(acc.total_weight(), 1e308);
        assert_eq!(acc.mean().unwrap(), 1.0);
        assert_eq!(acc.variance().unwrap(), 0.0);
    }

    #[test]
    fn test_merge_overflow_fails_queries() {
        let mut a = full();
        let mut b = full();
        a.push(1.0, 1e308).unwrap();
        b.push(2.0, 1e308).unwrap();
        a.merge(&b).unwrap();
        for tag in [StatTag::Mean, StatTag::Variance, StatTag::Skewness, StatTag::Kurtosis] {
            assert_eq!(
                a.get(tag).unwrap_err(),
                StatsError::DegenerateInput(Degeneracy::TotalWeightOverflow)
            );
        }
    }

    #[test]
    fn test_nan_value_propagates() {
        let mut acc = full();
        acc.push(1.0, 1.0).unwrap();
        acc.push(f64::NAN, 1.0).unwrap();
        assert!(acc.mean().unwrap().is_nan());
    }
}
