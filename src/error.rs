//! Error taxonomy for weighted accumulation requests
//!
//! Every failure is local to one request: the caller gets a [`StatsError`]
//! back and no partial result. [`StatsError::kind`] collapses the detailed
//! variants into the three kinds a host binding needs to tell apart.

use thiserror::Error;

#[cfg(feature = "moments")]
use crate::moments::StatTag;

/// Result alias used throughout the crate.
pub type StatsResult<T> = Result<T, StatsError>;

/// Coarse classification of a [`StatsError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Values and weights have different lengths
    LengthMismatch,
    /// A malformed argument (weight, probability, order, index, call order)
    InvalidArgument,
    /// The statistic is undefined for the data seen so far
    DegenerateInput,
}

/// Error returned by accumulators and the summary façade
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    /// Values and weights sequences differ in length
    #[error("values and weights must have same length (got {values} values and {weights} weights)")]
    LengthMismatch { values: usize, weights: usize },

    /// An argument was rejected before any computation happened
    #[error("invalid argument: {0}")]
    InvalidArgument(#[from] InvalidArgument),

    /// The requested statistic is undefined for this stream
    #[error("degenerate input: {0}")]
    DegenerateInput(#[from] Degeneracy),
}

impl StatsError {
    /// Coarse kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            StatsError::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            StatsError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            StatsError::DegenerateInput(_) => ErrorKind::DegenerateInput,
        }
    }

    pub(crate) fn check_lengths(values: usize, weights: usize) -> StatsResult<()> {
        if values == weights {
            Ok(())
        } else {
            Err(StatsError::LengthMismatch { values, weights })
        }
    }
}

/// Details for [`StatsError::InvalidArgument`]
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum InvalidArgument {
    /// Weights must be non-negative
    #[error("weight must be non-negative, got {weight}")]
    NegativeWeight { weight: f64 },

    /// Weights must be finite
    #[error("weight must be finite, got {weight}")]
    NonFiniteWeight { weight: f64 },

    /// Weight at a given position of an input sequence was rejected
    #[error("weight at index {index} must be finite and non-negative, got {weight}")]
    BadWeightAt { index: usize, weight: f64 },

    /// Probability levels live in [0, 1]
    #[error("probability must lie in [0, 1], got {p}")]
    ProbabilityOutOfRange { p: f64 },

    /// Moment orders run from 1 (mean) to 4 (kurtosis)
    #[error("moment order must be between 1 and 4, got {order}")]
    OrderOutOfRange { order: usize },

    /// Quantile index past the configured probability levels
    #[error("quantile index {index} out of range for {len} probability levels")]
    QuantileIndexOutOfRange { index: usize, len: usize },

    /// The statistic's power sums are not tracked by this accumulator
    #[cfg(feature = "moments")]
    #[error("statistic '{tag}' was not requested before init")]
    FeatureNotTracked { tag: StatTag },

    /// Features can only be added before `init`
    #[error("features cannot be added after init")]
    FeatureAfterInit,

    /// `push` was called before `init`
    #[error("accumulator used before init")]
    NotInitialized,
}

/// Details for [`StatsError::DegenerateInput`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Degeneracy {
    /// Nothing was pushed
    #[error("empty stream")]
    EmptyStream,

    /// Observations were pushed but their weights sum to zero
    #[error("total weight is zero")]
    ZeroTotalWeight,

    /// Skewness and kurtosis divide by the variance
    #[error("variance is zero, higher moments are undefined")]
    ZeroVariance,

    /// The running total weight is no longer a finite number
    #[error("total weight overflows f64")]
    TotalWeightOverflow,
}

/// Validate a single observation weight.
pub(crate) fn check_weight(weight: f64) -> StatsResult<()> {
    if !weight.is_finite() {
        return Err(InvalidArgument::NonFiniteWeight { weight }.into());
    }
    if weight < 0.0 {
        return Err(InvalidArgument::NegativeWeight { weight }.into());
    }
    Ok(())
}

/// Add a validated weight to a running total, failing if the sum overflows.
pub(crate) fn add_weight(total: f64, weight: f64) -> StatsResult<f64> {
    let sum = total + weight;
    if sum.is_finite() {
        Ok(sum)
    } else {
        Err(Degeneracy::TotalWeightOverflow.into())
    }
}

/// Validate a whole weight sequence, reporting the first bad position.
///
/// The batch total must also stay finite.
pub(crate) fn check_weights(weights: &[f64]) -> StatsResult<()> {
    if let Some(index) = weights
        .iter()
        .position(|&w| !w.is_finite() || w < 0.0)
    {
        return Err(InvalidArgument::BadWeightAt {
            index,
            weight: weights[index],
        }
        .into());
    }
    weights.iter().try_fold(0.0, |total, &w| add_weight(total, w))?;
    Ok(())
}

/// Validate a probability level.
pub(crate) fn check_probability(p: f64) -> StatsResult<()> {
    // NaN fails both comparisons
    if (0.0..=1.0).contains(&p) {
        Ok(())
    } else {
        Err(InvalidArgument::ProbabilityOutOfRange { p }.into())
    }
}
