//! Core traits for weighted accumulators
//!
//! All accumulators implement the base [`Accumulator`] trait: they fold
//! `(value, weight)` observations, report how much mass they have seen and
//! can be merged with a partner built from the same configuration.

use core::fmt::Debug;

use thiserror::Error;

use crate::error::StatsResult;

#[cfg(not(feature = "std"))]
use alloc::string::String;

/// Error during accumulator merge
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// Accumulators were built with different configurations
    #[error("incompatible config: expected {expected}, found {found}")]
    IncompatibleConfig { expected: String, found: String },
}

/// Core trait for all weighted accumulators
pub trait Accumulator: Clone + Debug {
    /// Fold one observation into the accumulator
    ///
    /// Fails with `InvalidArgument` when `weight` is negative or not finite.
    /// A rejected observation leaves the accumulator untouched.
    fn push(&mut self, value: f64, weight: f64) -> StatsResult<()>;

    /// Merge another accumulator into this one
    ///
    /// Returns an error if the accumulators are incompatible
    fn merge(&mut self, other: &Self) -> Result<(), MergeError>;

    /// Reset to the empty state, keeping the configuration
    fn clear(&mut self);

    /// Number of observations pushed, zero-weight ones included
    fn count(&self) -> u64;

    /// Sum of the weights pushed so far
    fn total_weight(&self) -> f64;

    /// Check if nothing was pushed
    fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Push paired sequences in order
    ///
    /// Lengths are checked first and every weight is validated before the
    /// first push, so a rejected batch leaves the accumulator untouched.
    fn extend_pairs(&mut self, values: &[f64], weights: &[f64]) -> StatsResult<()> {
        crate::error::StatsError::check_lengths(values.len(), weights.len())?;
        crate::error::check_weights(weights)?;
        for (&value, &weight) in values.iter().zip(weights) {
            self.push(value, weight)?;
        }
        Ok(())
    }
}
