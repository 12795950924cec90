//! Weighted moment statistics
//!
//! Streaming accumulation of weighted mean, variance, skewness and
//! kurtosis in a single pass with O(1) memory. Only the power sums needed
//! by the requested statistics are maintained.
//!
//! # Example
//!
//! ```
//! use wtdstats::moments::{FeatureSet, MomentAccumulator};
//!
//! let mut acc = MomentAccumulator::with_features(FeatureSet::up_to(4).unwrap());
//!
//! for (value, weight) in [(1.0, 0.2), (2.0, 0.5), (4.0, 0.3)] {
//!     acc.push(value, weight).unwrap();
//! }
//!
//! println!("Mean: {}", acc.mean().unwrap());
//! println!("Variance: {}", acc.variance().unwrap());
//! println!("Skewness: {}", acc.skewness().unwrap());
//! println!("Excess kurtosis: {}", acc.kurtosis().unwrap());
//! ```

mod features;
mod weighted;

pub use features::{FeatureSet, StatTag};
pub use weighted::MomentAccumulator;
