//! # wtdstats
//!
//! Streaming, weight-aware statistics for Rust.
//!
//! wtdstats consumes sequences of `(value, weight)` observations (typically
//! importance-weighted particles from a sequential Monte Carlo sampler) and
//! produces weighted moments, weighted quantiles and discrete weighted
//! frequency tables.
//!
//! ## Features
//!
//! - **Moments**: weighted mean, variance, skewness and excess kurtosis in one
//!   pass, tracking only the power sums the requested statistics need
//! - **Quantiles**: exact inverse-CDF weighted quantiles at fixed levels
//! - **Discrete tables**: exact-value weighted histograms and the weighted mode
//! - **Mergeability**: partial streams accumulated independently can be merged
//! - **Typed errors**: length mismatches, invalid arguments and degenerate
//!   inputs are distinct, recoverable error values
//!
//! ## Quick Start
//!
//! ```rust
//! use wtdstats::prelude::*;
//!
//! let values = [1.0, 2.0, 3.0, 4.0];
//! let weights = [0.1, 0.2, 0.3, 0.4];
//!
//! let summary = WeightedSummary::new(StatsConfig::default());
//! let stats = summary.stat(&values, &weights, 2).unwrap();
//! println!("{:?} = {:?}", stats.names(), stats.values());
//! println!("Median: {}", summary.median(&values, &weights).unwrap());
//! ```
//!
//! ## Distributed Computing
//!
//! All accumulators implement the [`Accumulator`](traits::Accumulator)
//! trait, which includes a `merge` operation:
//!
//! ```rust
//! use wtdstats::moments::{FeatureSet, MomentAccumulator};
//! use wtdstats::traits::Accumulator;
//!
//! let features = FeatureSet::up_to(2).unwrap();
//! let mut worker1 = MomentAccumulator::with_features(features);
//! let mut worker2 = MomentAccumulator::with_features(features);
//!
//! worker1.push(1.0, 0.5).unwrap();
//! worker2.push(3.0, 0.5).unwrap();
//!
//! worker1.merge(&worker2).unwrap();
//! assert_eq!(worker1.mean().unwrap(), 2.0);
//! ```
//!
//! ## Feature Flags
//!
//! Accumulator families (all on by default):
//! - `moments`: weighted moment accumulator
//! - `quantiles`: weighted quantile accumulator
//! - `discrete`: discrete histogram and mode
//!
//! The [`summary`] façade is available when all three are enabled.
//!
//! Platform features:
//! - `std` (default): Standard library support
//! - `serde`: Serialization of configuration and result shapes
//! - `full`: Every family plus `serde`

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(not(feature = "std"))]
extern crate alloc;

// format! in both std and no_std
macro_rules! fmt {
    ($($arg:tt)*) => {{
        #[cfg(feature = "std")]
        { format!($($arg)*) }
        #[cfg(not(feature = "std"))]
        { alloc::format!($($arg)*) }
    }};
}

pub mod error;
mod math;
pub mod traits;

#[cfg(feature = "moments")]
#[cfg_attr(docsrs, doc(cfg(feature = "moments")))]
pub mod moments;

#[cfg(feature = "quantiles")]
#[cfg_attr(docsrs, doc(cfg(feature = "quantiles")))]
pub mod quantiles;

#[cfg(feature = "discrete")]
#[cfg_attr(docsrs, doc(cfg(feature = "discrete")))]
pub mod discrete;

#[cfg(all(feature = "moments", feature = "quantiles", feature = "discrete"))]
#[cfg_attr(
    docsrs,
    doc(cfg(all(feature = "moments", feature = "quantiles", feature = "discrete")))
)]
pub mod summary;

pub use error::{Degeneracy, ErrorKind, InvalidArgument, StatsError, StatsResult};

/// Missing-value sentinel (a NaN with payload 1954)
///
/// Marshaling layers map host-side "not available" entries to this value.
/// Accumulators treat it as an ordinary `f64`: it propagates through
/// moments, sorts last in quantiles and forms its own discrete bucket.
pub const MISSING: f64 = f64::from_bits(0x7FF0_0000_0000_07A2);

pub mod prelude {
    pub use crate::error::{ErrorKind, StatsError, StatsResult};
    pub use crate::traits::*;

    #[cfg(feature = "moments")]
    pub use crate::moments::{FeatureSet, MomentAccumulator, StatTag};

    #[cfg(feature = "quantiles")]
    pub use crate::quantiles::QuantileAccumulator;

    #[cfg(feature = "discrete")]
    pub use crate::discrete::{DiscreteAccumulator, DiscreteHistogram};

    #[cfg(all(feature = "moments", feature = "quantiles", feature = "discrete"))]
    pub use crate::summary::{StatsConfig, Verbosity, WeightedSummary};
}

#[cfg(feature = "moments")]
pub use moments::MomentAccumulator;

#[cfg(feature = "quantiles")]
pub use quantiles::QuantileAccumulator;

#[cfg(feature = "discrete")]
pub use discrete::DiscreteAccumulator;
