//! Weighted quantile estimation
//!
//! This module provides an exact, batch-style weighted quantile
//! accumulator. It keeps every positive-weight observation, which is
//! acceptable when stream sizes are bounded (e.g. by a sampler's particle
//! population).
//!
//! # Algorithms
//!
//! - [`QuantileAccumulator`]: inverse-CDF quantiles at fixed probability levels
//!
//! # Example
//!
//! ```
//! use wtdstats::quantiles::QuantileAccumulator;
//!
//! let mut acc = QuantileAccumulator::new(&[0.05, 0.5, 0.95]).unwrap();
//!
//! for (value, weight) in [(1.0, 0.1), (2.0, 0.4), (3.0, 0.3), (4.0, 0.2)] {
//!     acc.push(value, weight).unwrap();
//! }
//!
//! let median = acc.median().unwrap();
//! println!("Median: {}", median);
//! ```

mod weighted;

pub use weighted::QuantileAccumulator;
