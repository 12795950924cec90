//! Discrete weighted frequency tables
//!
//! This module accumulates weight per exactly-equal value, for value
//! domains that are small and discrete (e.g. categorical sampler output),
//! and derives the weighted mode.
//!
//! # Algorithms
//!
//! - [`DiscreteAccumulator`]: ordered map from value to accumulated weight
//! - [`DiscreteHistogram`]: sorted positions with aligned frequencies
//!
//! # Example
//!
//! ```
//! use wtdstats::discrete::DiscreteAccumulator;
//!
//! let mut acc = DiscreteAccumulator::new();
//!
//! for value in [1.0, 1.0, 2.0, 3.0, 3.0, 3.0] {
//!     acc.push(value, 1.0).unwrap();
//! }
//!
//! let pdf = acc.pdf();
//! assert_eq!(pdf.positions(), &[1.0, 2.0, 3.0]);
//! assert_eq!(pdf.frequencies(), &[2.0, 1.0, 3.0]);
//! assert_eq!(acc.mode().unwrap(), 3.0);
//! ```

mod accumulator;
mod histogram;

pub use accumulator::DiscreteAccumulator;
pub use histogram::DiscreteHistogram;
