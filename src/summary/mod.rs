//! Accumulation façade
//!
//! The boundary a host binding talks to: each request takes paired value
//! and weight sequences, runs exactly one accumulator over them and returns
//! a result shape ready to be marshaled back (named statistics, labeled
//! quantiles, or a labeled frequency table).
//!
//! Configuration is an explicit [`StatsConfig`] value; nothing here reads
//! global state.
//!
//! # Example
//!
//! ```
//! use wtdstats::summary::{StatsConfig, WeightedSummary};
//! use wtdstats::ErrorKind;
//!
//! let summary = WeightedSummary::new(StatsConfig::default());
//!
//! let q = summary
//!     .quantile(&[10.0, 20.0, 30.0, 40.0], &[1.0; 4], &[0.5, 0.9])
//!     .unwrap();
//! assert_eq!(q.labels(), vec!["0.5", "0.9"]);
//! assert_eq!(q.quantiles(), &[20.0, 40.0]);
//!
//! let err = summary.mean(&[1.0, 2.0, 3.0], &[1.0, 1.0]).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::LengthMismatch);
//! ```

mod config;
mod facade;
mod output;

pub use config::{StatsConfig, Verbosity};
pub use facade::WeightedSummary;
pub use output::{label, MomentSummary, QuantileSummary, WeightedTable};
