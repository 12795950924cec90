//! Explicit configuration for summary requests

/// How much the façade reports through `tracing`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Verbosity {
    /// No events
    Quiet,
    /// One `debug` event per completed or rejected request
    #[default]
    Normal,
    /// Adds `trace` events describing each request before it runs
    Verbose,
}

impl Verbosity {
    /// Map a host-side integer level (0 quiet, 1 normal, 2+ verbose)
    pub fn from_level(level: u32) -> Self {
        match level {
            0 => Verbosity::Quiet,
            1 => Verbosity::Normal,
            _ => Verbosity::Verbose,
        }
    }
}

/// Configuration passed to [`WeightedSummary`](super::WeightedSummary)
///
/// # Example
///
/// ```
/// use wtdstats::summary::{StatsConfig, Verbosity};
///
/// let config = StatsConfig::default()
///     .with_verbosity(Verbosity::Quiet)
///     .with_normalized_table(true);
/// assert!(config.normalize_table);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StatsConfig {
    /// Event verbosity
    pub verbosity: Verbosity,
    /// Divide table frequencies by the total weight so they sum to 1
    pub normalize_table: bool,
}

impl StatsConfig {
    pub fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    pub fn with_normalized_table(mut self, normalize: bool) -> Self {
        self.normalize_table = normalize;
        self
    }
}
