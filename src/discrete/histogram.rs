//! Sorted discrete histogram produced by [`DiscreteAccumulator`](super::DiscreteAccumulator)

use core::cmp::Ordering;

use crate::error::{Degeneracy, StatsResult};

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Weighted frequency table over distinct values
///
/// Positions are strictly ascending (NaN, if present, comes last) and each
/// appears once; `frequencies[i]` is the weight accumulated at
/// `positions[i]`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiscreteHistogram {
    positions: Vec<f64>,
    frequencies: Vec<f64>,
}

/// Total order used for positions: numeric, with `-0.0 == 0.0` and NaN last.
fn position_cmp(a: f64, b: f64) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
    }
}

impl DiscreteHistogram {
    /// Build from sorted, distinct positions and aligned frequencies.
    pub(crate) fn from_sorted(positions: Vec<f64>, frequencies: Vec<f64>) -> Self {
        debug_assert_eq!(positions.len(), frequencies.len());
        debug_assert!(positions
            .windows(2)
            .all(|w| position_cmp(w[0], w[1]) == Ordering::Less));
        Self {
            positions,
            frequencies,
        }
    }

    /// Distinct observed values, ascending
    pub fn positions(&self) -> &[f64] {
        &self.positions
    }

    /// Accumulated weight per position
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Number of distinct positions
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Sum of all frequencies
    pub fn total(&self) -> f64 {
        self.frequencies.iter().sum()
    }

    /// `(position, frequency)` pairs in ascending position order
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.positions
            .iter()
            .copied()
            .zip(self.frequencies.iter().copied())
    }

    /// Weight accumulated at `value`, zero if it was never observed
    pub fn frequency_of(&self, value: f64) -> f64 {
        self.positions
            .binary_search_by(|&p| position_cmp(p, value))
            .map(|i| self.frequencies[i])
            .unwrap_or(0.0)
    }

    /// Copy with frequencies divided by their total, so they sum to 1
    ///
    /// Fails with `DegenerateInput` when empty or when the total is zero.
    pub fn normalized(&self) -> StatsResult<Self> {
        if self.is_empty() {
            return Err(Degeneracy::EmptyStream.into());
        }
        let total = self.total();
        if total <= 0.0 {
            return Err(Degeneracy::ZeroTotalWeight.into());
        }
        Ok(Self {
            positions: self.positions.clone(),
            frequencies: self.frequencies.iter().map(|f| f / total).collect(),
        })
    }

    /// Position with the largest frequency, ties broken toward the smallest
    ///
    /// Fails with `DegenerateInput` when empty or when every frequency is
    /// zero.
    pub fn mode(&self) -> StatsResult<f64> {
        mode_of(self.iter())
    }
}

/// Single ascending scan for the weighted mode.
pub(crate) fn mode_of(entries: impl Iterator<Item = (f64, f64)>) -> StatsResult<f64> {
    let mut best: Option<(f64, f64)> = None;
    for (position, weight) in entries {
        // Strictly greater keeps the smallest position among ties
        match best {
            Some((_, w)) if weight <= w => {}
            _ => best = Some((position, weight)),
        }
    }
    match best {
        None => Err(Degeneracy::EmptyStream.into()),
        Some((_, w)) if w <= 0.0 => Err(Degeneracy::ZeroTotalWeight.into()),
        Some((position, _)) => Ok(position),
    }
}
