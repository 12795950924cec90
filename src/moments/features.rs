//! Statistic tags and the feature set resolved at accumulator construction

use core::fmt;

use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

use crate::error::{InvalidArgument, StatsResult};

/// A moment statistic that can be requested from a
/// [`MomentAccumulator`](super::MomentAccumulator)
///
/// Tags are ordered by moment order; the string forms are the short names
/// used to label summary output.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StatTag {
    #[strum(serialize = "mean")]
    #[cfg_attr(feature = "serde", serde(rename = "mean"))]
    Mean,
    #[strum(serialize = "var")]
    #[cfg_attr(feature = "serde", serde(rename = "var"))]
    Variance,
    #[strum(serialize = "skew")]
    #[cfg_attr(feature = "serde", serde(rename = "skew"))]
    Skewness,
    #[strum(serialize = "kurt")]
    #[cfg_attr(feature = "serde", serde(rename = "kurt"))]
    Kurtosis,
}

impl StatTag {
    /// Moment order, 1 for the mean through 4 for kurtosis
    pub fn order(self) -> u8 {
        match self {
            StatTag::Mean => 1,
            StatTag::Variance => 2,
            StatTag::Skewness => 3,
            StatTag::Kurtosis => 4,
        }
    }

    /// Short label (`mean`, `var`, `skew`, `kurt`)
    pub fn name(self) -> &'static str {
        self.into()
    }

    fn bit(self) -> u8 {
        1 << (self.order() - 1)
    }
}

/// Ordered, deduplicated set of requested statistics
///
/// Stored as a bit set. Requesting a statistic implies every lower-order
/// power sum; [`depth`](FeatureSet::depth) is the highest order needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FeatureSet(u8);

impl FeatureSet {
    /// The empty set
    pub const fn empty() -> Self {
        Self(0)
    }

    /// The first `order` statistics in label order
    ///
    /// Fails with `OrderOutOfRange` unless `order` is between 1 and 4.
    pub fn up_to(order: usize) -> StatsResult<Self> {
        if !(1..=4).contains(&order) {
            return Err(InvalidArgument::OrderOutOfRange { order }.into());
        }
        Ok(StatTag::iter().take(order).collect())
    }

    /// Add a statistic; returns `false` if it was already present
    pub fn insert(&mut self, tag: StatTag) -> bool {
        let had = self.contains(tag);
        self.0 |= tag.bit();
        !had
    }

    /// Whether `tag` was requested explicitly
    pub fn contains(&self, tag: StatTag) -> bool {
        self.0 & tag.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    /// Highest moment order whose power sums must be tracked
    ///
    /// The mean is always tracked, so the depth is at least 1.
    pub fn depth(&self) -> u8 {
        StatTag::iter()
            .filter(|&t| self.contains(t))
            .map(StatTag::order)
            .max()
            .unwrap_or(1)
    }

    /// Whether an accumulator built from this set can report `tag`
    pub fn tracks(&self, tag: StatTag) -> bool {
        tag.order() <= self.depth()
    }

    /// Requested statistics in ascending order
    pub fn iter(&self) -> impl Iterator<Item = StatTag> + '_ {
        StatTag::iter().filter(move |&t| self.contains(t))
    }
}

impl FromIterator<StatTag> for FeatureSet {
    fn from_iter<I: IntoIterator<Item = StatTag>>(iter: I) -> Self {
        let mut set = FeatureSet::empty();
        for tag in iter {
            set.insert(tag);
        }
        set
    }
}

impl From<StatTag> for FeatureSet {
    fn from(tag: StatTag) -> Self {
        let mut set = FeatureSet::empty();
        set.insert(tag);
        set
    }
}

impl fmt::Debug for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter().map(StatTag::name)).finish()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        f.write_str("{")?;
        for tag in self.iter() {
            if !first {
                f.write_str(", ")?;
            }
            f.write_str(tag.name())?;
            first = false;
        }
        f.write_str("}")
    }
}
