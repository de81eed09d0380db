//! Inclusive integer ranges.
//!
//! `IntegerRange` is the domain secrets are drawn from. Bounds are checked
//! once at construction; every other operation assumes `min <= max`.

use std::ops::RangeInclusive;

use super::error::ConfigError;
use super::rng::GameRng;

/// An inclusive range of integers `min..=max`.
///
/// ```
/// use simon_says::core::IntegerRange;
///
/// let range = IntegerRange::new(0, 9).unwrap();
/// assert!(range.contains(9));
/// assert!(!range.contains(10));
/// assert_eq!(range.len(), 10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IntegerRange {
    min: i32,
    max: i32,
}

impl IntegerRange {
    /// Create a range, rejecting inverted bounds.
    pub fn new(min: i32, max: i32) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedRange { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound (inclusive).
    #[must_use]
    pub const fn min(&self) -> i32 {
        self.min
    }

    /// Upper bound (inclusive).
    #[must_use]
    pub const fn max(&self) -> i32 {
        self.max
    }

    /// Check whether `n` lies within the range.
    #[must_use]
    pub const fn contains(&self, n: i32) -> bool {
        n >= self.min && n <= self.max
    }

    /// Number of integers in the range. Never zero.
    #[must_use]
    pub fn len(&self) -> u64 {
        u64::from(self.max.abs_diff(self.min)) + 1
    }

    /// Always false: a valid range holds at least one value.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the range in ascending order.
    ///
    /// Pair with `enumerate()` to get each value's 0-based position.
    pub fn iter(&self) -> RangeInclusive<i32> {
        self.min..=self.max
    }

    /// Draw one value uniformly from the range.
    pub fn sample(&self, rng: &mut GameRng) -> i32 {
        rng.gen_range_inclusive(self.min..=self.max)
    }
}

impl Default for IntegerRange {
    /// The ten decimal digits, `0..=9`.
    fn default() -> Self {
        Self { min: 0, max: 9 }
    }
}

impl IntoIterator for IntegerRange {
    type Item = i32;
    type IntoIter = RangeInclusive<i32>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl std::fmt::Display for IntegerRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
