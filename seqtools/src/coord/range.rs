//! Inclusive integer ranges, used throughout the coordinate engine (C1) and
//! feature model (C3) for `refRange`/`matchRange`/`displayRange` etc.
//!
//! Grounded on the teacher's `coord::range::Range` (see
//! `coord_map_global.rs`), adapted from a half-open alignment-space range to
//! the closed `[min, max]` convention spec §3/§4.1 uses for `IntRange`.

use crate::error::ModelError;
use serde::{Deserialize, Serialize};

/// A closed interval `[min, max]` over `i64` DNA/display/match coordinates.
///
/// Empty ranges are not representable: every `IntRange` has `min <= max`.
/// Construction validates this (spec §8 invariant 1) and returns
/// [`ModelError::InvalidRange`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub struct IntRange {
  pub min: i64,
  pub max: i64,
}

impl IntRange {
  pub fn new(min: i64, max: i64) -> Result<Self, ModelError> {
    if min > max {
      return Err(ModelError::InvalidRange { min, max });
    }
    Ok(Self { min, max })
  }

  /// Constructs a range normalising `(a, b)` regardless of order. Useful when
  /// building a range from two coordinates whose order depends on strand.
  #[must_use]
  pub fn from_unordered(a: i64, b: i64) -> Self {
    Self {
      min: a.min(b),
      max: a.max(b),
    }
  }

  #[must_use]
  pub fn len(&self) -> i64 {
    self.max - self.min + 1
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    false // IntRange is always non-empty by construction
  }

  #[must_use]
  pub fn contains(&self, idx: i64) -> bool {
    idx >= self.min && idx <= self.max
  }

  #[must_use]
  pub fn intersects(&self, other: &Self) -> bool {
    self.min <= other.max && other.min <= self.max
  }

  #[must_use]
  pub fn intersection(&self, other: &Self) -> Option<Self> {
    let min = self.min.max(other.min);
    let max = self.max.min(other.max);
    (min <= max).then_some(Self { min, max })
  }

  #[must_use]
  pub fn union(&self, other: &Self) -> Self {
    Self {
      min: self.min.min(other.min),
      max: self.max.max(other.max),
    }
  }

  /// Clamp `idx` into this range.
  #[must_use]
  pub fn clamp_value(&self, idx: i64) -> i64 {
    idx.clamp(self.min, self.max)
  }

  /// Clamp `other` so that it lies entirely within `self`. If `preserve_len`
  /// is set and `other` is narrower than `self`, the clamped range keeps
  /// `other`'s original length where possible (shifting rather than
  /// shrinking it), matching `boundsLimitRange`'s "preserve length" mode
  /// (spec §4.1).
  #[must_use]
  pub fn clamp_range(&self, other: &Self, preserve_len: bool) -> Self {
    if !preserve_len {
      return Self {
        min: other.min.clamp(self.min, self.max),
        max: other.max.clamp(self.min, self.max),
      };
    }

    let len = other.len();
    let mut min = other.min;
    let mut max = other.max;

    if min < self.min {
      min = self.min;
      max = (min + len - 1).min(self.max);
    }
    if max > self.max {
      max = self.max;
      min = (max - len + 1).max(self.min);
    }

    Self { min, max }
  }

  /// Widen this range by `n` on each side, clamped to `bounds`.
  #[must_use]
  pub fn expand(&self, n: i64, bounds: &Self) -> Self {
    Self {
      min: (self.min - n).max(bounds.min),
      max: (self.max + n).min(bounds.max),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  #[test]
  fn rejects_inverted_range() {
    assert_eq!(IntRange::new(10, 5), Err(ModelError::InvalidRange { min: 10, max: 5 }));
  }

  #[test]
  fn len_is_inclusive() {
    assert_eq!(IntRange::new(1, 10).unwrap().len(), 10);
  }

  #[rstest]
  #[case(1, 10, 5, true)]
  #[case(1, 10, 11, false)]
  #[case(1, 10, 1, true)]
  fn contains_is_inclusive(#[case] min: i64, #[case] max: i64, #[case] idx: i64, #[case] expected: bool) {
    assert_eq!(IntRange::new(min, max).unwrap().contains(idx), expected);
  }

  #[test]
  fn intersection_of_disjoint_ranges_is_none() {
    let a = IntRange::new(1, 5).unwrap();
    let b = IntRange::new(10, 20).unwrap();
    assert_eq!(a.intersection(&b), None);
  }

  #[test]
  fn clamp_range_preserving_length_shifts_instead_of_shrinking() {
    let bounds = IntRange::new(1, 100).unwrap();
    let narrow = IntRange::new(-5, 4).unwrap();
    let clamped = bounds.clamp_range(&narrow, true);
    assert_eq!(clamped, IntRange::new(1, 10).unwrap());
  }
}
