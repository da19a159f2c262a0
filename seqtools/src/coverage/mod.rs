//! Per-base coverage/depth computation (C7), grounded on the coverage
//! histogram Blixem draws above its alignment tracks (driven by the same
//! `MSP` ranges as the feature model, `blxmsp.h`).

use crate::coord::IntRange;
use crate::feature::Feature;

/// Per-base feature depth over `window`: `depth[i]` counts how many of
/// `features` cover the base at `window.min + i`.
#[must_use]
pub fn compute_depth(features: &[&Feature], window: &IntRange) -> Vec<u32> {
  let len = window.len() as usize;
  let mut depth = vec![0_u32; len];

  for feature in features {
    let Some(overlap) = feature.q_range.intersection(window) else { continue };
    let start = (overlap.min - window.min) as usize;
    let end = (overlap.max - window.min) as usize;
    for slot in &mut depth[start..=end] {
      *slot += 1;
    }
  }

  depth
}

/// The maximum depth value in `depth`, used to scale the coverage track's
/// vertical axis; `0` for an empty window.
#[must_use]
pub fn max_depth(depth: &[u32]) -> u32 {
  depth.iter().copied().max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coord::Strand;
  use crate::feature::{FeatureSeqId, FeatureType};

  fn feature(id: u32, start: i64, end: i64) -> Feature {
    Feature::new(
      crate::feature::FeatureId(id),
      FeatureType::Match,
      "chr1",
      IntRange::new(start, end).unwrap(),
      Strand::Forward,
      FeatureSeqId(0),
      "m",
    )
  }

  #[test]
  fn depth_counts_overlapping_features() {
    let f1 = feature(0, 1, 10);
    let f2 = feature(1, 5, 15);
    let window = IntRange::new(1, 15).unwrap();
    let depth = compute_depth(&[&f1, &f2], &window);
    assert_eq!(depth.len(), 15);
    assert_eq!(depth[0], 1); // base 1
    assert_eq!(depth[4], 2); // base 5, covered by both
    assert_eq!(depth[14], 1); // base 15
  }

  #[test]
  fn max_depth_of_empty_is_zero() {
    assert_eq!(max_depth(&[]), 0);
  }

  #[test]
  fn features_outside_window_do_not_contribute() {
    let f1 = feature(0, 100, 110);
    let window = IntRange::new(1, 10).unwrap();
    let depth = compute_depth(&[&f1], &window);
    assert_eq!(max_depth(&depth), 0);
  }
}
