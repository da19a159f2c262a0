//! High-scoring pair overlay drawn on top of a dot-plot, grounded on the
//! `HSP`/`GSP` feature types `blxmsp.h` carries alongside the plain `MATCH`
//! type specifically for this purpose.

use crate::coord::IntRange;
use crate::feature::{Feature, FeatureType};

/// One high-scoring pair to overlay: a reference range, a match range and
/// a score, extracted from a [`Feature`] of type [`FeatureType::Hsp`] (or
/// any scored match feature, since the dot-plot overlay doesn't care which
/// produced it).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsp {
  pub ref_range: IntRange,
  pub match_range: IntRange,
  pub score: f64,
}

/// Extracts overlay-ready HSPs from `features`, keeping only those with
/// both a `q_range`/`s_range` and a score (features lacking either, e.g. an
/// unscored `Region`, are silently skipped rather than overlaid with a
/// placeholder).
#[must_use]
pub fn hsps_from_features(features: &[&Feature]) -> Vec<Hsp> {
  features
    .iter()
    .filter(|f| matches!(f.feature_type, FeatureType::Hsp | FeatureType::Match | FeatureType::MatchSet))
    .filter_map(|f| {
      let s_range = f.s_range?;
      let score = f.score?;
      Some(Hsp { ref_range: f.q_range, match_range: s_range, score })
    })
    .collect()
}

/// The highest-scoring HSP in the overlay, used to pick a sensible default
/// greyramp range when a caller hasn't set one explicitly.
#[must_use]
pub fn best_hsp(hsps: &[Hsp]) -> Option<&Hsp> {
  hsps.iter().max_by(|a, b| a.score.total_cmp(&b.score))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coord::Strand;
  use crate::feature::{FeatureId, FeatureSeqId};

  fn feature(score: Option<f64>, s_range: Option<IntRange>) -> Feature {
    let mut f = Feature::new(
      FeatureId(0),
      FeatureType::Match,
      "chr1",
      IntRange::new(1, 10).unwrap(),
      Strand::Forward,
      FeatureSeqId(0),
      "m",
    );
    f.score = score;
    f.s_range = s_range;
    f
  }

  #[test]
  fn skips_features_missing_score_or_s_range() {
    let f1 = feature(Some(10.0), Some(IntRange::new(1, 10).unwrap()));
    let f2 = feature(None, Some(IntRange::new(1, 10).unwrap()));
    let f3 = feature(Some(10.0), None);
    let refs = vec![&f1, &f2, &f3];
    assert_eq!(hsps_from_features(&refs).len(), 1);
  }

  #[test]
  fn best_hsp_picks_highest_score() {
    let hsps = vec![
      Hsp { ref_range: IntRange::new(1, 10).unwrap(), match_range: IntRange::new(1, 10).unwrap(), score: 5.0 },
      Hsp { ref_range: IntRange::new(1, 10).unwrap(), match_range: IntRange::new(1, 10).unwrap(), score: 50.0 },
    ];
    assert_eq!(best_hsp(&hsps).unwrap().score, 50.0);
  }

  #[test]
  fn best_hsp_of_empty_is_none() {
    assert_eq!(best_hsp(&[]), None);
  }
}
