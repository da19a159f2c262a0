//! The alignment feature record itself, grounded on `MSP` (`blxmsp.h`).
//! Named `Feature` rather than `Msp` since nothing in this crate treats it
//! as an opaque match-span record, it's the central model type.

use serde::{Deserialize, Serialize};

use crate::coord::{Frame, IntRange, Phase, Strand};
use crate::feature::feature_seq::{FeatureId, FeatureSeqId};
use crate::feature::types::FeatureType;

/// One ungapped aligned segment linking a reference range to a match range,
/// grounded on the pairwise coordinates threaded through `gaps GSList` in
/// the original `MSP` (each node there is one such segment once the CIGAR
/// string / `Gap`/`Target` attributes are expanded, spec §4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct AlignBlock {
  pub ref_range: IntRange,
  pub match_range: IntRange,
}

/// A single genomic feature (spec §3 `Feature`/MSP), mirroring the fields
/// of `MSP` that are not display/drawing state (`style`/colour/shape are
/// carried only as a name via [`Feature::style_name`], resolved
/// out-of-crate).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Feature {
  pub id: FeatureId,
  pub feature_type: FeatureType,
  pub score: Option<f64>,
  /// The attribute `ID`, when present (spec §4.4); distinct from
  /// [`Feature::sname`], which names the match/transcript this feature
  /// belongs to.
  pub id_tag: Option<String>,
  pub phase: Phase,
  pub source_file: Option<String>,
  /// Reference sequence name (GFF3 column 1).
  pub qname: String,
  pub q_range: IntRange,
  pub q_strand: Strand,
  pub q_frame: Option<Frame>,
  /// The [`FeatureSeq`](super::feature_seq::FeatureSeq) this feature
  /// belongs to.
  pub s_sequence: FeatureSeqId,
  /// Match/transcript name as used for display and lookup (may be
  /// normalised, e.g. case-folded, from `sname_orig`).
  pub sname: String,
  pub sname_orig: String,
  pub s_range: Option<IntRange>,
  /// Full extent of the reference range this feature's `FeatureSeq` spans,
  /// set during finalisation (spec §4.5), analogous to `fullRange`.
  pub full_range: Option<IntRange>,
  pub full_s_range: Option<IntRange>,
  pub description: Option<String>,
  pub align_blocks: Vec<AlignBlock>,
  pub style_name: Option<String>,
  pub parent_id: Option<String>,
  pub children: Vec<FeatureId>,
}

impl Feature {
  #[must_use]
  pub fn new(
    id: FeatureId,
    feature_type: FeatureType,
    qname: impl Into<String>,
    q_range: IntRange,
    q_strand: Strand,
    s_sequence: FeatureSeqId,
    sname: impl Into<String>,
  ) -> Self {
    let sname = sname.into();
    Self {
      id,
      feature_type,
      score: None,
      id_tag: None,
      phase: Phase::Unset,
      source_file: None,
      qname: qname.into(),
      q_range,
      q_strand,
      q_frame: None,
      s_sequence,
      sname: sname.clone(),
      sname_orig: sname,
      s_range: None,
      full_range: None,
      full_s_range: None,
      description: None,
      align_blocks: Vec::new(),
      style_name: None,
      parent_id: None,
      children: Vec::new(),
    }
  }

  /// Length of the reference range this feature spans, convenience over
  /// `q_range.len()` used throughout coverage (C7) and dot-plot HSP overlay
  /// (C8).
  #[must_use]
  pub fn q_len(&self) -> i64 {
    self.q_range.len()
  }

  /// Total aligned length across all [`AlignBlock`]s, which can be less
  /// than `q_len` when the feature has internal gaps (spec §4.4).
  #[must_use]
  pub fn aligned_len(&self) -> i64 {
    self.align_blocks.iter().map(|block| block.ref_range.len()).sum()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample() -> Feature {
    Feature::new(
      FeatureId(0),
      FeatureType::Match,
      "chr1",
      IntRange::new(100, 200).unwrap(),
      Strand::Forward,
      FeatureSeqId(0),
      "est1",
    )
  }

  #[test]
  fn q_len_is_inclusive_range_length() {
    assert_eq!(sample().q_len(), 101);
  }

  #[test]
  fn aligned_len_sums_blocks() {
    let mut feature = sample();
    feature.align_blocks.push(AlignBlock {
      ref_range: IntRange::new(100, 150).unwrap(),
      match_range: IntRange::new(1, 51).unwrap(),
    });
    feature.align_blocks.push(AlignBlock {
      ref_range: IntRange::new(160, 200).unwrap(),
      match_range: IntRange::new(52, 92).unwrap(),
    });
    assert_eq!(feature.aligned_len(), 51 + 41);
  }
}
