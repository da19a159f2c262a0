//! The match/transcript sequence record, grounded on `BlxSequence`
//! (`blxmsp.h`): one `FeatureSeq` per distinct match or transcript name,
//! shared by every [`super::feature::Feature`] (MSP) belonging to it.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use crate::coord::{IntRange, Strand};
use crate::feature::column::ColumnValue;

/// Which kind of entity a [`FeatureSeq`] represents, mirroring
/// `BlxSequenceType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum FeatureSeqType {
  Transcript,
  Match,
  Variation,
  Region,
}

/// Opaque handle to a [`FeatureSeq`] inside a [`super::model::FeatureModel`],
/// replacing the original's `GList *mspList` back-pointer with a typed
/// index (spec §9 design note: avoid global mutable state).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FeatureSeqId(pub u32);

/// Opaque handle to a [`super::feature::Feature`], see [`FeatureSeqId`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FeatureId(pub u32);

/// One match/transcript sequence record (spec §3 `FeatureSeq`), mirroring
/// `BlxSequence`. `q_range_fwd`/`q_range_rev` track the reference-coordinate
/// extent of this sequence's features on each strand independently, since a
/// single match name can in principle hit both strands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FeatureSeq {
  pub id: FeatureSeqId,
  pub seq_type: FeatureSeqType,
  pub data_type_name: Option<String>,
  pub id_tag: String,
  pub columns: Vec<ColumnValue>,
  pub strand: Strand,
  /// Whether this sequence's residues must be fetched (spec §4.6); false
  /// for feature types that never carry a sequence of their own, e.g.
  /// [`FeatureSeqType::Region`].
  pub sequence_reqd: bool,
  pub sequence: Option<String>,
  pub q_range_fwd: Option<IntRange>,
  pub q_range_rev: Option<IntRange>,
  pub organism_abbrev: Option<String>,
  pub features: Vec<FeatureId>,
}

impl FeatureSeq {
  #[must_use]
  pub fn new(id: FeatureSeqId, seq_type: FeatureSeqType, id_tag: impl Into<String>) -> Self {
    Self {
      id,
      seq_type,
      data_type_name: None,
      id_tag: id_tag.into(),
      columns: Vec::new(),
      strand: Strand::None,
      sequence_reqd: matches!(seq_type, FeatureSeqType::Match | FeatureSeqType::Transcript),
      sequence: None,
      q_range_fwd: None,
      q_range_rev: None,
      organism_abbrev: None,
      features: Vec::new(),
    }
  }

  /// The reference-coordinate extent of this sequence's features on
  /// `strand`, grounded on `findMspListSExtent`/the forward/reverse
  /// `qRange` accessors of `BlxSequence` (spec §4.3 `ref_extent`).
  #[must_use]
  pub fn ref_extent(&self, strand: Strand) -> Option<IntRange> {
    if strand.is_reverse() { self.q_range_rev } else { self.q_range_fwd }
  }

  /// Widens the extent for `strand` to also cover `range`, used while
  /// features are being added during parsing (spec §4.5 finalisation).
  pub fn extend_ref_extent(&mut self, strand: Strand, range: IntRange) {
    let slot = if strand.is_reverse() { &mut self.q_range_rev } else { &mut self.q_range_fwd };
    *slot = Some(match slot {
      Some(existing) => existing.union(&range),
      None => range,
    });
  }
}
