//! Aggregate feature store, replacing the original's pervasive global state
//! (the `BlxViewContext`-style singleton `blxmsp.h`'s functions operate
//! against implicitly) with one explicit, owned struct threaded through by
//! the parser (C4), the finalisation pass (C5) and the coverage/dot-plot
//! engines (C7/C8). This is the "Design Notes" resolution spec §9 calls for.

use std::collections::BTreeMap;

use crate::feature::column::ColumnId;
use crate::feature::data_type::DataType;
use crate::feature::feature::Feature;
use crate::feature::feature_seq::{FeatureId, FeatureSeq, FeatureSeqId};
use crate::feature::group::Group;
use crate::feature::style::Style;
use crate::feature::types::FeatureType;

/// Owns every parsed [`Feature`] and [`FeatureSeq`], plus the
/// configuration (`DataType`s, `Style`s) that governs how they were parsed
/// and will be fetched/displayed.
#[derive(Debug, Clone, Default)]
pub struct FeatureModel {
  features: Vec<Feature>,
  feature_seqs: Vec<FeatureSeq>,
  by_type: BTreeMap<FeatureType, Vec<FeatureId>>,
  by_sname: BTreeMap<String, Vec<FeatureSeqId>>,
  pub data_types: BTreeMap<String, DataType>,
  pub styles: BTreeMap<String, Style>,
  pub groups: Vec<Group>,
  pub display_columns: Vec<ColumnId>,
}

impl FeatureModel {
  #[must_use]
  pub fn new() -> Self {
    Self {
      display_columns: ColumnId::ALL.to_vec(),
      ..Self::default()
    }
  }

  /// Finds or creates the [`FeatureSeq`] for `sname`, mirroring
  /// `addBlxSequence`'s lookup-or-insert behaviour (`blxmsp.h`).
  pub fn get_or_create_feature_seq(
    &mut self,
    sname: &str,
    make: impl FnOnce(FeatureSeqId) -> FeatureSeq,
  ) -> FeatureSeqId {
    if let Some(ids) = self.by_sname.get(sname) {
      if let Some(&id) = ids.first() {
        return id;
      }
    }

    let id = FeatureSeqId(self.feature_seqs.len() as u32);
    self.feature_seqs.push(make(id));
    self.by_sname.entry(sname.to_owned()).or_default().push(id);
    id
  }

  /// Appends `feature` and returns its id; `feature.id` must already equal
  /// [`FeatureModel::next_feature_id`], enforced by callers going through
  /// [`FeatureModel::push_feature`] rather than constructing ids by hand.
  pub fn push_feature(&mut self, mut build: impl FnMut(FeatureId) -> Feature) -> FeatureId {
    let id = self.next_feature_id();
    let feature = build(id);
    debug_assert_eq!(feature.id, id);
    self.by_type.entry(feature.feature_type).or_default().push(id);
    self.features.push(feature);
    id
  }

  #[must_use]
  pub fn next_feature_id(&self) -> FeatureId {
    FeatureId(self.features.len() as u32)
  }

  #[must_use]
  pub fn feature(&self, id: FeatureId) -> Option<&Feature> {
    self.features.get(id.0 as usize)
  }

  pub fn feature_mut(&mut self, id: FeatureId) -> Option<&mut Feature> {
    self.features.get_mut(id.0 as usize)
  }

  #[must_use]
  pub fn feature_seq(&self, id: FeatureSeqId) -> Option<&FeatureSeq> {
    self.feature_seqs.get(id.0 as usize)
  }

  pub fn feature_seq_mut(&mut self, id: FeatureSeqId) -> Option<&mut FeatureSeq> {
    self.feature_seqs.get_mut(id.0 as usize)
  }

  #[must_use]
  pub fn features(&self) -> &[Feature] {
    &self.features
  }

  #[must_use]
  pub fn feature_seqs(&self) -> &[FeatureSeq] {
    &self.feature_seqs
  }

  #[must_use]
  pub fn features_of_type(&self, feature_type: FeatureType) -> &[FeatureId] {
    self.by_type.get(&feature_type).map_or(&[], Vec::as_slice)
  }

  #[must_use]
  pub fn feature_seqs_by_name(&self, sname: &str) -> &[FeatureSeqId] {
    self.by_sname.get(sname).map_or(&[], Vec::as_slice)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::coord::{IntRange, Strand};
  use crate::feature::feature_seq::FeatureSeqType;

  #[test]
  fn get_or_create_feature_seq_reuses_existing() {
    let mut model = FeatureModel::new();
    let a = model.get_or_create_feature_seq("est1", |id| FeatureSeq::new(id, FeatureSeqType::Match, "est1"));
    let b = model.get_or_create_feature_seq("est1", |id| FeatureSeq::new(id, FeatureSeqType::Match, "est1"));
    assert_eq!(a, b);
    assert_eq!(model.feature_seqs().len(), 1);
  }

  #[test]
  fn push_feature_indexes_by_type() {
    let mut model = FeatureModel::new();
    let seq_id = model.get_or_create_feature_seq("est1", |id| FeatureSeq::new(id, FeatureSeqType::Match, "est1"));
    let feature_id = model.push_feature(|id| {
      Feature::new(id, FeatureType::Match, "chr1", IntRange::new(1, 10).unwrap(), Strand::Forward, seq_id, "est1")
    });
    assert_eq!(model.features_of_type(FeatureType::Match), &[feature_id]);
    assert!(model.features_of_type(FeatureType::Cds).is_empty());
  }
}
