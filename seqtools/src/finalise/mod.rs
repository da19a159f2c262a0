//! The finalisation pass (C5): post-parse range/frame/gaps computation and
//! child→parent stitching, grounded on `finaliseBlxSequences` (`blxmsp.h`).
//!
//! The GFF3 parser (C4) builds features independently, line by line, and
//! cannot know a child's full transcript extent until every sibling has
//! been seen. This pass runs once parsing is complete: it links every
//! feature to its `Parent` by id, then propagates each parent's full range
//! back down (and each child's union up) so every feature in a transcript
//! agrees on the same `full_range`/`full_s_range`.

use std::collections::HashMap;

use crate::coord::IntRange;
use crate::error::ModelError;
use crate::feature::{FeatureId, FeatureModel};

/// Runs the finalisation pass over `model` in place.
///
/// # Errors
/// Returns [`ModelError::InvalidColumn`]-free variants are not produced
/// here; the only failure mode is a `Parent` attribute naming an `ID` that
/// was never seen, reported via [`ModelError::SeqDataMismatch`] with the
/// dangling parent id so the caller can log it and continue (spec §7
/// "model errors abort the enclosing operation", here the enclosing
/// operation is linking that one feature, not the whole pass).
pub fn finalise(model: &mut FeatureModel) -> Vec<ModelError> {
  let mut errors = Vec::new();
  link_children_to_parents(model, &mut errors);
  propagate_full_ranges(model);
  errors
}

fn link_children_to_parents(model: &mut FeatureModel, errors: &mut Vec<ModelError>) {
  let id_tag_to_feature: HashMap<String, FeatureId> = model
    .features()
    .iter()
    .filter_map(|f| f.id_tag.clone().map(|tag| (tag, f.id)))
    .collect();

  let links: Vec<(FeatureId, FeatureId)> = model
    .features()
    .iter()
    .filter_map(|f| {
      let parent_tag = f.parent_id.as_ref()?;
      match id_tag_to_feature.get(parent_tag) {
        Some(&parent_id) => Some((parent_id, f.id)),
        None => {
          errors.push(ModelError::SeqDataMismatch(parent_tag.clone()));
          None
        }
      }
    })
    .collect();

  for (parent_id, child_id) in links {
    if let Some(parent) = model.feature_mut(parent_id) {
      if !parent.children.contains(&child_id) {
        parent.children.push(child_id);
      }
    }
  }
}

/// For every feature with children, sets `full_range` to the union of all
/// children's `q_range` (and each child's own `full_range` to the same
/// union), mirroring `finaliseBlxSequences`'s pass that computes a
/// transcript's extent from its exons once every exon has been read.
fn propagate_full_ranges(model: &mut FeatureModel) {
  let parent_ids: Vec<FeatureId> = model.features().iter().filter(|f| !f.children.is_empty()).map(|f| f.id).collect();

  for parent_id in parent_ids {
    let Some(parent) = model.feature(parent_id) else { continue };
    let children = parent.children.clone();

    let full_range = children
      .iter()
      .filter_map(|&child_id| model.feature(child_id).map(|c| c.q_range))
      .reduce(|a, b| a.union(&b));

    let Some(full_range) = full_range else { continue };
    let full_range = full_range.union(&model.feature(parent_id).unwrap().q_range);

    if let Some(parent) = model.feature_mut(parent_id) {
      parent.full_range = Some(full_range);
    }
    for &child_id in &children {
      if let Some(child) = model.feature_mut(child_id) {
        child.full_range = Some(full_range);
      }
    }
  }
}

/// Computes a feature's full match-sequence extent from its align blocks,
/// used once finalisation has linked a feature to its `FeatureSeq` (spec
/// §4.5 `full_s_range`). Exposed standalone since the dot-plot engine (C8)
/// also needs this for features it builds without going through
/// [`finalise`].
#[must_use]
pub fn full_s_range(align_block_ranges: &[IntRange]) -> Option<IntRange> {
  align_block_ranges.iter().copied().reduce(|a, b| a.union(&b))
}
