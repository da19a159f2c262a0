//! Named groups of sequences (spec §3 `Group`), used both for user-defined
//! groupings (select several matches, group them) and for the automatic
//! grouping driven by [`super::data_type::MspFlag::LinkFeaturesByName`].
//!
//! Grounded on the teacher's `FeatureGroup` (`features/feature_group.rs`):
//! same shape (an id, a name, an ordered member list, a custom `Ord` so
//! groups sort by their first member's range) adapted from grouping
//! annotation-tree features to grouping `FeatureSeq`s.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::coord::IntRange;
use crate::feature::feature_seq::FeatureSeqId;

/// A named collection of [`FeatureSeq`](super::feature_seq::FeatureSeq)s
/// (spec §3 `Group`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Group {
  pub name: String,
  pub members: Vec<FeatureSeqId>,
  pub hidden: bool,
  /// When set, every member is drawn in this colour regardless of its own
  /// style (spec §3 `Group`); the colour itself is opaque to this crate.
  pub highlight_colour: Option<String>,
}

impl Group {
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      members: Vec::new(),
      hidden: false,
      highlight_colour: None,
    }
  }

  #[must_use]
  pub fn contains(&self, id: FeatureSeqId) -> bool {
    self.members.contains(&id)
  }

  pub fn add_member(&mut self, id: FeatureSeqId) {
    if !self.contains(id) {
      self.members.push(id);
    }
  }
}

/// Orders groups by name, matching the teacher's convention of sorting
/// feature collections for stable display rather than by internal id.
impl PartialOrd for Group {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Group {
  fn cmp(&self, other: &Self) -> Ordering {
    self.name.cmp(&other.name)
  }
}

/// Computed span of a group's members' reference extents, used by the
/// selection/projection service (C10) to scroll to a whole group at once.
#[must_use]
pub fn group_extent(extents: &[IntRange]) -> Option<IntRange> {
  extents.iter().copied().reduce(|a, b| a.union(&b))
}
