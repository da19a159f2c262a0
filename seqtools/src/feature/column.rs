//! Display columns, grounded on `BlxColumnId`/`BlxColumnInfo` (`blxmsp.h`).
//! Blixem's tree view is out of scope (UI); the column model survives here
//! because `DataType::bulk_fetch`/`user_fetch` (spec §4.6) are expressed as
//! ordered lists of columns to populate, and GFF3 attributes map onto named
//! columns (spec §4.4 `Name`/`Target`/etc.).

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A named, typed display/fetch column (spec §3 `Column`), mirroring
/// `BlxColumnId` minus the UI-only `NONE` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum ColumnId {
  SeqName,
  Source,
  Group,
  Score,
  Id,
  Start,
  Sequence,
  End,
  Organism,
  GeneName,
  TissueType,
  Strain,
}

impl ColumnId {
  /// All columns, in the original struct's declaration order, which is also
  /// the default tree-view column order (spec §4.6 fetch ordering depends
  /// on this sequence when a `DataType` doesn't override it).
  pub const ALL: [ColumnId; 12] = [
    Self::SeqName,
    Self::Source,
    Self::Group,
    Self::Score,
    Self::Id,
    Self::Start,
    Self::Sequence,
    Self::End,
    Self::Organism,
    Self::GeneName,
    Self::TissueType,
    Self::Strain,
  ];

  /// Whether the column holds free-text data fetched in bulk (as opposed to
  /// numeric/structural columns derived from the alignment itself).
  #[must_use]
  pub fn is_fetchable(self) -> bool {
    !matches!(self, Self::Start | Self::End | Self::Score)
  }
}

/// A single cell of column data attached to a [`super::feature_seq::FeatureSeq`]
/// (spec §3 `Column` values), holding the column id alongside its string
/// value so a `FeatureSeq` can carry a sparse, ordered set of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct ColumnValue {
  pub column: ColumnId,
  pub value: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn all_columns_present_once() {
    assert_eq!(ColumnId::ALL.len(), 12);
  }

  #[test]
  fn start_end_score_are_not_fetchable() {
    assert!(!ColumnId::Start.is_fetchable());
    assert!(!ColumnId::End.is_fetchable());
    assert!(!ColumnId::Score.is_fetchable());
    assert!(ColumnId::Organism.is_fetchable());
  }
}
