//! Per-source-name fetch configuration, grounded on `BlxDataType`/`MspFlag`
//! (`blxmsp.h`): each GFF3 `source` column value maps to one `DataType`
//! which in turn decides which [`crate::fetch::FetchMethod`]s apply and in
//! what order (spec §4.6).

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Boolean behaviour switches carried per [`DataType`], mirroring
/// `MspFlag` (`blxmsp.h`). Stored as a small bitset rather than individual
/// `bool` fields so a `DataType` can be built incrementally from a config
/// file the way `blixemrc` populates them (spec §11.3 ambient config).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum MspFlag {
  /// Group features sharing the same name into one [`super::group::Group`].
  LinkFeaturesByName,
  /// Collapse linked features that would otherwise overlap on display.
  SquashLinkedFeatures,
  /// Collapse exactly-identical features (same range, same name).
  SquashIdenticalFeatures,
  /// Restrict this data type's features to a single strand only.
  StrandSpecific,
  /// Show this data type's features on the strand opposite their own.
  ShowReverseStrand,
}

/// Per-source-name fetch/behaviour configuration (spec §3/§4.6 `DataType`),
/// mirroring `BlxDataType`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct DataType {
  pub name: String,
  /// Methods tried, in order, to fetch every sequence up front.
  pub bulk_fetch: Vec<String>,
  /// Methods tried, in order, to fetch a sequence on user request (e.g.
  /// double-click), only consulted once bulk fetch has failed or was
  /// skipped.
  pub user_fetch: Vec<String>,
  /// Methods tried for optional supplementary data (not the sequence
  /// itself), never blocking the main fetch.
  pub optional_fetch: Vec<String>,
  pub flags: Vec<MspFlag>,
}

impl DataType {
  #[must_use]
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      bulk_fetch: Vec::new(),
      user_fetch: Vec::new(),
      optional_fetch: Vec::new(),
      flags: Vec::new(),
    }
  }

  #[must_use]
  pub fn has_flag(&self, flag: MspFlag) -> bool {
    self.flags.contains(&flag)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn new_data_type_has_no_flags() {
    let dt = DataType::new("EST_Human");
    assert!(!dt.has_flag(MspFlag::LinkFeaturesByName));
  }

  #[test]
  fn has_flag_after_push() {
    let mut dt = DataType::new("EST_Human");
    dt.flags.push(MspFlag::StrandSpecific);
    assert!(dt.has_flag(MspFlag::StrandSpecific));
    assert!(!dt.has_flag(MspFlag::ShowReverseStrand));
  }
}
