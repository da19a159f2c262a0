//! Feature type taxonomy, grounded on the original `BlxMspType` enum
//! (`blxmsp.h`) and the SO-term table built by `blxCreateSupportedGffTypeList`
//! (`blxGff3Parser.c`).

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The kind of genomic feature a [`super::feature::Feature`] represents
/// (spec §3 `type`). Mirrors `BlxMspType` from the original model, minus the
/// `FS_SEG`/`XY_PLOT` legacy feature-series variants the spec's Non-goals
/// exclude (those backed the GTK drawing layer, out of scope here).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum FeatureType {
  /// A single alignment match (SO:0000343/0347/0349/0039 `match`/
  /// `nucleotide_match`/`protein_match`/`match_part`).
  Match,
  /// A set of matches sharing a name, squashed together for display
  /// (SO:0000038 `match_set`).
  MatchSet,
  /// A coding sequence segment (SO:0000316 `CDS`).
  Cds,
  /// An untranslated region (SO:0000203 `UTR`, specialised into 5'/3' by
  /// the parser using the `Target`/strand context, spec §4.4).
  Utr,
  /// An intron (SO:0000188).
  Intron,
  /// An exon (SO:0000147).
  Exon,
  /// A full transcript, the parent of CDS/UTR/exon/intron children
  /// (SO:0000673/0185/0233/0234 `transcript`/`primary_transcript`/
  /// `processed_transcript`/`mRNA`).
  Transcript,
  /// A single-nucleotide or other short variation (SO:0000694 `SNP` and
  /// related `sequence_variant` terms).
  Variation,
  /// A polyA tail or signal site (SO:0000610 `polyA_sequence` and related
  /// terms).
  PolyASite,
  /// A high-scoring pair carried over from a sequence search tool report,
  /// not a GFF3 feature.
  Hsp,
  /// A named, strand-specific region with no further structure (used for
  /// coverage/depth display, spec §4.7).
  Region,
}

impl FeatureType {
  /// Child feature types that finalisation (spec §4.5) groups under a
  /// [`Transcript`](Self::Transcript) parent.
  #[must_use]
  pub fn is_transcript_child(self) -> bool {
    matches!(self, Self::Cds | Self::Utr | Self::Exon | Self::Intron)
  }

  /// Whether this feature type is drawn/scored against a CIGAR-expanded gap
  /// string (spec §4.4); `Region`/`Hsp` features never carry one.
  #[must_use]
  pub fn supports_gaps(self) -> bool {
    matches!(self, Self::Match | Self::MatchSet | Self::Cds | Self::Exon)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn transcript_children_are_recognised() {
    assert!(FeatureType::Cds.is_transcript_child());
    assert!(FeatureType::Utr.is_transcript_child());
    assert!(!FeatureType::Transcript.is_transcript_child());
    assert!(!FeatureType::Match.is_transcript_child());
  }

  #[test]
  fn display_round_trips_through_str() {
    use std::str::FromStr;
    assert_eq!(FeatureType::from_str("Cds"), Ok(FeatureType::Cds));
    assert_eq!(FeatureType::Match.to_string(), "Match");
  }
}
