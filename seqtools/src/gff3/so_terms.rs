//! Sequence Ontology term → [`FeatureType`] dispatch table, grounded on
//! `blxCreateSupportedGffTypeList` (`blxGff3Parser.c`).

use crate::error::InputError;
use crate::feature::FeatureType;

/// Maps a GFF3 column-3 type token (either the bare SO term name or its
/// `SO:NNNNNNN` accession) to a [`FeatureType`]. Unrecognised terms are
/// reported as [`InputError::InvalidType`] and the record is skipped by the
/// caller (spec §4.4 "unsupported/unrecognised type" edge case).
pub fn feature_type_for_so_term(term: &str) -> Result<FeatureType, InputError> {
  let feature_type = match term {
    "match" | "SO:0000343" | "nucleotide_match" | "SO:0000347" | "protein_match" | "SO:0000349" | "match_part"
    | "SO:0000039" => FeatureType::Match,
    "match_set" | "SO:0000038" => FeatureType::MatchSet,
    "transcript" | "SO:0000673" | "primary_transcript" | "SO:0000185" | "processed_transcript" | "SO:0000233"
    | "mRNA" | "SO:0000234" => FeatureType::Transcript,
    "CDS" | "SO:0000316" => FeatureType::Cds,
    "UTR" | "SO:0000203" | "five_prime_UTR" | "SO:0000204" | "three_prime_UTR" | "SO:0000205" => FeatureType::Utr,
    "exon" | "SO:0000147" => FeatureType::Exon,
    "intron" | "SO:0000188" => FeatureType::Intron,
    "SNP" | "SO:0000694" | "sequence_variant" | "SO:0001060" => FeatureType::Variation,
    "polyA_sequence" | "SO:0000610" | "polyA_site" | "SO:0000553" | "polyA_signal_sequence" | "SO:0000551" => {
      FeatureType::PolyASite
    }
    "region" | "SO:0000001" => FeatureType::Region,
    other => return Err(InputError::InvalidType(other.to_owned())),
  };
  Ok(feature_type)
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  #[rstest]
  #[case("match", FeatureType::Match)]
  #[case("SO:0000349", FeatureType::Match)]
  #[case("mRNA", FeatureType::Transcript)]
  #[case("CDS", FeatureType::Cds)]
  #[case("exon", FeatureType::Exon)]
  #[case("intron", FeatureType::Intron)]
  #[case("SNP", FeatureType::Variation)]
  #[case("polyA_sequence", FeatureType::PolyASite)]
  fn maps_known_terms(#[case] term: &str, #[case] expected: FeatureType) {
    assert_eq!(feature_type_for_so_term(term).unwrap(), expected);
  }

  #[test]
  fn unknown_term_is_an_error() {
    assert_eq!(
      feature_type_for_so_term("gizmo"),
      Err(InputError::InvalidType("gizmo".to_owned()))
    );
  }
}
