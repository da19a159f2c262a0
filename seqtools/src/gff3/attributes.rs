//! Column-9 attribute parsing, grounded on `parseAttributes`/
//! `parseTagDataPair`/`parseTargetTag` (`blxGff3Parser.c`).

use crate::coord::{IntRange, Strand};
use crate::error::InputError;

/// The `Target` attribute: `target_id start end [strand]`, the match
/// sequence name plus its local range and, optionally, its strand
/// (`parseTargetTag`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
  pub id: String,
  pub range: IntRange,
  pub strand: Option<Strand>,
}

/// One decoded GFF3 column-9 attribute relevant to this model; anything
/// else is preserved verbatim under [`Attribute::Other`] since GFF3 allows
/// arbitrary custom tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
  Id(String),
  Name(String),
  Parent(Vec<String>),
  Target(Target),
  /// The `sequence` attribute: inline residues for this feature's match.
  Sequence(String),
  /// `Gap` (single-char ops per the GFF3 spec) or `Gaps` (the legacy,
  /// Blixem-specific plural spelling); both carry the same CIGAR-like
  /// alignment string, distinguished only so callers can log which
  /// spelling a file used.
  Gap { legacy_spelling: bool, cigar: String },
  Other { key: String, value: String },
}

/// Parses the raw (unescaped) column-9 string into a sequence of
/// attributes, one per `key=value` pair separated by `;` (spec §4.4).
/// Malformed pairs (missing `=`) are reported per-pair rather than failing
/// the whole record, matching `parseAttributes`'s tag-at-a-time recovery.
pub fn parse_attributes(raw: &str) -> Vec<Result<Attribute, InputError>> {
  raw
    .split(';')
    .map(str::trim)
    .filter(|pair| !pair.is_empty())
    .map(parse_tag_data_pair)
    .collect()
}

fn parse_tag_data_pair(pair: &str) -> Result<Attribute, InputError> {
  let Some((key, value)) = pair.split_once('=') else {
    return Err(InputError::InvalidTag(pair.to_owned()));
  };
  let key = key.trim();
  let value = value.trim();

  Ok(match key {
    "ID" => Attribute::Id(unescape(value)),
    "Name" => Attribute::Name(unescape(value)),
    "Parent" => Attribute::Parent(value.split(',').map(unescape).collect()),
    "Target" => Attribute::Target(parse_target_tag(value)?),
    "sequence" => Attribute::Sequence(unescape(value)),
    "Gap" => Attribute::Gap { legacy_spelling: false, cigar: unescape(value) },
    "Gaps" => Attribute::Gap { legacy_spelling: true, cigar: unescape(value) },
    other => Attribute::Other { key: other.to_owned(), value: unescape(value) },
  })
}

/// Parses a `Target` attribute's value: `target_id start end [strand]`,
/// space-separated, 3 or 4 tokens (`parseTargetTag`).
fn parse_target_tag(value: &str) -> Result<Target, InputError> {
  let tokens: Vec<&str> = value.split_whitespace().collect();
  if tokens.len() != 3 && tokens.len() != 4 {
    return Err(InputError::InvalidNumTokens { min: 3, max: 4, found: tokens.len() });
  }

  let id = unescape(tokens[0]);
  let start: i64 = tokens[1].parse().map_err(|_| InputError::InvalidCoord(tokens[1].to_owned()))?;
  let end: i64 = tokens[2].parse().map_err(|_| InputError::InvalidCoord(tokens[2].to_owned()))?;
  let range = IntRange::from_unordered(start, end);

  let strand = match tokens.get(3) {
    Some(token) => Some(Strand::from_gff3_token(token)?),
    None => None,
  };

  Ok(Target { id, range, strand })
}

/// Reverses GFF3's minimal percent-escaping for the characters it reserves
/// (`;`, `=`, `%`, `,`, tab); full percent-decoding of arbitrary bytes is
/// not attempted since Blixem/Dotter attribute values are ASCII identifiers
/// in practice.
fn unescape(value: &str) -> String {
  value.replace("%3B", ";").replace("%3D", "=").replace("%2C", ",").replace("%09", "\t").replace("%25", "%")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_id_name_parent() {
    let attrs = parse_attributes("ID=exon1;Name=my exon;Parent=mRNA1,mRNA2");
    assert_eq!(attrs[0].as_ref().unwrap(), &Attribute::Id("exon1".to_owned()));
    assert_eq!(attrs[1].as_ref().unwrap(), &Attribute::Name("my exon".to_owned()));
    assert_eq!(
      attrs[2].as_ref().unwrap(),
      &Attribute::Parent(vec!["mRNA1".to_owned(), "mRNA2".to_owned()])
    );
  }

  #[test]
  fn parses_target_with_strand() {
    let attrs = parse_attributes("Target=est1 10 50 +");
    let Attribute::Target(target) = attrs[0].as_ref().unwrap() else {
      panic!("expected Target");
    };
    assert_eq!(target.id, "est1");
    assert_eq!(target.range, IntRange::new(10, 50).unwrap());
    assert_eq!(target.strand, Some(Strand::Forward));
  }

  #[test]
  fn parses_target_without_strand() {
    let attrs = parse_attributes("Target=est1 10 50");
    let Attribute::Target(target) = attrs[0].as_ref().unwrap() else {
      panic!("expected Target");
    };
    assert_eq!(target.strand, None);
  }

  #[test]
  fn malformed_target_reports_num_tokens() {
    let attrs = parse_attributes("Target=est1 10");
    assert!(matches!(attrs[0], Err(InputError::InvalidNumTokens { min: 3, max: 4, found: 2 })));
  }

  #[test]
  fn gap_and_gaps_are_distinguished() {
    let attrs = parse_attributes("Gap=M10 D2 M5;Gaps=M10 D2 M5");
    assert_eq!(attrs[0].as_ref().unwrap(), &Attribute::Gap { legacy_spelling: false, cigar: "M10 D2 M5".to_owned() });
    assert_eq!(attrs[1].as_ref().unwrap(), &Attribute::Gap { legacy_spelling: true, cigar: "M10 D2 M5".to_owned() });
  }

  #[test]
  fn missing_equals_is_invalid_tag() {
    let attrs = parse_attributes("justsomejunk");
    assert_eq!(attrs[0], Err(InputError::InvalidTag("justsomejunk".to_owned())));
  }

  #[test]
  fn unescapes_reserved_characters() {
    let attrs = parse_attributes("Name=foo%3Bbar%3Dbaz");
    assert_eq!(attrs[0].as_ref().unwrap(), &Attribute::Name("foo;bar=baz".to_owned()));
  }
}
