//! GFF3 body parsing and feature construction, grounded on
//! `parseGff3Header`/`createBlixemObject`/`parseGff3Body`/`parseGffColumns`
//! (`blxGff3Parser.c`).

use crate::coord::{Frame, IntRange, Phase, SeqType, Strand};
use crate::error::{InputError, LocatedInputError};
use crate::feature::{Feature, FeatureModel, FeatureSeq, FeatureSeqType, FeatureType};
use crate::gff3::attributes::{Attribute, parse_attributes};
use crate::gff3::cigar::{CigarExpansionMode, expand_cigar};
use crate::gff3::fasta_section::{parse_fasta_section, split_fasta_section};
use crate::gff3::so_terms::feature_type_for_so_term;
use crate::seq::FastaRecord;

/// A `##sequence-region` pragma (spec §4.4 header parsing).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize, schemars::JsonSchema)]
pub struct SequenceRegion {
  pub seqid: String,
  pub range: IntRange,
}

/// Options governing ambiguous or source-dependent parsing behaviour.
#[derive(Debug, Clone, Copy)]
pub struct Gff3Options {
  /// The reference display's sequence type; determines `num_frames` for
  /// CIGAR expansion (spec §4.4, `getNumFrames`).
  pub ref_seq_type: SeqType,
  pub cigar_mode: CigarExpansionMode,
}

impl Default for Gff3Options {
  fn default() -> Self {
    Self { ref_seq_type: SeqType::Dna, cigar_mode: CigarExpansionMode::default() }
  }
}

/// Everything recovered from one GFF3 document (spec §4.4).
#[derive(Debug, Clone, Default)]
pub struct Gff3ParseResult {
  pub model: FeatureModel,
  pub sequence_regions: Vec<SequenceRegion>,
  pub fasta: Option<Vec<FastaRecord>>,
  /// Per-record parse failures (spec §7 input errors): the offending line
  /// is skipped, parsing continues, and the caller decides whether to
  /// surface these as warnings or abort.
  pub errors: Vec<LocatedInputError>,
}

/// Parses a whole GFF3 document (header pragmas, tabular body and an
/// optional trailing `##FASTA` section) into a [`Gff3ParseResult`].
pub fn parse_gff3(input: &str, options: Gff3Options) -> Gff3ParseResult {
  let all_lines: Vec<String> = input.lines().map(str::to_owned).collect();
  let (body_lines, fasta_lines) = split_fasta_section(&all_lines);

  let mut result = Gff3ParseResult::default();

  if let Some(fasta_lines) = fasta_lines {
    match parse_fasta_section(fasta_lines) {
      Ok(records) => result.fasta = Some(records),
      Err(err) => result.errors.push(LocatedInputError { file: String::new(), line: body_lines.len() + 1, kind: err }),
    }
  }

  for (idx, raw_line) in body_lines.iter().enumerate() {
    let line_no = idx + 1;
    let line = raw_line.trim_end();
    if line.is_empty() {
      continue;
    }

    if let Some(region_line) = line.strip_prefix("##sequence-region") {
      match parse_sequence_region(region_line) {
        Ok(region) => result.sequence_regions.push(region),
        Err(kind) => result.errors.push(LocatedInputError { file: String::new(), line: line_no, kind }),
      }
      continue;
    }

    if line.starts_with('#') {
      continue; // comment or other pragma, not modelled
    }

    match parse_feature_line(line, options, &mut result.model) {
      Ok(()) => {}
      Err(kind) => result.errors.push(LocatedInputError { file: String::new(), line: line_no, kind }),
    }
  }

  result
}

fn parse_sequence_region(rest: &str) -> Result<SequenceRegion, InputError> {
  let tokens: Vec<&str> = rest.split_whitespace().collect();
  if tokens.len() != 3 {
    return Err(InputError::InvalidNumTokens { min: 3, max: 3, found: tokens.len() });
  }
  let start: i64 = tokens[1].parse().map_err(|_| InputError::InvalidCoord(tokens[1].to_owned()))?;
  let end: i64 = tokens[2].parse().map_err(|_| InputError::InvalidCoord(tokens[2].to_owned()))?;
  let range = IntRange::new(start, end).map_err(|_| InputError::InvalidCoord(rest.to_owned()))?;
  Ok(SequenceRegion { seqid: tokens[0].to_uppercase(), range })
}

struct GffColumns<'a> {
  seqid: String,
  source: &'a str,
  so_term: &'a str,
  start: i64,
  end: i64,
  score: Option<f64>,
  strand: Strand,
  phase: Phase,
  attributes_raw: &'a str,
}

/// Splits one tabular GFF3 line into its 9 columns, upper-casing the seqid
/// the way `parseGffColumns` does so the reference name downstream always
/// matches `##sequence-region`/FASTA header case variance.
fn parse_gff_columns(line: &str) -> Result<GffColumns<'_>, InputError> {
  let columns: Vec<&str> = line.split('\t').collect();
  if columns.len() != 9 {
    return Err(InputError::InvalidNumTokens { min: 9, max: 9, found: columns.len() });
  }

  let start: i64 = columns[3].parse().map_err(|_| InputError::InvalidCoord(columns[3].to_owned()))?;
  let end: i64 = columns[4].parse().map_err(|_| InputError::InvalidCoord(columns[4].to_owned()))?;
  let score = match columns[5] {
    "." => None,
    other => Some(other.parse().map_err(|_| InputError::InvalidCoord(other.to_owned()))?),
  };
  let strand = Strand::from_gff3_token(columns[6])?;
  let phase = match columns[7] {
    "." => Phase::Unset,
    other => {
      let value: i32 = other.parse().map_err(|_| InputError::InvalidCoord(other.to_owned()))?;
      Phase::from_gff3_column(Some(value))
    }
  };

  Ok(GffColumns {
    seqid: columns[0].to_uppercase(),
    source: columns[1],
    so_term: columns[2],
    start,
    end,
    score,
    strand,
    phase,
    attributes_raw: columns[8],
  })
}

fn parse_feature_line(line: &str, options: Gff3Options, model: &mut FeatureModel) -> Result<(), InputError> {
  let columns = parse_gff_columns(line)?;
  let feature_type = feature_type_for_so_term(columns.so_term)?;
  let q_range = IntRange::new(columns.start, columns.end).map_err(|_| InputError::InvalidCoord(line.to_owned()))?;

  let mut id_tag = None;
  let mut name = None;
  let mut parent_id = None;
  let mut target = None;
  let mut sequence = None;
  let mut gap = None;

  for attribute in parse_attributes(columns.attributes_raw) {
    match attribute? {
      Attribute::Id(value) => id_tag = Some(value),
      Attribute::Name(value) => name = Some(value),
      Attribute::Parent(mut values) => parent_id = values.drain(..).next(),
      Attribute::Target(value) => target = Some(value),
      Attribute::Sequence(value) => sequence = Some(value),
      Attribute::Gap { cigar, .. } => gap = Some(cigar),
      Attribute::Other { .. } => {}
    }
  }

  // Transcript/exon match strand is always the reference strand (the
  // original's rule for features whose "match" is really just itself,
  // `createBlixemObject`'s Exon rule), everything else prefers an explicit
  // `Target` strand and falls back to the reference strand.
  let seq_strand = if matches!(feature_type, FeatureType::Transcript | FeatureType::Exon) {
    columns.strand
  } else {
    target.as_ref().and_then(|t| t.strand).unwrap_or(columns.strand)
  };

  let sname = target
    .as_ref()
    .map(|t| t.id.clone())
    .or_else(|| name.clone())
    .or_else(|| id_tag.clone())
    .unwrap_or_else(|| columns.seqid.clone());

  let feature_seq_type = match feature_type {
    FeatureType::Transcript => FeatureSeqType::Transcript,
    FeatureType::Variation => FeatureSeqType::Variation,
    FeatureType::Region => FeatureSeqType::Region,
    _ => FeatureSeqType::Match,
  };

  let s_sequence = model.get_or_create_feature_seq(&sname, |id| {
    let mut feature_seq = FeatureSeq::new(id, feature_seq_type, sname.clone());
    feature_seq.strand = seq_strand;
    feature_seq.sequence = sequence.clone();
    feature_seq
  });

  if let Some(feature_seq) = model.feature_seq_mut(s_sequence) {
    feature_seq.extend_ref_extent(columns.strand, q_range);
    if sequence.is_some() {
      feature_seq.sequence = sequence.clone();
    }
  }

  let num_frames = options.ref_seq_type.num_frames();
  let q_frame = if num_frames > 1 {
    Some(Frame::new(((columns.start - 1) % i64::from(num_frames) + 1) as i32, num_frames).unwrap_or(Frame::new(1, num_frames).unwrap()))
  } else {
    None
  };

  let feature_id = model.push_feature(|id| {
    let mut feature = Feature::new(id, feature_type, columns.seqid.clone(), q_range, columns.strand, s_sequence, sname.clone());
    feature.score = columns.score;
    feature.id_tag = id_tag.clone();
    feature.phase = columns.phase;
    feature.q_frame = q_frame;
    feature.description = name.clone();
    feature.parent_id = parent_id.clone();
    feature.s_range = target.as_ref().map(|t| t.range);
    feature
  });

  if let (Some(cigar), Some(target)) = (gap, target.as_ref()) {
    let ref_direction = columns.strand.direction();
    let match_direction = target.strand.unwrap_or(columns.strand).direction();
    let blocks = expand_cigar(&cigar, num_frames, options.cigar_mode, q_range.min, ref_direction, target.range.min, match_direction)?;
    if let Some(feature) = model.feature_mut(feature_id) {
      feature.align_blocks = blocks;
    }
  }

  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_sequence_region_pragma() {
    let result = parse_gff3("##sequence-region chr1 1 1000\n", Gff3Options::default());
    assert_eq!(result.sequence_regions, vec![SequenceRegion { seqid: "CHR1".to_owned(), range: IntRange::new(1, 1000).unwrap() }]);
  }

  #[test]
  fn parses_a_simple_match_feature() {
    let doc = "chr1\tEST\tmatch\t100\t200\t99.5\t+\t.\tID=m1;Target=est1 1 101 +\n";
    let result = parse_gff3(doc, Gff3Options::default());
    assert!(result.errors.is_empty(), "{:?}", result.errors);
    assert_eq!(result.model.features().len(), 1);
    let feature = &result.model.features()[0];
    assert_eq!(feature.feature_type, FeatureType::Match);
    assert_eq!(feature.score, Some(99.5));
    assert_eq!(feature.sname, "est1");
  }

  #[test]
  fn exon_strand_follows_reference_not_target() {
    let doc = "chr1\t.\texon\t100\t200\t.\t-\t.\tID=e1;Parent=t1\n";
    let result = parse_gff3(doc, Gff3Options::default());
    let feature = &result.model.features()[0];
    let feature_seq = result.model.feature_seq(feature.s_sequence).unwrap();
    assert_eq!(feature_seq.strand, Strand::Reverse);
  }

  #[test]
  fn unsupported_type_is_collected_as_an_error_not_a_panic() {
    let doc = "chr1\t.\tnonsense_type\t1\t10\t.\t+\t.\tID=x\n";
    let result = parse_gff3(doc, Gff3Options::default());
    assert!(result.model.features().is_empty());
    assert_eq!(result.errors.len(), 1);
  }

  #[test]
  fn embedded_fasta_section_is_parsed() {
    let doc = "chr1\t.\tmatch\t1\t4\t.\t+\t.\tID=a;Target=est1 1 4\n##FASTA\n>chr1\nACGT\n";
    let result = parse_gff3(doc, Gff3Options::default());
    assert!(result.fasta.is_some());
    assert_eq!(result.fasta.unwrap()[0].seq, "ACGT");
  }

  #[test]
  fn gap_attribute_expands_into_align_blocks() {
    let doc = "chr1\t.\tmatch\t1\t10\t.\t+\t.\tID=a;Target=est1 1 10 +;Gap=M10\n";
    let result = parse_gff3(doc, Gff3Options::default());
    let feature = &result.model.features()[0];
    assert_eq!(feature.align_blocks.len(), 1);
    assert_eq!(feature.align_blocks[0].ref_range, IntRange::new(1, 10).unwrap());
  }
}
