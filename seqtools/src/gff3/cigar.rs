//! CIGAR-style gap-string expansion, grounded on `parseGapString`/
//! `parseCigarStringSection` (`blxGff3Parser.c`).
//!
//! The original parser carried two different interpretations of an `M`
//! operator's count when the reference is displayed in peptide coordinates
//! (3 frames): one reading it as a peptide count, one (a commented-out
//! "hack to make blixem work with currently-wrong data from zmap") reading
//! it as a nucleotide count that must be divided down. Both are kept here
//! as [`CigarExpansionMode`] variants rather than picked once and
//! forgotten, since a caller parsing files from different upstream
//! producers needs to choose per-source.

use crate::error::InputError;
use crate::feature::AlignBlock;

/// Which of the two count interpretations an `M` operator uses when the
/// reference sequence is displayed in peptide coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CigarExpansionMode {
  /// `M`'s count is a peptide (amino acid) count; the nucleotide advance is
  /// `count * num_frames`. This is the correct reading of the GFF3 `Gap`
  /// attribute as specified and is the default.
  #[default]
  PeptideCount,
  /// `M`'s count is a nucleotide count; the peptide advance is
  /// `count / num_frames` (integer division, rounding toward zero).
  /// Matches legacy upstream producers that wrote nucleotide-scale counts
  /// into a `Gaps` attribute meant to be read at peptide scale.
  LegacyNucleotideCount,
}

/// One decoded CIGAR operation: `(M|I|D, count)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CigarOp {
  code: char,
  count: i64,
}

fn parse_ops(cigar: &str) -> Result<Vec<CigarOp>, InputError> {
  cigar
    .split_whitespace()
    .map(|tok| {
      let code = tok.chars().next().ok_or_else(|| InputError::CigarUnsupported('\0'))?;
      if !matches!(code, 'M' | 'I' | 'D') {
        return Err(InputError::CigarUnsupported(code));
      }
      let rest = &tok[code.len_utf8()..];
      let count: i64 = rest.parse().map_err(|_| InputError::InvalidCoord(rest.to_owned()))?;
      Ok(CigarOp { code, count })
    })
    .collect()
}

/// Expands a CIGAR/`Gap` string into a list of ungapped aligned blocks,
/// advancing a reference cursor (starting at `ref_start`, stepping by
/// `ref_direction`, which is `+1`/`-1`) and a match cursor (starting at
/// `match_start`, stepping by `match_direction`) as it consumes `M`/`I`/`D`
/// operators. `num_frames` is the reference display's frame count (1 for a
/// DNA reference, 3 for a peptide reference); it only affects how `M`'s
/// count is scaled, per [`CigarExpansionMode`].
pub fn expand_cigar(
  cigar: &str,
  num_frames: i32,
  mode: CigarExpansionMode,
  ref_start: i64,
  ref_direction: i64,
  match_start: i64,
  match_direction: i64,
) -> Result<Vec<AlignBlock>, InputError> {
  use crate::coord::IntRange;

  let ops = parse_ops(cigar)?;
  let mut ref_cursor = ref_start;
  let mut match_cursor = match_start;
  let mut blocks = Vec::new();

  for op in ops {
    match op.code {
      'M' => {
        let (num_nucleotides, num_peptides) = if num_frames > 1 {
          match mode {
            CigarExpansionMode::PeptideCount => (op.count * i64::from(num_frames), op.count),
            CigarExpansionMode::LegacyNucleotideCount => (op.count, op.count / i64::from(num_frames)),
          }
        } else {
          (op.count, op.count)
        };

        let ref_end = ref_cursor + ref_direction * (num_nucleotides - 1);
        let match_end = match_cursor + match_direction * (num_peptides - 1);

        blocks.push(AlignBlock {
          ref_range: IntRange::from_unordered(ref_cursor, ref_end),
          match_range: IntRange::from_unordered(match_cursor, match_end),
        });

        ref_cursor = ref_end + ref_direction;
        match_cursor = match_end + match_direction;
      }
      'I' => {
        match_cursor += match_direction * op.count;
      }
      'D' => {
        ref_cursor += ref_direction * op.count;
      }
      other => return Err(InputError::CigarUnsupported(other)),
    }
  }

  Ok(blocks)
}
