//! The `##FASTA` section embedded at the end of a GFF3 file, grounded on
//! `parseFastaSeqHeader`/the `##FASTA` branch of `parseGff3Body`
//! (`blxGff3Parser.c`).

use crate::error::InputError;
use crate::seq::{FastaRecord, read_fasta};

/// Splits a GFF3 document's lines into the tabular body (everything before
/// `##FASTA`) and the embedded FASTA section (everything from the line
/// after `##FASTA` onward), if present.
#[must_use]
pub fn split_fasta_section(lines: &[String]) -> (&[String], Option<&[String]>) {
  match lines.iter().position(|line| line.trim() == "##FASTA") {
    Some(idx) => (&lines[..idx], Some(&lines[idx + 1..])),
    None => (lines, None),
  }
}

/// Parses an embedded `##FASTA` section's lines into records.
pub fn parse_fasta_section(lines: &[String]) -> Result<Vec<FastaRecord>, InputError> {
  let joined = lines.join("\n");
  read_fasta(joined.as_bytes())
}
