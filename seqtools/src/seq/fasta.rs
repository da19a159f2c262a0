//! Minimal FASTA reader (spec §4.2), reused both for standalone FASTA files
//! supplied to Blixem/Dotter and for the `##FASTA` section embedded at the
//! end of a GFF3 file (spec §4.4).

use std::io::BufRead;

use crate::error::InputError;

/// One FASTA record: the id and optional description from the header line,
/// and the concatenated, whitespace-stripped sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
  pub id: String,
  pub description: Option<String>,
  pub seq: String,
}

/// Reads zero or more FASTA records from `reader`. An input with no `>`
/// header lines at all yields [`InputError::EmptyFasta`]; an input that
/// starts with sequence data before any header is rejected the same way,
/// since there is no id to associate it with.
pub fn read_fasta<R: BufRead>(reader: R) -> Result<Vec<FastaRecord>, InputError> {
  let mut records = Vec::new();
  let mut current: Option<FastaRecord> = None;

  for line in reader.lines() {
    let line = line.map_err(|_| InputError::EmptyFasta)?;
    let line = line.trim_end();
    if line.is_empty() {
      continue;
    }

    if let Some(header) = line.strip_prefix('>') {
      if let Some(record) = current.take() {
        records.push(record);
      }
      let mut parts = header.splitn(2, char::is_whitespace);
      let id = parts.next().unwrap_or_default().to_owned();
      let description = parts.next().map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned);
      current = Some(FastaRecord { id, description, seq: String::new() });
    } else if let Some(record) = current.as_mut() {
      record.seq.push_str(line.trim());
    }
    // Sequence-looking lines before any header are silently ignored; GFF3's
    // `##FASTA` marker line is stripped by the caller before this is reached.
  }

  if let Some(record) = current.take() {
    records.push(record);
  }

  if records.is_empty() {
    return Err(InputError::EmptyFasta);
  }

  Ok(records)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_single_record() {
    let input = b">seq1 a description\nACGT\nACGT\n".as_slice();
    let records = read_fasta(input).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, "seq1");
    assert_eq!(records[0].description.as_deref(), Some("a description"));
    assert_eq!(records[0].seq, "ACGTACGT");
  }

  #[test]
  fn reads_multiple_records() {
    let input = b">a\nAC\n>b\nGT\n".as_slice();
    let records = read_fasta(input).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1].id, "b");
    assert_eq!(records[1].seq, "GT");
  }

  #[test]
  fn empty_input_is_an_error() {
    let input = b"".as_slice();
    assert_eq!(read_fasta(input), Err(InputError::EmptyFasta));
  }

  #[test]
  fn header_with_no_description_has_none() {
    let input = b">bare\nAC\n".as_slice();
    let records = read_fasta(input).unwrap();
    assert_eq!(records[0].description, None);
  }
}
