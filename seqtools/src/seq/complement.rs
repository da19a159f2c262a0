//! Reverse-complement of a DNA sequence (spec §4.2), case-preserving and
//! IUPAC-ambiguity-aware.

use crate::seq::iupac::complement_base;

/// Complements every base in `seq` in place (5'→3' order unchanged); use
/// [`reverse_complement`] to also reverse the order. Lower-case input stays
/// lower-case.
#[must_use]
pub fn complement_dna(seq: &str) -> String {
  seq
    .chars()
    .map(|c| {
      let is_lower = c.is_ascii_lowercase();
      let complemented = complement_base(c.to_ascii_uppercase()).unwrap_or('N');
      if is_lower { complemented.to_ascii_lowercase() } else { complemented }
    })
    .collect()
}

/// Reverse-complements `seq`: complements every base and reverses the
/// order, the standard operation for projecting a reverse-strand feature's
/// sequence onto the forward strand (spec §4.2).
#[must_use]
pub fn reverse_complement(seq: &str) -> String {
  complement_dna(seq).chars().rev().collect()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn complements_preserve_case() {
    assert_eq!(complement_dna("AcGt"), "TgCa");
  }

  #[test]
  fn reverse_complement_reverses_and_complements() {
    assert_eq!(reverse_complement("ACGT"), "ACGT");
    assert_eq!(reverse_complement("AATC"), "GATT");
  }

  #[test]
  fn unknown_bases_become_n() {
    assert_eq!(complement_dna("AXG"), "TNC");
  }

  #[test]
  fn double_reverse_complement_is_identity() {
    let seq = "ACGTNRYSWKMBDHV";
    assert_eq!(reverse_complement(&reverse_complement(seq)), seq);
  }
}
