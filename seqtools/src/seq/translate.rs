//! DNA→peptide translation using the standard genetic code (spec §4.2).
//!
//! Ambiguous codons (containing any IUPAC code other than A/C/G/T) and
//! incomplete trailing codons translate to `'X'` rather than erroring:
//! translation is a display convenience, not a validating parse, so it
//! degrades gracefully the way the original `convertNucToAa`-style helpers
//! (see `blxmsp.h`'s sequence accessors) always returned a best-effort
//! peptide string.

/// Translates a single codon (exactly 3 upper-case `ACGT` bases) to an
/// amino acid using the standard genetic code. Returns `'X'` for a stop
/// codon's neighbours with ambiguous bases, `'*'` for a stop codon.
#[must_use]
pub fn translate_codon(codon: [char; 3]) -> char {
  match codon {
    ['T', 'T', 'T'] | ['T', 'T', 'C'] => 'F',
    ['T', 'T', 'A'] | ['T', 'T', 'G'] | ['C', 'T', _] => 'L',
    ['A', 'T', 'T'] | ['A', 'T', 'C'] | ['A', 'T', 'A'] => 'I',
    ['A', 'T', 'G'] => 'M',
    ['G', 'T', _] => 'V',
    ['T', 'C', _] | ['A', 'G', 'T'] | ['A', 'G', 'C'] => 'S',
    ['C', 'C', _] => 'P',
    ['A', 'C', _] => 'T',
    ['G', 'C', _] => 'A',
    ['T', 'A', 'T'] | ['T', 'A', 'C'] => 'Y',
    ['T', 'A', 'A'] | ['T', 'A', 'G'] | ['T', 'G', 'A'] => '*',
    ['C', 'A', 'T'] | ['C', 'A', 'C'] => 'H',
    ['C', 'A', 'A'] | ['C', 'A', 'G'] => 'Q',
    ['A', 'A', 'T'] | ['A', 'A', 'C'] => 'N',
    ['A', 'A', 'A'] | ['A', 'A', 'G'] => 'K',
    ['G', 'A', 'T'] | ['G', 'A', 'C'] => 'D',
    ['G', 'A', 'A'] | ['G', 'A', 'G'] => 'E',
    ['T', 'G', 'T'] | ['T', 'G', 'C'] => 'C',
    ['T', 'G', 'G'] => 'W',
    ['C', 'G', _] | ['A', 'G', 'A'] | ['A', 'G', 'G'] => 'R',
    ['G', 'G', _] => 'G',
    _ => 'X',
  }
}

/// Translates a DNA sequence in one reading frame, grouping bases into
/// codons from the start of `seq` (callers slice to the frame offset
/// first). A trailing partial codon of 1 or 2 bases translates to `'X'`.
#[must_use]
pub fn translate(seq: &str) -> String {
  let bases: Vec<char> = seq.chars().map(|c| c.to_ascii_uppercase()).collect();
  bases
    .chunks(3)
    .map(|chunk| match chunk {
      [a, b, c] => translate_codon([*a, *b, *c]),
      _ => 'X',
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  #[rstest]
  #[case(['A', 'T', 'G'], 'M')]
  #[case(['T', 'A', 'A'], '*')]
  #[case(['T', 'T', 'T'], 'F')]
  #[case(['G', 'G', 'G'], 'G')]
  fn translates_known_codons(#[case] codon: [char; 3], #[case] expected: char) {
    assert_eq!(translate_codon(codon), expected);
  }

  #[test]
  fn translates_full_sequence() {
    assert_eq!(translate("ATGTTTTAA"), "MF*");
  }

  #[test]
  fn partial_trailing_codon_becomes_x() {
    assert_eq!(translate("ATGTT"), "MX");
  }

  #[test]
  fn ambiguous_codon_becomes_x() {
    assert_eq!(translate_codon(['N', 'N', 'N']), 'X');
  }

  #[test]
  fn lower_case_input_is_normalised() {
    assert_eq!(translate("atgtttTAA"), "MF*");
  }
}
