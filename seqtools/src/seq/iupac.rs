//! IUPAC nucleotide ambiguity codes, shared by [`super::complement`] and
//! [`super::translate`].

use crate::error::InputError;

/// The sixteen IUPAC nucleotide codes, upper-case, in the order their
/// complements are tabulated (spec §4.2 "complement respects IUPAC
/// ambiguity codes").
const IUPAC_CODES: &str = "ACGTURYSWKMBDHVN";

/// Complements of [`IUPAC_CODES`] at the same index, so `COMPLEMENTS[i]`
/// complements `IUPAC_CODES[i]`.
const COMPLEMENTS: &str = "TGCAAYRSWMKVHDBN";

/// Returns the IUPAC complement of a single upper-case nucleotide code, or
/// `None` if `base` is not a recognised code (lower-case is not accepted;
/// callers normalise case first, see [`super::complement::complement_dna`]).
#[must_use]
pub fn complement_base(base: char) -> Option<char> {
  IUPAC_CODES
    .find(base)
    .map(|idx| COMPLEMENTS.as_bytes()[idx] as char)
}

/// Validates that `base` (case-insensitive) is a recognised IUPAC
/// nucleotide code, returning it upper-cased.
pub fn validate_iupac(base: char) -> Result<char, InputError> {
  let upper = base.to_ascii_uppercase();
  if IUPAC_CODES.contains(upper) {
    Ok(upper)
  } else {
    Err(InputError::InvalidIupac(base))
  }
}
