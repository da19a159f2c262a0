//! Canonical splice-site recognition, grounded on the intron-boundary
//! highlighting the original tool performed when drawing introns (the
//! dinucleotide check in the intron-drawing path of `blxmsp.h`'s
//! neighbours). Kept as a pure classification here since drawing itself is
//! out of scope.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::coord::{IntRange, Strand};

/// Whether an intron's boundary dinucleotides match a known canonical
/// splice site. `Unknown` covers sequences too short to classify or any
/// pair not in the canonical set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, schemars::JsonSchema)]
pub enum SpliceSite {
  /// GT...AG, the standard (U2-type) splice site.
  CanonicalGtAg,
  /// GC...AG, a minor variant of the standard site.
  CanonicalGcAg,
  /// AT...AC, the U12-type minor spliceosome site.
  CanonicalAtAc,
  /// Neither end matches a known canonical dinucleotide pair.
  NonCanonical,
}

/// Classifies an intron given the donor (5') and acceptor (3') dinucleotide
/// pairs read from the genomic sequence around `intron_range`, oriented
/// according to `strand` (spec §4.3 splice-site classification is consumed
/// by the finalisation pass when annotating introns).
#[must_use]
pub fn classify_splice_site(donor: &str, acceptor: &str) -> SpliceSite {
  let donor = donor.to_ascii_uppercase();
  let acceptor = acceptor.to_ascii_uppercase();
  match (donor.as_str(), acceptor.as_str()) {
    ("GT", "AG") => SpliceSite::CanonicalGtAg,
    ("GC", "AG") => SpliceSite::CanonicalGcAg,
    ("AT", "AC") => SpliceSite::CanonicalAtAc,
    _ => SpliceSite::NonCanonical,
  }
}

/// Extracts the donor/acceptor dinucleotide positions for `intron_range`
/// relative to `strand`: on the forward strand the donor sits at the
/// intron's start and the acceptor at its end; on the reverse strand the
/// roles swap (spec §4.1 strand conventions).
#[must_use]
pub fn splice_site_positions(intron_range: &IntRange, strand: Strand) -> (IntRange, IntRange) {
  let donor = IntRange::new(intron_range.min, intron_range.min + 1).unwrap_or(*intron_range);
  let acceptor = IntRange::new(intron_range.max - 1, intron_range.max).unwrap_or(*intron_range);
  if strand.is_reverse() { (acceptor, donor) } else { (donor, acceptor) }
}
