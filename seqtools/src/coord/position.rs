//! Strand, sequence-type, frame and base-within-codon types shared by the
//! coordinate engine (C1), the feature model (C3) and the GFF3 parser (C4).

use crate::error::ModelError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Which strand a coordinate or feature is expressed on (spec §3 `refStrand`/
/// `matchStrand`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum Strand {
  Forward,
  Reverse,
  None,
}

impl Strand {
  #[must_use]
  pub fn is_reverse(self) -> bool {
    matches!(self, Self::Reverse)
  }

  /// `+1` for forward, `-1` for reverse or unspecified strand. Matches the
  /// `qDirection`/`sDirection` convention from the original CIGAR expander
  /// (`blxGff3Parser.c`), which treats "not reverse" as forward.
  #[must_use]
  pub fn direction(self) -> i64 {
    if self.is_reverse() { -1 } else { 1 }
  }

  /// Parses a single GFF3 strand token (spec §4.4 column 7).
  pub fn from_gff3_token(token: &str) -> Result<Self, crate::error::InputError> {
    match token {
      "+" => Ok(Self::Forward),
      "-" => Ok(Self::Reverse),
      "." => Ok(Self::None),
      other => Err(crate::error::InputError::InvalidStrand(other.to_owned())),
    }
  }
}

/// Whether the display axis shows raw DNA or translated peptide coordinates
/// (spec §4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, schemars::JsonSchema)]
pub enum SeqType {
  Dna,
  Peptide,
}

impl SeqType {
  #[must_use]
  pub fn num_frames(self) -> i32 {
    match self {
      Self::Dna => 1,
      Self::Peptide => 3,
    }
  }
}

/// Reading frame, 1-based, always in `1..=3` (spec §3 `refFrame`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Frame(i32);

impl Frame {
  pub fn new(value: i32, num_frames: i32) -> Result<Self, ModelError> {
    if value < 1 || value > num_frames {
      return Err(ModelError::FrameOutOfRange {
        frame: value,
        num_frames,
      });
    }
    Ok(Self(value))
  }

  #[must_use]
  pub fn get(self) -> i32 {
    self.0
  }
}

/// Which of the three DNA bases within a codon a peptide display index
/// refers to (spec §4.1 `baseNum`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub enum BaseNum {
  First = 1,
  Second = 2,
  Third = 3,
}

impl BaseNum {
  #[must_use]
  pub fn as_i64(self) -> i64 {
    self as i64
  }

  #[must_use]
  pub fn from_offset(offset_within_codon: i64) -> Self {
    match offset_within_codon.rem_euclid(3) {
      0 => Self::First,
      1 => Self::Second,
      _ => Self::Third,
    }
  }
}

/// Phase of a CDS feature: the number of bases to skip before the first
/// complete codon (spec §3 `phase`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub enum Phase {
  Zero,
  One,
  Two,
  Unset,
}

impl Phase {
  #[must_use]
  pub fn from_gff3_column(value: Option<i32>) -> Self {
    match value {
      Some(0) => Self::Zero,
      Some(1) => Self::One,
      Some(2) => Self::Two,
      _ => Self::Unset,
    }
  }

  #[must_use]
  pub fn as_offset(self) -> i64 {
    match self {
      Self::Zero | Self::Unset => 0,
      Self::One => 1,
      Self::Two => 2,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn strand_direction() {
    assert_eq!(Strand::Forward.direction(), 1);
    assert_eq!(Strand::Reverse.direction(), -1);
    assert_eq!(Strand::None.direction(), 1);
  }

  #[test]
  fn frame_out_of_range_is_rejected() {
    assert!(Frame::new(4, 3).is_err());
    assert!(Frame::new(0, 3).is_err());
    assert!(Frame::new(1, 3).is_ok());
  }

  #[test]
  fn base_num_wraps_from_offset() {
    assert_eq!(BaseNum::from_offset(0), BaseNum::First);
    assert_eq!(BaseNum::from_offset(1), BaseNum::Second);
    assert_eq!(BaseNum::from_offset(2), BaseNum::Third);
    assert_eq!(BaseNum::from_offset(3), BaseNum::First);
  }
}
