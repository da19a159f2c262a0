//! The coordinate engine (C1): DNA↔display index projection, frame/strand
//! inversion and range clipping.
//!
//! Grounded on the teacher's `coord::coord_map_global::CoordMapGlobal`
//! (alignment↔reference position tables) for the general shape of a
//! coordinate-conversion module, adapted to the DNA↔peptide/display
//! projection spec §4.1 actually specifies (the teacher's structure is
//! table-driven for arbitrary insertion/deletion maps; this one is a closed
//! formula since Blixem/Dotter coordinates are a pure affine
//! frame/strand transform, not an alignment with gaps).

use crate::coord::position::{BaseNum, Frame, SeqType, Strand};
use crate::coord::range::IntRange;
use crate::error::ModelError;

/// Mirrors `idx` about `range` when `invert` is set, otherwise passes it
/// through unchanged (spec §4.1 `invertCoord`).
#[must_use]
pub fn invert_coord(idx: i64, range: &IntRange, invert: bool) -> i64 {
  if invert { range.min + range.max - idx } else { idx }
}

/// Clamps `value` into `range` (spec §4.1 `boundsLimitValue`).
#[must_use]
pub fn bounds_limit_value(value: i64, range: &IntRange) -> i64 {
  range.clamp_value(value)
}

/// Clamps `value` into `range`, optionally preserving `value`'s length by
/// shifting rather than shrinking it (spec §4.1 `boundsLimitRange`).
#[must_use]
pub fn bounds_limit_range(value: &IntRange, range: &IntRange, preserve_len: bool) -> IntRange {
  range.clamp_range(value, preserve_len)
}

/// Projects a DNA index to a display index (spec §4.1 `dnaToDisplay`).
///
/// `ref_range` anchors the frame: frame `f`'s first complete codon begins at
/// `ref_range.min + f - 1`. When `display_rev` is set, `dna_idx` is first
/// mirrored about `ref_range` (spec: "the result is mirrored about R").
///
/// Returns the display index and, for a peptide display, the DNA base
/// within the codon (`base_num`) that `dna_idx` corresponds to. For a DNA
/// display, `base_num` is always [`BaseNum::First`] since there is no
/// codon structure.
pub fn dna_to_display(
  dna_idx: i64,
  frame: Frame,
  seq_type: SeqType,
  display_rev: bool,
  ref_range: &IntRange,
) -> Result<(i64, BaseNum), ModelError> {
  if frame.get() > seq_type.num_frames() {
    return Err(ModelError::FrameOutOfRange {
      frame: frame.get(),
      num_frames: seq_type.num_frames(),
    });
  }

  let effective_dna = invert_coord(dna_idx, ref_range, display_rev);

  Ok(match seq_type {
    SeqType::Dna => (effective_dna, BaseNum::First),
    SeqType::Peptide => {
      let codon_start = ref_range.min + i64::from(frame.get()) - 1;
      let offset = effective_dna - codon_start;
      let peptide_idx = offset.div_euclid(3) + 1;
      (peptide_idx, BaseNum::from_offset(offset))
    }
  })
}

/// Exact inverse of [`dna_to_display`]; ties within a peptide codon are
/// broken by `base_num` (spec §4.1 `displayToDna`).
pub fn display_to_dna(
  display_idx: i64,
  frame: Frame,
  base_num: BaseNum,
  seq_type: SeqType,
  display_rev: bool,
  ref_range: &IntRange,
) -> i64 {
  let effective_dna = match seq_type {
    SeqType::Dna => display_idx,
    SeqType::Peptide => {
      let codon_start = ref_range.min + i64::from(frame.get()) - 1;
      let offset = (display_idx - 1) * 3 + (base_num.as_i64() - 1);
      codon_start + offset
    }
  };

  invert_coord(effective_dna, ref_range, display_rev)
}

/// Widens a display-coordinate range so it is always a valid peptide-aligned
/// triplet range in DNA coordinates when `seq_type` is `Peptide` (spec §4.1
/// `convertDisplayRangeToDnaRange`). A DNA display is the identity
/// transform, modulo the strand inversion.
pub fn convert_display_range_to_dna_range(
  display_range: &IntRange,
  frame: Frame,
  seq_type: SeqType,
  display_rev: bool,
  ref_range: &IntRange,
) -> Result<IntRange, ModelError> {
  match seq_type {
    SeqType::Dna => {
      let a = display_to_dna(display_range.min, frame, BaseNum::First, seq_type, display_rev, ref_range);
      let b = display_to_dna(display_range.max, frame, BaseNum::First, seq_type, display_rev, ref_range);
      Ok(IntRange::from_unordered(a, b))
    }
    SeqType::Peptide => {
      let start = display_to_dna(display_range.min, frame, BaseNum::First, seq_type, display_rev, ref_range);
      let end = display_to_dna(display_range.max, frame, BaseNum::Third, seq_type, display_rev, ref_range);
      Ok(IntRange::from_unordered(start, end))
    }
  }
}

/// A pixel/logical-unit rectangle along one axis, used by
/// [`convert_base_idx_to_rect_pos`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRect {
  pub min: f64,
  pub max: f64,
}

/// Linearly projects `idx` within `dna_range` onto `rect` (spec §4.1
/// `convertBaseIdxToRectPos`). `horizontal` only affects which physical axis
/// the caller (outside this crate's scope) draws along; the projection
/// arithmetic is identical either way. When `display_rev` is set the
/// projection is mirrored. When `clip` is set the result is clamped to
/// `rect`.
#[must_use]
pub fn convert_base_idx_to_rect_pos(
  idx: i64,
  rect: &AxisRect,
  dna_range: &IntRange,
  _horizontal: bool,
  display_rev: bool,
  clip: bool,
) -> f64 {
  let span = dna_range.len().max(1) as f64;
  let mut fraction = (idx - dna_range.min) as f64 / span;
  if display_rev {
    fraction = 1.0 - fraction;
  }

  let pos = rect.min + fraction * (rect.max - rect.min);

  if clip { pos.clamp(rect.min.min(rect.max), rect.min.max(rect.max)) } else { pos }
}

/// Convenience: derive the match-sequence traversal direction from its
/// strand, for CIGAR expansion (spec §4.4) and dot-plot HSP overlay (§4.8).
#[must_use]
pub fn direction_for_strand(strand: Strand) -> i64 {
  strand.direction()
}

#[cfg(test)]
mod tests {
  use super::*;
  use rstest::rstest;

  fn ref_range_1_300() -> IntRange {
    IntRange::new(1, 300).unwrap()
  }

  #[test]
  fn s2_coordinate_projection() {
    let r = ref_range_1_300();
    let frame = Frame::new(1, 3).unwrap();
    let (display_idx, base_num) = dna_to_display(100, frame, SeqType::Peptide, false, &r).unwrap();
    assert_eq!(display_idx, 34);
    assert_eq!(base_num, BaseNum::First);

    let dna_idx = display_to_dna(display_idx, frame, base_num, SeqType::Peptide, false, &r);
    assert_eq!(dna_idx, 100);
  }

  #[rstest]
  #[case(1, false)]
  #[case(2, false)]
  #[case(3, false)]
  #[case(1, true)]
  #[case(2, true)]
  #[case(3, true)]
  fn dna_to_display_round_trips_for_every_frame_and_strand(#[case] frame_val: i32, #[case] display_rev: bool) {
    let r = IntRange::new(1, 300).unwrap();
    let frame = Frame::new(frame_val, 3).unwrap();
    for dna_idx in [1_i64, 2, 50, 100, 150, 299, 300] {
      let (display_idx, base_num) = dna_to_display(dna_idx, frame, SeqType::Peptide, display_rev, &r).unwrap();
      let round_tripped = display_to_dna(display_idx, frame, base_num, SeqType::Peptide, display_rev, &r);
      assert_eq!(round_tripped, dna_idx, "frame={frame_val} rev={display_rev} dna_idx={dna_idx}");
    }
  }

  #[test]
  fn dna_seq_type_round_trips_trivially() {
    let r = IntRange::new(10, 20).unwrap();
    let frame = Frame::new(1, 1).unwrap();
    for dna_idx in 10..=20 {
      let (display_idx, base_num) = dna_to_display(dna_idx, frame, SeqType::Dna, true, &r).unwrap();
      assert_eq!(base_num, BaseNum::First);
      let round_tripped = display_to_dna(display_idx, frame, base_num, SeqType::Dna, true, &r);
      assert_eq!(round_tripped, dna_idx);
    }
  }

  #[test]
  fn frame_out_of_range_for_seq_type_errors() {
    let r = ref_range_1_300();
    let frame = Frame::new(3, 3).unwrap();
    assert!(dna_to_display(100, frame, SeqType::Dna, false, &r).is_err());
  }

  #[test]
  fn invert_coord_mirrors_about_range() {
    let r = IntRange::new(1, 10).unwrap();
    assert_eq!(invert_coord(3, &r, true), 8);
    assert_eq!(invert_coord(3, &r, false), 3);
  }

  #[test]
  fn convert_display_range_widens_to_codon_boundaries() {
    let r = IntRange::new(1, 300).unwrap();
    let frame = Frame::new(1, 3).unwrap();
    let display_range = IntRange::new(34, 34).unwrap();
    let dna_range =
      convert_display_range_to_dna_range(&display_range, frame, SeqType::Peptide, false, &r).unwrap();
    assert_eq!(dna_range, IntRange::new(100, 102).unwrap());
  }

  #[test]
  fn rect_projection_respects_clip_and_reversal() {
    let rect = AxisRect { min: 0.0, max: 100.0 };
    let dna_range = IntRange::new(1, 101).unwrap();
    let pos = convert_base_idx_to_rect_pos(51, &rect, &dna_range, true, false, true);
    assert!((pos - 50.0).abs() < 1e-9);

    let pos_rev = convert_base_idx_to_rect_pos(51, &rect, &dna_range, true, true, true);
    assert!((pos_rev - 50.0).abs() < 1e-9);

    let pos_start_rev = convert_base_idx_to_rect_pos(1, &rect, &dna_range, true, true, true);
    assert!((pos_start_rev - 100.0).abs() < 1e-6);
  }
}
