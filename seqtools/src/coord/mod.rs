//! The coordinate engine (C1).

pub mod position;
pub mod projection;
pub mod range;

pub use position::{BaseNum, Frame, Phase, SeqType, Strand};
pub use projection::{
  AxisRect, bounds_limit_range, bounds_limit_value, convert_base_idx_to_rect_pos, convert_display_range_to_dna_range,
  direction_for_strand, display_to_dna, dna_to_display, invert_coord,
};
pub use range::IntRange;
