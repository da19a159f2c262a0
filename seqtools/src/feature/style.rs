//! Named feature styles (spec §3 `Style`), grounded on `getBlxStyle` and the
//! `fsColor`/`fsShape` fields of `MSP` (`blxmsp.h`). Only the semantic,
//! non-drawing parts of a style survive here: a colour name and a shape
//! tag, carried through so a caller embedding this crate in a GTK frontend
//! (out of scope) can resolve them to actual paint, but never interpreted
//! by this crate itself.
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// The two drawing shapes the original style system distinguished
/// (`BLXCURVE_INTERPOLATE`/`BLXCURVE_PARTIAL`-style shape tags in the
/// legacy `BlxStyle`), kept as an opaque enum since this crate never draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, schemars::JsonSchema)]
pub enum StyleShape {
  Box,
  Line,
}

/// A named style, resolved from a feature's source/data type via the
/// `styles` config file section (spec §11.3).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub struct Style {
  pub name: String,
  pub fill_colour: String,
  pub line_colour: String,
  pub shape: StyleShape,
}

impl Style {
  #[must_use]
  pub fn new(name: impl Into<String>, fill_colour: impl Into<String>, line_colour: impl Into<String>, shape: StyleShape) -> Self {
    Self {
      name: name.into(),
      fill_colour: fill_colour.into(),
      line_colour: line_colour.into(),
      shape,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn constructs_style() {
    let style = Style::new("exon", "#ff0000", "#000000", StyleShape::Box);
    assert_eq!(style.name, "exon");
    assert_eq!(style.shape, StyleShape::Box);
  }
}
