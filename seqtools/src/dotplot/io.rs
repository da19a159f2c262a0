//! Save/load formats for a computed dot-plot (spec §4.8/§6), grounded on
//! Dotter's own persisted-plot feature (recomputing a large dot-plot is
//! expensive, so the original let users save and reload one). The layout
//! here is the header the spec documents — magic, width, height, pixel
//! factor, window size, greyramp black/white points and an invert flag —
//! followed by the rendered pixelmap bytes, not the raw convolution
//! scores, so loading reconstructs the visible plot without needing the
//! scores or the input sequences again.

use std::collections::HashMap;
use std::io::{self, Read, Write};

use crate::dotplot::greyramp::GreyRamp;
use crate::dotplot::matrix::DotMatrix;
use crate::error::InputError;

const MAGIC: &[u8; 4] = b"SQDM";
const INVERT_FLAG: u8 = 0x01;

/// A saved dot-plot: the rendered greyramp pixelmap plus the metadata
/// needed to redraw it, matching spec §6's persisted-state header.
#[derive(Debug, Clone, PartialEq)]
pub struct SavedDotplot {
  pub width: usize,
  pub height: usize,
  pub pixel_factor: u32,
  pub win_size: u32,
  pub greyramp: GreyRamp,
  pub pixels: Vec<u8>,
}

impl SavedDotplot {
  #[must_use]
  pub fn get(&self, row: usize, col: usize) -> u8 {
    self.pixels[row * self.width + col]
  }
}

/// Writes `matrix`'s pixelmap, rendered through `greyramp`, to `writer` in
/// the header spec §6 mandates: 4-byte magic, little-endian `u32`
/// width/height/pixel-factor/window-size, `f32` black/white points, a
/// `u8` flags byte (bit 0 = invert), then `width * height` intensity
/// bytes in row-major order.
pub fn save_binary<W: Write>(matrix: &DotMatrix, pixel_factor: u32, win_size: u32, greyramp: GreyRamp, mut writer: W) -> io::Result<()> {
  writer.write_all(MAGIC)?;
  writer.write_all(&(matrix.width as u32).to_le_bytes())?;
  writer.write_all(&(matrix.height as u32).to_le_bytes())?;
  writer.write_all(&pixel_factor.to_le_bytes())?;
  writer.write_all(&win_size.to_le_bytes())?;
  writer.write_all(&(greyramp.min_score as f32).to_le_bytes())?;
  writer.write_all(&(greyramp.max_score as f32).to_le_bytes())?;
  writer.write_all(&[if greyramp.invert { INVERT_FLAG } else { 0 }])?;
  writer.write_all(&greyramp.levels(&matrix.values))?;
  Ok(())
}

/// Reads a dot-plot written by [`save_binary`].
pub fn load_binary<R: Read>(mut reader: R) -> Result<SavedDotplot, InputError> {
  let mut magic = [0_u8; 4];
  reader.read_exact(&mut magic).map_err(|_| InputError::EmptyFasta)?;
  if &magic != MAGIC {
    return Err(InputError::InvalidTag(String::from_utf8_lossy(&magic).into_owned()));
  }

  let mut buf4 = [0_u8; 4];
  reader.read_exact(&mut buf4).map_err(|_| InputError::EmptyFasta)?;
  let width = u32::from_le_bytes(buf4) as usize;
  reader.read_exact(&mut buf4).map_err(|_| InputError::EmptyFasta)?;
  let height = u32::from_le_bytes(buf4) as usize;
  reader.read_exact(&mut buf4).map_err(|_| InputError::EmptyFasta)?;
  let pixel_factor = u32::from_le_bytes(buf4);
  reader.read_exact(&mut buf4).map_err(|_| InputError::EmptyFasta)?;
  let win_size = u32::from_le_bytes(buf4);
  reader.read_exact(&mut buf4).map_err(|_| InputError::EmptyFasta)?;
  let black = f32::from_le_bytes(buf4);
  reader.read_exact(&mut buf4).map_err(|_| InputError::EmptyFasta)?;
  let white = f32::from_le_bytes(buf4);

  let mut flags = [0_u8; 1];
  reader.read_exact(&mut flags).map_err(|_| InputError::EmptyFasta)?;
  let invert = flags[0] & INVERT_FLAG != 0;

  let mut pixels = vec![0_u8; width * height];
  reader.read_exact(&mut pixels).map_err(|_| InputError::EmptyFasta)?;

  let greyramp = GreyRamp::new(black.round() as i32, white.round() as i32, invert);
  Ok(SavedDotplot { width, height, pixel_factor, win_size, greyramp, pixels })
}

/// Writes the same header fields as [`save_binary`] as `# key=value`
/// lines, followed by one row per line of space-separated intensity
/// bytes.
pub fn save_text<W: Write>(matrix: &DotMatrix, pixel_factor: u32, win_size: u32, greyramp: GreyRamp, mut writer: W) -> io::Result<()> {
  writeln!(writer, "# magic=SQDM")?;
  writeln!(writer, "# width={}", matrix.width)?;
  writeln!(writer, "# height={}", matrix.height)?;
  writeln!(writer, "# pixelFac={pixel_factor}")?;
  writeln!(writer, "# winSize={win_size}")?;
  writeln!(writer, "# black={}", greyramp.min_score)?;
  writeln!(writer, "# white={}", greyramp.max_score)?;
  writeln!(writer, "# flags={}", if greyramp.invert { INVERT_FLAG } else { 0 })?;

  let pixels = greyramp.levels(&matrix.values);
  for row in 0..matrix.height {
    let line: Vec<String> = (0..matrix.width).map(|col| pixels[row * matrix.width + col].to_string()).collect();
    writeln!(writer, "{}", line.join(" "))?;
  }
  Ok(())
}

fn header_field<'a>(header: &'a HashMap<String, String>, key: &str) -> Result<&'a str, InputError> {
  header.get(key).map(String::as_str).ok_or_else(|| InputError::InvalidTag(key.to_owned()))
}

fn header_u32(header: &HashMap<String, String>, key: &str) -> Result<u32, InputError> {
  header_field(header, key)?.parse().map_err(|_| InputError::InvalidCoord(key.to_owned()))
}

fn header_i32(header: &HashMap<String, String>, key: &str) -> Result<i32, InputError> {
  header_field(header, key)?.parse().map_err(|_| InputError::InvalidCoord(key.to_owned()))
}

/// Reads a dot-plot written by [`save_text`].
pub fn load_text(text: &str) -> Result<SavedDotplot, InputError> {
  let mut lines = text.lines().peekable();
  let mut header: HashMap<String, String> = HashMap::new();
  while let Some(&line) = lines.peek() {
    let Some(rest) = line.strip_prefix("# ") else { break };
    let (key, value) = rest.split_once('=').ok_or_else(|| InputError::InvalidTag(line.to_owned()))?;
    header.insert(key.to_owned(), value.to_owned());
    lines.next();
  }

  if header_field(&header, "magic")? != "SQDM" {
    return Err(InputError::InvalidTag(header_field(&header, "magic")?.to_owned()));
  }

  let width = header_u32(&header, "width")? as usize;
  let height = header_u32(&header, "height")? as usize;
  let pixel_factor = header_u32(&header, "pixelFac")?;
  let win_size = header_u32(&header, "winSize")?;
  let black = header_i32(&header, "black")?;
  let white = header_i32(&header, "white")?;
  let flags = header_u32(&header, "flags")? as u8;
  let invert = flags & INVERT_FLAG != 0;

  let mut pixels = Vec::with_capacity(width * height);
  for line in lines.take(height) {
    for token in line.split_whitespace() {
      let value: u8 = token.parse().map_err(|_| InputError::InvalidCoord(token.to_owned()))?;
      pixels.push(value);
    }
  }

  if pixels.len() != width * height {
    return Err(InputError::InvalidNumTokens { min: width * height, max: width * height, found: pixels.len() });
  }

  Ok(SavedDotplot { width, height, pixel_factor, win_size, greyramp: GreyRamp::new(black, white, invert), pixels })
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_matrix() -> DotMatrix {
    let mut matrix = DotMatrix::new(2, 2);
    matrix.set(0, 0, 1);
    matrix.set(0, 1, -2);
    matrix.set(1, 0, 3);
    matrix.set(1, 1, 4);
    matrix
  }

  #[test]
  fn binary_round_trips() {
    let matrix = sample_matrix();
    let greyramp = GreyRamp::new(-2, 4, false);
    let mut buf = Vec::new();
    save_binary(&matrix, 2, 7, greyramp, &mut buf).unwrap();
    let loaded = load_binary(buf.as_slice()).unwrap();

    assert_eq!(loaded.width, 2);
    assert_eq!(loaded.height, 2);
    assert_eq!(loaded.pixel_factor, 2);
    assert_eq!(loaded.win_size, 7);
    assert_eq!(loaded.greyramp, greyramp);
    assert_eq!(loaded.pixels, greyramp.levels(&matrix.values));
  }

  #[test]
  fn binary_pixels_are_greyramp_levels_not_raw_scores() {
    let matrix = sample_matrix();
    let greyramp = GreyRamp::new(-2, 4, false);
    let mut buf = Vec::new();
    save_binary(&matrix, 1, 5, greyramp, &mut buf).unwrap();
    let loaded = load_binary(buf.as_slice()).unwrap();
    assert_eq!(loaded.get(1, 1), 255); // score 4 == max_score
    assert_eq!(loaded.get(0, 0), greyramp.level(1));
  }

  #[test]
  fn binary_round_trips_an_inverted_ramp() {
    let matrix = sample_matrix();
    let greyramp = GreyRamp::new(-2, 4, true);
    let mut buf = Vec::new();
    save_binary(&matrix, 1, 5, greyramp, &mut buf).unwrap();
    let loaded = load_binary(buf.as_slice()).unwrap();
    assert!(loaded.greyramp.invert);
    assert_eq!(loaded.get(1, 1), 0); // inverted ramp, max score maps to 0
  }

  #[test]
  fn text_round_trips() {
    let matrix = sample_matrix();
    let greyramp = GreyRamp::new(-2, 4, false);
    let mut buf = Vec::new();
    save_text(&matrix, 2, 7, greyramp, &mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    let loaded = load_text(&text).unwrap();

    assert_eq!(loaded.width, 2);
    assert_eq!(loaded.pixel_factor, 2);
    assert_eq!(loaded.win_size, 7);
    assert_eq!(loaded.greyramp, greyramp);
    assert_eq!(loaded.pixels, greyramp.levels(&matrix.values));
  }

  #[test]
  fn binary_rejects_bad_magic() {
    let result = load_binary(b"XXXX00000000000000000000000".as_slice());
    assert!(result.is_err());
  }

  #[test]
  fn text_rejects_mismatched_value_count() {
    let text = "# magic=SQDM\n# width=2\n# height=2\n# pixelFac=1\n# winSize=5\n# black=0\n# white=1\n# flags=0\n1 2\n3\n";
    let result = load_text(text);
    assert!(result.is_err());
  }

  #[test]
  fn text_rejects_bad_magic() {
    let text = "# magic=NOPE\n# width=0\n# height=0\n# pixelFac=1\n# winSize=5\n# black=0\n# white=1\n# flags=0\n";
    let result = load_text(text);
    assert!(result.is_err());
  }
}
