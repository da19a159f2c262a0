//! Hand-rolled `blixemrc`/styles config file parsing (spec §11.3), grounded
//! on the same ad-hoc key/value + section style the original's own GFF3
//! and FASTA readers use (this crate never reaches for a generic config
//! crate anywhere else either, so a config format this simple doesn't
//! warrant one): an ini-like document of `[section]` headers followed by
//! `key = value` lines, `#`/`;` comments, blank lines ignored.

use std::collections::BTreeMap;

use crate::error::InputError;
use crate::feature::{DataType, MspFlag, Style, StyleShape};

/// A parsed config file: an ordered map of section name to its ordered
/// `key = value` pairs (order preserved since `fetch-method` sections list
/// methods in priority order, spec §4.6).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDocument {
  pub sections: BTreeMap<String, Vec<(String, String)>>,
}

impl ConfigDocument {
  #[must_use]
  pub fn section(&self, name: &str) -> &[(String, String)] {
    self.sections.get(name).map_or(&[], Vec::as_slice)
  }

  #[must_use]
  pub fn get(&self, section: &str, key: &str) -> Option<&str> {
    self.section(section).iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
  }
}

/// Parses `text` into a [`ConfigDocument`]. A `key = value` line outside
/// any `[section]` header is rejected, since every setting in
/// `blixemrc`/styles belongs to a named stanza (spec §11.3 edge case).
pub fn parse_config(text: &str) -> Result<ConfigDocument, InputError> {
  let mut doc = ConfigDocument::default();
  let mut current_section: Option<String> = None;

  for (line_no, raw_line) in text.lines().enumerate() {
    let line = raw_line.trim();
    if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
      continue;
    }

    if let Some(name) = line.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
      current_section = Some(name.trim().to_owned());
      doc.sections.entry(name.trim().to_owned()).or_default();
      continue;
    }

    let Some((key, value)) = line.split_once('=') else {
      return Err(InputError::InvalidTag(format!("line {}: {}", line_no + 1, line)));
    };

    let Some(section) = current_section.as_ref() else {
      return Err(InputError::InvalidTag(format!("line {}: setting outside any [section]", line_no + 1)));
    };

    doc
      .sections
      .entry(section.clone())
      .or_default()
      .push((key.trim().to_owned(), value.trim().to_owned()));
  }

  Ok(doc)
}

/// Builds the `[data-types]`-driven [`DataType`] table from a parsed
/// config: one section per data type name, with `bulk-fetch`/`user-fetch`/
/// `optional-fetch` comma-separated method-name lists and `flags` a
/// comma-separated list of [`MspFlag`] variant names (spec §11.3 item 2).
#[must_use]
pub fn data_types_from_config(doc: &ConfigDocument) -> Vec<DataType> {
  doc
    .sections
    .keys()
    .filter_map(|section| section.strip_prefix("data-type:"))
    .map(|name| {
      let mut data_type = DataType::new(name);
      let settings = doc.section(&format!("data-type:{name}"));
      for (key, value) in settings {
        match key.as_str() {
          "bulk-fetch" => data_type.bulk_fetch = split_list(value),
          "user-fetch" => data_type.user_fetch = split_list(value),
          "optional-fetch" => data_type.optional_fetch = split_list(value),
          "flags" => {
            data_type.flags = split_list(value)
              .into_iter()
              .filter_map(|flag| parse_msp_flag(&flag))
              .collect();
          }
          _ => {}
        }
      }
      data_type
    })
    .collect()
}

/// Builds the `[style:NAME]`-driven [`Style`] table (spec §12 item 1).
#[must_use]
pub fn styles_from_config(doc: &ConfigDocument) -> Vec<Style> {
  doc
    .sections
    .keys()
    .filter_map(|section| section.strip_prefix("style:"))
    .map(|name| {
      let settings = doc.section(&format!("style:{name}"));
      let fill = settings.iter().find(|(k, _)| k == "fill-colour").map_or("", |(_, v)| v.as_str());
      let line = settings.iter().find(|(k, _)| k == "line-colour").map_or("", |(_, v)| v.as_str());
      let shape = match settings.iter().find(|(k, _)| k == "shape").map(|(_, v)| v.as_str()) {
        Some("line") => StyleShape::Line,
        _ => StyleShape::Box,
      };
      Style::new(name, fill, line, shape)
    })
    .collect()
}

fn split_list(value: &str) -> Vec<String> {
  value.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_owned).collect()
}

fn parse_msp_flag(name: &str) -> Option<MspFlag> {
  match name {
    "link-features-by-name" => Some(MspFlag::LinkFeaturesByName),
    "squash-linked-features" => Some(MspFlag::SquashLinkedFeatures),
    "squash-identical-features" => Some(MspFlag::SquashIdenticalFeatures),
    "strand-specific" => Some(MspFlag::StrandSpecific),
    "show-reverse-strand" => Some(MspFlag::ShowReverseStrand),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parses_sections_and_settings() {
    let doc = parse_config("[general]\nwindow = 25\n# comment\n[style:exon]\nfill-colour = #ff0000\n").unwrap();
    assert_eq!(doc.get("general", "window"), Some("25"));
    assert_eq!(doc.get("style:exon", "fill-colour"), Some("#ff0000"));
  }

  #[test]
  fn setting_outside_section_is_rejected() {
    assert!(parse_config("window = 25\n").is_err());
  }

  #[test]
  fn malformed_line_is_rejected() {
    assert!(parse_config("[general]\njust junk\n").is_err());
  }

  #[test]
  fn builds_data_types_with_flags() {
    let doc = parse_config(
      "[data-type:EST_Human]\nbulk-fetch = http, socket\nflags = strand-specific, link-features-by-name\n",
    )
    .unwrap();
    let data_types = data_types_from_config(&doc);
    assert_eq!(data_types.len(), 1);
    assert_eq!(data_types[0].name, "EST_Human");
    assert_eq!(data_types[0].bulk_fetch, vec!["http", "socket"]);
    assert!(data_types[0].has_flag(MspFlag::StrandSpecific));
    assert!(data_types[0].has_flag(MspFlag::LinkFeaturesByName));
  }

  #[test]
  fn builds_styles() {
    let doc = parse_config("[style:exon]\nfill-colour = #ff0000\nline-colour = #000000\nshape = line\n").unwrap();
    let styles = styles_from_config(&doc);
    assert_eq!(styles.len(), 1);
    assert_eq!(styles[0].shape, StyleShape::Line);
  }
}
