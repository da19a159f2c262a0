//! Selection/projection service (C10): tracks which features/sequences are
//! currently selected and notifies subscribers when the selection changes,
//! grounded on the selection-broadcast role the original's `BlxViewContext`
//! played between the tree view and the detail views (spec §3 `SelectionInfo`).

use crate::coord::IntRange;
use crate::feature::{FeatureId, FeatureSeqId};

/// A snapshot of the current selection (spec §3 `SelectionInfo`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionInfo {
  pub selected_features: Vec<FeatureId>,
  pub selected_sequences: Vec<FeatureSeqId>,
  /// The reference-coordinate range spanned by the selection, if any;
  /// `None` for an empty selection.
  pub range: Option<IntRange>,
}

impl SelectionInfo {
  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.selected_features.is_empty() && self.selected_sequences.is_empty()
  }

  /// A one-line human-readable description, grounded on
  /// `mspGetCoordsAsString` (`blxmsp.h`).
  #[must_use]
  pub fn describe(&self) -> String {
    if self.is_empty() {
      return "no selection".to_owned();
    }
    match self.range {
      Some(range) => format!(
        "{} feature(s), {} sequence(s), {}-{}",
        self.selected_features.len(),
        self.selected_sequences.len(),
        range.min,
        range.max
      ),
      None => format!("{} feature(s), {} sequence(s)", self.selected_features.len(), self.selected_sequences.len()),
    }
  }
}

/// A single selection-changed callback, boxed so [`SelectionService`] can
/// hold a heterogeneous list of subscribers (tree view, detail view,
/// dot-plot overlay, ...).
pub type SelectionListener = Box<dyn FnMut(&SelectionInfo) + Send>;

/// Broadcasts selection changes to subscribers (spec §3/§4.10). Mirrors the
/// observer pattern the original wired up with GTK signals
/// (`g_signal_connect` on a custom "selection-changed" signal); here it's
/// an explicit `Vec` of callbacks rather than a signal bus, since GTK
/// itself is out of scope.
#[derive(Default)]
pub struct SelectionService {
  current: SelectionInfo,
  listeners: Vec<SelectionListener>,
}

impl SelectionService {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  #[must_use]
  pub fn current(&self) -> &SelectionInfo {
    &self.current
  }

  pub fn subscribe(&mut self, listener: SelectionListener) {
    self.listeners.push(listener);
  }

  /// Replaces the current selection and notifies every subscriber.
  pub fn set_selection(&mut self, selection: SelectionInfo) {
    self.current = selection;
    for listener in &mut self.listeners {
      listener(&self.current);
    }
  }

  pub fn clear(&mut self) {
    self.set_selection(SelectionInfo::default());
  }
}
