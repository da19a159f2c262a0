//! Logger setup (spec §11.2), grounded on the teacher's `setup_logger`:
//! `env_logger` configured with an explicit level filter and a compact,
//! timestamp-free format suited to a CLI tool's stderr rather than a
//! server's log aggregator.

use log::LevelFilter;

/// Initialises the global logger at `level`. Safe to call more than once
/// per process in tests; later calls after the first are no-ops, matching
/// `env_logger`'s own `try_init` semantics.
pub fn setup_logger(level: LevelFilter) {
  let _ = env_logger::Builder::new()
    .filter_level(level)
    .format_timestamp(None)
    .format_target(false)
    .try_init();
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn setup_logger_does_not_panic_when_called_twice() {
    setup_logger(LevelFilter::Debug);
    setup_logger(LevelFilter::Warn);
  }
}
