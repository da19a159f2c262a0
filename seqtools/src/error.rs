//! Error taxonomy shared across the crate (spec §7).
//!
//! Four families are distinguished: input errors (bad records in a parsed
//! file, non-fatal, the offending record is skipped), model errors
//! (programmer errors, abort the enclosing operation), runtime errors
//! (recoverable, the caller advances to a fallback) and statistics errors
//! (downgrade to a logged default). All four carry enough context to be
//! rendered with `{}` and wrapped with `eyre::WrapErr`.

use derive_more::Display;

/// Build an [`eyre::Report`] for a user-facing failure (bad input, bad config).
#[macro_export]
macro_rules! make_error {
  ($($arg:tt)*) => {
    Err(eyre::eyre!($($arg)*))
  };
}

/// Build an [`eyre::Report`] for a condition that should be impossible if the
/// rest of the crate is correct (an invariant violation). Distinguished from
/// `make_error!` only in the message prefix, so the two are never confused
/// when read in logs.
#[macro_export]
macro_rules! make_internal_report {
  ($($arg:tt)*) => {
    eyre::eyre!("Internal error (this is a bug, please report it): {}", format!($($arg)*))
  };
}

/// Input-layer errors (spec §7 "Input errors"): reported with file/line,
/// the offending record is skipped and parsing continues.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum InputError {
  #[display("invalid strand '{_0}'")]
  InvalidStrand(String),
  #[display("unsupported feature type '{_0}'")]
  InvalidType(String),
  #[display("expected between {min} and {max} columns but found {found}")]
  InvalidNumTokens { min: usize, max: usize, found: usize },
  #[display("invalid tag/value pair '{_0}'")]
  InvalidTag(String),
  #[display("invalid coordinate '{_0}'")]
  InvalidCoord(String),
  #[display("unsupported CIGAR operator '{_0}'")]
  CigarUnsupported(char),
  #[display("no sequence characters were read from FASTA input")]
  EmptyFasta,
  #[display("character '{_0}' is not a valid IUPAC code for this sequence type")]
  InvalidIupac(char),
}

/// Attaches file/line context to an [`InputError`], per spec §7.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("[{file}:{line}] {kind}")]
pub struct LocatedInputError {
  pub file: String,
  pub line: usize,
  pub kind: InputError,
}

impl std::error::Error for InputError {}
impl std::error::Error for LocatedInputError {}

/// Model-layer errors (spec §7 "Model errors"): programmer errors, abort the
/// enclosing operation.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ModelError {
  #[display("sequence data for '{_0}' does not match previously-parsed data")]
  SeqDataMismatch(String),
  #[display("invalid column id {_0}")]
  InvalidColumn(i32),
  #[display("invalid range: min {min} > max {max}")]
  InvalidRange { min: i64, max: i64 },
  #[display("frame {frame} is out of range for {num_frames} frame(s)")]
  FrameOutOfRange { frame: i32, num_frames: i32 },
}

impl std::error::Error for ModelError {}

/// Runtime errors (spec §7 "Runtime errors"): recoverable, the dispatcher
/// advances to the next method or the dot-plot computation aborts without
/// killing the process.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum RuntimeError {
  #[display("fetch failed for '{_0}'")]
  FetchFailed(String),
  #[display("transport error: {_0}")]
  TransportError(String),
  #[display("operation timed out after {_0:?}")]
  Timeout(std::time::Duration),
  #[display("pixel buffer would require {requested_mb} Mb, exceeding the {limit_mb} Mb limit")]
  MemoryLimitExceeded { requested_mb: u64, limit_mb: u64 },
}

impl std::error::Error for RuntimeError {}

/// Statistics errors (spec §7 "Statistics errors"): downgrade to ad-hoc
/// defaults with warnings rather than fatal.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum StatisticsError {
  #[display("there must be at least one negative score in the substitution matrix")]
  KarlinNoNegativeScore,
  #[display("a positive score is impossible given this scoring scheme and residue composition")]
  KarlinNoPositiveScore,
  #[display("expected score must be negative, but was {_0}")]
  KarlinExpectedNonNegative(f64),
}

impl std::error::Error for StatisticsError {}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn located_input_error_renders_file_and_line() {
    let err = LocatedInputError {
      file: "in.gff3".to_owned(),
      line: 42,
      kind: InputError::InvalidStrand("x".to_owned()),
    };
    assert_eq!(err.to_string(), "[in.gff3:42] invalid strand 'x'");
  }

  #[test]
  fn make_error_produces_report() {
    let result: Result<(), eyre::Report> = make_error!("oops: {}", 5);
    assert!(result.is_err());
    assert_eq!(result.unwrap_err().to_string(), "oops: 5");
  }
}
