//! The dot-plot sliding-window engine (C8), grounded on `dotterApp`'s main
//! comparison loop. Each cell `(row, col)` of the output matrix scores the
//! `winsize`-long window of sequence 2 starting at `row` against the
//! `winsize`-long window of sequence 1 starting at `col`; rows are
//! computed in parallel with `rayon` since they are independent (spec §5
//! concurrency model: the dot-plot computation is the one CPU-bound stage
//! that benefits from a worker pool).

use rayon::prelude::*;

use crate::dotplot::matrix::{DotMatrix, SubstitutionMatrix};
use crate::error::RuntimeError;

/// Parameters for one dot-plot computation.
#[derive(Debug, Clone, Copy)]
pub struct DotplotParams {
  pub winsize: usize,
  /// Step between successive windows along each axis; `1` computes every
  /// possible window (the default), a larger stride subsamples for speed
  /// on very long sequences.
  pub stride: usize,
  /// Rejects the computation up front with `MemoryLimitExceeded` if the
  /// resulting pixelmap (`num_cols * num_rows * 4` bytes, one `i32` score
  /// per cell) would exceed this many megabytes. `None` means unlimited.
  pub memory_limit_mb: Option<u64>,
}

impl Default for DotplotParams {
  fn default() -> Self {
    Self { winsize: 25, stride: 1, memory_limit_mb: None }
  }
}

/// Computes the raw (unscaled) score matrix comparing `seq1` (reference,
/// columns) against `seq2` (match, rows) with a sliding window of
/// `params.winsize`, scored by `matrix`.
///
/// Returns an empty matrix if either sequence is shorter than `winsize`,
/// matching the original's "sequence too short for this window" silent
/// no-op rather than an error (a window that can never fit simply produces
/// no comparable positions). Returns `Err(RuntimeError::MemoryLimitExceeded)`
/// without computing anything if `params.memory_limit_mb` is set and the
/// resulting matrix would exceed it (spec §4.8 step 6 "memory guard").
pub fn compute_dotplot(
  seq1: &[u8],
  seq2: &[u8],
  matrix: &SubstitutionMatrix,
  params: DotplotParams,
) -> Result<DotMatrix, RuntimeError> {
  let winsize = params.winsize.max(1);
  let stride = params.stride.max(1);

  if seq1.len() < winsize || seq2.len() < winsize {
    return Ok(DotMatrix::new(0, 0));
  }

  let num_cols = (seq1.len() - winsize) / stride + 1;
  let num_rows = (seq2.len() - winsize) / stride + 1;

  if let Some(limit_mb) = params.memory_limit_mb {
    let requested_bytes = (num_cols as u64) * (num_rows as u64) * 4;
    let requested_mb = requested_bytes.div_ceil(1024 * 1024);
    if requested_mb > limit_mb {
      return Err(RuntimeError::MemoryLimitExceeded { requested_mb, limit_mb });
    }
  }

  let rows: Vec<Vec<i32>> = (0..num_rows)
    .into_par_iter()
    .map(|row_idx| {
      let row_start = row_idx * stride;
      let row_window = &seq2[row_start..row_start + winsize];
      (0..num_cols)
        .map(|col_idx| {
          let col_start = col_idx * stride;
          let col_window = &seq1[col_start..col_start + winsize];
          score_window_pair(row_window, col_window, matrix)
        })
        .collect()
    })
    .collect();

  let mut result = DotMatrix::new(num_cols, num_rows);
  for (row_idx, row) in rows.into_iter().enumerate() {
    for (col_idx, score) in row.into_iter().enumerate() {
      result.set(row_idx, col_idx, score);
    }
  }
  Ok(result)
}

fn score_window_pair(a: &[u8], b: &[u8], matrix: &SubstitutionMatrix) -> i32 {
  a.iter().zip(b.iter()).map(|(&x, &y)| matrix.score(x, y)).sum()
}
