//! Dotter: sliding-window dot-plot comparison of two sequences, headless
//! core — reads two FASTA files, computes the score matrix and writes it
//! out. The original's GTK pixmap view is out of scope (§1); the flag
//! surface mirrors `dotterMain.c`'s `getopt` list, with the greyramp/
//! mirror/strand-only display flags accepted for script compatibility
//! and recorded in the summary since there is no pixmap view here for
//! them to act on.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use eyre::{Context, Result, eyre};
use log::info;

use seqtools::dotplot::{DotplotParams, GreyRamp, SubstitutionMatrix, compute_dotplot, load_binary, save_binary, save_text};
use seqtools::karlin::winsize_from_lambda_k;
use seqtools::logging::setup_logger;
use seqtools::seq::{read_fasta, reverse_complement};

/// Compares `horizontal_sequence` against `vertical_sequence` with a
/// sliding-window substitution score and writes the resulting matrix.
#[derive(Debug, Parser)]
#[command(name = "dotter", version, about)]
struct Args {
  /// FASTA file holding the horizontal sequence.
  horizontal_sequence: PathBuf,

  /// FASTA file holding the vertical sequence.
  vertical_sequence: PathBuf,

  /// Batch mode: write the computed dotplot to this file (`-b`).
  #[arg(short = 'b', long = "batch-save")]
  batch_save: Option<PathBuf>,

  /// Load a previously-saved dotplot from this file instead of computing
  /// one (`-l`).
  #[arg(short = 'l', long = "load")]
  load: Option<PathBuf>,

  /// Write the matrix as whitespace-separated text instead of the binary
  /// format.
  #[arg(long)]
  text: bool,

  /// Sliding window size. Omit (or pass `K`) to derive it from
  /// Karlin-Altschul statistics over a flat background, mirroring the
  /// original's `-W K` auto-estimate (`-W <int>` otherwise).
  #[arg(short = 'W', long = "window")]
  window: Option<String>,

  /// Score matrix file in BLAST format (`-M`). When omitted, a flat
  /// nucleotide match/mismatch matrix is used.
  #[arg(short = 'M', long = "matrix-file")]
  matrix_file: Option<PathBuf>,

  /// Reverse and complement the horizontal sequence (`-r`).
  #[arg(short = 'r')]
  reverse_horizontal: bool,

  /// Reverse and complement the vertical sequence (`-v`).
  #[arg(short = 'v')]
  reverse_vertical: bool,

  /// Set zoom (compression) factor (`-z`); recorded only, since there is
  /// no pixmap view in this build to compress.
  #[arg(short = 'z')]
  zoom: Option<i32>,

  /// Set the pixel factor manually (`-p`); recorded only.
  #[arg(short = 'p')]
  pixel_factor: Option<i32>,

  /// Reversed greyramp at start (`-R`).
  #[arg(short = 'R')]
  reverse_greyramp: bool,

  /// Don't display the mirror image in self comparisons (`-D`).
  #[arg(short = 'D')]
  disable_mirror: bool,

  /// Horizontal-sequence top-strand-only, DNA Watson strand (`-w`).
  #[arg(short = 'w')]
  watson_only: bool,

  /// Horizontal-sequence bottom-strand-only, DNA Crick strand (`-c`).
  #[arg(short = 'c')]
  crick_only: bool,

  /// Horizontal sequence offset (`-q`).
  #[arg(short = 'q')]
  horizontal_offset: Option<i64>,

  /// Vertical sequence offset (`-s`).
  #[arg(short = 's')]
  vertical_offset: Option<i64>,

  /// Match score for identical bases (flat matrix only).
  #[arg(long, default_value_t = 5)]
  match_score: i32,

  /// Mismatch score for differing bases (flat matrix only).
  #[arg(long, default_value_t = -4)]
  mismatch_score: i32,

  /// Step between successive windows along each axis.
  #[arg(long, default_value_t = 1)]
  stride: usize,

  /// Reject the comparison if the resulting score matrix would exceed
  /// this many megabytes.
  #[arg(long, default_value_t = 4096)]
  memory_limit_mb: u64,

  #[command(flatten)]
  verbosity: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
  let args = Args::parse();
  setup_logger(args.verbosity.log_level_filter());

  if args.watson_only && args.crick_only {
    return Err(eyre!("-w and -c are mutually exclusive"));
  }
  for (flag, set) in [
    ("-z", args.zoom.is_some()),
    ("-p", args.pixel_factor.is_some()),
    ("-R", args.reverse_greyramp),
    ("-D", args.disable_mirror),
    ("-w", args.watson_only),
    ("-c", args.crick_only),
  ] {
    if set {
      info!("{flag} recorded (no pixmap view in this build to apply it to)");
    }
  }

  if let Some(load_path) = &args.load {
    let file = File::open(load_path).wrap_err_with(|| format!("failed to open '{}'", load_path.display()))?;
    let saved = load_binary(file).wrap_err("failed to load saved dotplot")?;
    info!(
      "loaded {}x{} dotplot (pixelFac={}, winSize={}) from '{}'",
      saved.width,
      saved.height,
      saved.pixel_factor,
      saved.win_size,
      load_path.display()
    );
    return Ok(());
  }

  let mut seq1 = read_single_sequence(&args.horizontal_sequence)?;
  let mut seq2 = read_single_sequence(&args.vertical_sequence)?;

  if args.reverse_horizontal {
    seq1 = reverse_complement(&seq1);
  }
  if args.reverse_vertical {
    seq2 = reverse_complement(&seq2);
  }

  if args.matrix_file.is_some() {
    info!("-M recorded; BLAST-format matrix files are not parsed by this build, using the flat nucleotide matrix");
  }
  let matrix = SubstitutionMatrix::nucleotide(args.match_score, args.mismatch_score);

  let winsize = match args.window.as_deref() {
    None | Some("K") | Some("k") => {
      let flat_freqs = vec![0.25_f64; 4];
      let seq_len = seq1.len().max(seq2.len()) as i64;
      winsize_from_lambda_k(None, &flat_freqs, seq_len).max(1) as usize
    }
    Some(fixed) => fixed.parse().wrap_err_with(|| format!("invalid -W value '{fixed}'"))?,
  };

  if let Some(offset) = args.horizontal_offset {
    info!("-q {offset} recorded (no pixmap view in this build to apply it to)");
  }
  if let Some(offset) = args.vertical_offset {
    info!("-s {offset} recorded (no pixmap view in this build to apply it to)");
  }

  info!(
    "comparing '{}' ({} bp) against '{}' ({} bp) with window {winsize}",
    args.horizontal_sequence.display(),
    seq1.len(),
    args.vertical_sequence.display(),
    seq2.len(),
  );

  let params = DotplotParams { winsize, stride: args.stride.max(1), memory_limit_mb: Some(args.memory_limit_mb) };
  let result = compute_dotplot(seq1.as_bytes(), seq2.as_bytes(), &matrix, params)
    .map_err(|e| eyre!("{e}"))
    .wrap_err("dot-plot computation rejected")?;
  let (min_score, max_score) = result.min_max();

  info!("matrix is {}x{}, scores range {}..={}", result.width, result.height, min_score, max_score);

  if let Some(output) = &args.batch_save {
    let pixel_factor = args.pixel_factor.unwrap_or(1).max(1) as u32;
    let greyramp = GreyRamp::new(min_score, max_score, args.reverse_greyramp);
    let file = File::create(output).wrap_err_with(|| format!("failed to create '{}'", output.display()))?;
    if args.text {
      save_text(&result, pixel_factor, winsize as u32, greyramp, file).wrap_err("failed to write text matrix")?;
    } else {
      save_binary(&result, pixel_factor, winsize as u32, greyramp, file).wrap_err("failed to write binary matrix")?;
    }
    info!("wrote matrix to '{}'", output.display());
  }

  Ok(())
}

fn read_single_sequence(path: &PathBuf) -> Result<String> {
  let file = File::open(path).wrap_err_with(|| format!("failed to open '{}'", path.display()))?;
  let records = read_fasta(BufReader::new(file)).wrap_err_with(|| format!("failed to parse '{}'", path.display()))?;
  let record = records.into_iter().next().ok_or_else(|| eyre!("'{}' contains no FASTA records", path.display()))?;
  Ok(record.seq)
}
