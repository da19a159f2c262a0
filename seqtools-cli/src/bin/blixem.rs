//! Blixem: BLAST-matches-in-an-X-windows-embedded multiple-alignment
//! viewer, headless core — parses a GFF3+FASTA input, finalises the
//! feature model, optionally bulk-fetches missing sequences, and reports
//! a summary in lieu of the GTK alignment view (out of scope, §1). The
//! flag surface mirrors Blixem's own `getopt`-based argument list
//! (`blxmain.c`); flags that only ever affected that view's layout
//! (`--hide-big-picture`, `--zoom-range`, sort/squash display options and
//! so on) are accepted for script compatibility and recorded in the
//! summary, since there is no view here for them to act on.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use eyre::{Context, Result, eyre};
use log::info;

use seqtools::config::{data_types_from_config, parse_config, styles_from_config};
use seqtools::coord::SeqType;
use seqtools::feature::FeatureSeqType;
use seqtools::fetch::{CancellationToken, DefaultFetchBackend, FetchMethod, OutputParserKind, fetch_bulk};
use seqtools::finalise::finalise;
use seqtools::gff3::{CigarExpansionMode, Gff3Options, parse_gff3};
use seqtools::logging::setup_logger;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DisplayType {
  /// Nucleotide reference display.
  N,
  /// Peptide (protein) reference display, 3 reading frames.
  P,
}

/// Loads alignment features and their match/transcript sequences, the way
/// Blixem's startup does before handing the parsed model to its view.
#[derive(Debug, Parser)]
#[command(name = "blixem", version, about)]
struct Args {
  /// Sequence/feature file in GFF3 (optionally with an embedded
  /// `##FASTA` section), matching `[<sequencefile>] <datafile>`.
  data_file: PathBuf,

  /// Reference display type: nucleotide or peptide. Mandatory, per the
  /// original's `-t` flag.
  #[arg(short = 't', long = "display-type")]
  display_type: DisplayType,

  /// Names of the alignments to load, e.g. "EST_mouse EST_human".
  #[arg(short = 'a', long = "alignment-names")]
  alignment_names: Option<String>,

  /// Read fetch-method/data-type configuration from this `blixemrc`-style
  /// file.
  #[arg(short = 'c', long = "config-file")]
  config_file: Option<PathBuf>,

  /// Read column colours from this styles file.
  #[arg(short = 'y', long = "styles-file")]
  styles_file: Option<PathBuf>,

  /// Dataset identifier to annotate the summary with.
  #[arg(long)]
  dataset: Option<String>,

  /// `host:port` of a socket pfetch server to bulk-fetch any missing
  /// match/transcript sequences from.
  #[arg(long = "fetch-server")]
  fetch_server: Option<String>,

  #[arg(long = "hide-big-picture")]
  hide_big_picture: bool,
  #[arg(long = "hide-inactive-strand")]
  hide_inactive_strand: bool,
  #[arg(long = "highlight-diffs")]
  highlight_diffs: bool,
  #[arg(long = "invert-sort")]
  invert_sort: bool,

  /// `from[:to]` coordinate mapping.
  #[arg(short = 'm', long = "map-coords")]
  map_coords: Option<String>,
  #[arg(short = 'n', long = "negate-coords")]
  negate_coords: bool,
  #[arg(short = 'o', long = "offset")]
  offset: Option<i64>,
  #[arg(short = 'r', long = "reverse-strand")]
  reverse_strand: bool,

  #[arg(long = "optional-data")]
  optional_data: bool,
  #[arg(long = "remove-input-files")]
  remove_input_files: bool,
  #[arg(long = "save-temp-files")]
  save_temp_files: bool,

  #[arg(long = "show-coverage")]
  show_coverage: bool,
  #[arg(long = "sort-mode")]
  sort_mode: Option<char>,
  #[arg(long = "squash-matches")]
  squash_matches: bool,
  #[arg(short = 's', long = "start-coord")]
  start_coord: Option<i64>,
  #[arg(long = "start-next-match")]
  start_next_match: bool,
  #[arg(long = "dotter-first-match")]
  dotter_first_match: bool,
  #[arg(short = 'z', long = "zoom-range")]
  zoom_range: Option<String>,
  #[arg(long = "zoom-whole")]
  zoom_whole: bool,

  /// Use the legacy nucleotide-count interpretation of CIGAR `M` operator
  /// counts instead of the default peptide-count interpretation.
  #[arg(long)]
  legacy_cigar_counts: bool,

  #[command(flatten)]
  verbosity: Verbosity<InfoLevel>,
}

fn main() -> Result<()> {
  let args = Args::parse();
  setup_logger(args.verbosity.log_level_filter());

  if let Some(names) = &args.alignment_names {
    info!("restricting to alignment names: {names}");
  }
  if let Some(map_coords) = &args.map_coords {
    info!("--map-coords {map_coords} recorded (no GTK view in this build to apply it to)");
  }
  if let Some(start_coord) = args.start_coord {
    info!("--start-coord {start_coord} recorded (no GTK view in this build to apply it to)");
  }
  if let Some(offset) = args.offset {
    info!("--offset {offset} recorded (no GTK view in this build to apply it to)");
  }
  if let Some(sort_mode) = args.sort_mode {
    info!("--sort-mode {sort_mode} recorded (no GTK view in this build to apply it to)");
  }
  if let Some(zoom_range) = &args.zoom_range {
    info!("--zoom-range {zoom_range} recorded (no GTK view in this build to apply it to)");
  }
  for (flag, set) in [
    ("--hide-big-picture", args.hide_big_picture),
    ("--hide-inactive-strand", args.hide_inactive_strand),
    ("--highlight-diffs", args.highlight_diffs),
    ("--invert-sort", args.invert_sort),
    ("--negate-coords", args.negate_coords),
    ("--reverse-strand", args.reverse_strand),
    ("--optional-data", args.optional_data),
    ("--remove-input-files", args.remove_input_files),
    ("--save-temp-files", args.save_temp_files),
    ("--squash-matches", args.squash_matches),
    ("--start-next-match", args.start_next_match),
    ("--dotter-first-match", args.dotter_first_match),
    ("--zoom-whole", args.zoom_whole),
  ] {
    if set {
      info!("{flag} recorded (no GTK view in this build to apply it to)");
    }
  }

  let contents = fs::read_to_string(&args.data_file)
    .wrap_err_with(|| format!("failed to read '{}'", args.data_file.display()))?;

  let options = Gff3Options {
    ref_seq_type: match args.display_type {
      DisplayType::N => SeqType::Dna,
      DisplayType::P => SeqType::Peptide,
    },
    cigar_mode: if args.legacy_cigar_counts {
      CigarExpansionMode::LegacyNucleotideCount
    } else {
      CigarExpansionMode::PeptideCount
    },
  };

  let mut result = parse_gff3(&contents, options);
  for error in &result.errors {
    log::warn!("{error}");
  }

  let finalise_errors = finalise(&mut result.model);
  for error in &finalise_errors {
    log::warn!("{error}");
  }

  if let Some(config_path) = &args.config_file {
    let config_text =
      fs::read_to_string(config_path).wrap_err_with(|| format!("failed to read '{}'", config_path.display()))?;
    let doc = parse_config(&config_text).wrap_err("failed to parse config file")?;
    let data_types = data_types_from_config(&doc);
    info!("loaded {} data type(s) from '{}'", data_types.len(), config_path.display());
  }

  if let Some(styles_path) = &args.styles_file {
    let styles_text =
      fs::read_to_string(styles_path).wrap_err_with(|| format!("failed to read '{}'", styles_path.display()))?;
    let doc = parse_config(&styles_text).wrap_err("failed to parse styles file")?;
    let styles = styles_from_config(&doc);
    info!("loaded {} style(s) from '{}'", styles.len(), styles_path.display());
  }

  if let Some(server) = &args.fetch_server {
    let (host, port) = server
      .split_once(':')
      .ok_or_else(|| eyre!("--fetch-server must be host:port, got '{server}'"))?;
    let port: u16 = port.parse().wrap_err_with(|| format!("invalid port in '{server}'"))?;

    let missing: Vec<String> = result
      .model
      .feature_seqs()
      .iter()
      .filter(|seq| seq.sequence_reqd && seq.sequence.is_none())
      .map(|seq| seq.id_tag.clone())
      .collect();

    if !missing.is_empty() {
      let methods = vec![FetchMethod::SocketPfetch { host: host.to_owned(), port, output: OutputParserKind::Raw }];
      let backend = DefaultFetchBackend { timeout: Duration::from_secs(5) };
      let fetched = fetch_bulk(&backend, &methods, &missing, &CancellationToken::new(), 4);

      let mut ok = 0_usize;
      for (name, outcome) in fetched {
        match outcome {
          Ok(sequence) => {
            if let Some(ids) = result.model.feature_seqs_by_name(&name).first().copied() {
              if let Some(feature_seq) = result.model.feature_seq_mut(ids) {
                feature_seq.sequence = Some(sequence);
                ok += 1;
              }
            }
          }
          Err(err) => log::warn!("fetch failed for '{name}': {err}"),
        }
      }
      info!("fetched {ok}/{} missing sequence(s) from {server}", missing.len());
    }
  }

  let transcripts = result.model.feature_seqs().iter().filter(|s| s.seq_type == FeatureSeqType::Transcript).count();
  let matches = result.model.feature_seqs().iter().filter(|s| s.seq_type == FeatureSeqType::Match).count();

  info!(
    "parsed {} feature(s) across {} sequence(s) ({matches} match, {transcripts} transcript) from '{}'{}",
    result.model.features().len(),
    result.model.feature_seqs().len(),
    args.data_file.display(),
    args.dataset.as_deref().map(|d| format!(" [dataset: {d}]")).unwrap_or_default(),
  );

  if let Some(fasta) = &result.fasta {
    info!("embedded FASTA section: {} record(s)", fasta.len());
  }

  if args.show_coverage {
    if let Some(range) = result.sequence_regions.first().map(|r| r.range) {
      let features: Vec<_> = result.model.features().iter().collect();
      let depth = seqtools::coverage::compute_depth(&features, &range);
      info!("coverage: max depth {} over {} position(s)", seqtools::coverage::max_depth(&depth), depth.len());
    }
  }

  if !result.errors.is_empty() || !finalise_errors.is_empty() {
    info!("{} parse warning(s), {} finalisation warning(s)", result.errors.len(), finalise_errors.len());
  }

  Ok(())
}
