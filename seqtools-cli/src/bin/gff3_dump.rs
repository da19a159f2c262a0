//! Dumps a GFF3 file's parsed, finalised feature model as JSON — a
//! diagnostic utility in the shape of the teacher's own `featuretree`
//! binary (parse a feature file, print a structured dump, nothing more).

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use log::LevelFilter;
use serde::Serialize;

use seqtools::coord::SeqType;
use seqtools::finalise::finalise;
use seqtools::gff3::{CigarExpansionMode, Gff3Options, parse_gff3};
use seqtools::logging::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "gff3-dump", version, about)]
pub struct Args {
  /// GFF3 file to parse and dump.
  input_gff3: PathBuf,

  /// Treat the reference as a peptide display (3 reading frames) rather
  /// than raw DNA.
  #[arg(long)]
  peptide: bool,
}

#[derive(Debug, Serialize)]
struct Dump<'a> {
  features: &'a [seqtools::feature::Feature],
  feature_seqs: &'a [seqtools::feature::FeatureSeq],
  sequence_regions: &'a [seqtools::gff3::SequenceRegion],
  parse_warnings: Vec<String>,
  finalise_warnings: Vec<String>,
}

fn main() -> Result<()> {
  setup_logger(LevelFilter::Warn);
  let args = Args::parse();

  let contents =
    fs::read_to_string(&args.input_gff3).wrap_err_with(|| format!("failed to read '{}'", args.input_gff3.display()))?;

  let options = Gff3Options {
    ref_seq_type: if args.peptide { SeqType::Peptide } else { SeqType::Dna },
    cigar_mode: CigarExpansionMode::default(),
  };

  let mut result = parse_gff3(&contents, options);
  let finalise_warnings = finalise(&mut result.model);

  let dump = Dump {
    features: result.model.features(),
    feature_seqs: result.model.feature_seqs(),
    sequence_regions: &result.sequence_regions,
    parse_warnings: result.errors.iter().map(ToString::to_string).collect(),
    finalise_warnings: finalise_warnings.iter().map(ToString::to_string).collect(),
  };

  println!("{}", serde_json::to_string_pretty(&dump).wrap_err("failed to serialize feature model")?);
  Ok(())
}
