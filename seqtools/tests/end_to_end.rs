//! End-to-end scenarios spanning more than one module, exercised only
//! through the public API (no access to crate-private helpers).

use seqtools::coord::{IntRange, SeqType};
use seqtools::dotplot::{DotplotParams, GreyRamp, SubstitutionMatrix, compute_dotplot};
use seqtools::feature::{Feature, FeatureId, FeatureSeqId, FeatureType};
use seqtools::fetch::{CancellationToken, FetchBackend, FetchMethod, OutputParserKind, fetch_with_fallback};
use seqtools::gff3::{CigarExpansionMode, Gff3Options, parse_gff3};
use seqtools::karlin::{karlin, winsize_from_lambda_k};
use seqtools::{RuntimeError, coverage};

#[test]
fn gff_parse_expands_a_gapped_match_into_align_blocks() {
  let doc = "chr1\tPROT\tmatch\t100\t150\t0.99\t+\t.\tID=m1;Target=seqA 1 17 +;Gap=M8 D3 M6 I1 M6\n";
  let options = Gff3Options { ref_seq_type: SeqType::Peptide, cigar_mode: CigarExpansionMode::PeptideCount };
  let result = parse_gff3(doc, options);

  assert!(result.errors.is_empty(), "{:?}", result.errors);
  assert_eq!(result.model.features().len(), 1);

  let feature = &result.model.features()[0];
  assert_eq!(feature.feature_type, FeatureType::Match);
  assert_eq!(feature.q_range, IntRange::new(100, 150).unwrap());
  assert_eq!(feature.s_range, Some(IntRange::new(1, 17).unwrap()));

  let blocks: Vec<(i64, i64, i64, i64)> = feature
    .align_blocks
    .iter()
    .map(|b| (b.ref_range.min, b.ref_range.max, b.match_range.min, b.match_range.max))
    .collect();
  assert_eq!(blocks, vec![(100, 123, 1, 8), (127, 144, 9, 14), (145, 162, 16, 21)]);
}

struct TwoStageBackend;

impl FetchBackend for TwoStageBackend {
  fn fetch(&self, method: &FetchMethod, name: &str) -> Result<String, RuntimeError> {
    match method {
      FetchMethod::Sqlite { .. } => Err(RuntimeError::FetchFailed(name.to_owned())),
      FetchMethod::SocketPfetch { .. } => Ok(format!(">{name}\nACGTACGT")),
      _ => Err(RuntimeError::FetchFailed(name.to_owned())),
    }
  }
}

#[test]
fn fetch_falls_back_from_a_sqlite_miss_to_a_pfetch_hit() {
  let backend = TwoStageBackend;
  let methods = vec![
    FetchMethod::Sqlite { db_path: "/tmp/does-not-matter.db".into(), query_template: "select seq from s where name = ?".into() },
    FetchMethod::SocketPfetch { host: "pfetch.example".into(), port: 1234, output: OutputParserKind::Raw },
  ];

  let result = fetch_with_fallback(&backend, &methods, "s1", &CancellationToken::new());
  assert_eq!(result, Ok(">s1\nACGTACGT".to_owned()));
}

fn match_feature(id: u32, start: i64, end: i64) -> Feature {
  Feature::new(FeatureId(id), FeatureType::Match, "chr1", IntRange::new(start, end).unwrap(), seqtools::coord::Strand::Forward, FeatureSeqId(0), "m")
}

#[test]
fn coverage_depth_matches_overlapping_match_features() {
  let f1 = match_feature(0, 10, 20);
  let f2 = match_feature(1, 15, 25);
  let f3 = match_feature(2, 30, 40);
  let window = IntRange::new(1, 50).unwrap();

  let features = [&f1, &f2, &f3];
  let depth = coverage::compute_depth(&features, &window);

  assert_eq!(depth.len(), 50);
  for pos in 15..=20 {
    assert_eq!(depth[(pos - 1) as usize], 2, "position {pos}");
  }
  for pos in 21..=25 {
    assert_eq!(depth[(pos - 1) as usize], 1, "position {pos}");
  }
  for pos in 30..=40 {
    assert_eq!(depth[(pos - 1) as usize], 1, "position {pos}");
  }
  assert_eq!(depth[0], 0); // position 1, covered by nothing
  assert_eq!(coverage::max_depth(&depth), 2);
}

#[test]
fn dot_plot_main_diagonal_is_brightest_for_identical_sequences() {
  let residues = b"ACDEFGHIKLMNPQRSTVWY";
  let mut matrix = SubstitutionMatrix::new(-4);
  for &r in residues {
    matrix.set(r, r, 11);
  }

  let seq: Vec<u8> = residues.iter().cycle().take(120).copied().collect();
  let params = DotplotParams { winsize: 25, stride: 1, memory_limit_mb: None };
  let result = compute_dotplot(&seq, &seq, &matrix, params).unwrap();
  let (_, max_score) = result.min_max();
  assert_eq!(max_score, 25 * 11);

  let ramp = GreyRamp::new(matrix.score_range().0, max_score, false);
  for i in 0..result.width.min(result.height) {
    assert_eq!(result.get(i, i), max_score, "diagonal cell {i}");
    assert_eq!(ramp.level(result.get(i, i)), 255, "diagonal cell {i}");
  }
}

#[test]
fn karlin_auto_window_stays_within_the_sequence_length_and_has_positive_lambda() {
  // A 20-residue alphabet, uniform background, with a +11 identity score
  // and a -4 mismatch score: the per-pair score distribution a random
  // uniform pairing would produce is 1/20 chance of a match, 19/20 chance
  // of a mismatch.
  let mut probs = vec![0.0_f64; (11 - -4 + 1) as usize];
  probs[0] = 19.0 / 20.0; // score -4
  probs[15] = 1.0 / 20.0; // score 11
  let params = karlin(-4, 11, &probs).unwrap();
  assert!(params.lambda > 0.0);
  assert!(params.k > 0.0);

  let freqs = vec![1.0 / 20.0; 20];
  let window = winsize_from_lambda_k(Some(params), &freqs, 120);
  assert!(window >= 5, "window={window}");
  assert!(window <= 30, "window={window}"); // clamped to qlen/4
}
