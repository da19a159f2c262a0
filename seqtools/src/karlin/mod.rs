//! Karlin-Altschul statistics (C9): λ/K/H parameter estimation and
//! window-size suggestion for a dot-plot's sliding-window score, grounded
//! on `karlin`/`winsizeFromlambdak` (`dotterKarlin.cpp`).

use crate::error::StatisticsError;

/// The three Karlin-Altschul parameters describing a local-alignment
/// scoring scheme's score distribution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KarlinParams {
  /// The unique positive root of `sum(p[i] * exp(lambda * i)) = 1`.
  pub lambda: f64,
  /// The relative-entropy-derived scale parameter for the number of
  /// distinct local alignments expected by chance.
  pub k: f64,
  /// Relative entropy (bits per aligned residue pair) of the scoring
  /// scheme against the background distribution.
  pub h: f64,
}

const LAMBDA_ITERATIONS: usize = 25;
const K_ITERATIONS: usize = 20;
const SUMLIMIT: f64 = 0.01;

/// Estimates λ, K and H for a scoring scheme whose per-pair score
/// distribution is given by `probs[i]`, the probability of score
/// `low + i as i64`, for `i` in `0..probs.len()` (so `probs.len()` must
/// equal `(high - low + 1) as usize`).
///
/// At least one negative score and one positive score must have non-zero
/// probability, and the expected score (`sum(i * probs[i])`) must be
/// negative — otherwise no alignment score threshold separates real
/// matches from chance, and local alignment statistics are undefined
/// (`karlin`'s precondition checks).
pub fn karlin(low: i64, high: i64, probs: &[f64]) -> Result<KarlinParams, StatisticsError> {
  debug_assert_eq!(probs.len(), (high - low + 1) as usize);

  if low >= 0 {
    return Err(StatisticsError::KarlinNoNegativeScore);
  }
  if high <= 0 {
    return Err(StatisticsError::KarlinNoPositiveScore);
  }

  let expected: f64 = probs.iter().enumerate().map(|(i, &p)| (low + i as i64) as f64 * p).sum();
  if expected >= 0.0 {
    return Err(StatisticsError::KarlinExpectedNonNegative(expected));
  }

  let lambda = solve_lambda(low, probs);
  let h = lambda
    * probs
      .iter()
      .enumerate()
      .map(|(i, &p)| (low + i as i64) as f64 * p * (lambda * (low + i as i64) as f64).exp())
      .sum::<f64>();

  let k = estimate_k(lambda, h, low, probs);

  Ok(KarlinParams { lambda, k, h })
}

/// Bisection search for λ: `f(λ) = sum(p[i] * exp(λ*i)) - 1` is monotonic
/// increasing in λ for λ > 0 given a negative expected score and a
/// positive maximum score, so a plain bisection converges reliably
/// (`karlin`'s 25-iteration loop).
fn solve_lambda(low: i64, probs: &[f64]) -> f64 {
  let f = |lambda: f64| -> f64 {
    probs.iter().enumerate().map(|(i, &p)| p * (lambda * (low + i as i64) as f64).exp()).sum::<f64>() - 1.0
  };

  let mut lo = 1e-6_f64;
  let mut hi = 2.0_f64;
  while f(hi) < 0.0 {
    hi *= 2.0;
  }

  for _ in 0..LAMBDA_ITERATIONS {
    let mid = (lo + hi) / 2.0;
    if f(mid) < 0.0 { lo = mid } else { hi = mid }
  }

  (lo + hi) / 2.0
}

/// Estimates K by the renewal-theory series `karlin` itself computes: the
/// j-fold self-convolution of the score distribution, summed (ladder-epoch
/// weighted by `beta^score` below zero, unweighted at or above zero) and
/// accumulated as `term_j / j` for up to [`K_ITERATIONS`] terms, then
/// extrapolated geometrically using the last two terms' ratio, and finally
/// scaled by the GCD of the achievable scores (`fct_gcd` in the original).
/// Falls back to the original's own ad-hoc `K = 0.1` whenever the series
/// fails to settle (non-decaying ratio) or the result isn't a sane positive
/// number.
fn estimate_k(lambda: f64, h: f64, low: i64, probs: &[f64]) -> f64 {
  if h <= 0.0 {
    return 0.1;
  }

  let range = probs.len() as i64 - 1;
  let high = low + range;
  let beta = lambda.exp();
  let av = h / lambda;

  // Fast path for the two cases `karlin` special-cases directly rather
  // than running the full renewal series.
  if low == -1 || high == 1 {
    let expected: f64 = probs.iter().enumerate().map(|(i, &p)| (low + i as i64) as f64 * p).sum();
    let mut k = if high == 1 { av } else { expected * expected / av };
    k *= 1.0 - 1.0 / beta;
    return if k.is_finite() && k > 0.0 { k } else { 0.1 };
  }

  let mut dist = vec![1.0_f64];
  let mut lo = 0_i64;
  let mut hi = 0_i64;
  let mut sum = 1.0_f64;
  let mut oldsum = 1.0_f64;
  let mut oldsum2 = 1.0_f64;
  let mut renewal_sum = 0.0_f64;
  let mut j = 0_usize;

  while j < K_ITERATIONS && sum > SUMLIMIT {
    lo += low;
    hi += high;
    let mut next = vec![0.0_f64; (hi - lo + 1) as usize];
    for (a, &pa) in dist.iter().enumerate() {
      if pa == 0.0 {
        continue;
      }
      for (b, &pb) in probs.iter().enumerate() {
        next[a + b] += pa * pb;
      }
    }
    dist = next;

    let term: f64 = dist
      .iter()
      .enumerate()
      .map(|(idx, &mass)| {
        let score = lo + idx as i64;
        if score < 0 { mass * beta.powi(score as i32) } else { mass }
      })
      .sum();

    oldsum2 = oldsum;
    oldsum = term;
    j += 1;
    sum = term / j as f64;
    renewal_sum += sum;
  }

  if oldsum2 <= 0.0 {
    return 0.1;
  }
  let ratio = oldsum / oldsum2;
  if ratio >= 1.0 - SUMLIMIT * 0.001 {
    return 0.1;
  }

  let mut tail_sum = sum;
  let mut tail_oldsum = oldsum;
  while tail_sum > SUMLIMIT * 0.01 {
    tail_oldsum *= ratio;
    j += 1;
    tail_sum = tail_oldsum / j as f64;
    renewal_sum += tail_sum;
  }

  let divisor = score_gcd(low, probs) as f64;
  let k = (divisor * (-2.0 * renewal_sum).exp()) / (av * etop(lambda * divisor));
  if k.is_finite() && k > 0.0 { k } else { 0.1 }
}

/// `1 - exp(-e)`, the original's `etop` (probability associated with an
/// expect value `e`).
fn etop(e: f64) -> f64 {
  1.0 - (-e).exp()
}

/// GCD of every achievable score (relative to the lowest score with
/// non-zero probability), matching `karlin`'s final `fct_gcd` reduction
/// loop over the scores carrying positive probability.
fn score_gcd(low: i64, probs: &[f64]) -> i64 {
  let high = low + probs.len() as i64 - 1;
  let mut i = low;
  while probs[(i - low) as usize] == 0.0 {
    i += 1;
    if i > high {
      return 1;
    }
  }
  let mut divisor = -i;
  while i < high && divisor > 1 {
    i += 1;
    if probs[(i - low) as usize] != 0.0 {
      divisor = gcd(divisor, i);
    }
  }
  divisor.max(1)
}

fn gcd(a: i64, b: i64) -> i64 {
  let mut a = a.abs();
  let mut b = b.abs();
  while b != 0 {
    let t = a % b;
    a = b;
    b = t;
  }
  a
}

/// Suggests a dot-plot sliding-window size so the expected number of
/// chance matches at that window length is small (`winsizeFromlambdak`).
/// `residue_freqs` gives each residue's background frequency (summing to
/// 1) and `seq_len` is the shorter of the two sequences being compared.
/// Falls back to a window of 25 (the original's own fallback) when the
/// Karlin parameters can't be estimated for this scoring scheme, and
/// otherwise clamps the estimate to `[5, qlen/4]` as the original's
/// `winsizeFromlambdak` does.
#[must_use]
pub fn winsize_from_lambda_k(params: Option<KarlinParams>, residue_freqs: &[f64], seq_len: i64) -> i64 {
  const FALLBACK_WINDOW: i64 = 25;
  const MIN_WINDOW: i64 = 5;

  let Some(params) = params else { return FALLBACK_WINDOW };
  if params.lambda <= 0.0 || params.k <= 0.0 || seq_len <= 0 {
    return FALLBACK_WINDOW;
  }

  let entropy: f64 = residue_freqs.iter().filter(|&&f| f > 0.0).map(|&f| -f * f.ln()).sum();
  if entropy <= 0.0 {
    return FALLBACK_WINDOW;
  }

  let n = seq_len as f64;
  let exp_msp_score = ((n * n).ln() + params.k.ln()) / params.lambda;
  let window = (exp_msp_score / entropy).round() as i64;

  let upper = (seq_len / 4).max(MIN_WINDOW);
  window.clamp(MIN_WINDOW, upper)
}
