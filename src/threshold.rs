//! The confidence-sequence threshold formula and its public entry points.
//!
//! The threshold at step `x` with warm-up length `m` and log
//! false-positive bound `log_eps` is
//!
//! ```text
//! t(x) = sqrt((x + 1) * (2 ln x + ln b)) / x,    b = 1 / (eps * (m - 1))
//! ```
//!
//! following Darling & Robbins' one-sided confidence sequence for the
//! Kolmogorov-Smirnov statistic. Both an outward-rounded variant (a
//! provable upper bound on the exact threshold, the one callers see) and
//! an inward-rounded dual (used by the inversion in [`crate::invert`])
//! are implemented. The directed rounding keeps extreme bounds honest:
//! even at `eps = 1e-15`, floating-point slack never produces a
//! threshold below the exact one.

use crate::min_count::{find_min_count, min_count_valid};
use crate::rounding::{log_down, log_up, next, prev, sqrt_down, sqrt_up};

/// `f(x) / x` where `f(x) = sqrt((x + 1)(2 log x + log b))`, rounded up.
pub(crate) fn threshold_up(x: f64, log_b_up: f64) -> f64 {
    // Exact up to 2^53.
    let xp1 = x + 1.0;
    // f(x)^2 = (x + 1)(2 log x + log b); the multiplication by 2 is exact.
    let f_x2 = next(xp1 * next(2.0 * log_up(x) + log_b_up));

    next(sqrt_up(f_x2) / x)
}

/// Dual of [`threshold_up`], every step rounded down.
pub(crate) fn threshold_down(x: f64, log_b_down: f64) -> f64 {
    let xp1 = x + 1.0;
    let f_x2 = prev(xp1 * prev(2.0 * log_down(x) + log_b_down));

    prev(sqrt_down(f_x2) / x)
}

/// `log(b) = -log(eps) - log(min_count - 1)`, rounded up.
pub(crate) fn log_b_up(min_count: u64, log_eps: f64) -> f64 {
    next(-log_down(min_count as f64 - 1.0) - log_eps)
}

/// Dual of [`log_b_up`].
pub(crate) fn log_b_down(min_count: u64, log_eps: f64) -> f64 {
    prev(-log_up(min_count as f64 - 1.0) - log_eps)
}

/// Threshold for the two-sample comparisons, with `min_count` coercion.
///
/// Given `n` pairs of datapoints, of which the first `min_count` were
/// accumulated without testing, returns the value the supremum CDF
/// difference must exceed before the null hypothesis can be rejected.
/// Applied to an infinite stream, the lifetime false positive rate is at
/// most `exp(log_eps)`; compose `log_eps` as `ln(eps)` plus one of the
/// constants in [`crate::constants`] to select the hypothesis.
///
/// If `min_count` is too low for `log_eps`, the smallest valid warm-up
/// length is silently used instead; correctness wins over argument
/// fidelity. Use [`pair_threshold_fast`] to skip that check.
///
/// Returns `+inf` while `n < min_count` (never reject during warm-up)
/// and `-inf` when `log_eps >= 0` (a degenerate bound that always
/// rejects; tolerated rather than crashing on a caller bug).
pub fn pair_threshold(n: u64, min_count: u64, log_eps: f64) -> f64 {
    debug_assert!(
        log_eps <= 0.0,
        "log_eps must be negative (for a false positive rate < 1)"
    );

    let min_count = if min_count_valid(min_count, log_eps) {
        min_count
    } else {
        find_min_count(log_eps)
    };

    pair_threshold_fast(n, min_count, log_eps)
}

/// [`pair_threshold`] without the `min_count` validity substitution.
///
/// The caller vouches that `min_count` satisfies
/// [`min_count_valid`](crate::min_count::min_count_valid); the bound is
/// not guaranteed otherwise.
pub fn pair_threshold_fast(n: u64, min_count: u64, log_eps: f64) -> f64 {
    if n < min_count {
        return f64::INFINITY;
    }

    if log_eps >= 0.0 {
        return f64::NEG_INFINITY;
    }

    threshold_up(n as f64, log_b_up(min_count, log_eps))
}

/// Threshold for the one-sample (fixed distribution or class) tests.
///
/// The kernel is identical to [`pair_threshold`]: the variants differ
/// only in the constant the caller has already folded into `log_eps`
/// ([`FIXED_LE`](crate::constants::FIXED_LE),
/// [`FIXED_EQ`](crate::constants::FIXED_EQ) or
/// [`CLASS`](crate::constants::CLASS)). Both spellings are exported to
/// match the composition recipe.
pub fn distribution_threshold(n: u64, min_count: u64, log_eps: f64) -> f64 {
    pair_threshold(n, min_count, log_eps)
}

/// [`distribution_threshold`] without the `min_count` validity
/// substitution.
pub fn distribution_threshold_fast(n: u64, min_count: u64, log_eps: f64) -> f64 {
    pair_threshold_fast(n, min_count, log_eps)
}
