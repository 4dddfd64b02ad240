//! Threshold inversion and the expected-iteration bound.
//!
//! The threshold is a monotonically decreasing function of the step count,
//! so it can be inverted: `g(target)` is the first step at which the
//! threshold drops to `target`. The expected number of iterations before
//! a true difference of `delta` is detected is then bounded by
//! `E[N] <= g(delta - m / g(delta))`, realised here with directed
//! rounding as `g_up(delta - m / g_down(delta))` so the bound stays an
//! upper bound through floating point.

use crate::min_count::min_count_valid;
use crate::rounding::{bits_float, float_bits, next, prev};
use crate::threshold::{log_b_down, log_b_up, pair_threshold, threshold_down, threshold_up};

/// Bisect the monotone threshold on the float bit key.
///
/// When rounding up, finds the min `x` with `threshold(x, log_b) <=
/// target`; when rounding down, the max `x` with `threshold(x, log_b) >=
/// target`. 64 steps always suffice: the midpoint is taken on the
/// integer-encoded key, whose domain is 64 bits wide, so no convergence
/// test is needed.
fn invert_threshold(
    min_count: u64,
    target: f64,
    up: bool,
    threshold: fn(f64, f64) -> f64,
    log_b: f64,
) -> f64 {
    if threshold(min_count as f64, log_b) <= target {
        return min_count as f64;
    }

    if threshold(f64::MAX, log_b) >= target {
        return f64::MAX;
    }

    // Invariant: threshold(low, log_b) > target > threshold(high, log_b).
    let mut low = min_count as f64;
    let mut high = f64::MAX;
    for _ in 0..64 {
        let low_bits = float_bits(low);
        let high_bits = float_bits(high);
        let pivot = bits_float(low_bits + (high_bits - low_bits) / 2);
        let fx = threshold(pivot, log_b);
        if fx == target {
            return pivot;
        }

        if fx < target {
            high = pivot;
        } else {
            low = pivot;
        }
    }

    if up {
        high
    } else {
        low
    }
}

/// Over-approximate `g(target)`, the inverse of the threshold in `x`.
fn invert_threshold_up(target: f64, min_count: u64, log_eps: f64) -> f64 {
    invert_threshold(
        min_count,
        target,
        true,
        threshold_up,
        log_b_up(min_count, log_eps),
    )
}

/// Under-approximate `g(target)`.
fn invert_threshold_down(target: f64, min_count: u64, log_eps: f64) -> f64 {
    invert_threshold(
        min_count,
        target,
        false,
        threshold_down,
        log_b_down(min_count, log_eps),
    )
}

/// Upper-bounds the expected number of iterations before rejection when
/// the actual distance from the null hypothesis is `delta`.
///
/// Extremely conservative when `delta` is large: the closed form only
/// holds below the initial threshold, so `delta` is clamped to half of
/// `threshold(min_count, min_count, log_eps)`.
///
/// Sentinels: returns `0.0` for a degenerate `log_eps >= 0`, `f64::MAX`
/// when nothing can be said (`min_count == 0` or `delta <= 0`), and a
/// negative value when `min_count` is not valid for `log_eps`.
pub fn expected_iter(min_count: u64, log_eps: f64, delta: f64) -> f64 {
    debug_assert!(
        log_eps <= 0.0,
        "log_eps must be negative (for a false positive rate < 1)"
    );
    if log_eps >= 0.0 {
        return 0.0;
    }

    if min_count == 0 || delta <= 0.0 {
        return f64::MAX;
    }

    if !min_count_valid(min_count, log_eps) {
        return -1.0;
    }

    // The formula doesn't hold if the expected difference exceeds our
    // first threshold. Return a conservative count by clamping `delta`
    // strictly below half of it.
    let first_threshold = pair_threshold(min_count, min_count, log_eps);
    let delta = if delta > first_threshold / 2.0 {
        prev(first_threshold / 2.0)
    } else {
        delta
    };

    let g_delta = invert_threshold_down(delta, min_count, log_eps);
    let inner = delta - next(min_count as f64 / g_delta);
    invert_threshold_up(prev(inner), min_count, log_eps)
}
