//! Ergonomic wrapper over the sentinel-level kernel.
//!
//! The free functions in [`crate::threshold`] and [`crate::invert`]
//! preserve the sentinel contract (`+inf`, `-inf`, negative
//! expected-iteration) for drop-in interoperability. This module wraps
//! them in a small value type that composes the variant constant once,
//! coerces the warm-up length at construction and reports decisions as
//! an enum instead of a magic double.

use crate::constants;
use crate::invert::expected_iter;
use crate::math;
use crate::min_count::{find_min_count, min_count_valid};
use crate::threshold::pair_threshold_fast;

/// Which hypothesis a composed threshold tests.
///
/// The variants map one-to-one onto the additive constants in
/// [`crate::constants`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Comparison {
    /// Two-sample, one-sided: the first stream is stochastically `<=`
    /// the second.
    PairLe,
    /// Two-sample, two-sided: the distributions are identical.
    PairEq,
    /// One-sample, one-sided, against a specific distribution.
    FixedLe,
    /// One-sample, two-sided, against a specific distribution.
    FixedEq,
    /// One-sample against a minimizing member of a parametric family.
    Class,
}

impl Comparison {
    /// The log-probability correction to fold into `log_eps`.
    pub fn log_adjustment(self) -> f64 {
        match self {
            Comparison::PairLe => constants::LE,
            Comparison::PairEq => constants::EQ,
            Comparison::FixedLe => constants::FIXED_LE,
            Comparison::FixedEq => constants::FIXED_EQ,
            Comparison::Class => constants::CLASS,
        }
    }
}

/// Per-step outcome of a sequential test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Still inside the warm-up period; the statistic was not tested.
    Warmup,
    /// The statistic stayed at or below the threshold; keep sampling.
    Continue,
    /// The statistic exceeded the threshold; the null hypothesis is
    /// rejected with lifetime false-positive probability at most `eps`.
    Reject,
}

/// An anytime-valid sequential KS test with a fixed confidence budget.
///
/// Construction composes `ln(eps)` with the [`Comparison`] constant and
/// resolves the warm-up length once, so per-step calls are a single
/// threshold evaluation.
///
/// # Example
///
/// ```
/// use anytime_ks::{Comparison, Decision, SequentialKsTest};
///
/// let test = SequentialKsTest::new(0.05, Comparison::PairLe);
/// assert_eq!(test.min_count(), 6);
///
/// // During warm-up nothing can reject.
/// assert_eq!(test.decide(3, 1.0), Decision::Warmup);
///
/// // After warm-up the statistic is compared against the threshold.
/// assert_eq!(test.decide(6, 1.0), Decision::Reject);
/// assert_eq!(test.decide(6, 0.5), Decision::Continue);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequentialKsTest {
    log_eps: f64,
    min_count: u64,
}

impl SequentialKsTest {
    /// Configure a test with lifetime false-positive bound `epsilon`.
    ///
    /// # Panics
    ///
    /// Panics unless `epsilon` is in `(0, 1)`.
    pub fn new(epsilon: f64, comparison: Comparison) -> Self {
        assert!(
            epsilon > 0.0 && epsilon < 1.0,
            "epsilon must be in (0, 1) for a meaningful test"
        );
        Self::from_log_epsilon(math::ln(epsilon) + comparison.log_adjustment())
    }

    /// Configure a test from an already-composed `log_eps`.
    ///
    /// Use this when the variant constant has been added by hand, or for
    /// extreme bounds (say `1e-300`) where taking `ln` of the epsilon
    /// itself would lose precision.
    ///
    /// # Panics
    ///
    /// Panics unless `log_eps` is negative.
    pub fn from_log_epsilon(log_eps: f64) -> Self {
        assert!(
            log_eps < 0.0,
            "log_eps must be negative (for a false positive rate < 1)"
        );
        Self {
            log_eps,
            min_count: find_min_count(log_eps),
        }
    }

    /// Lengthen the warm-up period.
    ///
    /// A longer warm-up lowers every threshold after it. Values below the
    /// minimum valid count for this test's `log_eps` are ignored, keeping
    /// the false-positive guarantee intact.
    pub fn with_min_count(mut self, min_count: u64) -> Self {
        if min_count_valid(min_count, self.log_eps) {
            self.min_count = min_count;
        }
        self
    }

    /// The warm-up length in effect.
    pub fn min_count(&self) -> u64 {
        self.min_count
    }

    /// The composed log false-positive bound.
    pub fn log_epsilon(&self) -> f64 {
        self.log_eps
    }

    /// The rejection threshold after `n` observations.
    ///
    /// `+inf` while `n` is below the warm-up length.
    pub fn threshold(&self, n: u64) -> f64 {
        pair_threshold_fast(n, self.min_count, self.log_eps)
    }

    /// Compare a KS statistic against the threshold at `n`.
    pub fn decide(&self, n: u64, statistic: f64) -> Decision {
        if n < self.min_count {
            return Decision::Warmup;
        }

        if statistic > self.threshold(n) {
            Decision::Reject
        } else {
            Decision::Continue
        }
    }

    /// Upper bound on the expected number of iterations to reject when
    /// the true distance from the null is `delta`.
    ///
    /// Returns `None` for a degenerate `delta <= 0` (the test is not
    /// expected to reject at all); `f64::MAX` stands in for "effectively
    /// never" in the finite cases.
    pub fn expected_iterations(&self, delta: f64) -> Option<f64> {
        if delta <= 0.0 {
            return None;
        }

        let bound = expected_iter(self.min_count, self.log_eps, delta);
        // min_count is valid by construction, so the negative sentinel
        // cannot surface here.
        debug_assert!(bound >= 0.0);
        Some(bound)
    }
}
