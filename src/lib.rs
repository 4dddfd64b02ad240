//! # anytime-ks
//!
//! Thresholds for one-sided confidence sequences on the
//! Kolmogorov-Smirnov statistic, after Darling & Robbins.
//!
//! Classical KS tests pick a sample size up front; peeking at the
//! statistic while data streams in invalidates their error rate. The
//! thresholds computed here are *anytime-valid*: compare the supremum
//! difference between two empirical CDFs against the threshold after
//! every observation, reject the first time it is exceeded, and the
//! lifetime probability of a false positive over the whole infinite
//! stream stays below the `eps` you chose.
//!
//! One threshold formula serves five hypotheses. Add one of the
//! constants in [`constants`] to `ln(eps)` to pick the comparison:
//!
//! * [`LE`] - two-sample, "first stream stochastically `<=` second";
//! * [`EQ`] - two-sample equality;
//! * [`FIXED_LE`] / [`FIXED_EQ`] - one sample against a specific
//!   distribution;
//! * [`CLASS`] - one sample against the best-fitting member of a
//!   parametric family.
//!
//! Every returned threshold is a provable upper bound on the exact real
//! value: all floating-point steps round outward (see [`rounding`]), so
//! even extreme bounds like `eps = 1e-15` never suffer a false positive
//! from rounding slack.
//!
//! ## Quick start
//!
//! ```
//! use anytime_ks::{Comparison, Decision, PairedEcdf, SequentialKsTest};
//!
//! let test = SequentialKsTest::new(0.01, Comparison::PairEq).with_min_count(100);
//! let mut ecdf = PairedEcdf::new(10);
//!
//! // Stream paired observations; reject the first time the statistic
//! // clears the threshold.
//! for (x, y) in observations() {
//!     ecdf.observe(x, y);
//!     if test.decide(ecdf.len(), ecdf.statistic()) == Decision::Reject {
//!         println!("distributions differ");
//!         break;
//!     }
//! }
//! # fn observations() -> Vec<(usize, usize)> { vec![(0, 0); 50] }
//! ```
//!
//! The sentinel-level API ([`pair_threshold`], [`find_min_count`],
//! [`expected_iter`], ...) reports edge cases through `+inf`/`-inf` and
//! negative return values instead of sum types, for embedders that want
//! C-style drop-in semantics.
//!
//! ## Caveats
//!
//! * Thresholds are suspended (`+inf`) for the first `min_count`
//!   observations; pick the warm-up with [`find_min_count`] or let the
//!   safe entry points do it.
//! * [`check_constants`] should be called once at startup by embedders
//!   that compile with aggressive floating-point flags.

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]

extern crate alloc;

mod math;

pub mod constants;
pub mod ecdf;
pub mod invert;
pub mod min_count;
pub mod rounding;
pub mod sequence;
pub mod threshold;

pub use constants::{check_constants, CLASS, EQ, FIXED_EQ, FIXED_LE, LE};
pub use ecdf::PairedEcdf;
pub use invert::expected_iter;
pub use min_count::{find_min_count, min_count_valid};
pub use sequence::{Comparison, Decision, SequentialKsTest};
pub use threshold::{
    distribution_threshold, distribution_threshold_fast, pair_threshold, pair_threshold_fast,
};
