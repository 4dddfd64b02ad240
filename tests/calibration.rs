//! Statistical calibration of the sequential thresholds.
//!
//! These tests validate the library's guarantees end to end on simulated
//! streams:
//!
//! - FPR: runs on identical uniform streams must reject at most an
//!   `eps` fraction of the time over their whole lifetime;
//! - Power: a small corruption of one stream must be caught well within
//!   the sample budget;
//! - Expected-iteration conservatism: rejection typically happens before
//!   the bound predicted by `expected_iter`.
//!
//! Simulations are seeded, so a failure reproduces deterministically.
//! Expected runtime: ~10 seconds in release mode.

use anytime_ks::{expected_iter, pair_threshold, PairedEcdf, EQ};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Domain size of the simulated streams.
const BUCKETS: usize = 10;

/// Warm-up length used by every simulation.
const MIN_COUNT: u64 = 100;

/// Seed prefix: "anytks".
const SEED: u64 = 0x616e79746b73;

/// Probability that a corrupted observation lands in the top bucket
/// instead of its uniform draw.
const DISCREPANCY_RATE: f64 = 0.025;

/// Run one null-hypothesis stream: both sides uniform over the buckets.
///
/// Returns whether the run ever rejected.
fn uniform_eq_run(seed: u64, samples: u64, log_eps: f64) -> bool {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut ecdf = PairedEcdf::new(BUCKETS);

    for _ in 0..samples {
        ecdf.observe(rng.gen_range(0..BUCKETS), rng.gen_range(0..BUCKETS));
        if ecdf.statistic() > pair_threshold(ecdf.len(), MIN_COUNT, log_eps) {
            return true;
        }
    }

    false
}

/// Run one alternative-hypothesis stream: the second side is forced into
/// the top bucket at `DISCREPANCY_RATE`.
///
/// Returns whether the run rejected within `samples`, and at which step.
fn uniform_neq_run(seed: u64, samples: u64, log_eps: f64) -> (bool, u64) {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut ecdf = PairedEcdf::new(BUCKETS);

    for _ in 0..samples {
        let x = rng.gen_range(0..BUCKETS);
        let y = if rng.gen_bool(DISCREPANCY_RATE) {
            BUCKETS - 1
        } else {
            rng.gen_range(0..BUCKETS)
        };

        ecdf.observe(x, y);
        if ecdf.statistic() > pair_threshold(ecdf.len(), MIN_COUNT, log_eps) {
            return (true, ecdf.len());
        }
    }

    (false, u64::MAX)
}

/// 95% Wilson score interval for a binomial proportion.
fn wilson_ci(successes: usize, trials: usize) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }

    let n = trials as f64;
    let p_hat = successes as f64 / n;
    let z = 1.96;
    let z2 = z * z;

    let denom = 1.0 + z2 / n;
    let center = (p_hat + z2 / (2.0 * n)) / denom;
    let half = z * (p_hat * (1.0 - p_hat) / n + z2 / (4.0 * n * n)).sqrt() / denom;

    ((center - half).max(0.0), (center + half).min(1.0))
}

/// Identical uniform streams must stay below the lifetime false positive
/// budget of eps = 0.01.
#[test]
fn false_positive_rate_under_the_null() {
    const TRIALS: usize = 200;
    const SAMPLES: u64 = 50_000;

    let log_eps = 0.01_f64.ln() + EQ;

    let mut rejections = 0;
    for trial in 0..TRIALS {
        if uniform_eq_run(SEED.wrapping_add(trial as u64), SAMPLES, log_eps) {
            rejections += 1;
        }

        if (trial + 1) % 50 == 0 {
            eprintln!(
                "[fpr] trial {}/{}: {} rejections",
                trial + 1,
                TRIALS,
                rejections
            );
        }
    }

    let rate = rejections as f64 / TRIALS as f64;
    let (ci_low, ci_high) = wilson_ci(rejections, TRIALS);
    eprintln!(
        "[fpr] done: {rejections}/{TRIALS} rejected, rate {:.4} [95% CI {:.4}-{:.4}]",
        rate, ci_low, ci_high
    );

    // The bound is loose in practice (the observed rate under the null is
    // far below eps), so the budget itself is a safe assertion even at
    // this trial count.
    assert!(rate <= 0.01, "FPR {rate} exceeds eps = 0.01");
}

/// A 2.5% corruption must be caught within 100k samples, and typically
/// before the expected-iteration bound.
#[test]
fn power_and_expected_iterations_under_the_alternative() {
    const TRIALS: usize = 300;
    const SAMPLES: u64 = 100_000;

    let log_eps = 0.01_f64.ln() + EQ;
    let bound = expected_iter(MIN_COUNT, log_eps, DISCREPANCY_RATE);
    assert!(bound > 0.0 && bound < SAMPLES as f64, "bound = {bound}");

    let mut rejections = 0;
    let mut within_bound = 0;
    let mut total_iter = 0_u64;
    for trial in 0..TRIALS {
        let (rejected, iters) =
            uniform_neq_run(SEED.wrapping_add(0x1000 + trial as u64), SAMPLES, log_eps);
        if rejected {
            rejections += 1;
            total_iter += iters;
            if (iters as f64) < bound {
                within_bound += 1;
            }
        }

        if (trial + 1) % 50 == 0 {
            eprintln!(
                "[power] trial {}/{}: {} rejections, {} within the bound of {:.0}",
                trial + 1,
                TRIALS,
                rejections,
                within_bound,
                bound
            );
        }
    }

    let power = rejections as f64 / TRIALS as f64;
    let (ci_low, ci_high) = wilson_ci(rejections, TRIALS);
    eprintln!(
        "[power] done: power {:.3} [95% CI {:.3}-{:.3}], mean iterations {:.0}, bound {:.0}",
        power,
        ci_low,
        ci_high,
        total_iter as f64 / rejections.max(1) as f64,
        bound
    );

    // The true power at this corruption rate is essentially 1; 0.95
    // leaves room for sampling error at 300 trials.
    assert!(power >= 0.95, "power {power} below 0.95");

    // The rejection times are long-tailed, so the median sits below the
    // expected-value bound: at least half the runs must beat it.
    let hit_rate = within_bound as f64 / TRIALS as f64;
    eprintln!("[power] bound hit rate {:.3}", hit_rate);
    assert!(
        hit_rate >= 0.5,
        "only {hit_rate} of runs rejected before the expected-iteration bound {bound}"
    );
}
