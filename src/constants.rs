//! Variant constants composed additively with the log false-positive bound.
//!
//! Each constant is a Bonferroni-style correction in log-probability
//! space. Callers add exactly one of them to `ln(eps)` before passing the
//! sum to a threshold function, which lets a single formula serve all five
//! hypothesis tests. All values are rounded away from zero so the
//! composed bound stays conservative.
//!
//! [`check_constants`] verifies the in-memory bit patterns at runtime;
//! embedders should call it once at startup and treat a non-zero result
//! as fatal, since it means aggressive floating-point flags or a
//! miscompilation altered the constants.

/// Pairwise `<=` test, the base case: no adjustment.
pub const LE: f64 = 0.0;

/// Pairwise equality test: `-ln 2`, rounded away from zero.
pub const EQ: f64 = -0.6931471805599454;

/// `<=` test against a fixed distribution: `-ln(2 sqrt 2)`, rounded away
/// from zero.
pub const FIXED_LE: f64 = -1.039720770839918;

/// Equality test against a fixed distribution: `-ln(4 sqrt 2)`, rounded
/// away from zero.
pub const FIXED_EQ: f64 = -1.7328679513998635;

/// Equality test against a minimizing member of a family of
/// distributions: `-ln(4 sqrt 2)`, rounded away from zero.
pub const CLASS: f64 = -1.7328679513998635;

/// Raw IEEE-754 bit patterns the constants must compile to, in
/// [`check_constants`] bit order.
const EXPECTED_BITS: [u64; 5] = [
    0,
    -4618953502541334032_i64 as u64,
    -4616010731606004876_i64 as u64,
    -4612889074221922196_i64 as u64,
    -4612889074221922196_i64 as u64,
];

/// Returns `0` if the constants were correctly compiled.
///
/// A non-zero return is a bitmask with ones for each constant whose
/// in-memory value differs from its expected bit pattern, in order:
///
/// * bit 0: [`LE`]
/// * bit 1: [`EQ`]
/// * bit 2: [`FIXED_LE`]
/// * bit 3: [`FIXED_EQ`]
/// * bit 4: [`CLASS`]
///
/// The comparison is on raw bit patterns in sign-magnitude form, not the
/// ordered key of [`crate::rounding`], so a flipped sign or a flushed
/// denormal is caught as-is.
pub fn check_constants() -> u32 {
    let actual = [LE, EQ, FIXED_LE, FIXED_EQ, CLASS];

    let mut mask = 0;
    for (index, (value, expected)) in actual.iter().zip(EXPECTED_BITS).enumerate() {
        if value.to_bits() != expected {
            mask |= 1 << index;
        }
    }

    mask
}
