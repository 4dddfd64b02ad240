//! Math functions for no_std compatibility.
//!
//! In no_std mode, f64 doesn't have transcendental methods like sqrt and ln.
//! This module provides them through libm. Routing every caller through
//! libm also pins the `log` implementation, so the rounding error budget in
//! [`crate::rounding`] does not depend on the platform's system libm.

/// Square root.
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Natural logarithm.
#[inline]
pub fn ln(x: f64) -> f64 {
    libm::log(x)
}
