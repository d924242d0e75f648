use crate::core::data::complex::Complex;
use std::f64::consts::LN_2;

/// Escape radius 2, compared squared.
pub const BAILOUT_RADIUS_SQUARED: f64 = 4.0;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct EscapeResult {
    pub iterations: u32,
    pub z_final: Complex,
}

impl EscapeResult {
    /// A point that never escaped within the budget is inside the set.
    #[must_use]
    pub fn is_inside(&self, max_iterations: u32) -> bool {
        self.iterations >= max_iterations
    }
}

/// Shared escape loop. The bailout test runs before each step, so a point
/// that starts outside the radius reports zero iterations.
#[inline]
pub(crate) fn iterate(z0: Complex, c: Complex, max_iterations: u32, fold: bool) -> EscapeResult {
    let mut z = z0;
    let mut iterations = 0;

    while iterations < max_iterations {
        if z.magnitude_squared() > BAILOUT_RADIUS_SQUARED {
            break;
        }

        if fold {
            z = z.abs_components();
        }

        z = z.square() + c;
        iterations += 1;
    }

    EscapeResult {
        iterations,
        z_final: z,
    }
}

/// Fractional part of the continuous escape count, in `[0, 1]`. Any
/// degenerate intermediate yields 0.
#[must_use]
pub fn smooth_fraction(iterations: u32, z_final: Complex) -> f64 {
    let magnitude_squared = z_final.magnitude_squared();

    if !(magnitude_squared > 0.0) {
        return 0.0;
    }

    let log_zn = magnitude_squared.ln() / 2.0;

    if !log_zn.is_finite() || log_zn <= 0.0 {
        return 0.0;
    }

    let nu = (log_zn / LN_2).ln() / LN_2;
    let mu = f64::from(iterations) + 1.0 - nu;

    if !mu.is_finite() {
        return 0.0;
    }

    (mu - mu.floor()).clamp(0.0, 1.0)
}
