use crate::core::actions::rasterize_bands::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::{EscapeResult, iterate};

/// Mandelbrot iteration with both components folded positive before each
/// squaring. The plane is rendered unflipped, so the ship appears upside down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurningShipAlgorithm {
    max_iterations: u32,
}

impl BurningShipAlgorithm {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl FractalAlgorithm for BurningShipAlgorithm {
    fn compute(&self, point: Complex) -> EscapeResult {
        iterate(point, point, self.max_iterations, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

    #[test]
    fn test_origin_is_inside() {
        let result = BurningShipAlgorithm::new(100).compute(Complex::ZERO);

        assert_eq!(result.iterations, 100);
    }

    #[test]
    fn test_orbit_starts_at_c() {
        let result = BurningShipAlgorithm::new(100).compute(Complex::new(2.5, 0.0));

        assert_eq!(result.iterations, 0);
        assert_eq!(result.z_final, Complex::new(2.5, 0.0));
    }

    #[test]
    fn test_diverges_from_mandelbrot_off_the_real_axis() {
        let point = Complex::new(-1.75, -0.03);
        let ship = BurningShipAlgorithm::new(100).compute(point);
        let mandelbrot = MandelbrotAlgorithm::new(100).compute(point);

        assert_eq!(ship.iterations, 21);
        assert_eq!(mandelbrot.iterations, 9);
    }

    #[test]
    fn test_fold_changes_escape_counts_near_the_needle() {
        let samples = [
            Complex::new(-1.8, -0.1),
            Complex::new(-1.78, -0.08),
            Complex::new(-1.75, -0.05),
            Complex::new(-1.76, -0.02),
        ];

        let diverging = samples
            .iter()
            .filter(|&&c| {
                BurningShipAlgorithm::new(50).compute(c).iterations
                    != MandelbrotAlgorithm::new(50).compute(c).iterations
            })
            .count();

        // (-1.75, -0.05): 16 vs 7, (-1.76, -0.02): 50 vs 26
        assert_eq!(diverging, 2);
    }

    #[test]
    fn test_matches_mandelbrot_while_both_components_share_a_sign() {
        // the fold is a no-op under squaring while re and im share a sign
        let point = Complex::new(-1.8, -0.1);
        let ship = BurningShipAlgorithm::new(100).compute(point);
        let mandelbrot = MandelbrotAlgorithm::new(100).compute(point);

        assert_eq!(ship.iterations, mandelbrot.iterations);
    }

    #[test]
    fn test_fold_makes_conjugate_points_differ() {
        let upper = BurningShipAlgorithm::new(100).compute(Complex::new(-0.5, 0.5));
        let lower = BurningShipAlgorithm::new(100).compute(Complex::new(-0.5, -0.5));

        assert_ne!(upper, lower);
    }
}
