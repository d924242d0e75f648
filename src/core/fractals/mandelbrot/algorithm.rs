use crate::core::actions::rasterize_bands::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::{EscapeResult, iterate};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MandelbrotAlgorithm {
    max_iterations: u32,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    fn compute(&self, point: Complex) -> EscapeResult {
        iterate(point, point, self.max_iterations, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_inside() {
        let result = MandelbrotAlgorithm::new(100).compute(Complex::ZERO);

        assert_eq!(result.iterations, 100);
    }

    #[test]
    fn test_point_in_main_cardioid_is_inside() {
        let result = MandelbrotAlgorithm::new(500).compute(Complex::new(-0.1, 0.1));

        assert!(result.is_inside(500));
    }

    #[test]
    fn test_orbit_starts_at_c() {
        // |c|^2 > 4 already, so no step is taken
        let result = MandelbrotAlgorithm::new(100).compute(Complex::new(2.5, 0.0));

        assert_eq!(result.iterations, 0);
        assert_eq!(result.z_final, Complex::new(2.5, 0.0));
    }

    #[test]
    fn test_escape_just_under_budget_is_coloured() {
        // 1 -> 2 -> 5
        let result = MandelbrotAlgorithm::new(3).compute(Complex::new(1.0, 0.0));

        assert_eq!(result.iterations, 2);
        assert_eq!(result.z_final, Complex::new(5.0, 0.0));
        assert!(!result.is_inside(3));
    }

    #[test]
    fn test_boundary_point_stays_bounded() {
        // c = -2 lands on the fixed point z = 2
        let result = MandelbrotAlgorithm::new(50).compute(Complex::new(-2.0, 0.0));

        assert_eq!(result.iterations, 50);
    }
}
