use crate::core::actions::rasterize_bands::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_params::{DEFAULT_JULIA_C, FractalKind, FractalParams};
use crate::core::fractals::burning_ship::algorithm::BurningShipAlgorithm;
use crate::core::fractals::escape_time::EscapeResult;
use crate::core::fractals::julia::algorithm::JuliaAlgorithm;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;

/// Per-job kernel selected once from the fractal kind, so the per-pixel loop
/// dispatches through a single match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FractalKernel {
    Mandelbrot(MandelbrotAlgorithm),
    Julia(JuliaAlgorithm),
    BurningShip(BurningShipAlgorithm),
}

impl FractalKernel {
    #[must_use]
    pub fn from_params(params: &FractalParams) -> Self {
        match params.kind {
            FractalKind::Mandelbrot => {
                Self::Mandelbrot(MandelbrotAlgorithm::new(params.max_iterations))
            }
            FractalKind::Julia => Self::Julia(JuliaAlgorithm::new(
                params.julia_constant(),
                params.max_iterations,
            )),
            FractalKind::BurningShip => {
                Self::BurningShip(BurningShipAlgorithm::new(params.max_iterations))
            }
        }
    }
}

impl FractalAlgorithm for FractalKernel {
    #[inline]
    fn compute(&self, point: Complex) -> EscapeResult {
        match self {
            Self::Mandelbrot(algorithm) => algorithm.compute(point),
            Self::Julia(algorithm) => algorithm.compute(point),
            Self::BurningShip(algorithm) => algorithm.compute(point),
        }
    }
}

/// Escape-time evaluation of a single point. A Julia evaluation without a
/// constant uses `(-0.8, 0.156)`.
#[must_use]
pub fn evaluate(
    kind: FractalKind,
    c: Complex,
    max_iterations: u32,
    julia_c: Option<Complex>,
) -> EscapeResult {
    let params = FractalParams {
        kind,
        julia_c: Some(julia_c.unwrap_or(DEFAULT_JULIA_C)),
        max_iterations,
        palette_offset: 0.0,
    };

    FractalKernel::from_params(&params).compute(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evaluate_mandelbrot_origin_is_inside() {
        let result = evaluate(FractalKind::Mandelbrot, Complex::ZERO, 100, None);

        assert_eq!(result.iterations, 100);
    }

    #[test]
    fn test_evaluate_julia_defaults_constant() {
        let defaulted = evaluate(FractalKind::Julia, Complex::ZERO, 100, None);
        let explicit = evaluate(FractalKind::Julia, Complex::ZERO, 100, Some(DEFAULT_JULIA_C));

        assert_eq!(defaulted.iterations, 100);
        assert_eq!(defaulted, explicit);
    }

    #[test]
    fn test_evaluate_seeds_every_kind_with_the_pixel() {
        let far = Complex::new(2.5, 0.0);

        for kind in [FractalKind::Mandelbrot, FractalKind::Julia, FractalKind::BurningShip] {
            let result = evaluate(kind, far, 100, None);
            assert_eq!(result.iterations, 0, "{kind:?}");
            assert_eq!(result.z_final, far, "{kind:?}");
        }
    }

    #[test]
    fn test_evaluate_zero_budget_reports_zero_iterations() {
        let result = evaluate(FractalKind::BurningShip, Complex::new(0.1, 0.1), 0, None);

        assert_eq!(result.iterations, 0);
    }

    #[test]
    fn test_kernel_matches_kind() {
        let params = FractalParams::julia(Complex::new(0.285, 0.01), 64);

        assert_eq!(
            FractalKernel::from_params(&params),
            FractalKernel::Julia(JuliaAlgorithm::new(Complex::new(0.285, 0.01), 64))
        );
        assert!(matches!(
            FractalKernel::from_params(&FractalParams::burning_ship(64)),
            FractalKernel::BurningShip(_)
        ));
    }
}
