use crate::core::actions::rasterize_bands::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::{EscapeResult, iterate};

/// Iterates each plane point as `z0` against a fixed constant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuliaAlgorithm {
    c: Complex,
    max_iterations: u32,
}

impl JuliaAlgorithm {
    #[must_use]
    pub fn new(c: Complex, max_iterations: u32) -> Self {
        Self { c, max_iterations }
    }

    #[must_use]
    pub fn constant(&self) -> Complex {
        self.c
    }
}

impl FractalAlgorithm for JuliaAlgorithm {
    fn compute(&self, point: Complex) -> EscapeResult {
        iterate(point, self.c, self.max_iterations, false)
    }
}
