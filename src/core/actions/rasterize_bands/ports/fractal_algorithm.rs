use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::EscapeResult;

pub trait FractalAlgorithm: Sync {
    fn compute(&self, point: Complex) -> EscapeResult;
}
