use crate::core::data::fractal_params::{FractalKind, FractalParams};
use crate::core::data::viewport::Viewport;
use serde::Serialize;

/// Reproduction record written next to an exported image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub fractal: FractalKind,
    /// Magnification relative to the first framing, rounded to 2 decimals.
    pub zoom: f64,
    pub bounds: Viewport,
    pub max_iter: u32,
    pub julia_cr: f64,
    pub julia_ci: f64,
    pub palette_offset: f64,
}

impl ExportMetadata {
    #[must_use]
    pub fn new(viewport: &Viewport, params: &FractalParams, zoom: f64) -> Self {
        let zoom = if zoom.is_finite() && zoom > 0.0 { zoom } else { 1.0 };
        let julia_c = params.julia_constant();

        Self {
            fractal: params.kind,
            zoom: (zoom * 100.0).round() / 100.0,
            bounds: *viewport,
            max_iter: params.max_iterations,
            julia_cr: julia_c.real,
            julia_ci: julia_c.imag,
            palette_offset: params.palette_offset,
        }
    }

    /// Default file name without extension, e.g. `mandelbrot-2.5x`.
    #[must_use]
    pub fn file_stem(&self) -> String {
        format!("{}-{}x", self.fractal.wire_name(), self.zoom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::complex::Complex;

    fn viewport() -> Viewport {
        Viewport::new(-2.0, 1.0, -1.0, 1.0).unwrap()
    }

    #[test]
    fn test_zoom_rounded_to_two_decimals() {
        let metadata = ExportMetadata::new(&viewport(), &FractalParams::mandelbrot(100), 2.34567);

        assert_eq!(metadata.zoom, 2.35);
        assert_eq!(metadata.file_stem(), "mandelbrot-2.35x");
    }

    #[test]
    fn test_whole_zoom_has_no_trailing_zeros() {
        let metadata = ExportMetadata::new(&viewport(), &FractalParams::burning_ship(100), 3.0);

        assert_eq!(metadata.file_stem(), "burningShip-3x");
    }

    #[test]
    fn test_invalid_zoom_falls_back_to_one() {
        let metadata = ExportMetadata::new(&viewport(), &FractalParams::mandelbrot(100), f64::NAN);

        assert_eq!(metadata.zoom, 1.0);
    }

    #[test]
    fn test_serializes_camel_case_fields() {
        let params = FractalParams::julia(Complex::new(0.285, 0.01), 250).with_palette_offset(0.5);
        let metadata = ExportMetadata::new(&viewport(), &params, 1.0);
        let json = serde_json::to_value(metadata).unwrap();

        assert_eq!(json["fractal"], "julia");
        assert_eq!(json["maxIter"], 250);
        assert_eq!(json["juliaCr"], 0.285);
        assert_eq!(json["juliaCi"], 0.01);
        assert_eq!(json["paletteOffset"], 0.5);
        assert_eq!(json["bounds"]["minRe"], -2.0);
        assert_eq!(json["bounds"]["maxIm"], 1.0);
    }
}
