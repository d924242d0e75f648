use crate::core::data::complex::Complex;
use crate::core::data::viewport::Viewport;

/// Pixel-to-plane mapping for one raster. Column `x` maps to
/// `min_re + x * re_extent / (width - 1)` and row `y` likewise on the
/// imaginary axis, so the first and last pixels land exactly on the viewport
/// edges. A single-pixel axis maps to its minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneMapping {
    min_re: f64,
    min_im: f64,
    step_re: f64,
    step_im: f64,
}

fn step(extent: f64, pixels: u32) -> f64 {
    if pixels > 1 {
        extent / f64::from(pixels - 1)
    } else {
        0.0
    }
}

impl PlaneMapping {
    #[must_use]
    pub fn new(viewport: &Viewport, width: u32, height: u32) -> Self {
        Self {
            min_re: viewport.min_re(),
            min_im: viewport.min_im(),
            step_re: step(viewport.re_extent(), width),
            step_im: step(viewport.im_extent(), height),
        }
    }

    #[inline]
    #[must_use]
    pub fn real_at(&self, x: u32) -> f64 {
        self.min_re + f64::from(x) * self.step_re
    }

    #[inline]
    #[must_use]
    pub fn imag_at(&self, y: u32) -> f64 {
        self.min_im + f64::from(y) * self.step_im
    }

    #[must_use]
    pub fn pixel_to_complex_coords(&self, x: u32, y: u32) -> Complex {
        Complex {
            real: self.real_at(x),
            imag: self.imag_at(y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(-2.0, 2.0, -1.0, 1.0).unwrap()
    }

    #[test]
    fn test_corners_map_to_viewport_edges() {
        let mapping = PlaneMapping::new(&viewport(), 5, 3);

        assert_eq!(mapping.pixel_to_complex_coords(0, 0), Complex::new(-2.0, -1.0));
        assert_eq!(mapping.pixel_to_complex_coords(4, 2), Complex::new(2.0, 1.0));
    }

    #[test]
    fn test_interior_pixel() {
        let mapping = PlaneMapping::new(&viewport(), 5, 3);

        assert_eq!(mapping.pixel_to_complex_coords(1, 1), Complex::new(-1.0, 0.0));
    }

    #[test]
    fn test_row_zero_is_min_im() {
        let mapping = PlaneMapping::new(&viewport(), 10, 10);

        assert_eq!(mapping.imag_at(0), -1.0);
        assert!(mapping.imag_at(9) > mapping.imag_at(0));
    }

    #[test]
    fn test_single_pixel_axes_map_to_minimum() {
        let mapping = PlaneMapping::new(&viewport(), 1, 1);

        assert_eq!(mapping.pixel_to_complex_coords(0, 0), Complex::new(-2.0, -1.0));
        assert!(mapping.real_at(0).is_finite());
    }
}
