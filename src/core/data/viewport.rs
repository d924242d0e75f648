use crate::core::data::complex::Complex;
use serde::Serialize;
use thiserror::Error;

/// Real extent of the default framing, `[-2.5, 1.0]`.
pub const DEFAULT_MIN_RE: f64 = -2.5;
pub const DEFAULT_MAX_RE: f64 = 1.0;

#[derive(Debug, Copy, Clone, PartialEq, Error)]
pub enum ViewportError {
    #[error("viewport bounds must be finite: re [{min_re}, {max_re}], im [{min_im}, {max_im}]")]
    NonFinite {
        min_re: f64,
        max_re: f64,
        min_im: f64,
        max_im: f64,
    },
    #[error("viewport size must be positive: {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("raster size must be non-zero: {width}x{height}")]
    ZeroRaster { width: u32, height: u32 },
}

/// An axis-aligned rectangle of the complex plane. Row 0 of a raster maps to
/// `min_im` and the last row to `max_im`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    min_re: f64,
    max_re: f64,
    min_im: f64,
    max_im: f64,
}

impl Viewport {
    pub fn new(min_re: f64, max_re: f64, min_im: f64, max_im: f64) -> Result<Self, ViewportError> {
        if ![min_re, max_re, min_im, max_im].iter().all(|v| v.is_finite()) {
            return Err(ViewportError::NonFinite {
                min_re,
                max_re,
                min_im,
                max_im,
            });
        }

        let width = max_re - min_re;
        let height = max_im - min_im;

        if width <= 0.0 || height <= 0.0 {
            return Err(ViewportError::InvalidSize { width, height });
        }

        Ok(Self {
            min_re,
            max_re,
            min_im,
            max_im,
        })
    }

    /// Frames `[-2.5, 1.0]` on the real axis with the imaginary extent centred
    /// on zero and sized to the raster's aspect ratio.
    pub fn default_framing(width: u32, height: u32) -> Result<Self, ViewportError> {
        if width == 0 || height == 0 {
            return Err(ViewportError::ZeroRaster { width, height });
        }

        let re_extent = DEFAULT_MAX_RE - DEFAULT_MIN_RE;
        let half_im = re_extent * f64::from(height) / f64::from(width) / 2.0;

        Self::new(DEFAULT_MIN_RE, DEFAULT_MAX_RE, -half_im, half_im)
    }

    #[must_use]
    pub fn min_re(&self) -> f64 {
        self.min_re
    }

    #[must_use]
    pub fn max_re(&self) -> f64 {
        self.max_re
    }

    #[must_use]
    pub fn min_im(&self) -> f64 {
        self.min_im
    }

    #[must_use]
    pub fn max_im(&self) -> f64 {
        self.max_im
    }

    #[must_use]
    pub fn re_extent(&self) -> f64 {
        self.max_re - self.min_re
    }

    #[must_use]
    pub fn im_extent(&self) -> f64 {
        self.max_im - self.min_im
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex {
            real: (self.min_re + self.max_re) / 2.0,
            imag: (self.min_im + self.max_im) / 2.0,
        }
    }

    /// Keeps `min_re`, `max_re` and `min_im`, and recomputes `max_im` so the
    /// viewport matches the raster aspect ratio.
    pub fn with_aspect(&self, width: u32, height: u32) -> Result<Self, ViewportError> {
        if width == 0 || height == 0 {
            return Err(ViewportError::ZeroRaster { width, height });
        }

        let max_im = self.min_im + self.re_extent() * f64::from(height) / f64::from(width);
        Self::new(self.min_re, self.max_re, self.min_im, max_im)
    }

    /// Scales the extents by `factor` around `anchor`; the anchor keeps its
    /// position on the plane.
    pub fn scaled_about(&self, anchor: Complex, factor: f64) -> Result<Self, ViewportError> {
        Self::new(
            anchor.real + (self.min_re - anchor.real) * factor,
            anchor.real + (self.max_re - anchor.real) * factor,
            anchor.imag + (self.min_im - anchor.imag) * factor,
            anchor.imag + (self.max_im - anchor.imag) * factor,
        )
    }

    pub fn translated(&self, delta_re: f64, delta_im: f64) -> Result<Self, ViewportError> {
        Self::new(
            self.min_re + delta_re,
            self.max_re + delta_re,
            self.min_im + delta_im,
            self.max_im + delta_im,
        )
    }
}
