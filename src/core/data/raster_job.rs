use crate::core::data::fractal_params::{FractalParams, FractalParamsError};
use crate::core::data::viewport::{Viewport, ViewportError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidJobError {
    #[error("raster size must be non-zero: {width}x{height}")]
    ZeroSize { width: u32, height: u32 },
    #[error(transparent)]
    Viewport(#[from] ViewportError),
    #[error(transparent)]
    Params(#[from] FractalParamsError),
}

/// One complete rendering request. Construction validates every field, so a
/// `RasterJob` in hand is always renderable.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterJob {
    request_id: u64,
    width: u32,
    height: u32,
    viewport: Viewport,
    params: FractalParams,
    preview: bool,
}

impl RasterJob {
    pub fn new(
        request_id: u64,
        width: u32,
        height: u32,
        viewport: Viewport,
        params: FractalParams,
        preview: bool,
    ) -> Result<Self, InvalidJobError> {
        if width == 0 || height == 0 {
            return Err(InvalidJobError::ZeroSize { width, height });
        }

        params.validate()?;

        Ok(Self {
            request_id,
            width,
            height,
            viewport,
            params,
            preview,
        })
    }

    #[must_use]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    #[must_use]
    pub fn preview(&self) -> bool {
        self.preview
    }

    #[must_use]
    pub fn row_bytes(&self) -> usize {
        self.width as usize * 4
    }
}
