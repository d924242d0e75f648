use crate::core::data::fractal_params::FractalParamsError;
use crate::core::data::raster_job::InvalidJobError;
use crate::core::data::viewport::ViewportError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    #[error("invalid render job: {0}")]
    InvalidJob(#[from] InvalidJobError),
    #[error("render worker unavailable: {0}")]
    WorkerUnavailable(String),
    #[error("render {request_id} failed: {message}")]
    JobFailed { request_id: u64, message: String },
}

impl From<ViewportError> for RenderError {
    fn from(error: ViewportError) -> Self {
        Self::InvalidJob(InvalidJobError::Viewport(error))
    }
}

impl From<FractalParamsError> for RenderError {
    fn from(error: FractalParamsError) -> Self {
        Self::InvalidJob(InvalidJobError::Params(error))
    }
}
