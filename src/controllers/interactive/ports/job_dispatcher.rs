use crate::controllers::interactive::errors::render::RenderError;
use crate::core::data::raster_job::RasterJob;

/// Hands a validated job to whatever computes it. Dispatch returns as soon as
/// the job is queued; results come back as worker messages.
pub trait JobDispatcher {
    fn dispatch(&self, job: RasterJob) -> Result<(), RenderError>;
}
