use crate::core::data::band::Band;

/// Everything a raster worker reports back to the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    Band(Band),
    /// A job died part-way; the worker may still accept new jobs.
    Failed { request_id: u64, message: String },
    /// The worker thread is gone and accepts no further jobs.
    Crashed { request_id: u64, message: String },
}
