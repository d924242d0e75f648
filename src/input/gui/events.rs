use crate::controllers::interactive::events::worker_message::WorkerMessage;

/// Custom user events for the GUI event loop.
///
/// These events allow the raster worker thread to wake the main UI thread,
/// which owns the session and composites bands.
#[derive(Debug, Clone)]
pub enum GuiEvent {
    /// A band, failure or crash report from the raster worker.
    Worker(WorkerMessage),
}
