use crate::controllers::interactive::events::worker_message::WorkerMessage;

/// Outbound side of a raster worker. Called from the worker thread.
pub trait WorkerMessagePort: Send + Sync {
    fn post(&self, message: WorkerMessage);
}
