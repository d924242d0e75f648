use crate::controllers::interactive::errors::render::RenderError;

/// Completion and failure callbacks. Each fires at most once per request.
pub trait RenderListener {
    fn on_complete(&mut self, request_id: u64);

    fn on_error(&mut self, error: &RenderError);
}
