use std::sync::{Mutex, PoisonError};

use winit::event_loop::EventLoopProxy;

use crate::controllers::interactive::events::worker_message::WorkerMessage;
use crate::controllers::interactive::ports::worker_message_port::WorkerMessagePort;
use crate::input::gui::events::GuiEvent;

/// Hands worker messages to the UI thread as user events, waking the event
/// loop for each one.
pub struct PixelsAdapter {
    event_loop_proxy: Mutex<EventLoopProxy<GuiEvent>>,
}

impl WorkerMessagePort for PixelsAdapter {
    fn post(&self, message: WorkerMessage) {
        let proxy = self
            .event_loop_proxy
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Fails only once the event loop has exited.
        let _ = proxy.send_event(GuiEvent::Worker(message));
    }
}

impl PixelsAdapter {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            event_loop_proxy: Mutex::new(event_loop_proxy),
        }
    }
}
