use std::sync::Arc;

use egui::Context as EguiContext;
use winit::{event_loop::EventLoopProxy, window::Window};

use crate::controllers::interactive::data::display_surface::DisplaySurface;
use crate::controllers::interactive::ports::worker_message_port::WorkerMessagePort;
use crate::input::gui::events::GuiEvent;

pub trait GuiPresenterPort {
    fn new(window: &'static Window, event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self;
    /// Draws the surface scaled to the window, with the egui output on top.
    fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
        surface: &DisplaySurface,
    ) -> Result<(), pixels::Error>;
    /// Port the raster worker posts its messages through.
    fn share_port(&self) -> Arc<dyn WorkerMessagePort>;
    fn resize(&mut self, width: u32, height: u32);
}
