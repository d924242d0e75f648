use winit::{event_loop::EventLoopProxy, window::Window};

use crate::input::gui::{app::ports::presenter::GuiPresenterPort, events::GuiEvent};

/// Deferred presenter construction: the window and the loop proxy only
/// exist after `RunGuiCommand::execute` has started.
pub trait GuiPresenterFactoryPort<P: GuiPresenterPort> {
    fn build(&self, window: &'static Window, proxy: EventLoopProxy<GuiEvent>) -> P;
}
