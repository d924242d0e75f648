use std::marker::PhantomData;

use tracing::info;
use winit::{
    dpi::LogicalSize,
    event_loop::{EventLoop, EventLoopBuilder},
    window::{Window, WindowBuilder},
};

use crate::config::ExplorerConfig;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::session::ExplorerSession;
use crate::controllers::interactive::worker::RasterWorker;
use crate::input::gui::app::{gui_app::GuiApp, ports::presenter::GuiPresenterPort};
use crate::input::gui::commands::ports::presenter_factory::GuiPresenterFactoryPort;
use crate::input::gui::events::GuiEvent;

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: ExplorerConfig,
    _presenter: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F, config: ExplorerConfig) -> Self {
        Self {
            presenter_factory,
            config,
            _presenter: PhantomData,
        }
    }

    /// Opens the window and blocks until it is closed. Fails only if the
    /// raster worker or the first view cannot be set up.
    pub fn execute(&self) -> Result<(), RenderError> {
        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event()
            .build()
            .expect("Failed to create event loop");
        let window = open_window(&event_loop);

        let presenter = self.presenter_factory.build(window, event_loop.create_proxy());
        let worker = RasterWorker::spawn(self.config.rasterize_options(), presenter.share_port())?;

        let size = window.inner_size();
        let (width, height) = (size.width.max(1), size.height.max(1));
        let session = ExplorerSession::new(worker, self.config.clone(), width, height)?;
        info!(width, height, "explorer window open");

        GuiApp::new(window, &event_loop, presenter, session).run(event_loop);
        Ok(())
    }
}

/// The window lives for the rest of the process; the presenter's wgpu
/// surface borrows it as `'static`.
fn open_window(event_loop: &EventLoop<GuiEvent>) -> &'static Window {
    let window = WindowBuilder::new()
        .with_title("Fractal Explorer")
        .with_inner_size(LogicalSize::new(800.0, 600.0))
        .with_min_inner_size(LogicalSize::new(200.0, 200.0))
        .build(event_loop)
        .expect("Failed to create window");

    Box::leak(Box::new(window))
}
