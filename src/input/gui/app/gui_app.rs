use std::path::Path;
use std::time::Instant;

use egui::Context;
use egui_winit::State as EguiWinitState;
use tracing::{error, info, warn};
use winit::{
    event::{ElementState, Event, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::Key,
    window::Window,
};

use crate::controllers::export::export::{ExportError, ExportQuality, write_export};
use crate::controllers::interactive::controller::{BandOutcome, ControllerState};
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::session::ExplorerSession;
use crate::controllers::interactive::worker::RasterWorker;
use crate::core::data::fractal_params::FractalKind;
use crate::core::navigation::zoom_pan::{ScreenPoint, ZoomDirection, key_zoom};
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::events::GuiEvent;
use crate::input::gui::ui_state::{PointerState, SliderEdit, UiAction, UiState, slider_edit};
use crate::presenters::file::ppm::PpmFilePresenter;

const EXPORT_DIR: &str = "output";

pub struct GuiApp<T: GuiPresenterPort> {
    window: &'static Window,
    presenter: T,
    session: ExplorerSession<RasterWorker>,
    ui_state: UiState,
    pointer: PointerState,
    redraw_pending: bool,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: T,
        session: ExplorerSession<RasterWorker>,
    ) -> Self {
        let egui_ctx = Context::default();

        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None, // max_texture_side, use default
        );

        Self {
            window,
            presenter,
            ui_state: UiState::from_params(session.params(), session.base_max_iterations()),
            session,
            pointer: PointerState::default(),
            redraw_pending: true,
            egui_ctx,
            egui_state,
        }
    }

    /// Runs the event loop until the window is closed.
    pub fn run(mut self, event_loop: EventLoop<GuiEvent>) {
        let window_id = self.window.id();

        event_loop
            .run(move |event, elwt| match event {
                Event::WindowEvent { ref event, window_id: id } if id == window_id => {
                    let response = self.egui_state.on_window_event(self.window, event);

                    if response.repaint {
                        self.redraw_pending = true;
                    }

                    match event {
                        WindowEvent::CloseRequested => elwt.exit(),
                        WindowEvent::RedrawRequested => {
                            if let Err(err) = self.redraw() {
                                error!(error = %err, "render error");
                                elwt.exit();
                            }
                        }
                        WindowEvent::Resized(size) => self.resize(size.width, size.height),
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            self.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                            let size = self.window.inner_size();
                            self.resize(size.width, size.height);
                        }
                        _ if response.consumed => {}
                        other => self.handle_input(other),
                    }
                }
                Event::UserEvent(GuiEvent::Worker(message)) => {
                    if let Some(BandOutcome::Composited { .. } | BandOutcome::Completed { .. }) =
                        self.session.on_worker_message(message)
                    {
                        self.redraw_pending = true;
                    }
                }
                Event::AboutToWait => self.schedule(elwt),
                _ => {}
            })
            .expect("Event loop error");
    }

    /// Arms a wake-up for the settle deadline and requests a redraw when a
    /// frame is due.
    fn schedule(&mut self, elwt: &winit::event_loop::EventLoopWindowTarget<GuiEvent>) {
        match self.session.settle_deadline() {
            Some(deadline) if Instant::now() >= deadline => self.redraw_pending = true,
            Some(deadline) => elwt.set_control_flow(ControlFlow::WaitUntil(deadline)),
            None => elwt.set_control_flow(ControlFlow::Wait),
        }

        if self.redraw_pending || self.session.has_pending_render() {
            self.window.request_redraw();
        }
    }

    /// The per-refresh scheduling point: submits at most one job, runs the
    /// egui pass and presents.
    fn redraw(&mut self) -> Result<(), pixels::Error> {
        self.redraw_pending = false;

        if let Err(err) = self.session.frame(Instant::now()) {
            self.report(&err);
        }

        let egui_output = self.update_ui();

        self.egui_state
            .handle_platform_output(self.window, egui_output.platform_output.clone());

        if egui_output
            .viewport_output
            .values()
            .any(|v| v.repaint_delay.is_zero())
        {
            self.redraw_pending = true;
        }

        self.presenter
            .render(egui_output, &self.egui_ctx, self.session.surface())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.presenter.resize(width, height);

        if width == 0 || height == 0 {
            return;
        }

        if let Err(err) = self.session.resize(width, height) {
            self.report(&err);
        }
        self.redraw_pending = true;
    }

    fn handle_input(&mut self, event: &WindowEvent) {
        let now = Instant::now();

        let result = match event {
            WindowEvent::MouseWheel { delta, .. } => {
                let up = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y > 0.0,
                    MouseScrollDelta::PixelDelta(position) => position.y > 0.0,
                };
                let direction = if up { ZoomDirection::In } else { ZoomDirection::Out };
                self.session
                    .zoom_steps(1, direction, self.pointer.position(), now)
            }
            WindowEvent::CursorMoved { position, .. } => {
                match self.pointer.moved_to(ScreenPoint::new(position.x, position.y)) {
                    Some((dx, dy)) => self.session.pan(dx, dy, now),
                    None => Ok(()),
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.pointer.left();
                Ok(())
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => match state {
                ElementState::Pressed if self.pointer.press(now) => self.session.zoom_steps(
                    1,
                    ZoomDirection::In,
                    self.pointer.position(),
                    now,
                ),
                ElementState::Pressed => Ok(()),
                ElementState::Released => {
                    self.pointer.release();
                    Ok(())
                }
            },
            WindowEvent::TouchpadMagnify { delta, .. } => {
                let center = self.pointer.position().unwrap_or_else(|| {
                    let (width, height) = self.session.display_size();
                    ScreenPoint::center_of(width, height)
                });
                self.session.pinch(1.0 + delta, center, 0.0, 0.0, now)
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                let shortcut = match &event.logical_key {
                    Key::Character(text) => text.chars().next().and_then(key_zoom),
                    _ => None,
                };
                match shortcut {
                    Some((steps, direction)) => self.session.zoom_steps(steps, direction, None, now),
                    None => Ok(()),
                }
            }
            _ => Ok(()),
        };

        if let Err(err) = result {
            self.report(&err);
        }
    }

    fn update_ui(&mut self) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(self.window);
        let mut actions = Vec::new();
        let ui_state = &mut self.ui_state;
        let session = &self.session;

        let output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Settings")
                .default_pos([10.0, 10.0])
                .default_size([280.0, 320.0])
                .show(ctx, |ui| {
                    settings_panel(ui, ui_state, session, &mut actions);
                });
        });

        for action in actions {
            self.apply(action);
        }

        output
    }

    fn apply(&mut self, action: UiAction) {
        let result = match action {
            UiAction::SetKind(kind) => self.session.set_fractal_kind(kind),
            UiAction::MaxIterations(value, SliderEdit::Preview) => {
                self.session.preview_max_iterations(value)
            }
            UiAction::MaxIterations(value, SliderEdit::Commit) => {
                self.session.commit_max_iterations(value)
            }
            UiAction::PaletteOffset(value, SliderEdit::Preview) => {
                self.session.preview_palette_offset(value)
            }
            UiAction::PaletteOffset(value, SliderEdit::Commit) => {
                self.session.commit_palette_offset(value)
            }
            UiAction::JuliaConstant(value, SliderEdit::Preview) => self.session.preview_julia_c(value),
            UiAction::JuliaConstant(value, SliderEdit::Commit) => self.session.commit_julia_c(value),
            UiAction::ResetView => self.session.reset_view(),
            UiAction::ResetSettings => {
                self.session.reset_settings();
                Ok(())
            }
            UiAction::Export(quality) => {
                self.export(quality);
                Ok(())
            }
        };

        if let Err(err) = result {
            self.report(&err);
        }

        self.ui_state
            .sync(self.session.params(), self.session.base_max_iterations());
        self.redraw_pending = true;
    }

    fn export(&mut self, quality: ExportQuality) {
        let result = self
            .session
            .export_image(quality, self.window.scale_factor())
            .and_then(|(image, metadata)| {
                write_export(
                    &PpmFilePresenter::new(),
                    &image,
                    &metadata,
                    Path::new(EXPORT_DIR),
                    None,
                )
            });

        self.ui_state.status = Some(match result {
            Ok(files) => {
                info!(path = %files.image.display(), "exported view");
                format!("Saved {}", files.image.display())
            }
            Err(err @ ExportError::Io(_)) => {
                error!(error = %err, "export failed");
                format!("Export failed: {err}")
            }
            Err(err) => {
                warn!(error = %err, "export failed");
                format!("Export failed: {err}")
            }
        });
    }

    fn report(&mut self, err: &RenderError) {
        warn!(error = %err, "request rejected");
        self.ui_state.status = Some(err.to_string());
    }
}

fn settings_panel(
    ui: &mut egui::Ui,
    state: &mut UiState,
    session: &ExplorerSession<RasterWorker>,
    actions: &mut Vec<UiAction>,
) {
    ui.heading("Fractal Explorer");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Fractal:");
        egui::ComboBox::from_id_source("fractal_kind")
            .selected_text(state.kind.display_name())
            .show_ui(ui, |ui| {
                for kind in FractalKind::ALL {
                    if ui
                        .selectable_value(&mut state.kind, kind, kind.display_name())
                        .changed()
                    {
                        actions.push(UiAction::SetKind(kind));
                    }
                }
            });
    });

    let response = ui.add(
        egui::Slider::new(&mut state.max_iterations, 1..=5000)
            .logarithmic(true)
            .text("Max iterations"),
    );
    if let Some(edit) = slider_edit(response.changed(), response.dragged(), response.drag_released()) {
        actions.push(UiAction::MaxIterations(state.max_iterations, edit));
    }

    let response = ui.add(egui::Slider::new(&mut state.palette_offset, 0.0..=1.0).text("Colour offset"));
    if let Some(edit) = slider_edit(response.changed(), response.dragged(), response.drag_released()) {
        actions.push(UiAction::PaletteOffset(state.palette_offset, edit));
    }

    if state.kind == FractalKind::Julia {
        let real = ui.add(egui::Slider::new(&mut state.julia_cr, -2.0..=2.0).text("Julia c (re)"));
        let imag = ui.add(egui::Slider::new(&mut state.julia_ci, -2.0..=2.0).text("Julia c (im)"));

        let edit = slider_edit(real.changed(), real.dragged(), real.drag_released())
            .or_else(|| slider_edit(imag.changed(), imag.dragged(), imag.drag_released()));
        if let Some(edit) = edit {
            actions.push(UiAction::JuliaConstant(state.julia_constant(), edit));
        }
    }

    ui.horizontal(|ui| {
        if ui.button("Reset view").clicked() {
            actions.push(UiAction::ResetView);
        }
        if ui.button("Reset settings").clicked() {
            actions.push(UiAction::ResetSettings);
        }
    });

    ui.separator();
    ui.horizontal(|ui| {
        egui::ComboBox::from_id_source("export_quality")
            .selected_text(state.export_quality.display_name())
            .show_ui(ui, |ui| {
                for quality in ExportQuality::ALL {
                    ui.selectable_value(&mut state.export_quality, quality, quality.display_name());
                }
            });
        if ui.button("Export").clicked() {
            actions.push(UiAction::Export(state.export_quality));
        }
    });

    ui.separator();
    ui.label(format!("Zoom: {:.2}x", session.zoom_factor()));
    let viewport = session.viewport();
    ui.label(format!("Real: [{:.6}, {:.6}]", viewport.min_re(), viewport.max_re()));
    ui.label(format!("Imag: [{:.6}, {:.6}]", viewport.min_im(), viewport.max_im()));

    let (width, height) = session.raster_size();
    ui.label(format!("Raster: {width}x{height}"));
    if let ControllerState::JobInFlight {
        request_id,
        rows_received,
        height,
    } = session.controller().state()
    {
        ui.label(format!("Render {request_id}: {rows_received}/{height} rows"));
    }

    if let Some(message) = &state.status {
        ui.separator();
        ui.colored_label(egui::Color32::LIGHT_RED, message);
    }
}
