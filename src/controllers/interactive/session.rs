use crate::config::ExplorerConfig;
use crate::controllers::export::export::{ExportError, ExportQuality, export_target, render_export};
use crate::controllers::export::metadata::ExportMetadata;
use crate::controllers::interactive::coalescer::RenderCoalescer;
use crate::controllers::interactive::controller::{BandOutcome, RenderJobController};
use crate::controllers::interactive::data::display_surface::DisplaySurface;
use crate::controllers::interactive::data::render_options::RenderOptions;
use crate::controllers::interactive::errors::render::RenderError;
use crate::controllers::interactive::events::worker_message::WorkerMessage;
use crate::controllers::interactive::ports::job_dispatcher::JobDispatcher;
use crate::controllers::interactive::ports::render_listener::RenderListener;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_params::{
    DEFAULT_JULIA_C, FractalKind, FractalParams, FractalParamsError,
};
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::viewport::{DEFAULT_MAX_RE, DEFAULT_MIN_RE, Viewport};
use crate::core::navigation::zoom_pan::{self, ScreenPoint, ZoomDirection, zoom_level};
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info};

/// Authoritative view state of one explorer window.
///
/// Gestures and slider drags update the view immediately and request a
/// preview render at reduced scale and iteration budget; the settle timer or
/// an explicit commit promotes the next render to full quality. All renders
/// go through the coalescer, and [`ExplorerSession::frame`] is the only place
/// jobs are submitted.
pub struct ExplorerSession<D: JobDispatcher> {
    config: ExplorerConfig,
    controller: RenderJobController<D>,
    coalescer: RenderCoalescer,
    viewport: Viewport,
    params: FractalParams,
    base_max_iterations: u32,
    render_scale: f64,
    display_width: u32,
    display_height: u32,
    initial_re_width: f64,
    startup_views: HashMap<FractalKind, Viewport>,
}

impl<D: JobDispatcher> ExplorerSession<D> {
    /// Frames the default Mandelbrot view for the display and queues the
    /// first full render.
    pub fn new(
        dispatcher: D,
        config: ExplorerConfig,
        display_width: u32,
        display_height: u32,
    ) -> Result<Self, RenderError> {
        let base_max_iterations = config.default_max_iterations;
        let params = FractalParams {
            julia_c: Some(DEFAULT_JULIA_C),
            ..FractalParams::mandelbrot(base_max_iterations)
        };
        params.validate()?;

        let mut session = Self {
            coalescer: RenderCoalescer::new(config.settle_delay()),
            controller: RenderJobController::new(dispatcher),
            viewport: Viewport::default_framing(display_width, display_height)?,
            params,
            base_max_iterations,
            render_scale: 1.0,
            display_width,
            display_height,
            initial_re_width: DEFAULT_MAX_RE - DEFAULT_MIN_RE,
            startup_views: HashMap::new(),
            config,
        };

        session.apply_startup_view()?;
        session.request_final();

        info!(
            width = display_width,
            height = display_height,
            "explorer session started"
        );

        Ok(session)
    }

    pub fn set_listener(&mut self, listener: Box<dyn RenderListener>) {
        self.controller.set_listener(listener);
    }

    /// Default framing widened by the startup zoom-out, remembered as the
    /// reset target of the current kind.
    fn apply_startup_view(&mut self) -> Result<(), RenderError> {
        let framing = Viewport::default_framing(self.display_width, self.display_height)?;
        let view = framing.scaled_about(framing.center(), self.config.startup_zoom_out)?;

        self.viewport = view;
        self.startup_views.insert(self.params.kind, view);

        Ok(())
    }

    pub fn begin_interaction(&mut self) {
        self.render_scale = self.config.interaction_scale;
        self.params.max_iterations = self.config.preview_iterations(self.base_max_iterations);
    }

    fn end_interaction(&mut self) {
        self.render_scale = 1.0;
        self.params.max_iterations = self.base_max_iterations;
    }

    fn request_preview(&mut self, now: Instant) {
        self.coalescer.request_render(RenderOptions::PREVIEW);
        self.coalescer.schedule_full_res_render(now);
    }

    fn request_final(&mut self) {
        self.end_interaction();
        self.coalescer.cancel_full_res_render();
        self.coalescer.request_render(RenderOptions::FINAL);
    }

    /// Zooms about `center`, or the middle of the display when `None`.
    pub fn zoom_steps(
        &mut self,
        steps: u32,
        direction: ZoomDirection,
        center: Option<ScreenPoint>,
        now: Instant,
    ) -> Result<(), RenderError> {
        let center =
            center.unwrap_or_else(|| ScreenPoint::center_of(self.display_width, self.display_height));

        self.viewport = zoom_pan::zoom_steps(
            steps,
            direction,
            center,
            &self.viewport,
            self.display_width,
            self.display_height,
            self.config.zoom_base,
        )?;

        self.begin_interaction();
        self.request_preview(now);

        Ok(())
    }

    pub fn pan(&mut self, dx: f64, dy: f64, now: Instant) -> Result<(), RenderError> {
        self.viewport = zoom_pan::pan(
            dx,
            dy,
            &self.viewport,
            self.display_width,
            self.display_height,
        )?;

        self.begin_interaction();
        self.request_preview(now);

        Ok(())
    }

    pub fn pinch(
        &mut self,
        scale: f64,
        center: ScreenPoint,
        dx: f64,
        dy: f64,
        now: Instant,
    ) -> Result<(), RenderError> {
        let pinched = zoom_pan::pinch(
            scale,
            center,
            dx,
            dy,
            &self.viewport,
            self.display_width,
            self.display_height,
        )?;
        self.viewport = pinched.with_aspect(self.display_width, self.display_height)?;

        self.begin_interaction();
        self.request_preview(now);

        Ok(())
    }

    fn check_max_iterations(value: u32) -> Result<(), RenderError> {
        if value == 0 {
            return Err(FractalParamsError::ZeroMaxIterations.into());
        }
        Ok(())
    }

    pub fn preview_max_iterations(&mut self, value: u32) -> Result<(), RenderError> {
        Self::check_max_iterations(value)?;

        self.base_max_iterations = value;
        self.begin_interaction();
        self.coalescer.request_render(RenderOptions::PREVIEW);

        Ok(())
    }

    pub fn commit_max_iterations(&mut self, value: u32) -> Result<(), RenderError> {
        Self::check_max_iterations(value)?;

        self.base_max_iterations = value;
        self.request_final();

        Ok(())
    }

    fn check_palette_offset(value: f64) -> Result<(), RenderError> {
        if !value.is_finite() {
            return Err(FractalParamsError::NonFinitePaletteOffset(value).into());
        }
        Ok(())
    }

    pub fn preview_palette_offset(&mut self, value: f64) -> Result<(), RenderError> {
        Self::check_palette_offset(value)?;

        self.params.palette_offset = value;
        self.begin_interaction();
        self.coalescer.request_render(RenderOptions::PREVIEW);

        Ok(())
    }

    pub fn commit_palette_offset(&mut self, value: f64) -> Result<(), RenderError> {
        Self::check_palette_offset(value)?;

        self.params.palette_offset = value;
        self.request_final();

        Ok(())
    }

    fn check_julia_c(value: Complex) -> Result<(), RenderError> {
        if !value.is_finite() {
            return Err(FractalParamsError::NonFiniteJuliaConstant {
                real: value.real,
                imag: value.imag,
            }
            .into());
        }
        Ok(())
    }

    pub fn preview_julia_c(&mut self, value: Complex) -> Result<(), RenderError> {
        Self::check_julia_c(value)?;

        self.params.julia_c = Some(value);
        self.begin_interaction();
        self.coalescer.request_render(RenderOptions::PREVIEW);

        Ok(())
    }

    pub fn commit_julia_c(&mut self, value: Complex) -> Result<(), RenderError> {
        Self::check_julia_c(value)?;

        self.params.julia_c = Some(value);
        self.request_final();

        Ok(())
    }

    /// Switches kind, reframes to the default view and stores it as the
    /// kind's reset target.
    pub fn set_fractal_kind(&mut self, kind: FractalKind) -> Result<(), RenderError> {
        self.params.kind = kind;
        self.apply_startup_view()?;
        self.request_final();

        debug!(%kind, "fractal kind changed");

        Ok(())
    }

    pub fn reset_view(&mut self) -> Result<(), RenderError> {
        match self.startup_views.get(&self.params.kind) {
            Some(view) => {
                self.viewport = view.with_aspect(self.display_width, self.display_height)?;
            }
            None => self.apply_startup_view()?,
        }

        self.request_final();

        Ok(())
    }

    /// Restores the default iteration budget, palette offset and Julia
    /// constant. The view is left alone.
    pub fn reset_settings(&mut self) {
        self.base_max_iterations = self.config.default_max_iterations;
        self.params.palette_offset = 0.0;
        self.params.julia_c = Some(DEFAULT_JULIA_C);
        self.request_final();
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        self.viewport = self.viewport.with_aspect(width, height)?;
        self.display_width = width;
        self.display_height = height;
        self.request_final();

        Ok(())
    }

    /// Raster size for the current render scale, never below one pixel.
    #[must_use]
    pub fn raster_size(&self) -> (u32, u32) {
        let scaled = |side: u32| ((f64::from(side) * self.render_scale).floor() as u32).max(1);
        (scaled(self.display_width), scaled(self.display_height))
    }

    /// Per-refresh scheduling point. Fires the settle timer if due, then
    /// submits at most one job with the latest requested options.
    pub fn frame(&mut self, now: Instant) -> Result<Option<u64>, RenderError> {
        if self.coalescer.take_settled(now) {
            self.end_interaction();
            self.coalescer.request_render(RenderOptions::FINAL);
        }

        let Some(options) = self.coalescer.take_frame() else {
            return Ok(None);
        };

        let (width, height) = self.raster_size();
        let request_id =
            self.controller
                .submit(self.viewport, self.params, width, height, options.preview)?;

        Ok(Some(request_id))
    }

    pub fn on_worker_message(&mut self, message: WorkerMessage) -> Option<BandOutcome> {
        self.controller.on_worker_message(message)
    }

    #[must_use]
    pub fn zoom_factor(&self) -> f64 {
        zoom_level(self.initial_re_width, &self.viewport)
    }

    /// Parameters of the full-quality render, regardless of any interaction
    /// in progress.
    #[must_use]
    pub fn final_params(&self) -> FractalParams {
        FractalParams {
            max_iterations: self.base_max_iterations,
            ..self.params
        }
    }

    #[must_use]
    pub fn export_metadata(&self) -> ExportMetadata {
        ExportMetadata::new(&self.viewport, &self.final_params(), self.zoom_factor())
    }

    /// Renders the current view at export resolution.
    pub fn export_image(
        &self,
        quality: ExportQuality,
        device_pixel_ratio: f64,
    ) -> Result<(PixelBuffer, ExportMetadata), ExportError> {
        let target = export_target(
            self.display_width,
            self.display_height,
            quality,
            device_pixel_ratio,
            self.config.export_max_dimension,
        );
        let image = render_export(
            &self.viewport,
            &self.final_params(),
            target,
            self.config.smooth_colouring,
        )?;

        Ok((image, self.export_metadata()))
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn params(&self) -> &FractalParams {
        &self.params
    }

    #[must_use]
    pub fn base_max_iterations(&self) -> u32 {
        self.base_max_iterations
    }

    #[must_use]
    pub fn render_scale(&self) -> f64 {
        self.render_scale
    }

    #[must_use]
    pub fn display_size(&self) -> (u32, u32) {
        (self.display_width, self.display_height)
    }

    #[must_use]
    pub fn has_pending_render(&self) -> bool {
        self.coalescer.has_pending()
    }

    #[must_use]
    pub fn settle_deadline(&self) -> Option<Instant> {
        self.coalescer.settle_deadline()
    }

    #[must_use]
    pub fn surface(&self) -> &DisplaySurface {
        self.controller.surface()
    }

    #[must_use]
    pub fn controller(&self) -> &RenderJobController<D> {
        &self.controller
    }

    #[must_use]
    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }
}
