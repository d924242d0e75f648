mod adapters;
mod config;
mod controllers;
mod core;
#[cfg(feature = "gui")]
mod input;
mod presenters;
mod protocol;
mod storage;

pub use crate::adapters::channel_port::ChannelMessagePort;
pub use crate::config::{ConfigError, ExplorerConfig};
pub use crate::controllers::export::export::{
    EXPORT_REQUEST_ID, ExportError, ExportQuality, ExportTarget, ExportedFiles, export_target,
    render_export, write_export,
};
pub use crate::controllers::export::metadata::ExportMetadata;
pub use crate::controllers::interactive::coalescer::{DEFAULT_SETTLE_DELAY, RenderCoalescer};
pub use crate::controllers::interactive::controller::{
    BandOutcome, ControllerState, RenderJobController,
};
pub use crate::controllers::interactive::data::display_surface::DisplaySurface;
pub use crate::controllers::interactive::data::render_options::RenderOptions;
pub use crate::controllers::interactive::errors::render::RenderError;
pub use crate::controllers::interactive::events::worker_message::WorkerMessage;
pub use crate::controllers::interactive::ports::job_dispatcher::JobDispatcher;
pub use crate::controllers::interactive::ports::render_listener::RenderListener;
pub use crate::controllers::interactive::ports::surface_writer::SurfaceWriter;
pub use crate::controllers::interactive::ports::worker_message_port::WorkerMessagePort;
pub use crate::controllers::interactive::session::ExplorerSession;
pub use crate::controllers::interactive::worker::RasterWorker;
pub use crate::controllers::ports::file_presenter::FilePresenterPort;
pub use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
pub use crate::core::actions::rasterize_bands::ports::band_sink::BandSink;
pub use crate::core::actions::rasterize_bands::ports::fractal_algorithm::FractalAlgorithm;
pub use crate::core::actions::rasterize_bands::rasterize_bands::{
    DEFAULT_BAND_HEIGHT, RasterizeError, RasterizeOptions, RasterizeSummary, rasterize,
    rasterize_cancelable,
};
pub use crate::core::colouring::palette::{Palette, build_palette};
pub use crate::core::colouring::palette_cache::PaletteCache;
pub use crate::core::data::band::{Band, BandError};
pub use crate::core::data::complex::Complex;
pub use crate::core::data::fractal_params::{
    DEFAULT_JULIA_C, FractalKind, FractalParams, FractalParamsError,
};
pub use crate::core::data::pixel_buffer::PixelBuffer;
pub use crate::core::data::raster_job::{InvalidJobError, RasterJob};
pub use crate::core::data::viewport::{Viewport, ViewportError};
pub use crate::core::fractals::burning_ship::algorithm::BurningShipAlgorithm;
pub use crate::core::fractals::escape_time::{EscapeResult, smooth_fraction};
pub use crate::core::fractals::julia::algorithm::JuliaAlgorithm;
pub use crate::core::fractals::kernel::{FractalKernel, evaluate};
pub use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
pub use crate::core::navigation::zoom_pan::{
    DEFAULT_ZOOM_BASE, ScreenPoint, ZoomDirection, key_zoom, pan, pinch, screen_to_plane,
    zoom_factor, zoom_level, zoom_steps,
};
pub use crate::presenters::file::ppm::PpmFilePresenter;
pub use crate::protocol::band_message::BandMessage;
pub use crate::protocol::job_message::JobMessage;

#[cfg(feature = "gui")]
pub use crate::input::gui::commands::run_gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use crate::presenters::pixels::factory::PixelsPresenterFactory;
