use std::num::NonZeroU32;

use tracing::{debug, trace};

use crate::core::actions::cancellation::{CancelToken, Cancelled, NeverCancel};
use crate::core::actions::rasterize_bands::ports::band_sink::BandSink;
use crate::core::actions::rasterize_bands::render_band::render_band;
use crate::core::colouring::palette_cache::PaletteCache;
use crate::core::data::band::BandError;
use crate::core::data::raster_job::RasterJob;
use crate::core::fractals::kernel::FractalKernel;
use crate::core::util::calculate_bands::calculate_bands;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;
use thiserror::Error;

pub const DEFAULT_BAND_HEIGHT: NonZeroU32 = NonZeroU32::new(32).unwrap();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterizeOptions {
    pub band_height: NonZeroU32,
    /// Smooth colouring for final renders. Previews always use flat bands.
    pub smooth_colouring: bool,
}

impl Default for RasterizeOptions {
    fn default() -> Self {
        Self {
            band_height: DEFAULT_BAND_HEIGHT,
            smooth_colouring: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterizeSummary {
    pub bands: u32,
    pub rows: u32,
}

/// Error type for cancelable rasterization.
///
/// Cancellation is expected control flow when a newer job supersedes this
/// one; callers should not surface it as a failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RasterizeError {
    #[error(transparent)]
    Cancelled(#[from] Cancelled),
    #[error("band assembly failed: {0}")]
    Band(#[from] BandError),
}

/// Renders `job` top to bottom, handing each finished band to `sink`.
///
/// Bands arrive in increasing `y_start` order, together cover every row
/// exactly once, and each band is complete when emitted. Smoothing follows
/// the default options and is turned off for preview jobs.
pub fn rasterize<S>(job: &RasterJob, band_height: NonZeroU32, sink: &mut S) -> Result<RasterizeSummary, BandError>
where
    S: BandSink,
{
    let options = RasterizeOptions {
        band_height,
        ..RasterizeOptions::default()
    };

    rasterize_cancelable(job, options, &mut PaletteCache::default(), &NeverCancel, sink).map_err(
        |e| match e {
            RasterizeError::Band(band) => band,
            RasterizeError::Cancelled(_) => {
                unreachable!("NeverCancel token should never signal cancellation")
            }
        },
    )
}

/// Like [`rasterize`], but polls `cancel` before each band and reuses the
/// palette held in `palettes` when the job's key matches.
///
/// Returns [`RasterizeError::Cancelled`] once the token fires. Bands already
/// handed to the sink stay valid.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(
        request_id = job.request_id(),
        width = job.width(),
        height = job.height(),
        preview = job.preview(),
    )
)]
pub fn rasterize_cancelable<S, C>(
    job: &RasterJob,
    options: RasterizeOptions,
    palettes: &mut PaletteCache,
    cancel: &C,
    sink: &mut S,
) -> Result<RasterizeSummary, RasterizeError>
where
    S: BandSink,
    C: CancelToken,
{
    let params = job.params();
    let kernel = FractalKernel::from_params(params);
    let palette = palettes.get_or_build(params.max_iterations, params.palette_offset);
    let mapping = PlaneMapping::new(job.viewport(), job.width(), job.height());
    let smooth = options.smooth_colouring && !job.preview();
    let mut summary = RasterizeSummary::default();

    for span in calculate_bands(job.height(), options.band_height) {
        if let Err(cancelled) = cancel.checkpoint() {
            debug!(rows_done = summary.rows, "rasterization cancelled");
            return Err(cancelled.into());
        }

        let band = render_band(job, &kernel, palette, &mapping, span, smooth)?;
        trace!(y_start = span.y_start, rows = span.rows, "band rendered");

        sink.emit(band);
        summary.bands += 1;
        summary.rows += span.rows;
    }

    Ok(summary)
}
