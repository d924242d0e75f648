use crate::controllers::export::metadata::ExportMetadata;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::actions::cancellation::NeverCancel;
use crate::core::actions::rasterize_bands::rasterize_bands::{
    RasterizeError, RasterizeOptions, rasterize_cancelable,
};
use crate::core::colouring::palette_cache::PaletteCache;
use crate::core::data::band::Band;
use crate::core::data::fractal_params::FractalParams;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::raster_job::{InvalidJobError, RasterJob};
use crate::core::data::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{info, warn};

use crate::storage::write_json::write_json;

/// Request id carried by export jobs; exports never share a controller with
/// interactive renders.
pub const EXPORT_REQUEST_ID: u64 = 0;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("invalid export job: {0}")]
    InvalidJob(#[from] InvalidJobError),
    #[error("export render failed: {0}")]
    Rasterize(#[from] RasterizeError),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
    #[error("unknown export quality: {0}")]
    UnknownQuality(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportQuality {
    Standard,
    #[default]
    Hd,
    Ultra,
    Ultra4,
}

impl ExportQuality {
    pub const ALL: [Self; 4] = [Self::Standard, Self::Hd, Self::Ultra, Self::Ultra4];

    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Standard => "Standard",
            Self::Hd => "HD",
            Self::Ultra => "Ultra",
            Self::Ultra4 => "Ultra 4x",
        }
    }

    /// Integer upscale relative to the display size. The device pixel ratio
    /// is rounded and never below 1.
    #[must_use]
    pub fn scale(self, device_pixel_ratio: f64) -> u32 {
        let dpr = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.round().max(1.0).min(f64::from(u16::MAX)) as u32
        } else {
            1
        };

        match self {
            Self::Standard => 1,
            Self::Hd => dpr,
            Self::Ultra => (dpr * 2).min(4),
            Self::Ultra4 => 4,
        }
    }
}

impl FromStr for ExportQuality {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "standard" => Ok(Self::Standard),
            "hd" => Ok(Self::Hd),
            "ultra" => Ok(Self::Ultra),
            "ultra4" => Ok(Self::Ultra4),
            other => Err(ExportError::UnknownQuality(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportTarget {
    pub width: u32,
    pub height: u32,
    /// Set when the scaled size had to shrink to fit `max_dimension`.
    pub downscaled: bool,
}

fn scaled_side(side: u32, factor: f64) -> u32 {
    ((f64::from(side) * factor).floor() as u32).max(1)
}

#[must_use]
pub fn export_target(
    display_width: u32,
    display_height: u32,
    quality: ExportQuality,
    device_pixel_ratio: f64,
    max_dimension: u32,
) -> ExportTarget {
    let scale = quality.scale(device_pixel_ratio);
    let width = display_width.max(1).saturating_mul(scale);
    let height = display_height.max(1).saturating_mul(scale);
    let max_dimension = max_dimension.max(1);

    if width <= max_dimension && height <= max_dimension {
        return ExportTarget {
            width,
            height,
            downscaled: false,
        };
    }

    let factor = (f64::from(max_dimension) / f64::from(width))
        .min(f64::from(max_dimension) / f64::from(height));

    ExportTarget {
        width: scaled_side(width, factor),
        height: scaled_side(height, factor),
        downscaled: true,
    }
}

/// Renders the view at export resolution as a single band.
#[tracing::instrument(skip_all, fields(width = target.width, height = target.height, kind = %params.kind))]
pub fn render_export(
    viewport: &Viewport,
    params: &FractalParams,
    target: ExportTarget,
    smooth_colouring: bool,
) -> Result<PixelBuffer, ExportError> {
    let job = RasterJob::new(
        EXPORT_REQUEST_ID,
        target.width,
        target.height,
        *viewport,
        *params,
        false,
    )?;
    let options = RasterizeOptions {
        band_height: NonZeroU32::new(target.height).unwrap_or(NonZeroU32::MIN),
        smooth_colouring,
    };
    let mut image = PixelBuffer::new(target.width, target.height);

    rasterize_cancelable(
        &job,
        options,
        &mut PaletteCache::default(),
        &NeverCancel,
        &mut |band: Band| {
            image.write_rows(band.y_start(), band.pixels());
        },
    )?;

    if target.downscaled {
        warn!("export downscaled to fit the maximum dimension");
    }

    Ok(image)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    pub image: PathBuf,
    pub metadata: PathBuf,
}

/// Writes the image through `presenter` and the metadata as a JSON sidecar
/// with the same stem. The stem defaults to the metadata's file stem.
pub fn write_export<P: FilePresenterPort>(
    presenter: &P,
    image: &PixelBuffer,
    metadata: &ExportMetadata,
    dir: &Path,
    stem: Option<&str>,
) -> Result<ExportedFiles, ExportError> {
    let stem = stem.map_or_else(|| metadata.file_stem(), str::to_string);
    fs::create_dir_all(dir)?;

    let files = ExportedFiles {
        image: dir.join(format!("{stem}.{}", presenter.extension())),
        metadata: dir.join(format!("{stem}.json")),
    };

    presenter.present(image, &files.image)?;
    write_json(metadata, &files.metadata)?;

    info!(image = %files.image.display(), metadata = %files.metadata.display(), "export written");

    Ok(files)
}
