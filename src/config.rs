use crate::core::actions::rasterize_bands::rasterize_bands::{DEFAULT_BAND_HEIGHT, RasterizeOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Tuning knobs for rendering and interaction. Every field has a default, so
/// a config file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExplorerConfig {
    /// Rows per streamed band.
    pub band_height: u32,
    pub smooth_colouring: bool,
    /// Raster scale used while the user is interacting, in `(0, 1]`.
    pub interaction_scale: f64,
    /// Quiet period after the last interaction before the final render.
    pub settle_ms: u64,
    pub preview_iteration_ratio: f64,
    pub preview_iteration_floor: u32,
    /// Per-step zoom factor, in `(0, 1)`.
    pub zoom_base: f64,
    pub default_max_iterations: u32,
    pub startup_zoom_out: f64,
    pub export_max_dimension: u32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            band_height: DEFAULT_BAND_HEIGHT.get(),
            smooth_colouring: true,
            interaction_scale: 0.5,
            settle_ms: 140,
            preview_iteration_ratio: 0.6,
            preview_iteration_floor: 32,
            zoom_base: 0.9,
            default_max_iterations: 100,
            startup_zoom_out: 1.33,
            export_max_dimension: 8000,
        }
    }
}

fn invalid(field: &'static str, reason: &'static str) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

impl ExplorerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.band_height == 0 {
            return Err(invalid("band_height", "must be at least 1"));
        }

        if !(self.interaction_scale > 0.0 && self.interaction_scale <= 1.0) {
            return Err(invalid("interaction_scale", "must be in (0, 1]"));
        }

        if !(self.preview_iteration_ratio > 0.0 && self.preview_iteration_ratio <= 1.0) {
            return Err(invalid("preview_iteration_ratio", "must be in (0, 1]"));
        }

        if !(self.zoom_base > 0.0 && self.zoom_base < 1.0) {
            return Err(invalid("zoom_base", "must be in (0, 1)"));
        }

        if self.default_max_iterations == 0 {
            return Err(invalid("default_max_iterations", "must be at least 1"));
        }

        if self.preview_iteration_floor == 0 {
            return Err(invalid("preview_iteration_floor", "must be at least 1"));
        }

        if !(self.startup_zoom_out.is_finite() && self.startup_zoom_out > 0.0) {
            return Err(invalid("startup_zoom_out", "must be positive"));
        }

        if self.export_max_dimension == 0 {
            return Err(invalid("export_max_dimension", "must be at least 1"));
        }

        Ok(())
    }

    #[must_use]
    pub fn rasterize_options(&self) -> RasterizeOptions {
        RasterizeOptions {
            band_height: NonZeroU32::new(self.band_height).unwrap_or(DEFAULT_BAND_HEIGHT),
            smooth_colouring: self.smooth_colouring,
        }
    }

    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Iteration budget for interactive previews: a fraction of the baseline,
    /// raised to the floor, never above the baseline itself.
    #[must_use]
    pub fn preview_iterations(&self, baseline: u32) -> u32 {
        let scaled = (f64::from(baseline) * self.preview_iteration_ratio).floor() as u32;
        scaled.max(self.preview_iteration_floor).min(baseline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ExplorerConfig::default();

        assert!(config.validate().is_ok());
        assert_eq!(config.band_height, 32);
        assert_eq!(config.settle_delay(), Duration::from_millis(140));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = ExplorerConfig::from_json_str(r#"{ "band_height": 8, "zoom_base": 0.8 }"#).unwrap();

        assert_eq!(config.band_height, 8);
        assert_eq!(config.zoom_base, 0.8);
        assert_eq!(config.default_max_iterations, 100);
        assert_eq!(config.rasterize_options().band_height.get(), 8);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let result = ExplorerConfig::from_json_str(r#"{ "band_hieght": 8 }"#);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_out_of_range_values() {
        let cases = [
            ExplorerConfig {
                band_height: 0,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                interaction_scale: 1.5,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                preview_iteration_ratio: 0.0,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                zoom_base: 1.0,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                default_max_iterations: 0,
                ..ExplorerConfig::default()
            },
            ExplorerConfig {
                interaction_scale: f64::NAN,
                ..ExplorerConfig::default()
            },
        ];

        for config in cases {
            assert!(
                matches!(config.validate(), Err(ConfigError::Invalid { .. })),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_preview_iterations() {
        let config = ExplorerConfig::default();

        assert_eq!(config.preview_iterations(100), 60);
        assert_eq!(config.preview_iterations(40), 32);
        assert_eq!(config.preview_iterations(10), 10);
        assert_eq!(config.preview_iterations(1000), 600);
    }

    #[test]
    fn test_load_missing_file() {
        let result = ExplorerConfig::load("/nonexistent/fractal_explorer.json");

        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
