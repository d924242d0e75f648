use std::time::{Duration, Instant};

use crate::controllers::export::export::ExportQuality;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_params::{FractalKind, FractalParams};
use crate::core::navigation::zoom_pan::ScreenPoint;

const DOUBLE_CLICK_WINDOW: Duration = Duration::from_millis(300);

/// Slider widgets render a preview while dragged and a final render once
/// released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderEdit {
    Preview,
    Commit,
}

/// Edits made in the settings panel, applied to the session after the egui
/// pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiAction {
    SetKind(FractalKind),
    MaxIterations(u32, SliderEdit),
    PaletteOffset(f64, SliderEdit),
    JuliaConstant(Complex, SliderEdit),
    ResetView,
    ResetSettings,
    Export(ExportQuality),
}

/// Maps a slider's response flags onto an edit. A change that is not part of
/// a drag (keyboard or text entry) commits straight away.
#[must_use]
pub fn slider_edit(changed: bool, dragging: bool, drag_released: bool) -> Option<SliderEdit> {
    if drag_released || (changed && !dragging) {
        Some(SliderEdit::Commit)
    } else if changed {
        Some(SliderEdit::Preview)
    } else {
        None
    }
}

/// Widget-side copies of the session settings.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub kind: FractalKind,
    pub max_iterations: u32,
    pub palette_offset: f64,
    pub julia_cr: f64,
    pub julia_ci: f64,
    pub export_quality: ExportQuality,
    pub status: Option<String>,
}

impl UiState {
    #[must_use]
    pub fn from_params(params: &FractalParams, base_max_iterations: u32) -> Self {
        let julia_c = params.julia_constant();

        Self {
            kind: params.kind,
            max_iterations: base_max_iterations,
            palette_offset: params.palette_offset,
            julia_cr: julia_c.real,
            julia_ci: julia_c.imag,
            export_quality: ExportQuality::default(),
            status: None,
        }
    }

    /// Refreshes the widget values after the session changed them, keeping
    /// the export choice and status line.
    pub fn sync(&mut self, params: &FractalParams, base_max_iterations: u32) {
        let export_quality = self.export_quality;
        let status = self.status.take();

        *self = Self {
            export_quality,
            status,
            ..Self::from_params(params, base_max_iterations)
        };
    }

    #[must_use]
    pub fn julia_constant(&self) -> Complex {
        Complex::new(self.julia_cr, self.julia_ci)
    }
}

/// Pointer tracking for drag panning and double-click zoom.
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Option<ScreenPoint>,
    dragging: bool,
    last_press: Option<Instant>,
}

impl PointerState {
    #[must_use]
    pub fn position(&self) -> Option<ScreenPoint> {
        self.position
    }

    /// Records a move and returns the drag delta if a drag is in progress.
    pub fn moved_to(&mut self, point: ScreenPoint) -> Option<(f64, f64)> {
        let previous = self.position.replace(point);

        match previous {
            Some(previous) if self.dragging => Some((point.x - previous.x, point.y - previous.y)),
            _ => None,
        }
    }

    /// Starts a drag. Returns `true` when the press completes a double click.
    pub fn press(&mut self, now: Instant) -> bool {
        self.dragging = true;

        match self.last_press {
            Some(last) if now.duration_since(last) <= DOUBLE_CLICK_WINDOW => {
                self.last_press = None;
                true
            }
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }

    pub fn release(&mut self) {
        self.dragging = false;
    }

    pub fn left(&mut self) {
        self.position = None;
        self.dragging = false;
    }
}
