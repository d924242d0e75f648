use crate::core::data::complex::Complex;
use crate::core::data::viewport::{Viewport, ViewportError};

/// Per-step scale factor. `n` steps zoom in by `0.9^n` and out by `0.9^-n`.
pub const DEFAULT_ZOOM_BASE: f64 = 0.9;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// A position on the display surface in display pixels; fractional values
/// are allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn center_of(width: u32, height: u32) -> Self {
        Self {
            x: f64::from(width) / 2.0,
            y: f64::from(height) / 2.0,
        }
    }
}

fn check_display(width: u32, height: u32) -> Result<(), ViewportError> {
    if width == 0 || height == 0 {
        return Err(ViewportError::ZeroRaster { width, height });
    }
    Ok(())
}

#[must_use]
pub fn zoom_factor(steps: u32, direction: ZoomDirection, base: f64) -> f64 {
    let factor = base.powi(steps.min(i32::MAX as u32) as i32);

    match direction {
        ZoomDirection::In => factor,
        ZoomDirection::Out => 1.0 / factor,
    }
}

/// Keyboard zoom shortcuts: `+`/`=` and `-` step once, `]`/`[` five
/// times, `}`/`{` ten times.
#[must_use]
pub fn key_zoom(key: char) -> Option<(u32, ZoomDirection)> {
    match key {
        '+' | '=' => Some((1, ZoomDirection::In)),
        '-' => Some((1, ZoomDirection::Out)),
        ']' => Some((5, ZoomDirection::In)),
        '[' => Some((5, ZoomDirection::Out)),
        '}' => Some((10, ZoomDirection::In)),
        '{' => Some((10, ZoomDirection::Out)),
        _ => None,
    }
}

/// Plane point under a display pixel.
#[must_use]
pub fn screen_to_plane(point: ScreenPoint, viewport: &Viewport, width: u32, height: u32) -> Complex {
    Complex {
        real: viewport.min_re() + point.x * viewport.re_extent() / f64::from(width),
        imag: viewport.min_im() + point.y * viewport.im_extent() / f64::from(height),
    }
}

/// Zooms `step_count` steps about the plane point under `center`, which stays
/// fixed on screen.
pub fn zoom_steps(
    step_count: u32,
    direction: ZoomDirection,
    center: ScreenPoint,
    viewport: &Viewport,
    width: u32,
    height: u32,
    base: f64,
) -> Result<Viewport, ViewportError> {
    check_display(width, height)?;

    if step_count == 0 {
        return Ok(*viewport);
    }

    let anchor = screen_to_plane(center, viewport, width, height);
    viewport.scaled_about(anchor, zoom_factor(step_count, direction, base))
}

/// Drags the view by a display-pixel delta; the content follows the pointer.
pub fn pan(
    dx: f64,
    dy: f64,
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> Result<Viewport, ViewportError> {
    check_display(width, height)?;

    let delta_re = -dx * viewport.re_extent() / f64::from(width);
    let delta_im = -dy * viewport.im_extent() / f64::from(height);

    viewport.translated(delta_re, delta_im)
}

/// Two-finger gesture: scale by `1 / scale` about `center`, then pan by the
/// centroid delta. Non-positive or non-finite scales leave the extent alone.
pub fn pinch(
    scale: f64,
    center: ScreenPoint,
    dx: f64,
    dy: f64,
    viewport: &Viewport,
    width: u32,
    height: u32,
) -> Result<Viewport, ViewportError> {
    check_display(width, height)?;

    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    let anchor = screen_to_plane(center, viewport, width, height);
    let scaled = viewport.scaled_about(anchor, 1.0 / scale)?;

    pan(dx, dy, &scaled, width, height)
}

/// Magnification relative to the first framing, for display. Falls back to 1
/// when the ratio is not a positive finite number.
#[must_use]
pub fn zoom_level(initial_re_width: f64, viewport: &Viewport) -> f64 {
    let zoom = initial_re_width / viewport.re_extent();

    if zoom.is_finite() && zoom > 0.0 {
        zoom
    } else {
        1.0
    }
}
