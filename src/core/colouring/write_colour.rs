use crate::core::colouring::palette::Palette;
use crate::core::fractals::escape_time::{EscapeResult, smooth_fraction};

pub const INSIDE_RGBA: [u8; 4] = [0, 0, 0, 255];

fn lerp(a: u8, b: u8, t: f64) -> u8 {
    (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8
}

/// Writes one RGBA pixel for an escaped point, blending palette entries
/// `iterations` and `iterations + 1` by `t`. The upper index stays at
/// `iterations` when it would run past the table.
pub fn write_colour(pixel: &mut [u8], iterations: u32, t: f64, max_iterations: u32, palette: &Palette) {
    let next = iterations.saturating_add(1);
    let upper = if next < max_iterations { next } else { iterations };
    let c0 = palette.colour(iterations);
    let c1 = palette.colour(upper);

    pixel[0] = lerp(c0.r, c1.r, t);
    pixel[1] = lerp(c0.g, c1.g, t);
    pixel[2] = lerp(c0.b, c1.b, t);
    pixel[3] = 255;
}

/// Colours one pixel from its escape result. Points inside the set are opaque
/// black.
#[inline]
pub fn shade_pixel(
    pixel: &mut [u8],
    escape: EscapeResult,
    max_iterations: u32,
    palette: &Palette,
    smooth: bool,
) {
    if escape.is_inside(max_iterations) {
        pixel.copy_from_slice(&INSIDE_RGBA);
        return;
    }

    let t = if smooth {
        smooth_fraction(escape.iterations, escape.z_final)
    } else {
        0.0
    };

    write_colour(pixel, escape.iterations, t, max_iterations, palette);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colouring::palette::build_palette;
    use crate::core::data::complex::Complex;

    #[test]
    fn test_inside_pixel_is_opaque_black() {
        let palette = build_palette(10, 0.0);
        let mut pixel = [9; 4];
        let escape = EscapeResult {
            iterations: 10,
            z_final: Complex::ZERO,
        };

        shade_pixel(&mut pixel, escape, 10, &palette, true);

        assert_eq!(pixel, [0, 0, 0, 255]);
    }

    #[test]
    fn test_zero_fraction_uses_palette_entry() {
        let palette = build_palette(10, 0.0);
        let mut pixel = [0; 4];

        write_colour(&mut pixel, 3, 0.0, 10, &palette);

        let expected = palette.colour(3);
        assert_eq!(pixel, [expected.r, expected.g, expected.b, 255]);
    }

    #[test]
    fn test_fraction_blends_towards_next_entry() {
        let palette = build_palette(4, 0.0);
        let mut pixel = [0; 4];

        write_colour(&mut pixel, 0, 0.5, 4, &palette);

        let (c0, c1) = (palette.colour(0), palette.colour(1));
        let mid = (f64::from(c0.r) + (f64::from(c1.r) - f64::from(c0.r)) * 0.5) as u8;
        assert_eq!(pixel[0], mid);
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn test_last_entry_does_not_blend_past_table() {
        let palette = build_palette(4, 0.0);
        let mut pixel = [0; 4];

        write_colour(&mut pixel, 3, 0.9, 4, &palette);

        let last = palette.colour(3);
        assert_eq!(pixel, [last.r, last.g, last.b, 255]);
    }

    #[test]
    fn test_escaped_pixel_is_opaque() {
        let palette = build_palette(100, 0.0);
        let mut pixel = [0; 4];
        let escape = EscapeResult {
            iterations: 3,
            z_final: Complex::new(5.0, 0.0),
        };

        shade_pixel(&mut pixel, escape, 100, &palette, true);

        assert_eq!(pixel[3], 255);
    }
}
