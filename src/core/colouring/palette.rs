use crate::core::data::colour::Colour;
use std::f64::consts::TAU;

const CHANNEL_PHASES: [f64; 3] = [0.0, 1.0 / 3.0, 2.0 / 3.0];

// Snap the wrapped offset so `offset` and `offset + k` select the same table.
const OFFSET_RESOLUTION: f64 = 1e9;

/// Cyclic cosine colour table with exactly one entry per iteration count.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colours: Vec<Colour>,
}

impl Palette {
    #[must_use]
    pub fn len(&self) -> usize {
        self.colours.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colours.is_empty()
    }

    /// Entry at `index`, clamped to the last entry.
    #[must_use]
    pub fn colour(&self, index: u32) -> Colour {
        let last = self.colours.len().saturating_sub(1);
        self.colours
            .get((index as usize).min(last))
            .copied()
            .unwrap_or(Colour::BLACK)
    }

    #[must_use]
    pub fn colours(&self) -> &[Colour] {
        &self.colours
    }
}

fn wrap_offset(offset: f64) -> f64 {
    let wrapped = offset.rem_euclid(1.0);
    (wrapped * OFFSET_RESOLUTION).round() / OFFSET_RESOLUTION
}

fn channel(t: f64, phase: f64) -> u8 {
    (128.0 + 127.0 * (TAU * (t + phase)).cos())
        .floor()
        .clamp(0.0, 255.0) as u8
}

/// Builds the `max_iterations`-entry table. Entry `i` samples the cosine wave
/// at `t = frac(i / max_iterations + offset)` with the green and blue channels
/// phase-shifted by a third of a cycle each.
#[must_use]
pub fn build_palette(max_iterations: u32, offset: f64) -> Palette {
    let offset = if offset.is_finite() {
        wrap_offset(offset)
    } else {
        0.0
    };
    let n = f64::from(max_iterations);

    let colours = (0..max_iterations)
        .map(|i| {
            let t = (f64::from(i) / n + offset).rem_euclid(1.0);
            Colour {
                r: channel(t, CHANNEL_PHASES[0]),
                g: channel(t, CHANNEL_PHASES[1]),
                b: channel(t, CHANNEL_PHASES[2]),
            }
        })
        .collect();

    Palette { colours }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_has_one_entry_per_iteration() {
        assert_eq!(build_palette(100, 0.0).len(), 100);
        assert_eq!(build_palette(1, 0.3).len(), 1);
        assert!(build_palette(0, 0.0).is_empty());
    }

    #[test]
    fn test_first_entry_at_zero_offset() {
        let palette = build_palette(100, 0.0);

        // cos(0) = 1, cos(2pi/3) = cos(4pi/3) = -0.5
        assert_eq!(
            palette.colour(0),
            Colour {
                r: 255,
                g: 64,
                b: 64
            }
        );
    }

    #[test]
    fn test_palette_is_deterministic() {
        assert_eq!(build_palette(256, 0.42), build_palette(256, 0.42));
    }

    #[test]
    fn test_offset_wraps_modulo_one() {
        assert_eq!(build_palette(64, 0.25), build_palette(64, 1.25));
        assert_eq!(build_palette(64, 0.3), build_palette(64, 1.3));
        assert_eq!(build_palette(64, -0.75), build_palette(64, 0.25));
    }

    #[test]
    fn test_offset_shifts_the_table() {
        let base = build_palette(4, 0.0);
        let shifted = build_palette(4, 0.25);

        assert_eq!(shifted.colour(0), base.colour(1));
        assert_eq!(shifted.colour(3), base.colour(0));
    }

    #[test]
    fn test_colour_index_clamps_to_last_entry() {
        let palette = build_palette(10, 0.0);

        assert_eq!(palette.colour(50), palette.colour(9));
    }

    #[test]
    fn test_non_finite_offset_treated_as_zero() {
        assert_eq!(build_palette(16, f64::NAN), build_palette(16, 0.0));
    }
}
