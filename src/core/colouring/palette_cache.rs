use crate::core::colouring::palette::{Palette, build_palette};

/// Keeps the most recently built palette and rebuilds only when the
/// `(max_iterations, offset)` key changes.
#[derive(Debug, Default)]
pub struct PaletteCache {
    entry: Option<(u32, u64, Palette)>,
    builds: u64,
}

impl PaletteCache {
    pub fn get_or_build(&mut self, max_iterations: u32, offset: f64) -> &Palette {
        let key = (max_iterations, offset.to_bits());

        let stale = !matches!(&self.entry, Some((n, bits, _)) if (*n, *bits) == key);

        if stale {
            self.entry = None;
        }

        let builds = &mut self.builds;
        let (_, _, palette) = self.entry.get_or_insert_with(|| {
            *builds += 1;
            (key.0, key.1, build_palette(max_iterations, offset))
        });

        palette
    }

    /// Number of palettes built so far.
    #[must_use]
    pub fn builds(&self) -> u64 {
        self.builds
    }
}
