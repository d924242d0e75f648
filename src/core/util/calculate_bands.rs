use std::num::NonZeroU32;

/// Rows `[y_start, y_start + rows)` of one band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BandSpan {
    pub y_start: u32,
    pub rows: u32,
}

/// Splits `height` rows into consecutive bands of `band_height` rows; the
/// last band may be shorter.
pub fn calculate_bands(height: u32, band_height: NonZeroU32) -> impl Iterator<Item = BandSpan> {
    let band_height = band_height.get();

    (0..height)
        .step_by(band_height as usize)
        .map(move |y_start| BandSpan {
            y_start,
            rows: band_height.min(height - y_start),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bands(height: u32, band_height: u32) -> Vec<BandSpan> {
        calculate_bands(height, NonZeroU32::new(band_height).unwrap()).collect()
    }

    #[test]
    fn test_exact_division() {
        assert_eq!(
            bands(4, 2),
            vec![
                BandSpan {
                    y_start: 0,
                    rows: 2
                },
                BandSpan {
                    y_start: 2,
                    rows: 2
                },
            ]
        );
    }

    #[test]
    fn test_short_last_band() {
        let spans = bands(10, 4);

        assert_eq!(spans.len(), 3);
        assert_eq!(
            spans[2],
            BandSpan {
                y_start: 8,
                rows: 2
            }
        );
    }

    #[test]
    fn test_band_taller_than_raster() {
        assert_eq!(
            bands(3, 32),
            vec![BandSpan {
                y_start: 0,
                rows: 3
            }]
        );
    }

    #[test]
    fn test_rows_covered_exactly_once() {
        for height in 1..40 {
            for band_height in 1..9 {
                let spans = bands(height, band_height);
                let mut next = 0;

                for span in &spans {
                    assert_eq!(span.y_start, next);
                    assert!(span.rows > 0 && span.rows <= band_height);
                    next += span.rows;
                }

                assert_eq!(next, height);
            }
        }
    }

    #[test]
    fn test_zero_height_yields_no_bands() {
        assert!(bands(0, 4).is_empty());
    }
}
