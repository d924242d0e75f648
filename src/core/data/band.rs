use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandError {
    #[error("band of {width}x{height} needs {expected} bytes, got {actual}")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("band must have non-zero size: {width}x{height}")]
    Empty { width: u32, height: u32 },
    #[error("band of {height} rows at y={y_start} runs past the last addressable row")]
    RowOverflow { y_start: u32, height: u32 },
}

/// A finished horizontal strip of RGBA rows, tagged with the request that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    request_id: u64,
    width: u32,
    y_start: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Band {
    pub fn new(
        request_id: u64,
        width: u32,
        y_start: u32,
        height: u32,
        pixels: Vec<u8>,
    ) -> Result<Self, BandError> {
        if width == 0 || height == 0 {
            return Err(BandError::Empty { width, height });
        }

        if y_start.checked_add(height).is_none() {
            return Err(BandError::RowOverflow { y_start, height });
        }

        let expected = width as usize * height as usize * 4;

        if pixels.len() != expected {
            return Err(BandError::LengthMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self {
            request_id,
            width,
            y_start,
            height,
            pixels,
        })
    }

    #[must_use]
    pub fn request_id(&self) -> u64 {
        self.request_id
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn y_start(&self) -> u32 {
        self.y_start
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// One past the last row this band covers. Cannot overflow; `new`
    /// rejects such bands.
    #[must_use]
    pub fn y_end(&self) -> u32 {
        self.y_start + self.height
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[must_use]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid_band() {
        let band = Band::new(3, 2, 4, 2, vec![9; 16]).unwrap();

        assert_eq!(band.request_id(), 3);
        assert_eq!(band.y_start(), 4);
        assert_eq!(band.y_end(), 6);
        assert_eq!(band.pixels().len(), 16);
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        assert_eq!(
            Band::new(1, 2, 0, 2, vec![0; 15]),
            Err(BandError::LengthMismatch {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn test_new_rejects_empty_band() {
        assert_eq!(
            Band::new(1, 0, 0, 2, Vec::new()),
            Err(BandError::Empty {
                width: 0,
                height: 2
            })
        );
    }

    #[test]
    fn test_new_rejects_rows_past_u32_range() {
        assert_eq!(
            Band::new(1, 1, u32::MAX, 4, vec![0; 16]),
            Err(BandError::RowOverflow {
                y_start: u32::MAX,
                height: 4
            })
        );

        let last = Band::new(1, 1, u32::MAX - 1, 1, vec![0; 4]).unwrap();
        assert_eq!(last.y_end(), u32::MAX);
    }
}
