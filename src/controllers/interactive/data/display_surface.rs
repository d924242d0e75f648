use crate::controllers::interactive::ports::surface_writer::SurfaceWriter;
use crate::core::data::pixel_buffer::{BYTES_PER_PIXEL, PixelBuffer};

/// The persistent RGBA image bands are composited into. It keeps the last
/// good frame on screen while newer bands stream in over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplaySurface {
    buffer: PixelBuffer,
}

impl DisplaySurface {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            buffer: PixelBuffer::new(width, height),
        }
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        self.buffer.buffer()
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    /// Nearest-neighbour copy into a `dst_width` x `dst_height` RGBA frame, so
    /// a reduced-resolution preview fills the whole display.
    pub fn blit_scaled(&self, dst: &mut [u8], dst_width: u32, dst_height: u32) {
        let (src_width, src_height) = (self.width(), self.height());

        if src_width == 0 || src_height == 0 || dst_width == 0 || dst_height == 0 {
            dst.fill(0);
            return;
        }

        let src = self.pixels();
        let dst_row_bytes = dst_width as usize * BYTES_PER_PIXEL;

        for (dy, row) in dst.chunks_exact_mut(dst_row_bytes).take(dst_height as usize).enumerate() {
            let sy = (dy as u64 * u64::from(src_height) / u64::from(dst_height)) as usize;

            for (dx, pixel) in row.chunks_exact_mut(BYTES_PER_PIXEL).enumerate() {
                let sx = (dx as u64 * u64::from(src_width) / u64::from(dst_width)) as usize;
                let index = (sy * src_width as usize + sx) * BYTES_PER_PIXEL;
                pixel.copy_from_slice(&src[index..index + BYTES_PER_PIXEL]);
            }
        }
    }
}

impl SurfaceWriter for DisplaySurface {
    fn size(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.buffer = PixelBuffer::new(width, height);
    }

    fn write_rows(&mut self, y_start: u32, rgba: &[u8]) -> u32 {
        self.buffer.write_rows(y_start, rgba)
    }
}
