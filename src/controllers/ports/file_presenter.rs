use std::path::Path;

use crate::core::data::pixel_buffer::PixelBuffer;

/// Writes a finished RGBA image to disk in the presenter's format.
pub trait FilePresenterPort {
    fn extension(&self) -> &'static str;

    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()>;
}
