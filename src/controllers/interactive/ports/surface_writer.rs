/// Destination for composited bands.
pub trait SurfaceWriter {
    fn size(&self) -> (u32, u32);

    /// Reallocates to `width` x `height`. The new contents are cleared.
    fn resize(&mut self, width: u32, height: u32);

    /// Copies RGBA rows starting at `y_start`. Returns the rows written.
    fn write_rows(&mut self, y_start: u32, rgba: &[u8]) -> u32;
}
