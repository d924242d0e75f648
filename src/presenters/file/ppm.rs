use crate::adapters::pixel_format::copy_rgba_to_rgb;
use crate::controllers::ports::file_presenter::FilePresenterPort;
use crate::core::data::pixel_buffer::PixelBuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Binary PPM (P6) output. PPM has no alpha channel, so alpha is dropped.
#[derive(Debug, Default, Clone, Copy)]
pub struct PpmFilePresenter;

impl PpmFilePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl FilePresenterPort for PpmFilePresenter {
    fn extension(&self) -> &'static str {
        "ppm"
    }

    fn present(&self, buffer: &PixelBuffer, filepath: &Path) -> std::io::Result<()> {
        let mut rgb = vec![0; buffer.buffer().len() / 4 * 3];
        copy_rgba_to_rgb(buffer.buffer(), &mut rgb);

        let mut file = BufWriter::new(File::create(filepath)?);

        // PPM header: P6 means binary RGB, then width, height and max_colour
        writeln!(file, "P6")?;
        writeln!(file, "{} {}", buffer.width(), buffer.height())?;
        writeln!(file, "255")?;
        file.write_all(&rgb)?;
        file.flush()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_writes_p6_header_and_rgb_payload() {
        let buffer = PixelBuffer::from_data(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 255]).unwrap();
        let path = std::env::temp_dir().join(format!("ppm_presenter_{}.ppm", std::process::id()));

        PpmFilePresenter::new().present(&buffer, &path).unwrap();
        let bytes = fs::read(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let header = b"P6\n2 1\n255\n";
        assert_eq!(&bytes[..header.len()], header);
        assert_eq!(&bytes[header.len()..], &[255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let buffer = PixelBuffer::new(1, 1);
        let path = Path::new("/nonexistent-dir/out.ppm");

        assert!(PpmFilePresenter::new().present(&buffer, path).is_err());
    }
}
