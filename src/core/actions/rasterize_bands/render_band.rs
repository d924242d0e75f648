use rayon::prelude::*;

use crate::core::actions::rasterize_bands::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::colouring::palette::Palette;
use crate::core::colouring::write_colour::shade_pixel;
use crate::core::data::band::{Band, BandError};
use crate::core::data::complex::Complex;
use crate::core::data::raster_job::RasterJob;
use crate::core::util::calculate_bands::BandSpan;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;

/// Computes and colours every pixel of one band. Rows are independent, so they
/// are spread across rayon's pool; the band is only returned once all of its
/// rows are written.
pub fn render_band<Alg>(
    job: &RasterJob,
    algorithm: &Alg,
    palette: &Palette,
    mapping: &PlaneMapping,
    span: BandSpan,
    smooth: bool,
) -> Result<Band, BandError>
where
    Alg: FractalAlgorithm,
{
    let row_bytes = job.row_bytes();
    let max_iterations = job.params().max_iterations;
    let mut pixels = vec![0; row_bytes * span.rows as usize];

    pixels
        .par_chunks_mut(row_bytes)
        .enumerate()
        .for_each(|(row, out)| {
            let imag = mapping.imag_at(span.y_start + row as u32);

            for (x, pixel) in out.chunks_exact_mut(4).enumerate() {
                let point = Complex {
                    real: mapping.real_at(x as u32),
                    imag,
                };
                shade_pixel(pixel, algorithm.compute(point), max_iterations, palette, smooth);
            }
        });

    Band::new(job.request_id(), job.width(), span.y_start, span.rows, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::colouring::palette::build_palette;
    use crate::core::data::fractal_params::FractalParams;
    use crate::core::data::viewport::Viewport;
    use crate::core::fractals::kernel::FractalKernel;

    #[test]
    fn test_band_covers_requested_rows() {
        let viewport = Viewport::new(-2.0, 1.0, -1.0, 1.0).unwrap();
        let job = RasterJob::new(5, 8, 6, viewport, FractalParams::mandelbrot(50), false).unwrap();
        let kernel = FractalKernel::from_params(job.params());
        let palette = build_palette(50, 0.0);
        let mapping = PlaneMapping::new(&viewport, 8, 6);
        let span = BandSpan {
            y_start: 2,
            rows: 3,
        };

        let band = render_band(&job, &kernel, &palette, &mapping, span, true).unwrap();

        assert_eq!(band.request_id(), 5);
        assert_eq!(band.y_start(), 2);
        assert_eq!(band.height(), 3);
        assert_eq!(band.pixels().len(), 8 * 3 * 4);
        assert!(band.pixels().chunks_exact(4).all(|p| p[3] == 255));
    }

    #[test]
    fn test_band_matches_per_pixel_shading() {
        let viewport = Viewport::new(-1.5, 0.5, -1.0, 1.0).unwrap();
        let job = RasterJob::new(1, 5, 5, viewport, FractalParams::burning_ship(40), false).unwrap();
        let kernel = FractalKernel::from_params(job.params());
        let palette = build_palette(40, 0.0);
        let mapping = PlaneMapping::new(&viewport, 5, 5);
        let span = BandSpan {
            y_start: 0,
            rows: 5,
        };

        let band = render_band(&job, &kernel, &palette, &mapping, span, false).unwrap();

        for y in 0..5 {
            for x in 0..5 {
                let mut expected = [0; 4];
                let escape = kernel.compute(mapping.pixel_to_complex_coords(x, y));
                shade_pixel(&mut expected, escape, 40, &palette, false);

                let index = ((y * 5 + x) * 4) as usize;
                assert_eq!(&band.pixels()[index..index + 4], &expected);
            }
        }
    }
}
