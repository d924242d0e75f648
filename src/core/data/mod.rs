pub mod band;
pub mod colour;
pub mod complex;
pub mod fractal_params;
pub mod pixel_buffer;
pub mod raster_job;
pub mod viewport;
