pub mod band_sink;
pub mod fractal_algorithm;
