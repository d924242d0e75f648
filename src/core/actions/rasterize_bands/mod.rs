pub mod ports;
pub mod rasterize_bands;
pub mod render_band;
