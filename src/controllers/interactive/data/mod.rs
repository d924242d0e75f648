pub mod display_surface;
pub mod render_options;
