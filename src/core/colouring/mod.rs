pub mod palette;
pub mod palette_cache;
pub mod write_colour;
