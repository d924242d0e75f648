pub mod channel_port;
pub mod pixel_format;
