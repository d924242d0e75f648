//! Port definitions for the interactive controller.
//!
//! Traits at the seams between the controller, the raster worker and the
//! presentation layer.

pub mod job_dispatcher;
pub mod render_listener;
pub mod surface_writer;
pub mod worker_message_port;
