//! Serializable messages exchanged with the render target.
//!
//! Field names follow the camelCase wire format. Conversions into the core
//! types perform all job validation.

pub mod band_message;
pub mod job_message;
