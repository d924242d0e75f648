//! Interactive controller for progressive fractal rendering.
//!
//! The session turns gestures and slider changes into coalesced render
//! requests, the controller submits them to the raster worker and composites
//! the bands that come back.
//!
//! # Architecture
//!
//! The interactive controller follows the ports & adapters pattern:
//! - **Input**: gestures and settings applied to [`session::ExplorerSession`]
//! - **Output**: `WorkerMessagePort`, `RenderListener` and `SurfaceWriter` ports
//! - **Core**: uses the band rasterizer from `core/` for the computation

pub mod coalescer;
pub mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
pub mod session;
pub mod worker;
