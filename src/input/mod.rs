//! Window-side entry points. Everything here is behind the `gui` feature;
//! the CLI binary drives the library directly.

#[cfg(feature = "gui")]
pub mod gui;
