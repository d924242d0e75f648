//! Interactive explorer window.
//!
//! winit owns the event loop, `pixels` holds the framebuffer the display
//! surface is blitted into, and egui draws the settings panel on top.
//! Worker bands arrive as [`events::GuiEvent`]s through the loop proxy.

pub mod app;
pub mod commands;
pub mod events;
pub mod ui_state;
