pub mod zoom_pan;
