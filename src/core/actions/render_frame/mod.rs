pub mod ports;
pub mod render_preview;
pub mod render_slices;
