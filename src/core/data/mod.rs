pub mod colour;
pub mod complex;
pub mod framebuffer;
pub mod point;
pub mod viewport;
