//! GUI input adapter for interactive Mandelbrot exploration.
//!
//! This module provides a windowed interface using winit for window management,
//! pixels for framebuffer rendering, and egui for the status overlay.

pub mod app;
pub mod commands;
pub mod events;
