//! Input adapters for the Mandelbrot explorer.
//!
//! This module contains adapters that receive input from various sources
//! and translate them into controller calls.

#[cfg(feature = "gui")]
pub mod gui;
