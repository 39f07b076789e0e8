use crate::core::data::complex::Complex;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::mandelbrot::iteration_budget::IterationBudget;

pub const CANVAS_WIDTH: u32 = 800;
pub const CANVAS_HEIGHT: u32 = 800;
pub const INITIAL_MIN: Complex = Complex::new(-2.0, -1.5);
pub const INITIAL_MAX: Complex = Complex::new(1.0, 1.5);
pub const ZOOM_FACTOR: f64 = 0.8;
pub const BASE_ITERATIONS: u32 = 500;
pub const MAX_ITERATIONS_CAP: u32 = 50_000;
pub const PROGRESSIVE_STRIDE: u32 = 4;

/// Session-wide settings fixed at start-up.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MandelbrotConfig {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub initial_min: Complex,
    pub initial_max: Complex,
    /// Applied on primary click; its reciprocal on secondary click.
    pub zoom_factor: f64,
    pub iteration_budget: IterationBudget,
    /// Block size of the progressive preview pass.
    pub progressive_stride: u32,
}

impl Default for MandelbrotConfig {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            initial_min: INITIAL_MIN,
            initial_max: INITIAL_MAX,
            zoom_factor: ZOOM_FACTOR,
            iteration_budget: default_iteration_budget(),
            progressive_stride: PROGRESSIVE_STRIDE,
        }
    }
}

fn default_iteration_budget() -> IterationBudget {
    IterationBudget::new(BASE_ITERATIONS, MAX_ITERATIONS_CAP)
        .expect("default iteration budget is valid")
}

impl MandelbrotConfig {
    /// Same settings on a different canvas size.
    #[must_use]
    pub fn with_canvas(mut self, width: u32, height: u32) -> Self {
        self.canvas_width = width;
        self.canvas_height = height;
        self
    }

    pub fn initial_viewport(&self) -> Result<Viewport, ViewportError> {
        Viewport::new(
            self.initial_min,
            self.initial_max,
            self.canvas_width,
            self.canvas_height,
        )
    }
}
