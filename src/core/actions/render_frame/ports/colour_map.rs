use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::errors::ColourMapError;

/// Turns an escape-time result into a pixel colour.
///
/// Called concurrently from every render worker.
pub trait ColourMap: Send + Sync {
    fn map(&self, iterations: u32, max_iterations: u32) -> Result<Colour, ColourMapError>;
}
