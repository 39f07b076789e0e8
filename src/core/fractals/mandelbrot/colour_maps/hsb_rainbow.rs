use crate::core::actions::render_frame::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;
use crate::core::fractals::mandelbrot::errors::ColourMapError;
use crate::core::util::hsb_to_rgb::hsb_to_rgb;

/// Rainbow keyed to escape speed: hue is `iterations / max_iterations` at
/// full saturation and brightness. Members of the set are black.
#[derive(Debug, Default, Copy, Clone)]
pub struct MandelbrotHsbRainbow;

pub const IN_SET_COLOUR: Colour = Colour::BLACK;

impl ColourMap for MandelbrotHsbRainbow {
    fn map(&self, iterations: u32, max_iterations: u32) -> Result<Colour, ColourMapError> {
        if iterations > max_iterations {
            return Err(ColourMapError::IterationsExceedMax {
                iterations,
                max_iterations,
            });
        }

        if iterations == max_iterations {
            return Ok(IN_SET_COLOUR);
        }

        let hue = iterations as f32 / max_iterations as f32;

        Ok(hsb_to_rgb(hue, 1.0, 1.0))
    }
}

impl MandelbrotHsbRainbow {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}
