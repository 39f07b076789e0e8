use crate::core::actions::render_frame::ports::colour_map::ColourMap;
use crate::core::data::framebuffer::Framebuffer;
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::errors::ColourMapError;

/// Coarse preview: evaluates the top-left pixel of every `stride`×`stride`
/// block and paints the whole block with its colour.
///
/// Roughly `1 / stride²` of the full cost, which keeps drag feedback fast.
/// A stride of 0 is treated as 1.
pub fn render_preview(
    framebuffer: &mut Framebuffer,
    algorithm: &MandelbrotAlgorithm,
    colour_map: &dyn ColourMap,
    stride: u32,
) -> Result<(), ColourMapError> {
    let stride = stride.max(1);
    let max_iterations = algorithm.max_iterations();

    for y in (0..framebuffer.height()).step_by(stride as usize) {
        for x in (0..framebuffer.width()).step_by(stride as usize) {
            let top_left = Point::new(x as i32, y as i32);
            let colour = colour_map.map(algorithm.compute(top_left), max_iterations)?;

            framebuffer.fill_block(top_left, stride, colour);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::render_frame::render_slices::render_full_serial;
    use crate::core::data::complex::Complex;
    use crate::core::data::viewport::Viewport;
    use crate::core::fractals::mandelbrot::colour_maps::hsb_rainbow::MandelbrotHsbRainbow;

    fn algorithm(width: u32, height: u32) -> MandelbrotAlgorithm {
        let viewport =
            Viewport::new(Complex::new(-2.0, -1.5), Complex::new(1.0, 1.5), width, height)
                .unwrap();

        MandelbrotAlgorithm::new(viewport, 100).unwrap()
    }

    #[test]
    fn test_blocks_share_their_representative_colour() {
        let algorithm = algorithm(16, 16);
        let mut framebuffer = Framebuffer::new(16, 16);

        render_preview(&mut framebuffer, &algorithm, &MandelbrotHsbRainbow, 4).unwrap();

        for block_y in (0..16).step_by(4) {
            for block_x in (0..16).step_by(4) {
                let representative = framebuffer.pixel(Point::new(block_x, block_y));
                for dy in 0..4 {
                    for dx in 0..4 {
                        let pixel = Point::new(block_x + dx, block_y + dy);
                        assert_eq!(framebuffer.pixel(pixel), representative);
                    }
                }
            }
        }
    }

    #[test]
    fn test_representative_pixels_match_full_render() {
        let algorithm = algorithm(12, 12);
        let mut preview = Framebuffer::new(12, 12);
        let mut full = Framebuffer::new(12, 12);

        render_preview(&mut preview, &algorithm, &MandelbrotHsbRainbow, 4).unwrap();
        render_full_serial(&mut full, &algorithm, &MandelbrotHsbRainbow).unwrap();

        for y in (0..12).step_by(4) {
            for x in (0..12).step_by(4) {
                let pixel = Point::new(x, y);
                assert_eq!(preview.pixel(pixel), full.pixel(pixel));
            }
        }
    }

    #[test]
    fn test_stride_one_equals_full_render() {
        let algorithm = algorithm(9, 7);
        let mut preview = Framebuffer::new(9, 7);
        let mut full = Framebuffer::new(9, 7);

        render_preview(&mut preview, &algorithm, &MandelbrotHsbRainbow, 1).unwrap();
        render_full_serial(&mut full, &algorithm, &MandelbrotHsbRainbow).unwrap();

        assert_eq!(preview, full);
    }

    #[test]
    fn test_partial_blocks_at_edges_are_filled() {
        // 10 is not a multiple of 4: the last column and row of blocks are 2 wide.
        let algorithm = algorithm(10, 10);
        let mut framebuffer = Framebuffer::new(10, 10);

        render_preview(&mut framebuffer, &algorithm, &MandelbrotHsbRainbow, 4).unwrap();

        assert_eq!(
            framebuffer.pixel(Point::new(9, 9)),
            framebuffer.pixel(Point::new(8, 8))
        );
    }
}
