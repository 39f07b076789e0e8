use rayon::prelude::*;

use crate::core::actions::render_frame::ports::colour_map::ColourMap;
use crate::core::data::framebuffer::{set_row_pixel, Framebuffer, FramebufferSlice};
use crate::core::data::point::Point;
use crate::core::fractals::mandelbrot::algorithm::MandelbrotAlgorithm;
use crate::core::fractals::mandelbrot::errors::ColourMapError;

/// Computes the exact colour of every pixel in one band of rows.
pub fn render_slice(
    slice: &mut FramebufferSlice<'_>,
    algorithm: &MandelbrotAlgorithm,
    colour_map: &dyn ColourMap,
) -> Result<(), ColourMapError> {
    let max_iterations = algorithm.max_iterations();
    let width = slice.width();

    for y in slice.rows() {
        let row = slice.row_mut(y);

        for x in 0..width {
            let iterations = algorithm.compute(Point::new(x as i32, y as i32));
            set_row_pixel(row, x, colour_map.map(iterations, max_iterations)?);
        }
    }

    Ok(())
}

/// Full-resolution pass on the calling thread.
pub fn render_full_serial(
    framebuffer: &mut Framebuffer,
    algorithm: &MandelbrotAlgorithm,
    colour_map: &dyn ColourMap,
) -> Result<(), ColourMapError> {
    framebuffer
        .split_into_slices(1)
        .iter_mut()
        .try_for_each(|slice| render_slice(slice, algorithm, colour_map))
}

/// Full-resolution pass split into `slice_count` contiguous row bands, one
/// rayon task per band.
///
/// Runs on the current rayon pool, so callers pick the pool with
/// `ThreadPool::install`. Returns only once every band has finished, and
/// reports the first colour map failure if any band failed.
pub fn render_full_parallel(
    framebuffer: &mut Framebuffer,
    algorithm: &MandelbrotAlgorithm,
    colour_map: &dyn ColourMap,
    slice_count: u32,
) -> Result<(), ColourMapError> {
    framebuffer
        .split_into_slices(slice_count)
        .into_par_iter()
        .try_for_each(|mut slice| render_slice(&mut slice, algorithm, colour_map))
}
