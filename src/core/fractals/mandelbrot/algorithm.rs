use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;

/// `|z|² >= ESCAPE_RADIUS_SQUARED` means `|z| >= 2`, so the orbit diverges.
const ESCAPE_RADIUS_SQUARED: f64 = 4.0;

/// Iterates `z ← z² + c` from `z = 0` and returns how many steps ran.
///
/// A result below `max_iterations` is the escape time of `c`; a result equal
/// to `max_iterations` means the orbit stayed bounded and `c` is treated as a
/// member of the set.
#[must_use]
pub fn escape_time(c: Complex, max_iterations: u32) -> u32 {
    let mut z = Complex::ZERO;
    let mut iteration = 0;

    while iteration < max_iterations && z.magnitude_squared() < ESCAPE_RADIUS_SQUARED {
        z = z.square() + c;
        iteration += 1;
    }

    iteration
}

/// Escape-time evaluation bound to a viewport and an iteration budget.
///
/// Holds no mutable state, so one instance is shared by every render worker.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MandelbrotAlgorithm {
    viewport: Viewport,
    max_iterations: u32,
}

impl MandelbrotAlgorithm {
    pub fn new(viewport: Viewport, max_iterations: u32) -> Result<Self, MandelbrotError> {
        if max_iterations == 0 {
            return Err(MandelbrotError::ZeroMaxIterationsError);
        }

        Ok(Self {
            viewport,
            max_iterations,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[inline]
    #[must_use]
    pub fn compute(&self, pixel: Point) -> u32 {
        escape_time(self.viewport.pixel_to_plane(pixel), self.max_iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_is_bounded_for_any_budget() {
        for max_iterations in [1, 2, 10, 500, 10_000] {
            assert_eq!(escape_time(Complex::ZERO, max_iterations), max_iterations);
        }
    }

    #[test]
    fn test_zero_budget_returns_zero() {
        assert_eq!(escape_time(Complex::new(5.0, 5.0), 0), 0);
    }

    #[test]
    fn test_far_points_escape_after_one_step() {
        assert_eq!(escape_time(Complex::new(10.0, 10.0), 500), 1);
        assert_eq!(escape_time(Complex::new(-3.0, 0.0), 500), 1);
    }

    #[test]
    fn test_escape_on_radius_boundary() {
        // c = 2: z1 = 2 has |z|² = 4 exactly, which counts as escaped.
        assert_eq!(escape_time(Complex::new(2.0, 0.0), 500), 1);
    }

    #[test]
    fn test_known_escape_times() {
        // c = 1: 0 → 1 → 2 → 5, |z|² reaches 4 after two steps.
        assert_eq!(escape_time(Complex::new(1.0, 0.0), 500), 2);
        // c = -2 lands exactly on the radius after one step.
        assert_eq!(escape_time(Complex::new(-2.0, 0.0), 500), 1);
        // c = -1 cycles between 0 and -1.
        assert_eq!(escape_time(Complex::new(-1.0, 0.0), 500), 500);
    }

    #[test]
    fn test_escape_time_is_stable_when_budget_grows() {
        let samples = [
            Complex::new(0.3, 0.5),
            Complex::new(-0.75, 0.1),
            Complex::new(0.26, 0.0),
            Complex::new(-1.5, 0.5),
        ];

        for c in samples {
            let small = escape_time(c, 200);
            if small < 200 {
                assert_eq!(escape_time(c, 5_000), small);
            }
        }
    }

    #[test]
    fn test_new_rejects_zero_iterations() {
        let viewport =
            Viewport::new(Complex::new(-2.0, -1.5), Complex::new(1.0, 1.5), 8, 8).unwrap();

        assert_eq!(
            MandelbrotAlgorithm::new(viewport, 0),
            Err(MandelbrotError::ZeroMaxIterationsError)
        );
    }

    #[test]
    fn test_compute_maps_pixels_through_viewport() {
        let viewport =
            Viewport::new(Complex::new(-2.0, -2.0), Complex::new(2.0, 2.0), 4, 4).unwrap();
        let algorithm = MandelbrotAlgorithm::new(viewport, 50).unwrap();

        // Pixel (2, 2) is the origin; pixel (0, 0) is -2-2i, outside radius 2.
        assert_eq!(algorithm.compute(Point::new(2, 2)), 50);
        assert_eq!(algorithm.compute(Point::new(0, 0)), 1);
    }
}
