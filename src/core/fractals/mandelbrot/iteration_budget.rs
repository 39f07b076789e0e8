use crate::core::data::viewport::Viewport;
use crate::core::fractals::mandelbrot::errors::MandelbrotError;

/// Zoom-adaptive maximum iteration count.
///
/// The budget is `max(base, floor(base / plane_width))`, clamped to `cap`.
/// Narrowing the viewport never lowers it.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct IterationBudget {
    base: u32,
    cap: u32,
}

impl IterationBudget {
    /// A `cap` below `base` is raised to `base`.
    pub fn new(base: u32, cap: u32) -> Result<Self, MandelbrotError> {
        if base == 0 {
            return Err(MandelbrotError::ZeroMaxIterationsError);
        }

        Ok(Self {
            base,
            cap: cap.max(base),
        })
    }

    #[must_use]
    pub fn base(&self) -> u32 {
        self.base
    }

    #[must_use]
    pub fn cap(&self) -> u32 {
        self.cap
    }

    #[must_use]
    pub fn max_iterations(&self, viewport: &Viewport) -> u32 {
        let scaled = (self.base as f64 / viewport.plane_width()).floor();

        if !scaled.is_finite() || scaled >= self.cap as f64 {
            return self.cap;
        }

        (scaled as u32).max(self.base)
    }
}
