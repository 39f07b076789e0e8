use crate::core::data::complex::Complex;
use crate::core::data::point::Point;
use std::error::Error;
use std::fmt;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ViewportError {
    InvalidPlaneBounds { min: Complex, max: Complex },
    InvalidPixelSize { width: u32, height: u32 },
}

impl fmt::Display for ViewportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPlaneBounds { min, max } => {
                write!(
                    f,
                    "plane bounds must have positive extent: real [{}, {}], imag [{}, {}]",
                    min.real, max.real, min.imag, max.imag
                )
            }
            Self::InvalidPixelSize { width, height } => {
                write!(f, "pixel size must be positive: {}x{}", width, height)
            }
        }
    }
}

impl Error for ViewportError {}

/// Pixel spacing near the zoom floor, in units of `f64::EPSILON` relative to
/// the coordinate magnitude.
const MIN_PIXEL_STEP_EPSILONS: f64 = 8.0;

fn min_half_extent(center: f64, pixels: u32) -> f64 {
    MIN_PIXEL_STEP_EPSILONS * f64::EPSILON * center.abs().max(1.0) * pixels as f64 / 2.0
}

/// The rectangle of the complex plane currently mapped onto the pixel canvas.
///
/// Pixels map by index rather than by centre: pixel `(0, 0)` lands exactly on
/// `min`, and `(pixel_width, pixel_height)` would land on `max`. Row `y`
/// grows with the imaginary axis.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Viewport {
    min: Complex,
    max: Complex,
    pixel_width: u32,
    pixel_height: u32,
}

impl Viewport {
    pub fn new(
        min: Complex,
        max: Complex,
        pixel_width: u32,
        pixel_height: u32,
    ) -> Result<Self, ViewportError> {
        let real_extent = max.real - min.real;
        let imag_extent = max.imag - min.imag;

        // Negated comparisons also reject NaN extents.
        if !(real_extent > 0.0) || !(imag_extent > 0.0) {
            return Err(ViewportError::InvalidPlaneBounds { min, max });
        }

        if pixel_width == 0 || pixel_height == 0 {
            return Err(ViewportError::InvalidPixelSize {
                width: pixel_width,
                height: pixel_height,
            });
        }

        Ok(Self {
            min,
            max,
            pixel_width,
            pixel_height,
        })
    }

    #[must_use]
    pub fn min(&self) -> Complex {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Complex {
        self.max
    }

    #[must_use]
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    #[must_use]
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    #[must_use]
    pub fn plane_width(&self) -> f64 {
        self.max.real - self.min.real
    }

    #[must_use]
    pub fn plane_height(&self) -> f64 {
        self.max.imag - self.min.imag
    }

    #[must_use]
    pub fn pixel_to_plane(&self, pixel: Point) -> Complex {
        Complex {
            real: self.min.real
                + pixel.x as f64 * self.plane_width() / self.pixel_width as f64,
            imag: self.min.imag
                + pixel.y as f64 * self.plane_height() / self.pixel_height as f64,
        }
    }

    /// Inverse of [`Viewport::pixel_to_plane`], rounded to the nearest pixel.
    #[must_use]
    pub fn plane_to_pixel(&self, point: Complex) -> Point {
        let x = (point.real - self.min.real) * self.pixel_width as f64 / self.plane_width();
        let y = (point.imag - self.min.imag) * self.pixel_height as f64 / self.plane_height();

        Point {
            x: x.round() as i32,
            y: y.round() as i32,
        }
    }

    /// Scales the plane rectangle by `factor` around `center`.
    ///
    /// `factor < 1` zooms in, `factor > 1` zooms out. The result depends only
    /// on the current extent, never on where the old rectangle sat.
    ///
    /// Zooming in stops at the precision floor of `f64` around `center`: the
    /// factor is raised so neighbouring pixels stay distinct and a later
    /// zoom-out can still grow the rectangle.
    pub fn zoom(&mut self, center: Complex, factor: f64) {
        debug_assert!(factor.is_finite() && factor > 0.0, "zoom factor must be positive");

        let half_width = self.plane_width() / 2.0;
        let half_height = self.plane_height() / 2.0;

        let factor = if factor < 1.0 {
            let floor = (min_half_extent(center.real, self.pixel_width) / half_width)
                .max(min_half_extent(center.imag, self.pixel_height) / half_height);

            factor.max(floor).min(1.0)
        } else {
            factor
        };

        let half_width = half_width * factor;
        let half_height = half_height * factor;

        self.min = Complex::new(center.real - half_width, center.imag - half_height);
        self.max = Complex::new(center.real + half_width, center.imag + half_height);
    }

    /// Moves the rectangle so that content follows a drag of `delta` pixels.
    ///
    /// The shift is applied to `anchor_min`, the lower corner captured when the
    /// drag began, so repeated motion events never accumulate drift.
    pub fn pan(&mut self, delta: (i32, i32), anchor_min: Complex) {
        let width = self.plane_width();
        let height = self.plane_height();
        let real_shift = delta.0 as f64 * width / self.pixel_width as f64;
        let imag_shift = delta.1 as f64 * height / self.pixel_height as f64;

        self.min = Complex::new(anchor_min.real - real_shift, anchor_min.imag - imag_shift);
        self.max = Complex::new(self.min.real + width, self.min.imag + height);
    }

    /// Changes the pixel dimensions while keeping the plane bounds.
    pub fn resize(&mut self, pixel_width: u32, pixel_height: u32) -> Result<(), ViewportError> {
        if pixel_width == 0 || pixel_height == 0 {
            return Err(ViewportError::InvalidPixelSize {
                width: pixel_width,
                height: pixel_height,
            });
        }

        self.pixel_width = pixel_width;
        self.pixel_height = pixel_height;
        Ok(())
    }
}
