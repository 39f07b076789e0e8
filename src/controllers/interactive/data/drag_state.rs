use crate::core::data::complex::Complex;
use crate::core::data::point::Point;

/// Captured on pointer press and reused by every motion event of the drag.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct DragState {
    pub anchor_pixel: Point,
    /// Lower plane corner of the viewport when the drag began.
    pub anchor_min: Complex,
}
