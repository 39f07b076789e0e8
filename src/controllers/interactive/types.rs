//! Application-layer types shared with input adapters.

/// Button identity as decoded by the windowing layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PointerButton {
    /// Usually the left button. Click zooms in.
    Primary,
    /// Usually the right button. Click zooms out.
    Secondary,
    Other,
}
