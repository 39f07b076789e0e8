use std::time::Duration;
use crate::core::data::framebuffer::Framebuffer;
use crate::core::data::viewport::Viewport;

#[derive(Debug)]
pub struct FrameData {
    pub generation: u64,
    pub framebuffer: Framebuffer,
    pub viewport: Viewport,
    pub max_iterations: u32,
    /// Time from the start of the render to this pass finishing.
    pub render_duration: Duration,
}
