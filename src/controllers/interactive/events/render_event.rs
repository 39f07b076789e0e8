use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::errors::render_error::RenderError;

/// "Content changed" signal sent to the display after every completed pass.
#[derive(Debug)]
pub enum RenderEvent {
    /// Coarse block-filled frame; a `Frame` with the same generation follows.
    Preview(FrameData),
    /// Full-resolution frame. The render is complete.
    Frame(FrameData),
    /// The render failed and was abandoned. The scheduler is idle again.
    Error(RenderError),
}

impl RenderEvent {
    #[must_use]
    pub fn generation(&self) -> u64 {
        match self {
            Self::Preview(frame) | Self::Frame(frame) => frame.generation,
            Self::Error(error) => error.generation,
        }
    }
}
