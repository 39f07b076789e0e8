use crate::controllers::interactive::events::render_event::RenderEvent;

/// Display collaborator. Called from render worker threads, so
/// implementations must hand the event off without blocking for long.
pub trait FrameSink: Send + Sync {
    fn present(&self, event: RenderEvent);
}
