use std::sync::{Mutex, PoisonError};
use winit::event_loop::EventLoopProxy;
use crate::controllers::interactive::{FrameSink, RenderEvent};
use crate::input::gui::events::GuiEvent;

/// Hands render events from the worker pool to the UI thread.
///
/// Only the latest event is kept: a frame the UI never got to is superseded
/// by whatever came after it.
pub struct PixelsAdapter {
    render_event: Mutex<Option<RenderEvent>>,
    event_loop_proxy: EventLoopProxy<GuiEvent>,
}

impl FrameSink for PixelsAdapter {
    fn present(&self, event: RenderEvent) {
        *self
            .render_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(event);

        // Fails only once the event loop has exited.
        let _ = self.event_loop_proxy.send_event(GuiEvent::Wake);
    }
}

impl PixelsAdapter {
    pub fn new(event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        Self {
            render_event: Mutex::new(None),
            event_loop_proxy,
        }
    }

    pub fn render_event(&self) -> Option<RenderEvent> {
        self.render_event
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
