use std::sync::Arc;
use std::time::Duration;

use egui::Context as EguiContext;
use winit::{event_loop::EventLoopProxy, window::Window};

use crate::controllers::interactive::FrameSink;
use crate::core::data::viewport::Viewport;
use crate::input::gui::events::GuiEvent;

/// What the window currently shows.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PresentedFrame {
    pub generation: u64,
    pub viewport: Viewport,
    pub max_iterations: u32,
    pub render_duration: Duration,
    /// Coarse preview; the full pass of the same generation is still running.
    pub preview: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PresenterUpdate {
    /// A new frame was copied to the surface.
    Frame,
    Failed,
}

pub trait GuiPresenterPort {
    fn new(window: &'static Window, event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self;
    fn share_adapter(&self) -> Arc<dyn FrameSink>;
    /// Takes the latest render event from the adapter, if any.
    fn poll(&mut self) -> Option<PresenterUpdate>;
    fn presented(&self) -> Option<PresentedFrame>;
    fn last_error(&self) -> Option<&str>;
    fn render(&mut self, egui_output: egui::FullOutput, egui_ctx: &EguiContext) -> Result<(), pixels::Error>;
    fn resize(&mut self, width: u32, height: u32);
}
