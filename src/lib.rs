pub mod adapters;
pub mod controllers;
pub mod core;
pub mod input;
pub mod presenters;

pub use controllers::interactive::{
    FrameSink, InteractionController, PointerButton, RenderEvent, RenderRequest, RenderScheduler,
    RenderSubmission,
};
pub use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;

#[cfg(feature = "gui")]
pub use input::gui::commands::run_gui::RunGuiCommand;
#[cfg(feature = "gui")]
pub use presenters::pixels::factory::PixelsPresenterFactory;
