//! Interactive controller for real-time Mandelbrot exploration.
//!
//! This module provides the application layer: it turns decoded pointer
//! events into viewport changes and schedules renders, dispatching results
//! to the presentation layer.
//!
//! # Architecture
//!
//! The interactive controller follows the ports & adapters pattern:
//! - **Input**: pointer calls on `InteractionController`
//! - **Output**: `FrameSink` trait for receiving render events
//! - **Core**: Uses domain actions from `core/` for actual computation

mod controller;
pub mod data;
pub mod errors;
pub mod events;
pub mod ports;
mod scheduler;
mod types;

pub use controller::InteractionController;
pub use data::render_request::RenderRequest;
pub use events::render_event::RenderEvent;
pub use ports::frame_sink::FrameSink;
pub use scheduler::{RenderScheduler, RenderSubmission, SchedulerState};
pub use types::PointerButton;
