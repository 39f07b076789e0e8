use crate::controllers::interactive::data::drag_state::DragState;
use crate::controllers::interactive::data::render_request::RenderRequest;
use crate::controllers::interactive::scheduler::{RenderScheduler, RenderSubmission};
use crate::controllers::interactive::types::PointerButton;
use crate::core::data::point::Point;
use crate::core::data::viewport::{Viewport, ViewportError};
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;
use log::{info, trace};

/// Turns decoded pointer events into viewport changes and render requests.
///
/// Owns the session viewport. Every mutation is followed by a render
/// request; a request dropped because a render is in flight leaves the
/// viewport changed, and the next accepted render shows it.
pub struct InteractionController {
    config: MandelbrotConfig,
    viewport: Viewport,
    drag: Option<DragState>,
    scheduler: RenderScheduler,
}

impl InteractionController {
    pub fn new(
        config: MandelbrotConfig,
        scheduler: RenderScheduler,
    ) -> Result<Self, ViewportError> {
        Ok(Self {
            viewport: config.initial_viewport()?,
            config,
            drag: None,
            scheduler,
        })
    }

    #[must_use]
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    #[must_use]
    pub fn drag_state(&self) -> Option<DragState> {
        self.drag
    }

    #[must_use]
    pub fn scheduler(&self) -> &RenderScheduler {
        &self.scheduler
    }

    /// Current iteration budget for the viewport.
    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.config.iteration_budget.max_iterations(&self.viewport)
    }

    pub fn request_render(&self, request: RenderRequest) -> RenderSubmission {
        self.scheduler.render(self.viewport, request)
    }

    /// Full render when the display shows something other than the current
    /// viewport, e.g. after the last drag position was dropped.
    pub fn render_if_stale(&self, presented: &Viewport) -> Option<RenderSubmission> {
        if *presented == self.viewport {
            return None;
        }

        Some(self.request_render(RenderRequest::FULL))
    }

    pub fn pointer_down(&mut self, pixel: Point, button: PointerButton) {
        trace!("pointer down {:?} at {:?}", button, pixel);

        self.drag = Some(DragState {
            anchor_pixel: pixel,
            anchor_min: self.viewport.min(),
        });
    }

    /// Pans relative to the press position and requests a progressive
    /// render. Returns `None` when no press preceded the motion.
    pub fn pointer_drag(&mut self, pixel: Point) -> Option<RenderSubmission> {
        let drag = self.drag?;

        self.viewport
            .pan(pixel.delta_from(drag.anchor_pixel), drag.anchor_min);

        Some(self.request_render(RenderRequest::PROGRESSIVE))
    }

    pub fn pointer_release(&mut self) {
        self.drag = None;
    }

    /// Zooms in on primary click and out on secondary click, centred on the
    /// clicked point. Other buttons are ignored.
    pub fn pointer_click(&mut self, pixel: Point, button: PointerButton) -> Option<RenderSubmission> {
        let factor = match button {
            PointerButton::Primary => self.config.zoom_factor,
            PointerButton::Secondary => 1.0 / self.config.zoom_factor,
            PointerButton::Other => return None,
        };

        let center = self.viewport.pixel_to_plane(pixel);
        self.viewport.zoom(center, factor);

        info!(
            "zoom x{} at ({}, {}), width now {:e}",
            factor,
            center.real,
            center.imag,
            self.viewport.plane_width()
        );

        Some(self.request_render(RenderRequest::FULL))
    }

    pub fn resize(&mut self, width: u32, height: u32) -> Result<RenderSubmission, ViewportError> {
        self.viewport.resize(width, height)?;
        self.drag = None;

        Ok(self.request_render(RenderRequest::FULL))
    }

    /// Back to the start-up bounds, keeping the current canvas size.
    pub fn reset_view(&mut self) -> Result<RenderSubmission, ViewportError> {
        let mut viewport = self.config.initial_viewport()?;
        viewport.resize(self.viewport.pixel_width(), self.viewport.pixel_height())?;

        self.viewport = viewport;
        self.drag = None;
        info!("view reset");

        Ok(self.request_render(RenderRequest::FULL))
    }
}
