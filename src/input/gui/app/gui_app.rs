use std::time::{Duration, Instant};
use egui::Context;
use egui_winit::State as EguiWinitState;
use log::{debug, error, warn};
use crate::controllers::interactive::{InteractionController, PointerButton, RenderRequest};
use crate::core::data::point::Point;
use crate::input::gui::app::ports::presenter::{GuiPresenterPort, PresenterUpdate};
use crate::input::gui::app::state::{GuiAppState, PointerGesture};
use crate::input::gui::events::GuiEvent;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

/// Poll interval while a stale view waits for the in-flight render to finish.
const CATCH_UP_POLL: Duration = Duration::from_millis(10);

pub struct GuiApp<T: GuiPresenterPort>
{
    width: u32,
    height: u32,
    presenter: T,
    controller: InteractionController,
    ui_state: GuiAppState,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

fn pointer_button(button: MouseButton) -> PointerButton {
    match button {
        MouseButton::Left => PointerButton::Primary,
        MouseButton::Right => PointerButton::Secondary,
        _ => PointerButton::Other,
    }
}

fn pointer_pixel(position: PhysicalPosition<f64>) -> Point {
    Point::new(position.x as i32, position.y as i32)
}

impl<T: GuiPresenterPort> GuiApp<T>
{
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: T,
        controller: InteractionController,
    ) -> Self {
        let size = window.inner_size();
        let egui_ctx = Context::default();

        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None, // max_texture_side, use default
        );

        Self {
            width: size.width,
            height: size.height,
            presenter,
            controller,
            ui_state: GuiAppState::default(),
            egui_ctx,
            egui_state,
        }
    }

    pub fn run(mut self, window: &'static Window, event_loop: EventLoop<GuiEvent>) {
        self.controller.request_render(RenderRequest::FULL);

        event_loop
            .run(move |event, elwt| match event {
                Event::UserEvent(GuiEvent::Wake) => {
                    self.poll_presenter(window);
                }
                Event::WindowEvent { ref event, window_id } if window_id == window.id() => {
                    let egui_consumed = self.handle_window_event(window, event);

                    match event {
                        WindowEvent::CloseRequested => {
                            elwt.exit();
                        }
                        WindowEvent::RedrawRequested => {
                            self.ui_state.redraw_pending = false;

                            let mut egui_output = self.update_ui(window);
                            self.egui_state.handle_platform_output(
                                window,
                                std::mem::take(&mut egui_output.platform_output),
                            );

                            if egui_output.viewport_output.values().any(|v| v.repaint_delay.is_zero()) {
                                self.ui_state.redraw_pending = true;
                            }

                            if let Err(err) = self.presenter.render(egui_output, &self.egui_ctx) {
                                error!("presenter failed: {}", err);
                                elwt.exit();
                            }
                        }
                        WindowEvent::Resized(size) => {
                            self.resize(size.width, size.height);
                        }
                        WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                            self.egui_ctx.set_pixels_per_point(*scale_factor as f32);
                            let size = window.inner_size();
                            self.resize(size.width, size.height);
                        }
                        WindowEvent::CursorMoved { position, .. } => {
                            let gesture = self.ui_state.cursor_moved(pointer_pixel(*position));
                            self.apply_gesture(gesture);
                        }
                        WindowEvent::CursorLeft { .. } => {
                            self.ui_state.cursor_left();
                        }
                        WindowEvent::MouseInput { state, button, .. } => {
                            let button = pointer_button(*button);
                            let gesture = match state {
                                ElementState::Pressed if !egui_consumed => {
                                    self.ui_state.button_pressed(button)
                                }
                                ElementState::Pressed => None,
                                ElementState::Released => self.ui_state.button_released(button),
                            };
                            self.apply_gesture(gesture);
                        }
                        _ => {
                            if egui_consumed {
                                self.ui_state.redraw_pending = true;
                            }
                        }
                    }
                }
                Event::AboutToWait => {
                    let waiting = self.catch_up();
                    elwt.set_control_flow(if waiting {
                        ControlFlow::WaitUntil(Instant::now() + CATCH_UP_POLL)
                    } else {
                        ControlFlow::Wait
                    });

                    if self.ui_state.redraw_pending {
                        window.request_redraw();
                    }
                }
                _ => {}
            })
            .expect("Event loop error");
    }

    fn poll_presenter(&mut self, window: &Window) {
        match self.presenter.poll() {
            Some(PresenterUpdate::Frame) => window.request_redraw(),
            Some(PresenterUpdate::Failed) => {
                self.ui_state.retry_stale = false;
                window.request_redraw();
            }
            None => {}
        }
    }

    /// Requests a full render when the window shows an outdated view, e.g.
    /// the last drag position was dropped while another render ran.
    ///
    /// Returns `true` while a stale view is waiting on an in-flight render.
    fn catch_up(&mut self) -> bool {
        if !self.ui_state.retry_stale || self.width == 0 || self.height == 0 {
            return false;
        }

        let scheduler = self.controller.scheduler();
        let is_stale = self
            .presenter
            .presented()
            .is_none_or(|frame| frame.viewport != *self.controller.viewport());

        if !is_stale {
            return false;
        }

        if scheduler.is_rendering() {
            return true;
        }

        debug!("display is stale, requesting catch-up render");
        self.controller.request_render(RenderRequest::FULL);

        false
    }

    fn apply_gesture(&mut self, gesture: Option<PointerGesture>) {
        let Some(gesture) = gesture else {
            return;
        };

        match gesture {
            PointerGesture::Down { pixel, button } => self.controller.pointer_down(pixel, button),
            PointerGesture::Drag { pixel } => {
                self.controller.pointer_drag(pixel);
            }
            PointerGesture::Click { pixel, button } => {
                self.controller.pointer_release();
                self.controller.pointer_click(pixel, button);
            }
            PointerGesture::Release => self.controller.pointer_release(),
        }

        self.ui_state.redraw_pending = true;
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.ui_state.redraw_pending = true;

        // Minimised: keep the last view and wait for a usable size.
        if width == 0 || height == 0 {
            return;
        }

        self.presenter.resize(width, height);
        self.ui_state.retry_stale = true;

        if let Err(err) = self.controller.resize(width, height) {
            warn!("ignoring resize to {}x{}: {}", width, height, err);
        }
    }

    fn update_ui(&mut self, window: &Window) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(window);
        let viewport = *self.controller.viewport();
        let max_iterations = self.controller.max_iterations();
        let rendering = self.controller.scheduler().is_rendering();
        let presented = self.presenter.presented();
        let error_message = self.presenter.last_error().map(str::to_owned);
        let (width, height) = (self.width, self.height);
        let mut reset_clicked = false;

        let output = self.egui_ctx.run(raw_input, |ctx| {
            egui::Window::new("Debug Panel")
                .default_pos([10.0, 10.0])
                .default_size([260.0, 220.0])
                .show(ctx, |ui| {
                    ui.heading("Mandelbrot Explorer");
                    ui.separator();

                    ui.label("View region:");
                    ui.label(format!(
                        "Real: [{:.6e}, {:.6e}]",
                        viewport.min().real,
                        viewport.max().real
                    ));
                    ui.label(format!(
                        "Imag: [{:.6e}, {:.6e}]",
                        viewport.min().imag,
                        viewport.max().imag
                    ));
                    ui.label(format!("Max iterations: {}", max_iterations));

                    if ui.button("Reset view").clicked() {
                        reset_clicked = true;
                    }

                    ui.separator();
                    ui.label(format!("Window size: {}x{}", width, height));
                    ui.label(if rendering { "Rendering..." } else { "Idle" });
                    if let Some(frame) = presented {
                        ui.label(format!(
                            "Shown generation: {}{}",
                            frame.generation,
                            if frame.preview { " (preview)" } else { "" }
                        ));
                        ui.label(format!("Last render: {} ms", frame.render_duration.as_millis()));
                    }
                    if let Some(message) = &error_message {
                        ui.separator();
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    }
                });
        });

        if reset_clicked {
            self.ui_state.retry_stale = true;
            if let Err(err) = self.controller.reset_view() {
                warn!("reset view failed: {}", err);
            }
        }

        output
    }

    /// Forwards the event to egui. Returns true if egui consumed it.
    fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        let response = self.egui_state.on_window_event(window, event);

        if response.repaint {
            self.ui_state.redraw_pending = true;
        }

        response.consumed
    }
}
