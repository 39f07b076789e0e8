use std::marker::PhantomData;

use log::info;
use winit::{dpi::LogicalSize, event_loop::EventLoopBuilder, window::{Window, WindowBuilder}};
use crate::controllers::interactive::{InteractionController, RenderScheduler};
use crate::core::fractals::mandelbrot::colour_maps::hsb_rainbow::MandelbrotHsbRainbow;
use crate::core::fractals::mandelbrot::mandelbrot_config::MandelbrotConfig;
use crate::input::gui::{
    app::{gui_app::GuiApp, ports::presenter::GuiPresenterPort},
    commands::ports::presenter_factory::GuiPresenterFactoryPort,
    events::GuiEvent,
};
use std::sync::Arc;

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    config: MandelbrotConfig,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F) -> Self {
        Self::with_config(presenter_factory, MandelbrotConfig::default())
    }

    pub fn with_config(presenter_factory: F, config: MandelbrotConfig) -> Self {
        Self { presenter_factory, config, _phantom: PhantomData }
    }

    pub fn execute(&self) {
        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event()
            .build()
            .expect("Failed to create event loop");

        let event_loop_proxy = event_loop.create_proxy();

        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Mandelbrot Explorer")
                .with_inner_size(LogicalSize::new(
                    self.config.canvas_width as f64,
                    self.config.canvas_height as f64,
                ))
                .with_min_inner_size(LogicalSize::new(200.0, 200.0))
                .build(&event_loop)
                .expect("Failed to create window"),
        ));

        // The canvas follows the physical surface, not the logical request.
        let size = window.inner_size();
        let config = self.config.with_canvas(size.width, size.height);

        let presenter: P = self.presenter_factory.build(window, event_loop_proxy);
        let scheduler = RenderScheduler::new(
            presenter.share_adapter(),
            Arc::new(MandelbrotHsbRainbow::new()),
            &config,
        )
        .expect("Failed to start render workers");

        info!(
            "starting {}x{} canvas with {} render workers",
            size.width,
            size.height,
            scheduler.workers()
        );

        let controller = InteractionController::new(config, scheduler)
            .expect("Failed to create initial viewport");
        let app = GuiApp::new(window, &event_loop, presenter, controller);

        app.run(window, event_loop);
    }
}
