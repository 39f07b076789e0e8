use crate::adapters::pixel_format::copy_framebuffer_to_rgba;
use crate::controllers::interactive::data::frame_data::FrameData;
use crate::controllers::interactive::{FrameSink, RenderEvent};
use crate::input::gui::app::ports::presenter::{GuiPresenterPort, PresentedFrame, PresenterUpdate};
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::adapter::PixelsAdapter;
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use log::debug;
use pixels::Pixels;
use pixels::SurfaceTexture;
use pixels::wgpu;
use std::sync::Arc;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    adapter: Arc<PixelsAdapter>,
    width: u32,
    height: u32,
    presented: Option<PresentedFrame>,
    last_error_message: Option<String>,
}

impl GuiPresenterPort for PixelsPresenter {
    fn new(window: &'static Window, event_loop_proxy: EventLoopProxy<GuiEvent>) -> Self {
        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, window);

        let pixels = Pixels::new(size.width, size.height, surface_texture)
            .expect("Failed to create pixels surface");

        let egui_renderer = EguiRenderer::new(
            pixels.device(),
            pixels.render_texture_format(),
            None, // depth format
            1,    // msaa samples
        );

        let mut presenter = Self {
            pixels,
            egui_renderer,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            width: size.width,
            height: size.height,
            presented: None,
            last_error_message: None,
        };
        presenter.clear();
        presenter
    }

    fn share_adapter(&self) -> Arc<dyn FrameSink> {
        Arc::clone(&self.adapter) as Arc<dyn FrameSink>
    }

    fn poll(&mut self) -> Option<PresenterUpdate> {
        match self.adapter.render_event()? {
            RenderEvent::Preview(frame) => self.draw_frame(&frame, true),
            RenderEvent::Frame(frame) => self.draw_frame(&frame, false),
            RenderEvent::Error(error) => {
                self.last_error_message = Some(error.to_string());
                Some(PresenterUpdate::Failed)
            }
        }
    }

    fn presented(&self) -> Option<PresentedFrame> {
        self.presented
    }

    fn last_error(&self) -> Option<&str> {
        self.last_error_message.as_deref()
    }

    fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        self.pixels.render_with(|encoder, render_target, context| {
            // First, render the pixels framebuffer (the scaling pass)
            context.scaling_renderer.render(encoder, render_target);

            let clipped_primitives =
                egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());

            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.width, self.height],
                pixels_per_point: egui_ctx.pixels_per_point(),
            };

            let textures_delta = egui_output.textures_delta;

            for (id, delta) in &textures_delta.set {
                self.egui_renderer
                    .update_texture(&context.device, &context.queue, *id, delta);
            }

            self.egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            // Overlay on top of the fractal
            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load, // Keep pixels content
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                self.egui_renderer.render(
                    &mut render_pass,
                    &clipped_primitives,
                    &screen_descriptor,
                );
            }

            for id in &textures_delta.free {
                self.egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        self.pixels
            .resize_surface(width, height)
            .expect("Failed to resize surface");

        self.pixels
            .resize_buffer(width, height)
            .expect("Failed to resize buffer");

        self.clear();
        self.presented = None;
    }
}

impl PixelsPresenter {
    fn clear(&mut self) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }
    }

    fn draw_frame(&mut self, frame: &FrameData, preview: bool) -> Option<PresenterUpdate> {
        let is_older = self
            .presented
            .is_some_and(|presented| frame.generation < presented.generation);
        if is_older {
            return None;
        }

        // Frames rendered for a previous window size are dropped.
        if let Err(err) = copy_framebuffer_to_rgba(&frame.framebuffer, self.pixels.frame_mut()) {
            debug!("skipping frame {}: {}", frame.generation, err);
            return None;
        }

        self.presented = Some(PresentedFrame {
            generation: frame.generation,
            viewport: frame.viewport,
            max_iterations: frame.max_iterations,
            render_duration: frame.render_duration,
            preview,
        });
        self.last_error_message = None;

        Some(PresenterUpdate::Frame)
    }
}
