use crate::controllers::interactive::data::display_surface::DisplaySurface;
use crate::controllers::interactive::ports::worker_message_port::WorkerMessagePort;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::adapter::PixelsAdapter;
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::{Pixels, PixelsContext};
use pixels::SurfaceTexture;
use pixels::wgpu;
use std::sync::Arc;
use tracing::error;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

/// Window framebuffer. The display surface is stretched over it with
/// nearest-neighbour sampling, so reduced-scale previews fill the window.
pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    adapter: Arc<PixelsAdapter>,
    width: u32,
    height: u32,
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

        Self {
            pixels,
            egui_renderer,
            adapter: Arc::new(PixelsAdapter::new(event_loop_proxy)),
            width: size.width,
            height: size.height,
        }
    }

    fn share_port(&self) -> Arc<dyn WorkerMessagePort> {
        Arc::clone(&self.adapter) as Arc<dyn WorkerMessagePort>
    }

    fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
        surface: &DisplaySurface,
    ) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        if surface.width() == 0 || surface.height() == 0 {
            self.draw_placeholder();
        } else {
            surface.blit_scaled(self.pixels.frame_mut(), self.width, self.height);
        }

        let pixels_per_point = egui_ctx.pixels_per_point();
        let overlay = Overlay {
            primitives: egui_ctx.tessellate(egui_output.shapes, pixels_per_point),
            textures: egui_output.textures_delta,
            screen: egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.width, self.height],
                pixels_per_point,
            },
        };

        let renderer = &mut self.egui_renderer;
        self.pixels.render_with(|encoder, target, context| {
            context.scaling_renderer.render(encoder, target);
            overlay.draw(renderer, encoder, target, context);
            Ok(())
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        if width == 0 || height == 0 {
            return;
        }

        if let Err(err) = self.pixels.resize_surface(width, height) {
            error!(error = %err, width, height, "failed to resize surface");
        }

        if let Err(err) = self.pixels.resize_buffer(width, height) {
            error!(error = %err, width, height, "failed to resize buffer");
        }
    }
}

/// One frame of tessellated egui output, drawn over the fractal.
struct Overlay {
    primitives: Vec<egui::ClippedPrimitive>,
    textures: egui::TexturesDelta,
    screen: egui_wgpu::ScreenDescriptor,
}

impl Overlay {
    fn draw(
        &self,
        renderer: &mut EguiRenderer,
        encoder: &mut wgpu::CommandEncoder,
        target: &wgpu::TextureView,
        context: &PixelsContext,
    ) {
        for (id, delta) in &self.textures.set {
            renderer.update_texture(&context.device, &context.queue, *id, delta);
        }
        renderer.update_buffers(
            &context.device,
            &context.queue,
            encoder,
            &self.primitives,
            &self.screen,
        );

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("settings overlay"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: target,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // fractal stays underneath
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });
            renderer.render(&mut pass, &self.primitives, &self.screen);
        }

        for id in &self.textures.free {
            renderer.free_texture(id);
        }
    }
}

impl PixelsPresenter {
    fn draw_placeholder(&mut self) {
        for pixel in self.pixels.frame_mut().chunks_exact_mut(4) {
            pixel.copy_from_slice(&[0, 0, 0, 255]);
        }
    }
}
