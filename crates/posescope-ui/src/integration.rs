//! egui integration with wgpu and winit.

use egui::Context;
use egui_wgpu::Renderer as EguiRenderer;
use egui_wgpu::ScreenDescriptor;
use egui_winit::{EventResponse, State as EguiWinitState};
use winit::event::WindowEvent;
use winit::window::Window;

/// Manages egui state and rendering.
pub struct EguiIntegration {
    pub context: Context,
    pub state: EguiWinitState,
    pub renderer: EguiRenderer,
}

/// Tessellated egui output, ready to be painted into one or more targets.
pub struct PreparedFrame {
    paint_jobs: Vec<egui::ClippedPrimitive>,
    textures_to_free: Vec<egui::TextureId>,
    command_buffers: Vec<wgpu::CommandBuffer>,
}

impl PreparedFrame {
    /// Takes the command buffers egui recorded while uploading; they must be
    /// submitted before the main encoder.
    pub fn take_command_buffers(&mut self) -> Vec<wgpu::CommandBuffer> {
        std::mem::take(&mut self.command_buffers)
    }
}

impl EguiIntegration {
    /// Creates a new egui integration.
    #[must_use]
    pub fn new(
        device: &wgpu::Device,
        output_format: wgpu::TextureFormat,
        window: &Window,
        dark_mode: bool,
    ) -> Self {
        let context = Context::default();
        context.set_visuals(if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        let viewport_id = context.viewport_id();
        let state = EguiWinitState::new(context.clone(), viewport_id, window, None, None, None);

        let renderer =
            EguiRenderer::new(device, output_format, egui_wgpu::RendererOptions::default());
        log::debug!("egui renderer targeting {output_format:?} (dark mode: {dark_mode})");

        Self {
            context,
            state,
            renderer,
        }
    }

    /// Handles a winit window event.
    pub fn handle_event(&mut self, window: &Window, event: &WindowEvent) -> EventResponse {
        self.state.on_window_event(window, event)
    }

    /// Runs one UI frame (including any layout re-runs egui asks for) and
    /// forwards platform output such as cursor changes.
    pub fn run(&mut self, window: &Window, build_ui: impl FnMut(&Context)) -> egui::FullOutput {
        let raw_input = self.state.take_egui_input(window);
        let output = self.context.run(raw_input, build_ui);
        self.state
            .handle_platform_output(window, output.platform_output.clone());
        output
    }

    /// Uploads textures and buffers for `output`.
    pub fn prepare(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        screen_descriptor: &ScreenDescriptor,
        output: egui::FullOutput,
    ) -> PreparedFrame {
        let paint_jobs = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer.update_texture(device, queue, *id, image_delta);
        }

        let command_buffers =
            self.renderer
                .update_buffers(device, queue, encoder, &paint_jobs, screen_descriptor);

        PreparedFrame {
            paint_jobs,
            textures_to_free: output.textures_delta.free,
            command_buffers,
        }
    }

    /// Paints a prepared frame into `view`, clearing it to `clear` first.
    pub fn paint(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        frame: &PreparedFrame,
        screen_descriptor: &ScreenDescriptor,
        clear: wgpu::Color,
    ) {
        let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui render pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            ..Default::default()
        });

        // egui-wgpu requires a 'static render pass
        let mut render_pass = render_pass.forget_lifetime();

        self.renderer
            .render(&mut render_pass, &frame.paint_jobs, screen_descriptor);
    }

    /// Releases textures egui no longer needs. Call after the last `paint`.
    pub fn finish(&mut self, frame: PreparedFrame) {
        for id in &frame.textures_to_free {
            self.renderer.free_texture(id);
        }
    }
}
