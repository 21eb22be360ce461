use std::path::PathBuf;

use posescope_core::Vec3;
use posescope_render::{capture_file_name, save_image, CaptureTarget, ScreenshotError};

use super::{render_ui, App, PosescopeError, RenderEngine, ScreenDescriptor};

impl App {
    /// Renders a single frame.
    pub(super) fn render(&mut self) {
        let App {
            window: Some(window),
            engine: Some(engine),
            egui: Some(egui),
            viewer,
            ui_state,
            ..
        } = self
        else {
            return;
        };

        let output = egui.run(window, |ctx| render_ui::build_ui(ctx, viewer, ui_state));
        let repaint_now = output
            .viewport_output
            .values()
            .any(|v| v.repaint_delay.is_zero());
        let pixels_per_point = output.pixels_per_point;

        let surface_texture = match engine.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                engine.reconfigure();
                window.request_redraw();
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                self.fail(PosescopeError::Render("out of GPU memory".to_string()));
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout");
                return;
            }
            Err(wgpu::SurfaceError::Other) => {
                log::warn!("Surface error: other");
                return;
            }
        };

        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [engine.width, engine.height],
            pixels_per_point,
        };

        let mut encoder = engine
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("render encoder"),
            });

        let mut prepared = egui.prepare(
            &engine.device,
            &engine.queue,
            &mut encoder,
            &screen_descriptor,
            output,
        );

        let clear = clear_color(viewer.options().background_color);
        egui.paint(&mut encoder, &view, &prepared, &screen_descriptor, clear);

        // The capture is drawn from the same tessellated frame as the window
        let capture = if ui_state.capture_requested && viewer.current_index().is_some() {
            let target = engine.create_capture_target();
            egui.paint(&mut encoder, &target.view, &prepared, &screen_descriptor, clear);
            Some(target)
        } else {
            None
        };
        ui_state.capture_requested = false;

        engine.queue.submit(
            prepared
                .take_command_buffers()
                .into_iter()
                .chain(std::iter::once(encoder.finish())),
        );
        window.pre_present_notify();
        surface_texture.present();

        if let Some(target) = capture {
            let frame_index = viewer.current_index().unwrap_or(0);
            ui_state.message = Some(match save_capture(engine, &target, frame_index) {
                Ok(path) => format!("saved {}", path.display()),
                Err(e) => {
                    log::error!("failed to save frame {frame_index}: {e}");
                    format!("could not save frame: {e}")
                }
            });
            window.request_redraw();
        }

        egui.finish(prepared);

        if ui_state.close_requested {
            self.close_requested = true;
        } else if repaint_now {
            window.request_redraw();
        }
    }
}

fn clear_color(color: Vec3) -> wgpu::Color {
    wgpu::Color {
        r: f64::from(color.x),
        g: f64::from(color.y),
        b: f64::from(color.z),
        a: 1.0,
    }
}

/// Picks the first `pose_frame_NNNN[_k].png` name that is not taken yet.
fn next_capture_path(frame_index: usize) -> PathBuf {
    (0..)
        .map(|serial| PathBuf::from(capture_file_name(frame_index, serial)))
        .find(|path| !path.exists())
        .unwrap_or_else(|| PathBuf::from(capture_file_name(frame_index, 0)))
}

fn save_capture(
    engine: &RenderEngine,
    target: &CaptureTarget,
    frame_index: usize,
) -> Result<PathBuf, ScreenshotError> {
    let rgba = engine.read_capture(target)?;
    let path = next_capture_path(frame_index);
    save_image(&path, rgba, target.width, target.height)?;
    Ok(path)
}
