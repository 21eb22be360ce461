//! Application window and event loop management.

mod input;
mod render;
mod render_ui;

pub(super) use std::sync::Arc;

pub(super) use egui_wgpu::ScreenDescriptor;
pub(super) use pollster::FutureExt;
pub(super) use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

pub(super) use posescope_core::{PosescopeError, Result};
pub(super) use posescope_render::RenderEngine;
pub(super) use posescope_ui::EguiIntegration;

use crate::viewer::PoseViewer;
use render_ui::UiState;

/// The posescope application state.
pub struct App {
    pub(super) window: Option<Arc<Window>>,
    pub(super) engine: Option<RenderEngine>,
    pub(super) egui: Option<EguiIntegration>,
    pub(super) viewer: PoseViewer,
    pub(super) ui_state: UiState,
    pub(super) close_requested: bool,
    // First fatal error; reported once the event loop returns
    pub(super) error: Option<PosescopeError>,
}

impl App {
    /// Creates a new application around `viewer`.
    pub fn new(viewer: PoseViewer) -> Self {
        Self {
            window: None,
            engine: None,
            egui: None,
            viewer,
            ui_state: UiState::default(),
            close_requested: false,
            error: None,
        }
    }

    /// Records a fatal error and asks the event loop to stop.
    pub(super) fn fail(&mut self, error: PosescopeError) {
        log::error!("{error}");
        if self.error.is_none() {
            self.error = Some(error);
        }
        self.close_requested = true;
    }

    pub(super) fn request_redraw(&self) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

/// Runs the viewer until its window is closed.
pub fn run_app(viewer: PoseViewer) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| PosescopeError::EventLoop(e.to_string()))?;
    // Redraws are requested explicitly when egui needs one
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(viewer);
    event_loop
        .run_app(&mut app)
        .map_err(|e| PosescopeError::EventLoop(e.to_string()))?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
