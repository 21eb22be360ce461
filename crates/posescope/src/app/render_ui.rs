//! egui UI: canvas, toolbar, frame slider and status line.

use posescope_core::Vec3;
use posescope_ui::egui;
use posescope_ui::{
    build_frame_slider, build_status_line, build_toolbar, plot_view, HoveredJoint, PlotStyle,
    StatusLine, ToolbarAction, ToolbarState,
};

use crate::viewer::PoseViewer;

/// UI state that lives across frames.
#[derive(Debug, Default)]
pub(crate) struct UiState {
    pub hovered: Option<HoveredJoint>,
    pub message: Option<String>,
    pub capture_requested: bool,
    pub close_requested: bool,
}

impl UiState {
    fn status_line(&self, viewer: &PoseViewer) -> StatusLine {
        let camera = viewer.camera();
        let frame = viewer.current_index().map(|index| {
            let joints = viewer.current_frame().map_or(0, <[Vec3]>::len);
            (index, viewer.frame_count(), joints)
        });
        StatusLine {
            azimuth_degrees: camera.azimuth_degrees(),
            elevation_degrees: camera.elevation_degrees(),
            hovered: self.hovered,
            frame,
            message: self.message.clone(),
        }
    }
}

/// Builds the whole UI for one pass.
pub(crate) fn build_ui(ctx: &egui::Context, viewer: &mut PoseViewer, state: &mut UiState) {
    handle_dropped_files(ctx, viewer, state);
    handle_keys(ctx, viewer, state);

    egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
        ui.add_space(2.0);
        let mut toolbar = ToolbarState {
            projection: viewer.camera().projection_mode,
            grid: viewer.grid(),
            marker_color: viewer.marker_color().to_array(),
            can_step_back: viewer.can_step_back(),
            can_step_forward: viewer.can_step_forward(),
            can_save: viewer.current_index().is_some(),
        };
        let response = build_toolbar(ui, &mut toolbar);
        if response.color_changed {
            viewer.set_marker_color(Vec3::from(toolbar.marker_color));
        }
        apply_toolbar_action(response.action, viewer, state);

        let index = viewer.current_index().unwrap_or(0);
        if let Some(index) = build_frame_slider(ui, index, viewer.slider_max()) {
            viewer.select_frame(index);
        }

        ui.separator();
        build_status_line(ui, &state.status_line(viewer));
    });

    let style = PlotStyle {
        background: viewer.options().background_color,
        marker_radius: viewer.options().marker_radius,
    };
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let (axes, camera) = viewer.axes_and_camera_mut();
            state.hovered = plot_view(ui, axes, camera, &style).hovered;
        });
}

fn apply_toolbar_action(action: ToolbarAction, viewer: &mut PoseViewer, state: &mut UiState) {
    match action {
        ToolbarAction::None => {}
        ToolbarAction::Home => viewer.camera_mut().reset(),
        ToolbarAction::PreviousFrame => {
            viewer.step(-1);
        }
        ToolbarAction::NextFrame => {
            viewer.step(1);
        }
        ToolbarAction::ToggleProjection => {
            let camera = viewer.camera_mut();
            camera.set_projection_mode(camera.projection_mode.toggled());
        }
        ToolbarAction::ToggleGrid => viewer.set_grid(!viewer.grid()),
        ToolbarAction::Save => state.capture_requested = true,
    }
}

fn handle_keys(ctx: &egui::Context, viewer: &mut PoseViewer, state: &mut UiState) {
    // A focused widget such as the slider handles its own arrow keys
    if ctx.memory(|m| m.focused().is_some()) {
        return;
    }

    let (left, right, home, escape) = ctx.input(|i| {
        (
            i.key_pressed(egui::Key::ArrowLeft),
            i.key_pressed(egui::Key::ArrowRight),
            i.key_pressed(egui::Key::Home),
            i.key_pressed(egui::Key::Escape),
        )
    });

    if left {
        viewer.step(-1);
    }
    if right {
        viewer.step(1);
    }
    if home {
        viewer.camera_mut().reset();
    }
    if escape {
        state.close_requested = true;
    }
}

fn handle_dropped_files(ctx: &egui::Context, viewer: &mut PoseViewer, state: &mut UiState) {
    let dropped = ctx.input(|i| i.raw.dropped_files.clone());
    for path in dropped.into_iter().filter_map(|file| file.path) {
        log::info!("file dropped: {}", path.display());
        match viewer.load(&path) {
            Ok(()) => {
                let name = path.file_name().map_or_else(
                    || path.display().to_string(),
                    |n| n.to_string_lossy().into_owned(),
                );
                state.message = Some(format!("loaded {name}"));
            }
            Err(e) => {
                log::warn!("could not load dropped file: {e}");
                state.message = Some(e.to_string());
            }
        }
    }
}
