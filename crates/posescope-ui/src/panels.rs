//! Control panels below the canvas.

use egui::Ui;
use glam::Vec3;
use posescope_render::ProjectionMode;

use crate::plot_view::HoveredJoint;

/// A button press on the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolbarAction {
    #[default]
    None,
    /// Restore the initial view.
    Home,
    PreviousFrame,
    NextFrame,
    /// Switch between perspective and orthographic projection.
    ToggleProjection,
    /// Show or hide the grid.
    ToggleGrid,
    /// Save the current frame as a PNG.
    Save,
}

/// State the toolbar shows and edits.
#[derive(Debug, Clone)]
pub struct ToolbarState {
    pub projection: ProjectionMode,
    pub grid: bool,
    pub marker_color: [f32; 3],
    pub can_step_back: bool,
    pub can_step_forward: bool,
    pub can_save: bool,
}

/// Result of building the toolbar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ToolbarResponse {
    pub action: ToolbarAction,
    /// True if the marker color was edited.
    pub color_changed: bool,
}

/// Builds the toolbar row.
pub fn build_toolbar(ui: &mut Ui, state: &mut ToolbarState) -> ToolbarResponse {
    let mut response = ToolbarResponse::default();

    ui.horizontal(|ui| {
        if ui
            .button("Home")
            .on_hover_text("Reset view (Home)")
            .clicked()
        {
            response.action = ToolbarAction::Home;
        }

        ui.separator();

        if ui
            .add_enabled(state.can_step_back, egui::Button::new("◀"))
            .on_hover_text("Previous frame (←)")
            .clicked()
        {
            response.action = ToolbarAction::PreviousFrame;
        }
        if ui
            .add_enabled(state.can_step_forward, egui::Button::new("▶"))
            .on_hover_text("Next frame (→)")
            .clicked()
        {
            response.action = ToolbarAction::NextFrame;
        }

        ui.separator();

        if ui
            .button(state.projection.name())
            .on_hover_text("Toggle projection")
            .clicked()
        {
            response.action = ToolbarAction::ToggleProjection;
        }

        if ui
            .add(egui::Button::new("Grid").selected(state.grid))
            .on_hover_text("Toggle grid")
            .clicked()
        {
            response.action = ToolbarAction::ToggleGrid;
        }

        ui.label("Markers:");
        response.color_changed = ui
            .color_edit_button_rgb(&mut state.marker_color)
            .changed();

        ui.separator();

        if ui
            .add_enabled(state.can_save, egui::Button::new("Save PNG"))
            .on_hover_text("Save the current frame as pose_frame_NNNN.png")
            .clicked()
        {
            response.action = ToolbarAction::Save;
        }
    });

    response
}

/// Builds the frame slider.
///
/// `max` is the last valid frame index, or `None` when nothing is loaded, in
/// which case the slider is disabled. Returns the new index when the user
/// moved the slider.
pub fn build_frame_slider(ui: &mut Ui, index: usize, max: Option<usize>) -> Option<usize> {
    let mut value = index;
    let mut changed = false;

    ui.horizontal(|ui| {
        let label_width = 60.0;
        ui.spacing_mut().slider_width = (ui.available_width() - label_width).max(80.0);

        let slider = egui::Slider::new(&mut value, 0..=max.unwrap_or(0))
            .integer()
            .text("Frame");
        changed = ui.add_enabled(max.is_some(), slider).changed();
    });

    let picked = (changed && value != index).then_some(value);
    if let Some(value) = picked {
        log::debug!("frame slider moved from {index} to {value}");
    }
    picked
}

/// Contents of the status line.
#[derive(Debug, Clone, Default)]
pub struct StatusLine {
    pub azimuth_degrees: f32,
    pub elevation_degrees: f32,
    pub hovered: Option<HoveredJoint>,
    /// Current index, frame count and joint count.
    pub frame: Option<(usize, usize, usize)>,
    /// Last notice such as a load failure or a saved file name.
    pub message: Option<String>,
}

impl StatusLine {
    /// Formats the readout shown at the right of the status line.
    #[must_use]
    pub fn readout(&self) -> String {
        let mut text = format!(
            "azim={:.0}°, elev={:.0}°",
            self.azimuth_degrees, self.elevation_degrees
        );
        if let Some(joint) = self.hovered {
            text.push_str(&format_joint(joint.index, joint.position));
        }
        text
    }
}

fn format_joint(index: usize, position: Vec3) -> String {
    format!(
        "  joint {index}: x={:.3}, y={:.3}, z={:.3}",
        position.x, position.y, position.z
    )
}

/// Builds the status line.
pub fn build_status_line(ui: &mut Ui, status: &StatusLine) {
    ui.horizontal(|ui| {
        match status.frame {
            Some((index, count, joints)) => {
                ui.label(format!("frame {}/{count} · {joints} joints", index + 1));
            }
            None => {
                ui.weak("Drop a .npy pose file to load it");
            }
        }

        if let Some(message) = &status.message {
            ui.separator();
            ui.label(message);
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.monospace(status.readout());
        });
    });
}
