//! The 3D scatter canvas.
//!
//! [`plot_view`] projects an [`Axes3d`] through a [`Camera`] and paints the
//! result with egui's painter: back panes, grid, tick labels, then markers
//! far to near. Mouse input on the canvas drives the camera.

use egui::{Align2, Color32, FontId, PointerButton, Pos2, Rect, Sense, Stroke, Ui};
use glam::{Vec2, Vec3};
use posescope_render::{
    nearest_marker, Axes3d, Camera, LabelKind, LineKind, ProjectedMarker, Projection, Viewport,
};

/// Extra pixels around a marker that still count as hovering it.
const HOVER_SLOP: f32 = 3.0;

/// Scroll distance in points that counts as one zoom step.
const SCROLL_PER_ZOOM_STEP: f32 = 50.0;

/// Appearance of the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotStyle {
    /// Canvas background.
    pub background: Vec3,
    /// Marker radius in points.
    pub marker_radius: f32,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            background: Vec3::ONE,
            marker_radius: 4.0,
        }
    }
}

/// A marker under the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoveredJoint {
    /// Joint index within the frame.
    pub index: usize,
    /// Position in data coordinates.
    pub position: Vec3,
}

/// What happened on the canvas this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlotResponse {
    /// The marker under the pointer, if any.
    pub hovered: Option<HoveredJoint>,
    /// True if the camera was moved.
    pub camera_changed: bool,
}

/// Converts a linear `[0, 1]` color to an opaque egui color.
#[must_use]
pub fn to_color32(color: Vec3) -> Color32 {
    to_color32_alpha(color, 1.0)
}

/// Converts a `[0, 1]` color and alpha to an unmultiplied egui color.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_color32_alpha(color: Vec3, alpha: f32) -> Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(
        channel(color.x),
        channel(color.y),
        channel(color.z),
        channel(alpha),
    )
}

fn pos2(v: Vec2) -> Pos2 {
    Pos2::new(v.x, v.y)
}

fn vec2(p: Pos2) -> Vec2 {
    Vec2::new(p.x, p.y)
}

/// Picks a foreground color that reads on `background`.
fn foreground_for(background: Vec3) -> Vec3 {
    let luminance = background.dot(Vec3::new(0.299, 0.587, 0.114));
    if luminance > 0.5 {
        Vec3::splat(0.1)
    } else {
        Vec3::splat(0.9)
    }
}

/// Applies mouse input on the canvas to the camera.
fn handle_camera_input(ui: &Ui, response: &egui::Response, camera: &mut Camera) -> bool {
    let rect = response.rect;
    let mut changed = false;

    if response.dragged_by(PointerButton::Primary) {
        // A full-height drag turns the view half way round
        let scale = std::f32::consts::PI / rect.height().max(1.0);
        let delta = response.drag_delta();
        camera.orbit(-delta.x * scale, delta.y * scale);
        changed = true;
    } else if response.dragged_by(PointerButton::Secondary)
        || response.dragged_by(PointerButton::Middle)
    {
        let units_per_point = camera.view_height() / rect.height().max(1.0);
        let delta = response.drag_delta();
        camera.pan(-delta.x * units_per_point, delta.y * units_per_point);
        changed = true;
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            camera.zoom(scroll / SCROLL_PER_ZOOM_STEP);
            changed = true;
        }
    }

    if response.double_clicked() {
        camera.reset();
        changed = true;
    }

    changed
}

/// Paints a projection into `rect`.
pub fn paint_projection(
    painter: &egui::Painter,
    rect: Rect,
    projection: &Projection,
    style: &PlotStyle,
) {
    painter.rect_filled(rect, 0.0, to_color32(style.background));

    let foreground = foreground_for(style.background);
    let pane_stroke = Stroke::new(1.0, to_color32_alpha(foreground, 0.6));
    let grid_stroke = Stroke::new(0.5, to_color32_alpha(foreground, 0.25));
    for line in &projection.lines {
        let stroke = match line.kind {
            LineKind::Pane => pane_stroke,
            LineKind::Grid => grid_stroke,
        };
        painter.line_segment([pos2(line.from), pos2(line.to)], stroke);
    }

    let text_color = to_color32(foreground);
    for label in &projection.labels {
        let font = match label.kind {
            LabelKind::Tick => FontId::proportional(10.0),
            LabelKind::AxisName => FontId::proportional(13.0),
        };
        painter.text(
            pos2(label.position),
            Align2::CENTER_CENTER,
            &label.text,
            font,
            text_color,
        );
    }

    // Already sorted far to near
    for marker in &projection.markers {
        painter.circle_filled(
            pos2(marker.screen),
            style.marker_radius,
            to_color32_alpha(marker.color, marker.alpha),
        );
    }
}

fn paint_hover_ring(painter: &egui::Painter, marker: &ProjectedMarker, style: &PlotStyle) {
    let color = to_color32(foreground_for(style.background));
    painter.circle_stroke(
        pos2(marker.screen),
        style.marker_radius + 2.0,
        Stroke::new(1.5, color),
    );
}

/// Shows the axes as an interactive canvas filling the available space.
pub fn plot_view(
    ui: &mut Ui,
    axes: &Axes3d,
    camera: &mut Camera,
    style: &PlotStyle,
) -> PlotResponse {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
    let camera_changed = handle_camera_input(ui, &response, camera);

    let viewport = Viewport::new(vec2(rect.min), Vec2::new(rect.width(), rect.height()));
    let projection = axes.project(camera, viewport);

    let painter = ui.painter_at(rect);
    paint_projection(&painter, rect, &projection, style);

    let hovered = response
        .hover_pos()
        .and_then(|pos| nearest_marker(&projection, vec2(pos), style.marker_radius + HOVER_SLOP));
    if let Some(marker) = hovered {
        paint_hover_ring(&painter, marker, style);
    }

    PlotResponse {
        hovered: hovered.map(|m| HoveredJoint {
            index: m.index,
            position: m.world,
        }),
        camera_changed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use posescope_render::draw_pose3d;

    #[test]
    fn test_color_conversion() {
        assert_eq!(to_color32(Vec3::new(1.0, 0.0, 0.0)), Color32::RED);
        assert_eq!(to_color32(Vec3::new(2.0, -1.0, 0.0)), Color32::RED);
        let faded = to_color32_alpha(Vec3::ONE, 0.5);
        assert_eq!(faded.a(), 128);
    }

    #[test]
    fn test_foreground_contrasts_background() {
        assert!(foreground_for(Vec3::ONE).x < 0.5);
        assert!(foreground_for(Vec3::ZERO).x > 0.5);
    }

    #[test]
    fn test_plot_view_without_pointer() {
        let ctx = egui::Context::default();
        let mut axes = Axes3d::new();
        draw_pose3d(
            &mut axes,
            &[Vec3::splat(0.5), Vec3::new(0.1, 0.2, 0.3)],
            None,
        );
        let mut camera = Camera::default();
        let home = camera.clone();

        let mut result = PlotResponse::default();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                result = plot_view(ui, &axes, &mut camera, &PlotStyle::default());
            });
        });

        assert_eq!(result, PlotResponse::default());
        assert_eq!(camera.azimuth, home.azimuth);
        assert_eq!(camera.elevation, home.elevation);
    }
}
