//! Screen-space projection of [`Axes3d`].
//!
//! The limits box is mapped onto the unit cube `[-0.5, 0.5]³` around the
//! camera target, then every marker, pane edge, grid line and tick label is
//! projected to pixel coordinates inside a [`Viewport`]. The output is a flat
//! list of primitives that any 2D painter can draw in order.

use glam::{Mat4, Vec2, Vec3};

use crate::axes::{tick_decimals, Axes3d, Axis};
use crate::camera::Camera;

/// Pixel offset of tick labels from their box edge.
const TICK_LABEL_OFFSET: f32 = 14.0;
/// Pixel offset of axis names from their box edge.
const AXIS_LABEL_OFFSET: f32 = 34.0;
/// Opacity of the farthest marker when depth shading is on.
const MIN_DEPTH_ALPHA: f32 = 0.3;

/// A rectangular pixel region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Top-left corner in pixels.
    pub min: Vec2,
    /// Width and height in pixels.
    pub size: Vec2,
}

impl Viewport {
    /// Creates a viewport.
    #[must_use]
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// Returns width / height, or 1 for an empty viewport.
    #[must_use]
    pub fn aspect_ratio(&self) -> f32 {
        if self.size.x > 0.0 && self.size.y > 0.0 {
            self.size.x / self.size.y
        } else {
            1.0
        }
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Maps normalized device coordinates to pixels (y down).
    #[must_use]
    pub fn ndc_to_screen(&self, ndc: Vec2) -> Vec2 {
        Vec2::new(
            self.min.x + (ndc.x + 1.0) * 0.5 * self.size.x,
            self.min.y + (1.0 - ndc.y) * 0.5 * self.size.y,
        )
    }
}

/// A marker ready to paint.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedMarker {
    /// Index of the marker in [`Axes3d::markers`] order (the joint index for a
    /// single pose frame).
    pub index: usize,
    /// World-space position.
    pub world: Vec3,
    /// Pixel position.
    pub screen: Vec2,
    /// Distance along the view direction; larger is farther.
    pub depth: f32,
    /// Fill color.
    pub color: Vec3,
    /// Opacity in `[MIN_DEPTH_ALPHA, 1]`.
    pub alpha: f32,
}

/// What a projected line segment represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Outline of a back pane.
    Pane,
    /// Grid line at a tick position.
    Grid,
}

/// A line segment ready to paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedLine {
    pub from: Vec2,
    pub to: Vec2,
    pub kind: LineKind,
}

/// What a projected label represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKind {
    Tick,
    AxisName,
}

/// A text label ready to paint, centered on `position`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedLabel {
    pub position: Vec2,
    pub text: String,
    pub axis: Axis,
    pub kind: LabelKind,
}

/// Everything needed to paint one view of the axes.
///
/// Markers are sorted far to near, so painting them in order gives correct
/// occlusion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub lines: Vec<ProjectedLine>,
    pub labels: Vec<ProjectedLabel>,
    pub markers: Vec<ProjectedMarker>,
}

impl Projection {
    /// Returns the number of lines of the given kind.
    #[must_use]
    pub fn line_count(&self, kind: LineKind) -> usize {
        self.lines.iter().filter(|l| l.kind == kind).count()
    }
}

/// Projects a unit-box point to pixels. Returns `None` for points behind the
/// camera or with non-finite coordinates.
#[must_use]
pub fn project_point(view_proj: &Mat4, viewport: &Viewport, point: Vec3) -> Option<Vec2> {
    if !point.is_finite() {
        return None;
    }
    let clip = *view_proj * point.extend(1.0);
    if !clip.is_finite() || clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(viewport.ndc_to_screen(ndc.truncate()))
}

/// Returns the marker closest to `position` within `radius` pixels. Ties go
/// to the nearer marker.
#[must_use]
pub fn nearest_marker(
    projection: &Projection,
    position: Vec2,
    radius: f32,
) -> Option<&ProjectedMarker> {
    let radius_sq = radius * radius;
    projection
        .markers
        .iter()
        .filter(|m| m.screen.distance_squared(position) <= radius_sq)
        .min_by(|a, b| {
            let da = a.screen.distance_squared(position);
            let db = b.screen.distance_squared(position);
            da.total_cmp(&db).then(a.depth.total_cmp(&b.depth))
        })
}

/// Projects `axes` as seen by `camera` into `viewport`.
pub(crate) fn project_axes(axes: &Axes3d, camera: &Camera, viewport: Viewport) -> Projection {
    let mut camera = camera.clone();
    camera.set_aspect_ratio(viewport.aspect_ratio());
    let view_proj = camera.view_projection_matrix();

    // Panes sit on the side of the box facing away from the camera
    let eye = camera.position();
    let back = Vec3::new(back_side(eye.x), back_side(eye.y), back_side(eye.z));

    let mut projection = Projection::default();
    project_panes(axes, &view_proj, &viewport, back, &mut projection);
    project_labels(axes, &view_proj, &viewport, back, &mut projection);
    project_markers(axes, &camera, &view_proj, &viewport, &mut projection);
    projection
}

fn back_side(eye_offset: f32) -> f32 {
    if eye_offset >= 0.0 {
        -0.5
    } else {
        0.5
    }
}

/// Returns the two axes other than `axis`, in cyclic order.
fn others(axis: Axis) -> (Axis, Axis) {
    match axis {
        Axis::X => (Axis::Y, Axis::Z),
        Axis::Y => (Axis::Z, Axis::X),
        Axis::Z => (Axis::X, Axis::Y),
    }
}

fn box_point(pairs: [(Axis, f32); 3]) -> Vec3 {
    let mut p = Vec3::ZERO;
    for (axis, value) in pairs {
        p[axis.index()] = value;
    }
    p
}

fn push_line(
    projection: &mut Projection,
    view_proj: &Mat4,
    viewport: &Viewport,
    from: Vec3,
    to: Vec3,
    kind: LineKind,
) {
    if let (Some(from), Some(to)) = (
        project_point(view_proj, viewport, from),
        project_point(view_proj, viewport, to),
    ) {
        projection.lines.push(ProjectedLine { from, to, kind });
    }
}

fn project_panes(
    axes: &Axes3d,
    view_proj: &Mat4,
    viewport: &Viewport,
    back: Vec3,
    projection: &mut Projection,
) {
    for axis in Axis::ALL {
        let plane = back[axis.index()];
        let (u, v) = others(axis);

        let corners = [(-0.5, -0.5), (0.5, -0.5), (0.5, 0.5), (-0.5, 0.5)];
        for i in 0..corners.len() {
            let (u0, v0) = corners[i];
            let (u1, v1) = corners[(i + 1) % corners.len()];
            push_line(
                projection,
                view_proj,
                viewport,
                box_point([(axis, plane), (u, u0), (v, v0)]),
                box_point([(axis, plane), (u, u1), (v, v1)]),
                LineKind::Pane,
            );
        }

        if !axes.grid() {
            continue;
        }
        for (along, across) in [(u, v), (v, u)] {
            let limits = axes.limits(along);
            for tick in axes.ticks(along) {
                let t = limits.normalize(tick);
                push_line(
                    projection,
                    view_proj,
                    viewport,
                    box_point([(axis, plane), (along, t), (across, -0.5)]),
                    box_point([(axis, plane), (along, t), (across, 0.5)]),
                    LineKind::Grid,
                );
            }
        }
    }
}

fn project_labels(
    axes: &Axes3d,
    view_proj: &Mat4,
    viewport: &Viewport,
    back: Vec3,
    projection: &mut Projection,
) {
    let Some(center) = project_point(view_proj, viewport, Vec3::ZERO) else {
        return;
    };

    for axis in Axis::ALL {
        // Horizontal axes label the floor edge nearest the viewer; Z labels
        // a vertical edge on the near side of X and the back side of Y.
        let edge = match axis {
            Axis::X => [(Axis::Y, -back.y), (Axis::Z, back.z)],
            Axis::Y => [(Axis::X, -back.x), (Axis::Z, back.z)],
            Axis::Z => [(Axis::X, -back.x), (Axis::Y, back.y)],
        };

        let limits = axes.limits(axis);
        let decimals = tick_decimals(axes.tick_step(axis));

        for tick in axes.ticks(axis) {
            let p = box_point([(axis, limits.normalize(tick)), edge[0], edge[1]]);
            if let Some(screen) = project_point(view_proj, viewport, p) {
                projection.labels.push(ProjectedLabel {
                    position: offset_from(center, screen, TICK_LABEL_OFFSET),
                    text: format!("{tick:.decimals$}"),
                    axis,
                    kind: LabelKind::Tick,
                });
            }
        }

        let mid = box_point([(axis, 0.0), edge[0], edge[1]]);
        if let Some(screen) = project_point(view_proj, viewport, mid) {
            projection.labels.push(ProjectedLabel {
                position: offset_from(center, screen, AXIS_LABEL_OFFSET),
                text: axis.name().to_string(),
                axis,
                kind: LabelKind::AxisName,
            });
        }
    }
}

fn offset_from(center: Vec2, point: Vec2, distance: f32) -> Vec2 {
    point + (point - center).normalize_or_zero() * distance
}

fn project_markers(
    axes: &Axes3d,
    camera: &Camera,
    view_proj: &Mat4,
    viewport: &Viewport,
    projection: &mut Projection,
) {
    let eye = camera.position();
    let forward = camera.forward();

    let mut markers: Vec<ProjectedMarker> = axes
        .markers()
        .enumerate()
        .filter_map(|(index, (world, color))| {
            let unit = axes.normalize(world);
            let screen = project_point(view_proj, viewport, unit)?;
            Some(ProjectedMarker {
                index,
                world,
                screen,
                depth: (unit - eye).dot(forward),
                color,
                alpha: 1.0,
            })
        })
        .collect();

    // Far to near
    markers.sort_by(|a, b| b.depth.total_cmp(&a.depth));

    if axes.depth_shade() {
        if let (Some(far), Some(near)) = (markers.first(), markers.last()) {
            let (far, near) = (far.depth, near.depth);
            let range = far - near;
            if range > f32::EPSILON {
                for marker in &mut markers {
                    let t = (far - marker.depth) / range;
                    marker.alpha = MIN_DEPTH_ALPHA + (1.0 - MIN_DEPTH_ALPHA) * t;
                }
            }
        }
    }

    projection.markers = markers;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::draw_pose3d;
    use crate::camera::ProjectionMode;
    use proptest::prelude::*;

    fn square() -> Viewport {
        Viewport::new(Vec2::new(10.0, 20.0), Vec2::new(400.0, 400.0))
    }

    fn pose(joints: usize) -> Vec<Vec3> {
        (0..joints)
            .map(|j| {
                let t = j as f32 / joints as f32;
                Vec3::new(t, 1.0 - t, (t * 7.0).fract())
            })
            .collect()
    }

    #[test]
    fn test_center_maps_to_viewport_center() {
        for mode in [ProjectionMode::Perspective, ProjectionMode::Orthographic] {
            let mut camera = Camera::default();
            camera.set_projection_mode(mode);
            let vp = camera.view_projection_matrix();
            let screen = project_point(&vp, &square(), Vec3::ZERO).unwrap();
            assert!(screen.distance(square().center()) < 1e-3, "{mode:?}");
        }
    }

    #[test]
    fn test_behind_camera_and_nan_rejected() {
        let camera = Camera::default();
        let vp = camera.view_projection_matrix();
        let behind = camera.position() - camera.forward();
        assert!(project_point(&vp, &square(), behind).is_none());
        assert!(project_point(&vp, &square(), Vec3::new(f32::NAN, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_one_marker_per_joint() {
        let mut axes = Axes3d::new();
        let frame = pose(20);
        draw_pose3d(&mut axes, &frame, None);
        let projection = axes.project(&Camera::default(), square());

        assert_eq!(projection.markers.len(), 20);
        let mut indices: Vec<_> = projection.markers.iter().map(|m| m.index).collect();
        indices.sort_unstable();
        assert_eq!(indices, (0..20).collect::<Vec<_>>());
        for marker in &projection.markers {
            assert_eq!(marker.world, frame[marker.index]);
        }
    }

    #[test]
    fn test_markers_sorted_far_to_near_with_shading() {
        let mut axes = Axes3d::new();
        draw_pose3d(&mut axes, &pose(12), None);
        let projection = axes.project(&Camera::default(), square());

        for pair in projection.markers.windows(2) {
            assert!(pair[0].depth >= pair[1].depth);
            assert!(pair[0].alpha <= pair[1].alpha);
        }
        let last = projection.markers.last().unwrap();
        assert!((last.alpha - 1.0).abs() < 1e-6);
        assert!((projection.markers[0].alpha - MIN_DEPTH_ALPHA).abs() < 1e-6);
    }

    #[test]
    fn test_no_shading_when_disabled() {
        let mut axes = Axes3d::new();
        axes.set_depth_shade(false);
        draw_pose3d(&mut axes, &pose(5), None);
        let projection = axes.project(&Camera::default(), square());
        assert!(projection.markers.iter().all(|m| m.alpha == 1.0));
    }

    #[test]
    fn test_non_finite_markers_skipped() {
        let mut axes = Axes3d::new();
        let mut frame = pose(4);
        frame[2] = Vec3::new(f32::NAN, 0.5, 0.5);
        draw_pose3d(&mut axes, &frame, None);

        assert_eq!(axes.marker_count(), 4);
        let projection = axes.project(&Camera::default(), square());
        assert_eq!(projection.markers.len(), 3);
        assert!(projection.markers.iter().all(|m| m.index != 2));
    }

    #[test]
    fn test_panes_grid_and_labels() {
        let mut axes = Axes3d::new();
        draw_pose3d(&mut axes, &pose(3), None);
        let projection = axes.project(&Camera::default(), square());

        // 3 panes x 4 edges; 3 panes x 2 directions x 6 ticks
        assert_eq!(projection.line_count(LineKind::Pane), 12);
        assert_eq!(projection.line_count(LineKind::Grid), 36);

        let ticks: Vec<_> = projection
            .labels
            .iter()
            .filter(|l| l.kind == LabelKind::Tick && l.axis == Axis::X)
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(ticks, ["0.0", "0.2", "0.4", "0.6", "0.8", "1.0"]);

        let names = projection
            .labels
            .iter()
            .filter(|l| l.kind == LabelKind::AxisName)
            .count();
        assert_eq!(names, 3);
    }

    #[test]
    fn test_grid_off_keeps_panes() {
        let mut axes = Axes3d::new();
        axes.set_grid(false);
        let projection = axes.project(&Camera::default(), square());
        assert_eq!(projection.line_count(LineKind::Grid), 0);
        assert_eq!(projection.line_count(LineKind::Pane), 12);
    }

    #[test]
    fn test_nearest_marker() {
        let mut axes = Axes3d::new();
        draw_pose3d(&mut axes, &pose(8), None);
        let projection = axes.project(&Camera::default(), square());

        let target = &projection.markers[3];
        let hit = nearest_marker(&projection, target.screen + Vec2::new(0.5, 0.0), 3.0).unwrap();
        assert_eq!(hit.index, target.index);

        assert!(nearest_marker(&projection, Vec2::new(-500.0, -500.0), 5.0).is_none());
    }

    proptest! {
        #[test]
        fn prop_unit_cube_points_stay_on_screen(
            x in 0.0f32..=1.0,
            y in 0.0f32..=1.0,
            z in 0.0f32..=1.0,
            azimuth in -180.0f32..180.0,
            elevation in -89.0f32..89.0,
        ) {
            let mut axes = Axes3d::new();
            draw_pose3d(&mut axes, &[Vec3::new(x, y, z)], None);
            let camera = Camera::new(azimuth, elevation);
            let viewport = square();
            let projection = axes.project(&camera, viewport);

            prop_assert_eq!(projection.markers.len(), 1);
            let screen = projection.markers[0].screen;
            prop_assert!(screen.x >= viewport.min.x && screen.x <= viewport.min.x + viewport.size.x);
            prop_assert!(screen.y >= viewport.min.y && screen.y <= viewport.min.y + viewport.size.y);
        }
    }
}
