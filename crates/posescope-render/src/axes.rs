//! 3D axes: the drawing surface a pose frame is scattered onto.
//!
//! [`Axes3d`] holds world-space content only (scatter collections, axis
//! limits, grid flag). Mapping it to the screen happens in
//! [`Axes3d::project`], so the same content can be viewed from any camera.

use glam::Vec3;

use crate::camera::Camera;
use crate::projection::{self, Projection, Viewport};

/// Marker color used when the caller does not pick one.
pub const DEFAULT_MARKER_COLOR: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Default upper bound on ticks per axis.
pub const DEFAULT_MAX_TICKS: usize = 6;

/// One of the three plot axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes in order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];

    /// Returns the component index of this axis.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        }
    }
}

/// Visible range of one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisLimits {
    pub min: f32,
    pub max: f32,
}

impl AxisLimits {
    /// The `[0, 1]` range.
    pub const UNIT: Self = Self { min: 0.0, max: 1.0 };

    /// Creates limits, swapping reversed bounds and widening an empty range.
    #[must_use]
    pub fn new(a: f32, b: f32) -> Self {
        let (min, max) = if a <= b { (a, b) } else { (b, a) };
        if max - min > f32::EPSILON * min.abs().max(1.0) {
            Self { min, max }
        } else {
            log::warn!("degenerate axis limits [{a}, {b}], widening by 0.5");
            Self {
                min: min - 0.5,
                max: max + 0.5,
            }
        }
    }

    /// Returns `max - min`.
    #[must_use]
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Maps `value` into the unit box coordinate `[-0.5, 0.5]`.
    #[must_use]
    pub fn normalize(&self, value: f32) -> f32 {
        (value - self.min) / self.span() - 0.5
    }
}

impl Default for AxisLimits {
    fn default() -> Self {
        Self::UNIT
    }
}

/// A single-color point collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Scatter {
    pub points: Vec<Vec3>,
    pub color: Vec3,
}

/// The drawing surface: scatter collections inside a limits box.
#[derive(Debug, Clone)]
pub struct Axes3d {
    scatters: Vec<Scatter>,
    limits: [AxisLimits; 3],
    grid: bool,
    max_ticks: usize,
    depth_shade: bool,
}

impl Axes3d {
    /// Creates empty axes with unit limits and the grid on.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scatters: Vec::new(),
            limits: [AxisLimits::UNIT; 3],
            grid: true,
            max_ticks: DEFAULT_MAX_TICKS,
            depth_shade: true,
        }
    }

    /// Clears all content and resets limits and grid.
    ///
    /// Tick count and depth shading are presentation settings and survive.
    pub fn cla(&mut self) {
        self.scatters.clear();
        self.limits = [AxisLimits::UNIT; 3];
        self.grid = true;
    }

    /// Adds a scatter collection.
    pub fn scatter(&mut self, points: &[Vec3], color: Vec3) {
        self.scatters.push(Scatter {
            points: points.to_vec(),
            color,
        });
    }

    /// Returns the scatter collections in draw order.
    #[must_use]
    pub fn scatters(&self) -> &[Scatter] {
        &self.scatters
    }

    /// Returns the total number of markers across all collections.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.scatters.iter().map(|s| s.points.len()).sum()
    }

    /// Iterates over `(position, color)` for every marker.
    pub fn markers(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.scatters
            .iter()
            .flat_map(|s| s.points.iter().map(move |&p| (p, s.color)))
    }

    /// Sets the visible range of one axis.
    pub fn set_limits(&mut self, axis: Axis, min: f32, max: f32) {
        self.limits[axis.index()] = AxisLimits::new(min, max);
    }

    /// Returns the visible range of one axis.
    #[must_use]
    pub fn limits(&self, axis: Axis) -> AxisLimits {
        self.limits[axis.index()]
    }

    /// Shows or hides the grid.
    pub fn set_grid(&mut self, visible: bool) {
        self.grid = visible;
    }

    /// Returns whether the grid is shown.
    #[must_use]
    pub fn grid(&self) -> bool {
        self.grid
    }

    /// Sets the upper bound on ticks per axis (at least 2).
    pub fn set_max_ticks(&mut self, max_ticks: usize) {
        self.max_ticks = max_ticks.max(2);
    }

    /// Enables fading of far markers.
    pub fn set_depth_shade(&mut self, enabled: bool) {
        self.depth_shade = enabled;
    }

    /// Returns whether far markers are faded.
    #[must_use]
    pub fn depth_shade(&self) -> bool {
        self.depth_shade
    }

    /// Returns tick positions for one axis.
    #[must_use]
    pub fn ticks(&self, axis: Axis) -> Vec<f32> {
        nice_ticks(self.limits(axis), self.max_ticks)
    }

    /// Returns the spacing between ticks on one axis.
    #[must_use]
    pub fn tick_step(&self, axis: Axis) -> f32 {
        tick_step(self.limits(axis), self.max_ticks)
    }

    /// Maps a world point into the unit box `[-0.5, 0.5]³`.
    #[must_use]
    pub fn normalize(&self, point: Vec3) -> Vec3 {
        Vec3::new(
            self.limits[0].normalize(point.x),
            self.limits[1].normalize(point.y),
            self.limits[2].normalize(point.z),
        )
    }

    /// Projects the axes to screen space.
    ///
    /// The camera's aspect ratio is taken from `viewport`.
    #[must_use]
    pub fn project(&self, camera: &Camera, viewport: Viewport) -> Projection {
        projection::project_axes(self, camera, viewport)
    }
}

impl Default for Axes3d {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws one pose frame: clears `axes`, scatters every joint, fixes the
/// limits to `[0, 1]` on all axes and turns the grid on.
pub fn draw_pose3d(axes: &mut Axes3d, pose: &[Vec3], color: Option<Vec3>) {
    axes.cla();
    axes.scatter(pose, color.unwrap_or(DEFAULT_MARKER_COLOR));
    for axis in Axis::ALL {
        axes.set_limits(axis, 0.0, 1.0);
    }
    axes.set_grid(true);
}

/// Returns evenly spaced tick positions inside `limits` using a step of
/// 1, 2, 2.5 or 5 times a power of ten, with at most `max_ticks` ticks
/// (and never fewer than two allowed).
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn nice_ticks(limits: AxisLimits, max_ticks: usize) -> Vec<f32> {
    let step = tick_step(limits, max_ticks);
    if !step.is_finite() || step <= 0.0 {
        return Vec::new();
    }

    let first = (limits.min / step).ceil();
    let tolerance = step * 1e-3;
    let mut ticks = Vec::new();
    for i in 0..max_ticks.max(2) {
        let value = (first + i as f32) * step;
        if value > limits.max + tolerance {
            break;
        }
        // Snap values like 0.6000001 and -0.0
        let snapped = (value / step).round() * step;
        ticks.push(if snapped == 0.0 { 0.0 } else { snapped });
    }
    ticks
}

/// Returns the tick spacing [`nice_ticks`] uses.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn tick_step(limits: AxisLimits, max_ticks: usize) -> f32 {
    let intervals = max_ticks.max(2) - 1;
    let raw = limits.span() / intervals as f32;
    let magnitude = 10f32.powf(raw.log10().floor());
    // Tolerate rounding in the power of ten
    let normalized = raw / magnitude - 1e-4;
    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 2.5 {
        2.5
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };
    nice * magnitude
}

/// Returns how many decimals a tick label needs for the given step.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn tick_decimals(step: f32) -> usize {
    if !step.is_finite() || step <= 0.0 {
        return 0;
    }
    let mut decimals = (-step.log10().floor()).max(0.0) as usize;
    // 2.5 * 10^n needs one more digit
    let scaled = step * 10f32.powi(decimals as i32);
    if (scaled - scaled.round()).abs() > 1e-3 {
        decimals += 1;
    }
    decimals.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn frame(joints: usize) -> Vec<Vec3> {
        (0..joints)
            .map(|j| Vec3::splat(j as f32 / joints as f32))
            .collect()
    }

    #[test]
    fn test_draw_pose3d_replaces_content() {
        let mut axes = Axes3d::new();
        draw_pose3d(&mut axes, &frame(20), None);
        draw_pose3d(&mut axes, &frame(7), Some(Vec3::new(0.0, 0.0, 1.0)));

        assert_eq!(axes.scatters().len(), 1);
        assert_eq!(axes.marker_count(), 7);
        assert_eq!(axes.scatters()[0].color, Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_draw_pose3d_defaults() {
        let mut axes = Axes3d::new();
        axes.set_limits(Axis::Y, -3.0, 3.0);
        axes.set_grid(false);
        draw_pose3d(&mut axes, &frame(3), None);

        assert_eq!(axes.scatters()[0].color, DEFAULT_MARKER_COLOR);
        for axis in Axis::ALL {
            assert_eq!(axes.limits(axis), AxisLimits::UNIT);
        }
        assert!(axes.grid());
    }

    #[test]
    fn test_markers_keep_order_and_color() {
        let mut axes = Axes3d::new();
        let pose = frame(4);
        draw_pose3d(&mut axes, &pose, None);
        let markers: Vec<_> = axes.markers().collect();
        assert_eq!(markers.len(), 4);
        for (i, (p, c)) in markers.into_iter().enumerate() {
            assert_eq!(p, pose[i]);
            assert_eq!(c, DEFAULT_MARKER_COLOR);
        }
    }

    #[test]
    fn test_limits_swap_and_widen() {
        assert_eq!(AxisLimits::new(1.0, 0.0), AxisLimits::UNIT);
        let widened = AxisLimits::new(2.0, 2.0);
        assert_eq!(widened.min, 1.5);
        assert_eq!(widened.max, 2.5);
    }

    #[test]
    fn test_normalize_unit_box() {
        let axes = Axes3d::new();
        assert_eq!(axes.normalize(Vec3::splat(0.5)), Vec3::ZERO);
        assert_eq!(axes.normalize(Vec3::ZERO), Vec3::splat(-0.5));
        assert_eq!(axes.normalize(Vec3::ONE), Vec3::splat(0.5));
    }

    #[test]
    fn test_unit_ticks() {
        let ticks = nice_ticks(AxisLimits::UNIT, 6);
        assert_eq!(ticks.len(), 6);
        let expected = [0.0, 0.2, 0.4, 0.6, 0.8, 1.0];
        for (t, e) in ticks.iter().zip(expected) {
            assert!((t - e).abs() < 1e-6, "{t} != {e}");
        }
        assert_eq!(tick_decimals(tick_step(AxisLimits::UNIT, 6)), 1);
    }

    #[test]
    fn test_tick_decimals() {
        assert_eq!(tick_decimals(0.2), 1);
        assert_eq!(tick_decimals(0.25), 2);
        assert_eq!(tick_decimals(0.05), 2);
        assert_eq!(tick_decimals(5.0), 1);
    }

    #[test]
    fn test_offset_limits_ticks() {
        let ticks = nice_ticks(AxisLimits::new(-1.0, 1.0), 5);
        assert_eq!(ticks, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_tick_count_never_exceeds_max() {
        assert_eq!(nice_ticks(AxisLimits::UNIT, 2), vec![0.0, 1.0]);
        // A span just over a nice multiple stays within the bound
        let ticks = nice_ticks(AxisLimits::new(0.0, 1.000_05), 6);
        assert!(ticks.len() <= 6);
        assert_eq!(ticks[0], 0.0);
        assert!(nice_ticks(AxisLimits::new(-3.0, 7.0), 3).len() <= 3);
    }

    proptest! {
        #[test]
        fn prop_ticks_inside_limits_and_bounded(
            min in -100.0f32..100.0,
            span in 0.1f32..1000.0,
            max_ticks in 2usize..12,
        ) {
            let limits = AxisLimits::new(min, min + span);
            let ticks = nice_ticks(limits, max_ticks);
            let step = tick_step(limits, max_ticks);
            prop_assert!(ticks.len() <= max_ticks);
            for pair in ticks.windows(2) {
                prop_assert!(pair[1] > pair[0]);
            }
            for t in ticks {
                prop_assert!(t >= limits.min - step * 1e-2 && t <= limits.max + step * 1e-2);
            }
        }
    }
}
