//! Orbit camera for the 3D axes.
//!
//! The camera circles a target point with the world Z axis pointing up, the
//! same convention a 3D scatter plot uses. Angles follow plotting conventions:
//! azimuth is measured in the XY plane from +X, elevation from the XY plane.

use glam::{Mat4, Vec3};

/// Default azimuth in degrees.
pub const DEFAULT_AZIMUTH: f32 = -60.0;
/// Default elevation in degrees.
pub const DEFAULT_ELEVATION: f32 = 30.0;

const DEFAULT_DISTANCE: f32 = 3.2;
const MAX_ELEVATION: f32 = 89.9;

/// Camera projection mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectionMode {
    /// Perspective projection.
    #[default]
    Perspective,
    /// Orthographic projection.
    Orthographic,
}

impl ProjectionMode {
    /// Returns the other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        }
    }

    /// Returns display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ProjectionMode::Perspective => "Perspective",
            ProjectionMode::Orthographic => "Orthographic",
        }
    }
}

/// A z-up orbit camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Point the camera orbits around.
    pub target: Vec3,
    /// Azimuth in radians.
    pub azimuth: f32,
    /// Elevation in radians.
    pub elevation: f32,
    /// Distance from the target.
    pub distance: f32,
    /// Vertical field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width / height).
    pub aspect_ratio: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
    /// Projection mode.
    pub projection_mode: ProjectionMode,
    /// Half height of the orthographic view volume.
    pub ortho_scale: f32,
    home_azimuth: f32,
    home_elevation: f32,
}

impl Camera {
    /// Creates a camera looking at the origin from the given angles in degrees.
    #[must_use]
    pub fn new(azimuth_degrees: f32, elevation_degrees: f32) -> Self {
        let elevation = elevation_degrees.clamp(-MAX_ELEVATION, MAX_ELEVATION);
        Self {
            target: Vec3::ZERO,
            azimuth: azimuth_degrees.to_radians(),
            elevation: elevation.to_radians(),
            distance: DEFAULT_DISTANCE,
            fov: std::f32::consts::FRAC_PI_4, // 45 degrees
            aspect_ratio: 1.0,
            near: 0.01,
            far: 100.0,
            projection_mode: ProjectionMode::Perspective,
            ortho_scale: 0.9,
            home_azimuth: azimuth_degrees.to_radians(),
            home_elevation: elevation.to_radians(),
        }
    }

    /// Sets the aspect ratio. Degenerate viewports are ignored.
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
        if aspect_ratio.is_finite() && aspect_ratio > 0.0 {
            self.aspect_ratio = aspect_ratio;
        }
    }

    /// Returns the camera position in world space.
    #[must_use]
    pub fn position(&self) -> Vec3 {
        let (sin_az, cos_az) = self.azimuth.sin_cos();
        let (sin_el, cos_el) = self.elevation.sin_cos();
        self.target + self.distance * Vec3::new(cos_el * cos_az, cos_el * sin_az, sin_el)
    }

    /// Returns the view matrix.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Z)
    }

    /// Returns the projection matrix.
    #[must_use]
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection_mode {
            ProjectionMode::Perspective => {
                Mat4::perspective_rh(self.fov, self.aspect_ratio, self.near, self.far)
            }
            ProjectionMode::Orthographic => {
                let half_height = self.ortho_scale;
                let half_width = half_height * self.aspect_ratio;
                Mat4::orthographic_rh(
                    -half_width,
                    half_width,
                    -half_height,
                    half_height,
                    self.near,
                    self.distance + self.far,
                )
            }
        }
    }

    /// Returns the combined view-projection matrix.
    #[must_use]
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Returns the camera's forward direction.
    #[must_use]
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    /// Returns the camera's right direction.
    #[must_use]
    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Z).normalize()
    }

    /// Returns the camera's screen-up direction.
    #[must_use]
    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Returns the world-space height visible at the target distance.
    #[must_use]
    pub fn view_height(&self) -> f32 {
        match self.projection_mode {
            ProjectionMode::Perspective => 2.0 * self.distance * (self.fov * 0.5).tan(),
            ProjectionMode::Orthographic => 2.0 * self.ortho_scale,
        }
    }

    /// Azimuth in degrees, wrapped to `(-180, 180]`.
    #[must_use]
    pub fn azimuth_degrees(&self) -> f32 {
        let degrees = self.azimuth.to_degrees() % 360.0;
        if degrees > 180.0 {
            degrees - 360.0
        } else if degrees <= -180.0 {
            degrees + 360.0
        } else {
            degrees
        }
    }

    /// Elevation in degrees.
    #[must_use]
    pub fn elevation_degrees(&self) -> f32 {
        self.elevation.to_degrees()
    }

    /// Orbits the camera around the target. Deltas are in radians.
    pub fn orbit(&mut self, delta_azimuth: f32, delta_elevation: f32) {
        let limit = MAX_ELEVATION.to_radians();
        self.azimuth += delta_azimuth;
        self.elevation = (self.elevation + delta_elevation).clamp(-limit, limit);
    }

    /// Pans the target in the view plane.
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        self.target += self.right() * delta_x + self.up() * delta_y;
    }

    /// Zooms in for positive `delta`, out for negative.
    pub fn zoom(&mut self, delta: f32) {
        let factor = (1.0 - delta * 0.1).clamp(0.5, 1.5);
        match self.projection_mode {
            ProjectionMode::Perspective => {
                self.distance = (self.distance * factor).clamp(0.2, 50.0);
            }
            ProjectionMode::Orthographic => {
                self.ortho_scale = (self.ortho_scale * factor).clamp(0.05, 20.0);
            }
        }
    }

    /// Restores the initial view, keeping the projection mode.
    pub fn reset(&mut self) {
        self.target = Vec3::ZERO;
        self.azimuth = self.home_azimuth;
        self.elevation = self.home_elevation;
        self.distance = DEFAULT_DISTANCE;
        self.ortho_scale = 0.9;
    }

    /// Sets the projection mode.
    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
    }

    /// Sets both view angles in degrees.
    pub fn set_view(&mut self, azimuth_degrees: f32, elevation_degrees: f32) {
        self.azimuth = azimuth_degrees.to_radians();
        self.elevation = elevation_degrees
            .clamp(-MAX_ELEVATION, MAX_ELEVATION)
            .to_radians();
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(DEFAULT_AZIMUTH, DEFAULT_ELEVATION)
    }
}
