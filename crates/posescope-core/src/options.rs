//! Configuration options for the viewer.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Viewer configuration.
///
/// Every field has a default, so an options file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerOptions {
    /// Window title.
    pub window_title: String,

    /// Initial window size in logical pixels.
    pub window_size: [u32; 2],

    /// Plot background color.
    pub background_color: Vec3,

    /// Default marker color for the scattered joints.
    pub marker_color: Vec3,

    /// Marker radius in points.
    pub marker_radius: f32,

    /// Fade markers that are farther from the camera.
    pub depth_shade: bool,

    /// Upper bound on the number of ticks per axis.
    pub max_ticks: usize,

    /// Use the dark egui theme for panels.
    pub dark_mode: bool,

    /// Initial camera azimuth in degrees.
    pub azimuth_degrees: f32,

    /// Initial camera elevation in degrees.
    pub elevation_degrees: f32,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            window_title: "3D Pose Viewer".to_string(),
            window_size: [640, 720],
            background_color: Vec3::ONE,
            marker_color: Vec3::new(1.0, 0.0, 0.0),
            marker_radius: 4.0,
            depth_shade: true,
            max_ticks: 6,
            dark_mode: false,
            azimuth_degrees: -60.0,
            elevation_degrees: 30.0,
        }
    }
}

impl ViewerOptions {
    /// Parses options from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json(&json)?;
        log::info!("read viewer options from {}", path.display());
        Ok(options)
    }
}
