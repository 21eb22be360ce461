//! Rendering backend for posescope.
//!
//! - [`Axes3d`] and [`draw_pose3d`]: the drawing surface a frame is scattered onto
//! - [`Camera`]: z-up orbit camera
//! - [`Projection`]: screen-space primitives for a 2D painter
//! - [`RenderEngine`]: the wgpu window surface and frame readback

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Pixel math mixes u32 sizes and f32 coordinates
#![allow(clippy::cast_precision_loss)]

pub mod axes;
pub mod camera;
pub mod engine;
pub mod error;
pub mod projection;
pub mod screenshot;

pub use axes::{draw_pose3d, nice_ticks, Axes3d, Axis, AxisLimits, Scatter, DEFAULT_MARKER_COLOR};
pub use camera::{Camera, ProjectionMode};
pub use engine::{CaptureTarget, RenderEngine};
pub use error::{RenderError, RenderResult};
pub use projection::{
    nearest_marker, LabelKind, LineKind, ProjectedLabel, ProjectedLine, ProjectedMarker,
    Projection, Viewport,
};
pub use screenshot::{capture_file_name, save_image, ScreenshotError};
