//! posescope: a minimal viewer for sequences of 3D joint positions.
//!
//! A pose file is a `.npy` array of shape `(frames, joints, 3)`. The viewer
//! shows one frame at a time as a 3D scatter plot inside the unit cube, with
//! a slider to scrub through the frames.
//!
//! # Quick Start
//!
//! ```no_run
//! use posescope::*;
//!
//! fn main() -> Result<()> {
//!     let mut viewer = PoseViewer::new(ViewerOptions::default());
//!     viewer.load("walk.npy")?;
//!
//!     // Jump to a frame before the window opens
//!     viewer.select_frame(5);
//!
//!     show(viewer)
//! }
//! ```
//!
//! Without a window, [`PoseViewer`] still tracks the current frame and the
//! [`Axes3d`] it is drawn onto, so it can be driven directly from tests.

mod app;
pub mod viewer;

pub use posescope_core::{
    has_pose_extension, load_pose_sequence, FrameCursor, PosescopeError, PoseSequence, Result,
    Vec2, Vec3, ViewerOptions, POSE_FILE_EXTENSION,
};
pub use posescope_render::{
    draw_pose3d, Axes3d, Axis, AxisLimits, Camera, Projection, ProjectionMode, Viewport,
};
pub use viewer::PoseViewer;

/// Initializes logging with `info` as the default level.
///
/// `RUST_LOG` overrides the default. Calling this more than once is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
}

/// Opens the viewer window and blocks until it is closed.
///
/// Whatever `viewer` holds is on screen from the first frame; the slider
/// range is already known when the window appears.
pub fn show(viewer: PoseViewer) -> Result<()> {
    init_logging();
    app::run_app(viewer)
}
