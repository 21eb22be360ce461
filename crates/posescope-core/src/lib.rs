//! Core types for posescope.
//!
//! This crate holds everything that does not touch a window or a GPU:
//! - [`PoseSequence`], the immutable `frames × joints × 3` data loaded from disk
//! - [`load_pose_sequence`], the `.npy` loader
//! - [`FrameCursor`], the bounded current-frame index driven by the slider
//! - [`ViewerOptions`] and the shared error type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod cursor;
pub mod error;
pub mod loader;
pub mod options;
pub mod pose;

pub use cursor::FrameCursor;
pub use error::{PosescopeError, Result};
pub use loader::{has_pose_extension, load_pose_sequence, POSE_FILE_EXTENSION};
pub use options::ViewerOptions;
pub use pose::PoseSequence;

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3};
