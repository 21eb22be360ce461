//! Error types for posescope.

use std::path::PathBuf;

use thiserror::Error;

/// The main error type for posescope operations.
#[derive(Error, Debug)]
pub enum PosescopeError {
    /// The pose file does not exist.
    #[error("{} does not exist", .0.display())]
    NotFound(PathBuf),

    /// The pose file has the wrong extension or unparsable contents.
    #[error("invalid pose file {}: {reason}", path.display())]
    InvalidFormat { path: PathBuf, reason: String },

    /// Frames of a pose sequence disagree on their joint count.
    #[error("frame {frame} has {actual} joints, expected {expected}")]
    JointCountMismatch {
        frame: usize,
        expected: usize,
        actual: usize,
    },

    /// Window or GPU setup failed.
    #[error("render error: {0}")]
    Render(String),

    /// The windowing event loop failed.
    #[error("event loop error: {0}")]
    EventLoop(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The viewer options file could not be parsed.
    #[error("invalid viewer options: {0}")]
    Options(#[from] serde_json::Error),
}

impl PosescopeError {
    pub(crate) fn invalid_format(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::InvalidFormat {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized Result type for posescope operations.
pub type Result<T> = std::result::Result<T, PosescopeError>;
