//! UI layer for posescope.
//!
//! - [`EguiIntegration`]: egui on top of winit and wgpu
//! - [`plot_view`]: the interactive 3D canvas
//! - [`panels`]: toolbar, frame slider and status line

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod integration;
pub mod panels;
pub mod plot_view;

pub use integration::{EguiIntegration, PreparedFrame};
pub use panels::{
    build_frame_slider, build_status_line, build_toolbar, StatusLine, ToolbarAction,
    ToolbarResponse, ToolbarState,
};
pub use plot_view::{
    paint_projection, plot_view, to_color32, to_color32_alpha, HoveredJoint, PlotResponse,
    PlotStyle,
};

pub use egui;
pub use egui_wgpu::ScreenDescriptor;
