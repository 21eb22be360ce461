//! Window-independent viewer state.

use std::path::{Path, PathBuf};

use posescope_core::{
    load_pose_sequence, FrameCursor, PoseSequence, Result, Vec3, ViewerOptions,
};
use posescope_render::{draw_pose3d, Axes3d, Camera};

/// The state behind the viewer window: the loaded sequence, the current
/// frame and the axes it is drawn onto.
///
/// Everything here works without a window, so the app is a thin layer that
/// forwards UI events to these methods.
#[derive(Debug, Clone)]
pub struct PoseViewer {
    options: ViewerOptions,
    sequence: Option<PoseSequence>,
    cursor: Option<FrameCursor>,
    source: Option<PathBuf>,
    axes: Axes3d,
    camera: Camera,
    marker_color: Vec3,
    grid: bool,
}

impl PoseViewer {
    /// Creates a viewer with nothing loaded.
    #[must_use]
    pub fn new(options: ViewerOptions) -> Self {
        let mut axes = Axes3d::new();
        axes.set_max_ticks(options.max_ticks);
        axes.set_depth_shade(options.depth_shade);

        Self {
            camera: Camera::new(options.azimuth_degrees, options.elevation_degrees),
            marker_color: options.marker_color,
            options,
            sequence: None,
            cursor: None,
            source: None,
            axes,
            grid: true,
        }
    }

    /// Replaces the displayed sequence and shows its first frame.
    ///
    /// The slider bound comes from `sequence` itself. A sequence without
    /// frames leaves the viewer empty.
    pub fn set_sequence(&mut self, sequence: PoseSequence) {
        self.cursor = FrameCursor::new(sequence.frame_count());
        self.sequence = Some(sequence);
        self.source = None;
        self.redraw();
    }

    /// Loads a `.npy` file and shows its first frame.
    ///
    /// On failure the current sequence is kept.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let sequence = load_pose_sequence(path)?;
        self.set_sequence(sequence);
        self.source = Some(path.to_path_buf());
        Ok(())
    }

    /// Shows frame `index`, clamped to the loaded range. Returns the index
    /// actually shown, or 0 when nothing is loaded.
    pub fn select_frame(&mut self, index: usize) -> usize {
        let Some(cursor) = &mut self.cursor else {
            return 0;
        };
        let shown = cursor.select(index);
        log::debug!("showing frame {shown} (requested {index})");
        self.redraw();
        shown
    }

    /// Moves `delta` frames forward (or back when negative).
    pub fn step(&mut self, delta: isize) -> usize {
        let Some(cursor) = &mut self.cursor else {
            return 0;
        };
        let shown = cursor.step(delta);
        self.redraw();
        shown
    }

    /// Number of frames loaded.
    pub fn frame_count(&self) -> usize {
        self.cursor.map_or(0, |c| c.frame_count())
    }

    /// Largest index the slider accepts, if anything is loaded.
    pub fn slider_max(&self) -> Option<usize> {
        self.cursor.map(|c| c.max())
    }

    pub fn current_index(&self) -> Option<usize> {
        self.cursor.map(|c| c.index())
    }

    /// Joint positions of the frame on screen.
    pub fn current_frame(&self) -> Option<&[Vec3]> {
        let index = self.current_index()?;
        self.sequence.as_ref()?.frame(index)
    }

    pub fn sequence(&self) -> Option<&PoseSequence> {
        self.sequence.as_ref()
    }

    /// File the sequence was loaded from, if it came from disk.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn can_step_back(&self) -> bool {
        self.cursor.is_some_and(|c| !c.is_first())
    }

    pub fn can_step_forward(&self) -> bool {
        self.cursor.is_some_and(|c| !c.is_last())
    }

    /// The drawing surface.
    pub fn axes(&self) -> &Axes3d {
        &self.axes
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Both halves borrowed at once, for the canvas.
    pub fn axes_and_camera_mut(&mut self) -> (&Axes3d, &mut Camera) {
        (&self.axes, &mut self.camera)
    }

    pub fn marker_color(&self) -> Vec3 {
        self.marker_color
    }

    /// Changes the marker color and redraws.
    pub fn set_marker_color(&mut self, color: Vec3) {
        self.marker_color = color;
        self.redraw();
    }

    pub fn grid(&self) -> bool {
        self.grid
    }

    /// Shows or hides the grid, for this and later frames.
    pub fn set_grid(&mut self, visible: bool) {
        self.grid = visible;
        self.axes.set_grid(visible);
    }

    pub fn options(&self) -> &ViewerOptions {
        &self.options
    }

    fn redraw(&mut self) {
        let color = Some(self.marker_color);
        match (self.cursor, &self.sequence) {
            (Some(cursor), Some(sequence)) => {
                let frame = sequence.frame(cursor.index()).unwrap_or_default();
                draw_pose3d(&mut self.axes, frame, color);
            }
            _ => draw_pose3d(&mut self.axes, &[], color),
        }
        self.axes.set_grid(self.grid);
    }
}

impl Default for PoseViewer {
    fn default() -> Self {
        Self::new(ViewerOptions::default())
    }
}
