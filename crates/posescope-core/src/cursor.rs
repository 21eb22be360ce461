//! Current-frame index state.

/// A frame index bounded to `[0, frame_count - 1]`.
///
/// The bound comes from the loaded sequence; there is no placeholder range.
/// Every mutation clamps, so [`FrameCursor::index`] is always a valid frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCursor {
    index: usize,
    frame_count: usize,
}

impl FrameCursor {
    /// Creates a cursor at frame 0. Returns `None` for an empty range.
    #[must_use]
    pub fn new(frame_count: usize) -> Option<Self> {
        (frame_count > 0).then_some(Self {
            index: 0,
            frame_count,
        })
    }

    /// Returns the current frame index.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Returns the number of frames the cursor ranges over.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Returns the largest selectable index (the slider's upper bound).
    #[must_use]
    pub fn max(&self) -> usize {
        self.frame_count - 1
    }

    /// Moves to `index`, clamped into range. Returns the effective index.
    pub fn select(&mut self, index: usize) -> usize {
        self.index = index.min(self.max());
        self.index
    }

    /// Moves by `delta` frames, clamped into range. Returns the effective index.
    pub fn step(&mut self, delta: isize) -> usize {
        let target = self.index.saturating_add_signed(delta);
        self.select(target)
    }

    /// Returns true if the cursor is on the first frame.
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.index == 0
    }

    /// Returns true if the cursor is on the last frame.
    #[must_use]
    pub fn is_last(&self) -> bool {
        self.index == self.max()
    }
}
