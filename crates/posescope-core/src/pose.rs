//! Pose sequence data model.

use glam::Vec3;
use ndarray::Array3;

use crate::{PosescopeError, Result};

/// An ordered sequence of frames, each holding one 3D point per joint.
///
/// Points are stored frame-major in a single buffer. Every frame has the same
/// joint count; the constructors refuse anything else.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSequence {
    points: Vec<Vec3>,
    frame_count: usize,
    joint_count: usize,
}

impl PoseSequence {
    /// Builds a sequence from per-frame point lists.
    ///
    /// # Errors
    ///
    /// Returns [`PosescopeError::JointCountMismatch`] if any frame's length
    /// differs from the first frame's.
    pub fn from_frames(frames: Vec<Vec<Vec3>>) -> Result<Self> {
        let frame_count = frames.len();
        let joint_count = frames.first().map_or(0, Vec::len);

        let mut points = Vec::with_capacity(frame_count * joint_count);
        for (frame, joints) in frames.into_iter().enumerate() {
            if joints.len() != joint_count {
                return Err(PosescopeError::JointCountMismatch {
                    frame,
                    expected: joint_count,
                    actual: joints.len(),
                });
            }
            points.extend(joints);
        }

        Ok(Self {
            points,
            frame_count,
            joint_count,
        })
    }

    /// Builds a sequence from a `frames × joints × 3` array.
    ///
    /// The last axis must have length 3; callers are expected to check the
    /// shape beforehand.
    pub fn from_array(array: &Array3<f32>) -> Self {
        let (frame_count, joint_count, dims) = array.dim();
        debug_assert_eq!(dims, 3);

        let points = array
            .rows()
            .into_iter()
            .map(|p| Vec3::new(p[0], p[1], p[2]))
            .collect();

        Self {
            points,
            frame_count,
            joint_count,
        }
    }

    /// Returns the number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// Returns the number of joints per frame.
    #[must_use]
    pub fn joint_count(&self) -> usize {
        self.joint_count
    }

    /// Returns true if the sequence has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frame_count == 0
    }

    /// Returns the joints of frame `index`, or `None` if out of range.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&[Vec3]> {
        if index >= self.frame_count {
            return None;
        }
        let start = index * self.joint_count;
        self.points.get(start..start + self.joint_count)
    }

    /// Iterates over all frames in order.
    pub fn frames(&self) -> impl Iterator<Item = &[Vec3]> + '_ {
        (0..self.frame_count).filter_map(|index| self.frame(index))
    }

    /// Returns the bounding box over all finite coordinates, or `None` if
    /// there are none.
    #[must_use]
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        self.points
            .iter()
            .filter(|p| p.is_finite())
            .fold(None, |acc, &p| match acc {
                None => Some((p, p)),
                Some((min, max)) => Some((min.min(p), max.max(p))),
            })
    }

    /// Returns true if every finite coordinate lies in `[0, 1]`.
    ///
    /// The plot axes are fixed to the unit cube, so points outside it are
    /// drawn past the panes.
    #[must_use]
    pub fn fits_unit_cube(&self) -> bool {
        self.bounds()
            .is_none_or(|(min, max)| min.cmpge(Vec3::ZERO).all() && max.cmple(Vec3::ONE).all())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(frames: usize, joints: usize) -> Vec<Vec<Vec3>> {
        (0..frames)
            .map(|f| {
                (0..joints)
                    .map(|j| Vec3::new(f as f32, j as f32, 0.5))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_from_frames_shape() {
        let seq = PoseSequence::from_frames(ramp(4, 3)).unwrap();
        assert_eq!(seq.frame_count(), 4);
        assert_eq!(seq.joint_count(), 3);
        assert_eq!(seq.frame(2).unwrap()[1], Vec3::new(2.0, 1.0, 0.5));
        assert!(seq.frame(4).is_none());
    }

    #[test]
    fn test_from_frames_rejects_ragged() {
        let mut frames = ramp(3, 5);
        frames[2].pop();
        let err = PoseSequence::from_frames(frames).unwrap_err();
        assert!(matches!(
            err,
            PosescopeError::JointCountMismatch {
                frame: 2,
                expected: 5,
                actual: 4
            }
        ));
    }

    #[test]
    fn test_from_array_matches_layout() {
        let array = Array3::from_shape_fn((2, 4, 3), |(f, j, c)| (f * 100 + j * 10 + c) as f32);
        let seq = PoseSequence::from_array(&array);
        assert_eq!(seq.frame_count(), 2);
        assert_eq!(seq.joint_count(), 4);
        assert_eq!(seq.frame(1).unwrap()[3], Vec3::new(130.0, 131.0, 132.0));
    }

    #[test]
    fn test_frames_iterator() {
        let seq = PoseSequence::from_frames(ramp(5, 2)).unwrap();
        let frames: Vec<_> = seq.frames().collect();
        assert_eq!(frames.len(), 5);
        assert!(frames.iter().all(|f| f.len() == 2));
        assert_eq!(frames[3][0].x, 3.0);
    }

    #[test]
    fn test_bounds_skip_non_finite() {
        let seq = PoseSequence::from_frames(vec![vec![
            Vec3::new(0.2, 0.4, 0.1),
            Vec3::new(f32::NAN, 0.0, 0.0),
            Vec3::new(0.8, 0.3, 0.9),
        ]])
        .unwrap();
        let (min, max) = seq.bounds().unwrap();
        assert_eq!(min, Vec3::new(0.2, 0.3, 0.1));
        assert_eq!(max, Vec3::new(0.8, 0.4, 0.9));
    }

    #[test]
    fn test_fits_unit_cube() {
        let inside = PoseSequence::from_frames(vec![vec![Vec3::ZERO, Vec3::ONE]]).unwrap();
        assert!(inside.fits_unit_cube());

        let outside = PoseSequence::from_frames(ramp(3, 2)).unwrap();
        assert!(!outside.fits_unit_cube());

        let below = PoseSequence::from_frames(vec![vec![Vec3::new(0.5, -0.1, 0.5)]]).unwrap();
        assert!(!below.fits_unit_cube());
    }

    #[test]
    fn test_empty_sequence() {
        let seq = PoseSequence::from_frames(Vec::new()).unwrap();
        assert!(seq.is_empty());
        assert!(seq.frame(0).is_none());
        assert_eq!(seq.frames().count(), 0);
        assert!(seq.bounds().is_none());
        assert!(seq.fits_unit_cube());
    }
}
