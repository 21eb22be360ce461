//! `.npy` pose file loading.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use ndarray::{ArrayD, Ix3};
use ndarray_npy::{ReadNpyError, ReadNpyExt};

use crate::error::{PosescopeError, Result};
use crate::pose::PoseSequence;

/// The recognized pose file extension.
pub const POSE_FILE_EXTENSION: &str = "npy";

/// Loads a `frames × joints × 3` pose sequence from a `.npy` file.
///
/// Both `float64` and `float32` arrays are accepted, in C or Fortran order.
///
/// # Errors
///
/// - [`PosescopeError::InvalidFormat`] if the extension is not `.npy`, the
///   contents are not a float array, the shape is not `(N, J, 3)`, or `N == 0`.
/// - [`PosescopeError::NotFound`] if the path is not an existing file.
/// - [`PosescopeError::Io`] if the file exists but cannot be opened.
pub fn load_pose_sequence(path: impl AsRef<Path>) -> Result<PoseSequence> {
    let path = path.as_ref();

    if !has_pose_extension(path) {
        return Err(PosescopeError::invalid_format(
            path,
            format!("expected a .{POSE_FILE_EXTENSION} file"),
        ));
    }
    if !path.is_file() {
        return Err(PosescopeError::NotFound(path.to_path_buf()));
    }

    let array = read_float_array(path)?;
    let shape = array.shape().to_vec();
    if shape.len() != 3 || shape[2] != 3 {
        return Err(PosescopeError::invalid_format(
            path,
            format!("expected shape (frames, joints, 3), got {shape:?}"),
        ));
    }
    if shape[0] == 0 {
        return Err(PosescopeError::invalid_format(path, "array has no frames"));
    }

    let array = array
        .into_dimensionality::<Ix3>()
        .map_err(|e| PosescopeError::invalid_format(path, e.to_string()))?;
    let sequence = PoseSequence::from_array(&array);
    if !sequence.fits_unit_cube() {
        if let Some((min, max)) = sequence.bounds() {
            log::warn!(
                "{} has coordinates outside the unit cube (min {min}, max {max}); they will be drawn past the axes",
                path.display()
            );
        }
    }

    log::info!(
        "loaded {} frames x {} joints from {}",
        sequence.frame_count(),
        sequence.joint_count(),
        path.display()
    );
    Ok(sequence)
}

/// Returns true if `path` carries the pose file extension (case-insensitive).
///
/// A file named just `.npy` counts, even though [`Path::extension`] sees no
/// extension there.
#[must_use]
pub fn has_pose_extension(path: &Path) -> bool {
    let suffix = format!(".{POSE_FILE_EXTENSION}");
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.len().checked_sub(suffix.len()).map(|start| &name.as_bytes()[start..]))
        .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix.as_bytes()))
}

/// Reads the array as `f64`, falling back to `f32` when the descriptor says so.
#[allow(clippy::cast_possible_truncation)]
fn read_float_array(path: &Path) -> Result<ArrayD<f32>> {
    match ArrayD::<f64>::read_npy(open(path)?) {
        Ok(array) => Ok(array.mapv(|v| v as f32)),
        Err(ReadNpyError::WrongDescriptor(_)) => {
            log::debug!("{} is not float64, retrying as float32", path.display());
            ArrayD::<f32>::read_npy(open(path)?).map_err(|e| npy_error(path, &e))
        }
        Err(e) => Err(npy_error(path, &e)),
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    match File::open(path) {
        Ok(file) => Ok(BufReader::new(file)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(PosescopeError::NotFound(path.to_path_buf()))
        }
        Err(e) => Err(e.into()),
    }
}

fn npy_error(path: &Path, error: &ReadNpyError) -> PosescopeError {
    let reason = match error {
        ReadNpyError::WrongDescriptor(_) => "array is not float32 or float64".to_string(),
        other => other.to_string(),
    };
    PosescopeError::invalid_format(path, reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_extension_check() {
        assert!(has_pose_extension(Path::new("poses.npy")));
        assert!(has_pose_extension(Path::new("dir/POSES.NPY")));
        assert!(!has_pose_extension(Path::new("poses.npz")));
        assert!(!has_pose_extension(Path::new("poses")));
        assert!(!has_pose_extension(Path::new("npy")));
        assert!(!has_pose_extension(Path::new("posesnpy")));
        assert!(has_pose_extension(Path::new(".npy")));
        assert!(has_pose_extension(Path::new("dir/.NPY")));
    }

    #[test]
    fn test_wrong_extension_is_invalid_format() {
        let err = load_pose_sequence("poses.csv").unwrap_err();
        assert!(matches!(err, PosescopeError::InvalidFormat { .. }));
    }

    #[test]
    fn test_extension_checked_before_existence() {
        // A missing file with the wrong extension reports the extension
        let err = load_pose_sequence("/definitely/missing/poses.txt").unwrap_err();
        assert!(matches!(err, PosescopeError::InvalidFormat { .. }));
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let path = PathBuf::from("/definitely/missing/poses.npy");
        match load_pose_sequence(&path) {
            Err(PosescopeError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_not_found_message_names_path() {
        let err = load_pose_sequence("missing.npy").unwrap_err();
        assert_eq!(err.to_string(), "missing.npy does not exist");
    }
}
