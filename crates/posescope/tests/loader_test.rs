//! Loading pose files written with ndarray-npy.
//!
//! Fixtures go to the OS temp dir under a per-test name so tests can run in
//! parallel.

use std::path::PathBuf;

use ndarray::{Array, Array2, Array3, Array4};
use ndarray_npy::write_npy;
use posescope::*;

fn fixture_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("posescope_{}_{name}", std::process::id()))
}

/// Frame `f`, joint `j` sits at `(f, j, f + j) / 100`.
fn ramp(frames: usize, joints: usize) -> Array3<f64> {
    Array::from_shape_fn((frames, joints, 3), |(f, j, c)| match c {
        0 => f as f64 / 100.0,
        1 => j as f64 / 100.0,
        _ => (f + j) as f64 / 100.0,
    })
}

#[test]
fn test_load_f64_sequence() {
    let path = fixture_path("f64.npy");
    write_npy(&path, &ramp(30, 20)).unwrap();

    let sequence = load_pose_sequence(&path).unwrap();
    assert_eq!(sequence.frame_count(), 30);
    assert_eq!(sequence.joint_count(), 20);
    assert_eq!(sequence.frames().count(), 30);

    let frame = sequence.frame(5).unwrap();
    assert_eq!(frame.len(), 20);
    assert!((frame[3] - Vec3::new(0.05, 0.03, 0.08)).length() < 1e-6);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_load_f32_sequence() {
    let path = fixture_path("f32.npy");
    let data: Array3<f32> = ramp(4, 2).mapv(|v| v as f32);
    write_npy(&path, &data).unwrap();

    let sequence = load_pose_sequence(&path).unwrap();
    assert_eq!(sequence.frame_count(), 4);
    assert!((sequence.frame(3).unwrap()[1] - Vec3::new(0.03, 0.01, 0.04)).length() < 1e-6);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_fortran_order_matches_c_order() {
    let path = fixture_path("fortran.npy");
    let data = ramp(3, 4);
    write_npy(&path, &data.t().as_standard_layout().t()).unwrap();

    let sequence = load_pose_sequence(&path).unwrap();
    assert!((sequence.frame(2).unwrap()[3] - Vec3::new(0.02, 0.03, 0.05)).length() < 1e-6);

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_wrong_last_dimension_is_invalid_format() {
    let path = fixture_path("two_d.npy");
    let data: Array3<f64> = Array::zeros((5, 4, 2));
    write_npy(&path, &data).unwrap();

    let err = load_pose_sequence(&path).unwrap_err();
    assert!(matches!(err, PosescopeError::InvalidFormat { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_wrong_rank_is_invalid_format() {
    let flat = fixture_path("rank2.npy");
    let data: Array2<f64> = Array::zeros((5, 3));
    write_npy(&flat, &data).unwrap();
    assert!(matches!(
        load_pose_sequence(&flat).unwrap_err(),
        PosescopeError::InvalidFormat { .. }
    ));

    let deep = fixture_path("rank4.npy");
    let data: Array4<f64> = Array::zeros((2, 5, 4, 3));
    write_npy(&deep, &data).unwrap();
    assert!(matches!(
        load_pose_sequence(&deep).unwrap_err(),
        PosescopeError::InvalidFormat { .. }
    ));

    let _ = std::fs::remove_file(&flat);
    let _ = std::fs::remove_file(&deep);
}

#[test]
fn test_integer_data_is_invalid_format() {
    let path = fixture_path("ints.npy");
    let data: Array3<i32> = Array::zeros((2, 2, 3));
    write_npy(&path, &data).unwrap();

    let err = load_pose_sequence(&path).unwrap_err();
    assert!(matches!(err, PosescopeError::InvalidFormat { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_zero_frames_is_invalid_format() {
    let path = fixture_path("empty.npy");
    let data: Array3<f64> = Array::zeros((0, 20, 3));
    write_npy(&path, &data).unwrap();

    let err = load_pose_sequence(&path).unwrap_err();
    assert!(matches!(err, PosescopeError::InvalidFormat { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_garbage_file_is_invalid_format() {
    let path = fixture_path("garbage.npy");
    std::fs::write(&path, b"definitely not numpy").unwrap();

    let err = load_pose_sequence(&path).unwrap_err();
    assert!(matches!(err, PosescopeError::InvalidFormat { .. }));

    let _ = std::fs::remove_file(&path);
}

#[test]
fn test_wrong_extension_and_missing_file() {
    let path = fixture_path("poses.csv");
    std::fs::write(&path, b"0,0,0").unwrap();
    assert!(matches!(
        load_pose_sequence(&path).unwrap_err(),
        PosescopeError::InvalidFormat { .. }
    ));
    let _ = std::fs::remove_file(&path);

    let missing = fixture_path("missing.npy");
    assert!(matches!(
        load_pose_sequence(&missing).unwrap_err(),
        PosescopeError::NotFound(p) if p == missing
    ));
}

#[test]
fn test_directory_is_not_found() {
    let dir = fixture_path("dir.npy");
    std::fs::create_dir_all(&dir).unwrap();

    assert!(matches!(
        load_pose_sequence(&dir).unwrap_err(),
        PosescopeError::NotFound(_)
    ));

    let _ = std::fs::remove_dir(&dir);
}

#[test]
fn test_out_of_unit_cube_still_loads() {
    let inside = fixture_path("inside.npy");
    write_npy(&inside, &ramp(30, 20)).unwrap();
    assert!(load_pose_sequence(&inside).unwrap().fits_unit_cube());

    // x reaches 2.99, so the loader warns but keeps the data
    let outside = fixture_path("outside.npy");
    write_npy(&outside, &ramp(300, 2)).unwrap();
    let sequence = load_pose_sequence(&outside).unwrap();
    assert_eq!(sequence.frame_count(), 300);
    assert!(!sequence.fits_unit_cube());
    let (_, max) = sequence.bounds().unwrap();
    assert!((max.x - 2.99).abs() < 1e-6);

    let _ = std::fs::remove_file(&inside);
    let _ = std::fs::remove_file(&outside);
}

#[test]
fn test_bare_extension_file_name_is_accepted() {
    let dir = fixture_path("bare");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(".npy");
    write_npy(&path, &ramp(2, 3)).unwrap();

    let sequence = load_pose_sequence(&path).unwrap();
    assert_eq!(sequence.frame_count(), 2);

    let _ = std::fs::remove_file(&path);
    let _ = std::fs::remove_dir(&dir);
}
