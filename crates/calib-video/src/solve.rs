//! The camera calibration solve.

use calib_video_core::{CalibrationOutcome, CameraIntrinsics, ViewPose};
use nalgebra::{Matrix3, Vector3};
use opencv::calib3d;
use opencv::core::{Mat, TermCriteria, TermCriteria_EPS, TermCriteria_MAX_ITER, Vector};
use opencv::prelude::*;

use crate::collect::PointLists;
use crate::error::Result;

/// Optimizer controls for [`calibrate`].
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    /// Flag bitmask forwarded to the solver.
    pub flags: i32,
    /// Optional starting intrinsics; sets the use-intrinsic-guess flag.
    pub initial: Option<CameraIntrinsics>,
}

/// One deterministic solve over the accumulated correspondences.
///
/// The point lists must be non-empty and index-aligned, which
/// [`PointLists`] guarantees by construction.
pub fn calibrate(points: &PointLists, options: &SolveOptions) -> Result<CalibrationOutcome> {
    let mut camera_matrix = Mat::default();
    let mut dist_coeffs = Mat::default();
    let mut flags = options.flags;
    if let Some(initial) = &options.initial {
        camera_matrix = matrix3_to_mat(&initial.camera_matrix)?;
        dist_coeffs = Mat::from_slice(&initial.dist_coeffs)?.try_clone()?;
        flags |= calib3d::CALIB_USE_INTRINSIC_GUESS;
    }

    let mut rvecs = Vector::<Mat>::new();
    let mut tvecs = Vector::<Mat>::new();
    let criteria = TermCriteria {
        typ: TermCriteria_EPS + TermCriteria_MAX_ITER,
        max_count: 30,
        epsilon: f64::EPSILON,
    };
    let rms = calib3d::calibrate_camera(
        &points.object_points,
        &points.image_points,
        points.image_size,
        &mut camera_matrix,
        &mut dist_coeffs,
        &mut rvecs,
        &mut tvecs,
        flags,
        criteria,
    )?;

    let mut poses = Vec::with_capacity(rvecs.len());
    for (rvec, tvec) in rvecs.iter().zip(tvecs.iter()) {
        poses.push(ViewPose {
            rvec: vec3_from_mat(&rvec)?,
            tvec: vec3_from_mat(&tvec)?,
        });
    }

    Ok(CalibrationOutcome {
        rms,
        intrinsics: CameraIntrinsics {
            camera_matrix: mat_to_matrix3(&camera_matrix)?,
            dist_coeffs: mat_to_flat_vec(&dist_coeffs)?,
        },
        poses,
    })
}

pub(crate) fn matrix3_to_mat(m: &Matrix3<f64>) -> Result<Mat> {
    let rows: Vec<Vec<f64>> = (0..3)
        .map(|r| (0..3).map(|c| m[(r, c)]).collect())
        .collect();
    Ok(Mat::from_slice_2d(&rows)?)
}

fn mat_to_matrix3(mat: &Mat) -> Result<Matrix3<f64>> {
    let mut out = Matrix3::zeros();
    for r in 0..3 {
        for c in 0..3 {
            out[(r, c)] = *mat.at_2d::<f64>(r as i32, c as i32)?;
        }
    }
    Ok(out)
}

fn mat_to_flat_vec(mat: &Mat) -> Result<Vec<f64>> {
    let rows: Vec<Vec<f64>> = mat.to_vec_2d()?;
    Ok(rows.into_iter().flatten().collect())
}

fn vec3_from_mat(mat: &Mat) -> Result<Vector3<f64>> {
    let flat = mat_to_flat_vec(mat)?;
    let mut out = Vector3::zeros();
    for (dst, src) in out.iter_mut().zip(flat) {
        *dst = src;
    }
    Ok(out)
}
