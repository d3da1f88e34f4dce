//! Calibration result types.

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Pinhole camera matrix plus lens distortion coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// 3x3 camera matrix K.
    pub camera_matrix: Matrix3<f64>,
    /// Distortion coefficients in solver order (k1, k2, p1, p2, k3, ...).
    pub dist_coeffs: Vec<f64>,
}

/// Rotation/translation of the board in one calibration view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewPose {
    /// Rodrigues rotation vector.
    pub rvec: Vector3<f64>,
    pub tvec: Vector3<f64>,
}

/// Output of a single calibration solve. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationOutcome {
    /// Root-mean-square reprojection error in pixels.
    pub rms: f64,
    pub intrinsics: CameraIntrinsics,
    /// One pose per detected view, in solver order.
    pub poses: Vec<ViewPose>,
}
