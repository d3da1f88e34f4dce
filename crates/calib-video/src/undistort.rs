//! Distortion correction via a cached pixel remap.

use calib_video_core::CameraIntrinsics;
use opencv::core::{no_array, Mat, Size, CV_32FC1};
use opencv::prelude::*;
use opencv::{calib3d, imgproc};

use crate::error::Result;
use crate::solve::matrix3_to_mat;

/// Applies a computed distortion model to frames.
///
/// The remap table is built from the first frame's size and cached for the
/// remainder of the run.
pub struct Undistorter {
    camera_matrix: Mat,
    dist_coeffs: Mat,
    maps: Option<(Mat, Mat)>,
}

impl Undistorter {
    pub fn new(intrinsics: &CameraIntrinsics) -> Result<Self> {
        Ok(Self {
            camera_matrix: matrix3_to_mat(&intrinsics.camera_matrix)?,
            dist_coeffs: Mat::from_slice(&intrinsics.dist_coeffs)?.try_clone()?,
            maps: None,
        })
    }

    /// Remap `frame` into its undistorted rendering.
    pub fn apply(&mut self, frame: &Mat) -> Result<Mat> {
        if self.maps.is_none() {
            self.maps = Some(self.build_maps(frame.size()?)?);
        }
        let mut out = Mat::default();
        if let Some((map1, map2)) = &self.maps {
            imgproc::remap_def(frame, &mut out, map1, map2, imgproc::INTER_LINEAR)?;
        }
        Ok(out)
    }

    fn build_maps(&self, size: Size) -> Result<(Mat, Mat)> {
        let mut map1 = Mat::default();
        let mut map2 = Mat::default();
        calib3d::init_undistort_rectify_map(
            &self.camera_matrix,
            &self.dist_coeffs,
            &no_array(),
            &no_array(),
            size,
            CV_32FC1,
            &mut map1,
            &mut map2,
        )?;
        Ok((map1, map2))
    }
}
