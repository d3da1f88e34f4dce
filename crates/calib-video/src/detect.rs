//! Chessboard corner detection on single frames.

use calib_video_core::PatternSize;
use opencv::core::{Mat, Point2f, Size, TermCriteria, TermCriteria_EPS, TermCriteria_MAX_ITER, Vector};
use opencv::{calib3d, imgproc};

use crate::error::Result;

/// Corner candidates for one frame plus the completeness flag.
///
/// `corners` may hold a partial set when `complete` is false; the preview
/// overlay still draws whatever was found.
pub struct PatternDetection {
    pub corners: Vector<Point2f>,
    pub complete: bool,
}

/// Finds the inner-corner grid of the calibration target.
pub struct PatternDetector {
    pattern: PatternSize,
    criteria: TermCriteria,
}

impl PatternDetector {
    pub fn new(pattern: PatternSize) -> Self {
        let criteria = TermCriteria {
            typ: TermCriteria_EPS + TermCriteria_MAX_ITER,
            max_count: 30,
            epsilon: 1e-3,
        };
        Self { pattern, criteria }
    }

    pub fn pattern(&self) -> PatternSize {
        self.pattern
    }

    fn pattern_size(&self) -> Size {
        Size::new(self.pattern.cols, self.pattern.rows)
    }

    /// Detect corners on a BGR frame, with sub-pixel refinement when the
    /// full grid is visible.
    pub fn detect(&self, frame: &Mat) -> Result<PatternDetection> {
        let mut gray = Mat::default();
        imgproc::cvt_color_def(frame, &mut gray, imgproc::COLOR_BGR2GRAY)?;

        let mut corners = Vector::<Point2f>::new();
        let complete = calib3d::find_chessboard_corners(
            &gray,
            self.pattern_size(),
            &mut corners,
            calib3d::CALIB_CB_ADAPTIVE_THRESH + calib3d::CALIB_CB_NORMALIZE_IMAGE,
        )?;
        if complete {
            imgproc::corner_sub_pix(
                &gray,
                &mut corners,
                Size::new(11, 11),
                Size::new(-1, -1),
                self.criteria,
            )?;
        }
        Ok(PatternDetection { corners, complete })
    }

    /// Refined corners when the full grid is visible, `None` otherwise.
    pub fn find_corners(&self, frame: &Mat) -> Result<Option<Vector<Point2f>>> {
        let detection = self.detect(frame)?;
        Ok(detection.complete.then_some(detection.corners))
    }

    /// Overlay a detection on a preview frame.
    pub fn draw_overlay(&self, frame: &mut Mat, detection: &PatternDetection) -> Result<()> {
        calib3d::draw_chessboard_corners(
            frame,
            self.pattern_size(),
            &detection.corners,
            detection.complete,
        )?;
        Ok(())
    }
}
