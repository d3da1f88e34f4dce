//! Accumulation of 2-D/3-D point correspondences.

use calib_video_core::{object_grid, PatternSize};
use log::{debug, info};
use opencv::core::{Mat, Point2f, Point3f, Size, Vector};
use opencv::prelude::*;

use crate::detect::PatternDetector;
use crate::error::{PipelineError, Result};

/// Aligned 2-D/3-D point lists ready for the solver.
///
/// The lists are index-aligned and equally long by construction; the object
/// list repeats one shared board template per detected view.
pub struct PointLists {
    pub object_points: Vector<Vector<Point3f>>,
    pub image_points: Vector<Vector<Point2f>>,
    pub image_size: Size,
}

/// Collects corner detections across the selected frames.
///
/// Frames where the full grid is not visible are skipped; at least one
/// detection is required before the solver may run.
pub struct CalibrationSamples {
    detector: PatternDetector,
    cell_size: f32,
    image_points: Vec<Vector<Point2f>>,
    image_size: Option<Size>,
    skipped: usize,
}

impl CalibrationSamples {
    pub fn new(pattern: PatternSize, cell_size: f32) -> Self {
        Self {
            detector: PatternDetector::new(pattern),
            cell_size,
            image_points: Vec::new(),
            image_size: None,
            skipped: 0,
        }
    }

    /// Number of frames with a complete detection so far.
    pub fn len(&self) -> usize {
        self.image_points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image_points.is_empty()
    }

    /// Frames observed without a usable detection.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Detect corners on one accepted frame; returns whether it was usable.
    pub fn observe(&mut self, frame: &Mat) -> Result<bool> {
        if self.image_size.is_none() {
            self.image_size = Some(frame.size()?);
        }
        match self.detector.find_corners(frame)? {
            Some(corners) => {
                self.image_points.push(corners);
                Ok(true)
            }
            None => {
                self.skipped += 1;
                debug!("chessboard not found, frame skipped");
                Ok(false)
            }
        }
    }

    /// Run detection over every accepted frame in order.
    pub fn observe_all(&mut self, frames: &[Mat]) -> Result<()> {
        for frame in frames {
            self.observe(frame)?;
        }
        Ok(())
    }

    /// Finish collection, producing solver input.
    pub fn into_point_lists(self) -> Result<PointLists> {
        let image_size = match self.image_size {
            Some(size) if !self.image_points.is_empty() => size,
            _ => return Err(PipelineError::NoDetections),
        };
        if self.skipped > 0 {
            info!(
                "{} of {} observed frames had no usable detection",
                self.skipped,
                self.skipped + self.image_points.len()
            );
        }

        let template: Vector<Point3f> = object_grid(self.detector.pattern(), self.cell_size)
            .iter()
            .map(|p| Point3f::new(p.x, p.y, p.z))
            .collect();

        let mut object_points = Vector::<Vector<Point3f>>::new();
        let mut image_points = Vector::<Vector<Point2f>>::new();
        for corners in self.image_points {
            object_points.push(template.clone());
            image_points.push(corners);
        }
        Ok(PointLists {
            object_points,
            image_points,
            image_size,
        })
    }
}
