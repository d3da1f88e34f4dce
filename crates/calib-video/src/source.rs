//! Video frame sources.

use std::path::Path;

use opencv::core::Mat;
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture};

use crate::error::{PipelineError, Result};

/// One-pass, forward-only stream of decoded frames.
pub trait FrameSource {
    /// Next decoded frame, or `None` at end of stream.
    fn next_frame(&mut self) -> Result<Option<Mat>>;
}

/// Frames decoded from a video container file.
pub struct VideoFileSource {
    cap: VideoCapture,
}

impl VideoFileSource {
    /// Open `path` for decoding. An unopenable input is fatal for the run.
    pub fn open(path: &Path) -> Result<Self> {
        let cap = VideoCapture::from_file(&path.to_string_lossy(), videoio::CAP_ANY)?;
        if !cap.is_opened()? {
            return Err(PipelineError::OpenVideo {
                path: path.to_path_buf(),
            });
        }
        Ok(Self { cap })
    }

    /// Frames per second reported by the container, if meaningful.
    pub fn fps(&self) -> Result<Option<f64>> {
        let fps = self.cap.get(videoio::CAP_PROP_FPS)?;
        Ok((fps.is_finite() && fps > 0.0).then_some(fps))
    }
}

impl FrameSource for VideoFileSource {
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        if !self.cap.read(&mut frame)? || frame.empty() {
            return Ok(None);
        }
        Ok(Some(frame))
    }
}

impl Drop for VideoFileSource {
    fn drop(&mut self) {
        let _ = self.cap.release();
    }
}
