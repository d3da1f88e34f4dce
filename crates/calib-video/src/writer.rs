//! Persistence of the corrected video.

use std::path::{Path, PathBuf};

use opencv::core::{Mat, Size};
use opencv::prelude::*;
use opencv::videoio::VideoWriter;

use crate::error::{PipelineError, Result};

/// Writes rectified frames to a video container (mp4v).
pub struct CorrectedVideoWriter {
    writer: VideoWriter,
    path: PathBuf,
}

impl CorrectedVideoWriter {
    /// Open `path` for writing at `fps`, sized like the source frames.
    pub fn create(path: &Path, fps: f64, frame_size: Size) -> Result<Self> {
        let fourcc = VideoWriter::fourcc('m', 'p', '4', 'v')?;
        let writer = VideoWriter::new(&path.to_string_lossy(), fourcc, fps, frame_size, true)?;
        if !writer.is_opened()? {
            return Err(PipelineError::OpenWriter {
                path: path.to_path_buf(),
            });
        }
        Ok(Self {
            writer,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn write(&mut self, frame: &Mat) -> Result<()> {
        self.writer.write(frame)?;
        Ok(())
    }
}

impl Drop for CorrectedVideoWriter {
    fn drop(&mut self) {
        let _ = self.writer.release();
    }
}
