//! Pipeline errors.

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Errors raised by the calibration pipeline.
///
/// The first three are the fatal preconditions of a run; per-frame
/// detection failures are not errors, those frames are skipped.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot open video source {path}")]
    OpenVideo { path: PathBuf },
    #[error("no frames were selected for calibration")]
    EmptySelection,
    #[error("the chessboard pattern was not found in any selected frame")]
    NoDetections,
    #[error("cannot open video writer for {path}")]
    OpenWriter { path: PathBuf },
    #[error(transparent)]
    OpenCv(#[from] opencv::Error),
    #[error(transparent)]
    Report(#[from] calib_video_core::ReportError),
}
