//! Chessboard-video camera calibration on top of OpenCV.
//!
//! This crate glues `opencv` primitives (video decode, chessboard corner
//! detection, the calibration solve, distortion remapping, display) to the
//! pure types and state machines of [`calib_video_core`]. The pipeline is
//! single-threaded and strictly forward: frames are decoded, selected,
//! observed, solved once, and played back corrected.
//!
//! Display and key polling sit behind the [`FrameSink`] seam, so the
//! interactive loops are testable with scripted input.

mod collect;
mod detect;
mod display;
mod error;
mod playback;
mod select;
mod solve;
mod source;
mod undistort;
mod writer;

pub use calib_video_core as core;

pub use collect::{CalibrationSamples, PointLists};
pub use detect::{PatternDetection, PatternDetector};
pub use display::{draw_label, FrameSink, HighguiWindow};
pub use error::{PipelineError, Result};
pub use playback::UndistortionPlayer;
pub use select::{select_all_frames, select_frames_interactively};
pub use solve::{calibrate, SolveOptions};
pub use source::{FrameSource, VideoFileSource};
pub use undistort::Undistorter;
pub use writer::CorrectedVideoWriter;
