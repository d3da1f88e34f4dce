//! Core types and state machines for chessboard-video camera calibration.
//!
//! This crate is intentionally small and free of any vision-library
//! dependency. It covers the pure half of the pipeline: pattern geometry,
//! calibration results, the text report, run configuration, and the
//! keyboard-driven selection/playback state machines. The OpenCV-backed
//! stages live in the `calib-video` crate.

mod config;
mod intrinsics;
mod keys;
mod pattern;
mod playback;
mod report;
mod selection;

pub use config::{CalibConfig, ConfigError, SelectionMode};
pub use intrinsics::{CalibrationOutcome, CameraIntrinsics, ViewPose};
pub use keys::Key;
pub use pattern::{object_grid, ParsePatternError, PatternSize};
pub use playback::{PlaybackState, PlaybackStep, ViewMode};
pub use report::{CalibrationReport, ReportError};
pub use selection::{SelectionState, SelectionStep};
