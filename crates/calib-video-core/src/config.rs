//! Run configuration.
//!
//! The original tool hard-coded these values in its entry point; here they
//! form an explicit structure that every stage receives. JSON load/write
//! helpers follow the same shape as the detector configs elsewhere in the
//! workspace family.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::PatternSize;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// How calibration frames are chosen from the video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// Interactive capture with preview and confirmation.
    #[default]
    Interactive,
    /// Accept every decoded frame without prompting.
    All,
}

/// Parameters of one calibration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibConfig {
    /// Input chessboard video.
    pub video_path: PathBuf,
    /// Inner-corner grid of the target.
    #[serde(default = "default_pattern")]
    pub pattern: PatternSize,
    /// Physical size of one board cell; report units follow this value.
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// Where the text report is written.
    #[serde(default = "default_report_path")]
    pub report_path: PathBuf,
    /// Optional destination for the corrected video; preview-only when unset.
    #[serde(default)]
    pub corrected_video_path: Option<PathBuf>,
    #[serde(default)]
    pub selection: SelectionMode,
    /// Inter-frame key-poll budget in milliseconds.
    #[serde(default = "default_wait_ms")]
    pub wait_ms: i32,
}

fn default_pattern() -> PatternSize {
    PatternSize::new(10, 7)
}

fn default_cell_size() -> f32 {
    0.025
}

fn default_report_path() -> PathBuf {
    PathBuf::from("calibration_results.txt")
}

fn default_wait_ms() -> i32 {
    10
}

impl CalibConfig {
    /// Config for `video_path` with every other field at its default.
    pub fn new(video_path: impl Into<PathBuf>) -> Self {
        Self {
            video_path: video_path.into(),
            pattern: default_pattern(),
            cell_size: default_cell_size(),
            report_path: default_report_path(),
            corrected_video_path: None,
            selection: SelectionMode::default(),
            wait_ms: default_wait_ms(),
        }
    }

    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_json_gets_the_original_defaults() {
        let cfg: CalibConfig = serde_json::from_str(r#"{"video_path": "board.mov"}"#).unwrap();
        assert_eq!(cfg.video_path, PathBuf::from("board.mov"));
        assert_eq!(cfg.pattern, PatternSize::new(10, 7));
        assert_eq!(cfg.cell_size, 0.025);
        assert_eq!(cfg.report_path, PathBuf::from("calibration_results.txt"));
        assert_eq!(cfg.corrected_video_path, None);
        assert_eq!(cfg.selection, SelectionMode::Interactive);
        assert_eq!(cfg.wait_ms, 10);
    }

    #[test]
    fn json_round_trips_through_the_filesystem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let mut cfg = CalibConfig::new("board.mov");
        cfg.selection = SelectionMode::All;
        cfg.corrected_video_path = Some(PathBuf::from("undistorted.mp4"));
        cfg.write_json(&path).unwrap();
        assert_eq!(CalibConfig::load_json(&path).unwrap(), cfg);
    }
}
