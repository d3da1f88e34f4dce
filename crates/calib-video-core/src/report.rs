//! Fixed-format text report of a calibration run.
//!
//! The report is line-oriented with stable section prefixes so it can be
//! parsed back for verification. Numeric values are printed with Rust's
//! shortest round-trip `f64` formatting, so render/parse is lossless.

use std::fs;
use std::path::Path;

use nalgebra::Matrix3;

use crate::{CalibrationOutcome, CameraIntrinsics};

const HEADER: &str = "## Camera Calibration Results";
const COUNT_PREFIX: &str = "* The number of selected images = ";
const RMS_PREFIX: &str = "* RMS error = ";
const MATRIX_PREFIX: &str = "* Camera matrix (K) =";
const DIST_PREFIX: &str = "* Distortion coefficients (k1, k2, p1, p2, k3, ...) = ";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("missing report line: {0:?}")]
    MissingLine(&'static str),
    #[error("malformed report value: {0:?}")]
    Malformed(String),
}

/// Human-readable summary of one calibration run.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationReport {
    /// Number of frames the user selected (not all of them need a detection).
    pub image_count: usize,
    pub rms: f64,
    pub camera_matrix: Matrix3<f64>,
    pub dist_coeffs: Vec<f64>,
}

impl CalibrationReport {
    pub fn new(outcome: &CalibrationOutcome, image_count: usize) -> Self {
        let CameraIntrinsics {
            camera_matrix,
            dist_coeffs,
        } = outcome.intrinsics.clone();
        Self {
            image_count,
            rms: outcome.rms,
            camera_matrix,
            dist_coeffs,
        }
    }

    /// Render the fixed-format text document.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(HEADER);
        out.push('\n');
        out.push_str(&format!("{COUNT_PREFIX}{}\n", self.image_count));
        out.push_str(&format!("{RMS_PREFIX}{}\n", self.rms));
        out.push_str(MATRIX_PREFIX);
        out.push('\n');
        for r in 0..3 {
            out.push_str(&format!(
                "  [{}, {}, {}]\n",
                self.camera_matrix[(r, 0)],
                self.camera_matrix[(r, 1)],
                self.camera_matrix[(r, 2)]
            ));
        }
        let dist: Vec<String> = self.dist_coeffs.iter().map(f64::to_string).collect();
        out.push_str(&format!("{DIST_PREFIX}[{}]\n", dist.join(", ")));
        out
    }

    /// Parse a rendered report back.
    pub fn parse(text: &str) -> Result<Self, ReportError> {
        let lines: Vec<&str> = text.lines().collect();
        if lines.first().map(|l| l.trim()) != Some(HEADER) {
            return Err(ReportError::MissingLine(HEADER));
        }

        let image_count = find_value(&lines, COUNT_PREFIX)?
            .parse()
            .map_err(|_| ReportError::Malformed(COUNT_PREFIX.to_owned()))?;
        let rms = parse_f64(find_value(&lines, RMS_PREFIX)?)?;

        let matrix_at = lines
            .iter()
            .position(|l| l.trim() == MATRIX_PREFIX)
            .ok_or(ReportError::MissingLine(MATRIX_PREFIX))?;
        let mut camera_matrix = Matrix3::zeros();
        for r in 0..3 {
            let line = lines
                .get(matrix_at + 1 + r)
                .ok_or(ReportError::MissingLine(MATRIX_PREFIX))?;
            let row = parse_bracketed(line)?;
            if row.len() != 3 {
                return Err(ReportError::Malformed((*line).to_owned()));
            }
            for c in 0..3 {
                camera_matrix[(r, c)] = row[c];
            }
        }

        let dist_line = find_value(&lines, DIST_PREFIX)?;
        let dist_coeffs = parse_bracketed(dist_line)?;

        Ok(Self {
            image_count,
            rms,
            camera_matrix,
            dist_coeffs,
        })
    }

    /// Write the report, overwriting any existing file at `path`.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        fs::write(path, self.render())?;
        Ok(())
    }

    /// Load and parse a report from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ReportError> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

fn find_value<'a>(lines: &[&'a str], prefix: &'static str) -> Result<&'a str, ReportError> {
    lines
        .iter()
        .find_map(|l| l.trim_start().strip_prefix(prefix))
        .ok_or(ReportError::MissingLine(prefix))
}

fn parse_f64(raw: &str) -> Result<f64, ReportError> {
    raw.trim()
        .parse()
        .map_err(|_| ReportError::Malformed(raw.to_owned()))
}

fn parse_bracketed(raw: &str) -> Result<Vec<f64>, ReportError> {
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| ReportError::Malformed(raw.to_owned()))?;
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }
    inner.split(',').map(parse_f64).collect()
}
