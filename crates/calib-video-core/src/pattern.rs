//! Chessboard pattern geometry.

use std::fmt;
use std::str::FromStr;

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// Inner-corner grid of the calibration chessboard, columns by rows.
///
/// The grid describes inner corners, not cells: a board with 11x8 squares
/// has a 10x7 pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternSize {
    pub cols: i32,
    pub rows: i32,
}

impl PatternSize {
    pub fn new(cols: i32, rows: i32) -> Self {
        Self { cols, rows }
    }

    /// Number of inner corners the detector must find per frame.
    pub fn corner_count(&self) -> usize {
        (self.cols * self.rows) as usize
    }
}

impl fmt::Display for PatternSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("pattern must be COLSxROWS with positive integers, got {0:?}")]
pub struct ParsePatternError(String);

impl FromStr for PatternSize {
    type Err = ParsePatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cols, rows) = s
            .split_once(['x', 'X'])
            .ok_or_else(|| ParsePatternError(s.to_owned()))?;
        let cols: i32 = cols.trim().parse().map_err(|_| ParsePatternError(s.to_owned()))?;
        let rows: i32 = rows.trim().parse().map_err(|_| ParsePatternError(s.to_owned()))?;
        if cols <= 0 || rows <= 0 {
            return Err(ParsePatternError(s.to_owned()));
        }
        Ok(Self { cols, rows })
    }
}

/// 3-D template of the board corners in board coordinates.
///
/// Row-major to match the detector's corner ordering: x advances along a
/// row, y advances across rows, z is always zero. The same template is
/// reused for every accepted view of a run.
pub fn object_grid(pattern: PatternSize, cell_size: f32) -> Vec<Point3<f32>> {
    let mut points = Vec::with_capacity(pattern.corner_count());
    for r in 0..pattern.rows {
        for c in 0..pattern.cols {
            points.push(Point3::new(c as f32 * cell_size, r as f32 * cell_size, 0.0));
        }
    }
    points
}
