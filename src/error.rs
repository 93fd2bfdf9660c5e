//! Error types for level data and configuration.
//!
//! The frame simulation itself never fails; only data coming from outside
//! the binary (level JSON, settings files) can be rejected.

use std::fmt;

/// Reasons a level table can't be used.
#[derive(Debug)]
pub enum LevelError {
    /// Level JSON failed to parse.
    Parse(serde_json::Error),
    /// The table contains no levels.
    Empty,
    /// A level's grid has no rows or a zero-width first row.
    EmptyGrid {
        /// Index of the offending level.
        level: usize,
    },
    /// A grid row's width differs from the first row.
    RaggedRow {
        /// Index of the offending level.
        level: usize,
        /// Row number within the grid.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of this row.
        found: usize,
    },
    /// A cell holds a code outside 0..=4.
    UnknownTile {
        /// Index of the offending level.
        level: usize,
        /// Row of the cell.
        row: usize,
        /// Column of the cell.
        col: usize,
        /// The code found.
        code: u8,
    },
    /// Obstacle speed outside 1..TILE_SIZE (stalls, runs backwards or tunnels).
    ObstacleSpeed {
        /// Index of the offending level.
        level: usize,
        /// The speed found.
        speed: i32,
    },
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(e) => write!(f, "level data is not valid JSON: {e}"),
            Self::Empty => write!(f, "level table is empty"),
            Self::EmptyGrid { level } => write!(f, "level {level} has an empty grid"),
            Self::RaggedRow {
                level,
                row,
                expected,
                found,
            } => write!(
                f,
                "level {level} row {row} has {found} cells, expected {expected}"
            ),
            Self::UnknownTile {
                level,
                row,
                col,
                code,
            } => write!(f, "level {level} cell ({col}, {row}) has unknown tile code {code}"),
            Self::ObstacleSpeed { level, speed } => write!(
                f,
                "level {level} obstacle speed {speed} is outside 1..{}",
                crate::consts::TILE_SIZE
            ),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LevelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e)
    }
}
