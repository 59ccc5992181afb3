//! Error types for grid construction, generation and search.
//!
//! An exhausted search is not an error:
//! [`MazeGrid::shortest_path`](crate::MazeGrid::shortest_path) reports an
//! unreachable goal as `Ok(None)` so callers can branch on it as a normal
//! outcome. [`GridError`] covers caller contract violations and malformed
//! input instead.

use grid_util::point::Point;

/// Errors surfaced by grid queries, maze generation and the text format.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GridError {
    /// A queried position lies outside the grid bounds. This is a caller
    /// contract violation and is never retried or recovered internally.
    #[error("position {point} is outside the {width}x{height} grid")]
    OutOfBounds {
        point: Point,
        width: usize,
        height: usize,
    },

    /// The blocked-cell probability handed to the generator is not in [0, 1].
    #[error("blocked probability {0} is outside [0, 1]")]
    InvalidDensity(f64),

    /// A grid must have at least one cell.
    #[error("grid dimensions must be positive, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    /// The text format only knows '0', '1' and '#'.
    #[error("unrecognized cell character {found:?} at row {row}, column {column}")]
    InvalidCell {
        found: char,
        row: usize,
        column: usize,
    },

    /// Every row of a grid file must have the same width.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Reading or writing a grid file failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
