//! Flat text format for grid worlds.
//!
//! One line per row, one character per column: `'0'` is a free cell, `'#'`
//! a wall. Files written by the carving generator additionally contain
//! `'1'` for cells the carver rejected; readers here treat those as
//! traversable free cells, leaving any cost-weighted reading of them to
//! tools that want one. Emission (via the grid's `Display`) sticks to
//! `'0'`/`'#'`.

use crate::error::GridError;
use crate::grid::MazeGrid;
use grid_util::grid::Grid;
use std::fs;
use std::path::Path;

/// Parses a grid from its text form.
///
/// Components are generated before the grid is returned, so it is
/// immediately searchable.
///
/// # Errors
///
/// [`GridError::EmptyGrid`] for input without any cells,
/// [`GridError::RaggedRow`] when rows disagree on width, and
/// [`GridError::InvalidCell`] for characters outside `'0'`, `'1'`, `'#'`.
pub fn parse_grid(text: &str) -> Result<MazeGrid, GridError> {
    let rows: Vec<&str> = text.lines().collect();
    let height = rows.len();
    let width = rows.first().map_or(0, |row| row.chars().count());
    if width == 0 || height == 0 {
        return Err(GridError::EmptyGrid { width, height });
    }
    let mut grid = MazeGrid::new(width, height, false);
    for (y, row) in rows.iter().enumerate() {
        let mut columns = 0;
        for (x, cell) in row.chars().enumerate() {
            let blocked = match cell {
                '0' | '1' => false,
                '#' => true,
                found => {
                    return Err(GridError::InvalidCell {
                        found,
                        row: y,
                        column: x,
                    })
                }
            };
            if x < width {
                grid.grid.set(x, y, blocked);
            }
            columns += 1;
        }
        if columns != width {
            return Err(GridError::RaggedRow {
                row: y,
                expected: width,
                found: columns,
            });
        }
    }
    grid.generate_components();
    Ok(grid)
}

/// Reads a grid world from a text file.
pub fn read_grid(path: impl AsRef<Path>) -> Result<MazeGrid, GridError> {
    let text = fs::read_to_string(path)?;
    parse_grid(&text)
}

/// Writes a grid world to a text file in the `'0'`/`'#'` form.
pub fn write_grid(path: impl AsRef<Path>, grid: &MazeGrid) -> Result<(), GridError> {
    fs::write(path, grid.to_string())?;
    Ok(())
}
