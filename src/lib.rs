//! # maze_pathfinding
//!
//! Shortest paths on 2-D occupancy grids. Implements classic
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) with the
//! Manhattan-distance heuristic on 4-connected unit-cost grids, plus
//! [Adaptive A*](https://en.wikipedia.org/wiki/Incremental_heuristic_search),
//! which reuses the exact distances realized by one search as sharpened
//! heuristic estimates for later searches toward the same goal. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! Maze-like test grids come from [`maze::MazeGenerator`], a randomized
//! depth-first carver, and can be exchanged with other tools through the
//! flat text format in [`io`].

pub mod adaptive;
pub mod error;
pub mod grid;
pub mod io;
pub mod maze;
mod search;

pub use adaptive::AdaptiveAstar;
pub use error::GridError;
pub use grid::MazeGrid;
pub use maze::MazeGenerator;

use grid_util::point::Point;

/// Manhattan distance between two points, the exact remaining cost on an
/// obstacle-free 4-connected unit-cost grid and hence admissible and
/// consistent on any such grid with obstacles.
pub fn manhattan_distance(a: &Point, b: &Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
