//! Adaptive A*: repeated searches toward one goal on one grid.
//!
//! After a search completes, the exact remaining distance `g(goal) - g(n)`
//! is known for every node it expanded. [`AdaptiveAstar`] stores those
//! distances and serves them as heuristic values in later searches toward
//! the same goal, where they dominate the Manhattan estimate and shrink the
//! frontier. The sharpened heuristic stays admissible and consistent, so
//! path optimality is unaffected.

use crate::error::GridError;
use crate::grid::MazeGrid;
use crate::manhattan_distance;
use crate::search;
use fxhash::FxHashMap;
use grid_util::point::Point;

/// A* engine that carries corrected heuristic values between searches.
///
/// One `AdaptiveAstar` belongs to one (grid, goal) pairing: the stored
/// corrections are exact distances on the grid they were measured on, and
/// reusing them elsewhere would wreck admissibility. Searches sharing the
/// table must run sequentially; each call folds its expansions into the
/// table the next call reads.
#[derive(Clone, Debug)]
pub struct AdaptiveAstar {
    goal: Point,
    corrections: FxHashMap<Point, i32>,
}

impl AdaptiveAstar {
    /// Creates an engine for searches toward `goal` with an empty
    /// correction table.
    pub fn new(goal: Point) -> AdaptiveAstar {
        AdaptiveAstar {
            goal,
            corrections: FxHashMap::default(),
        }
    }

    /// The goal every search of this engine runs toward.
    pub fn goal(&self) -> Point {
        self.goal
    }

    /// The heuristic estimate currently used for `p`: the corrected exact
    /// distance if a previous search expanded `p`, the Manhattan distance
    /// otherwise.
    pub fn heuristic(&self, p: &Point) -> i32 {
        self.corrections
            .get(p)
            .copied()
            .unwrap_or_else(|| manhattan_distance(p, &self.goal))
    }

    /// Corrected distances learned so far, keyed by cell.
    pub fn corrections(&self) -> &FxHashMap<Point, i32> {
        &self.corrections
    }

    /// Computes a shortest path from `start` to the engine's goal, then
    /// records the exact remaining distance of every expanded cell for the
    /// benefit of the next search.
    ///
    /// Returns `Ok(None)` when no path exists; a failed search learns
    /// nothing. Path shape and optimality match
    /// [`MazeGrid::shortest_path`].
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `start` or the goal lies outside the
    /// grid.
    pub fn search(
        &mut self,
        grid: &MazeGrid,
        start: Point,
    ) -> Result<Option<Vec<Point>>, GridError> {
        grid.ensure_in_bounds(start)?;
        grid.ensure_in_bounds(self.goal)?;
        if grid.unreachable(&start, &self.goal) {
            return Ok(None);
        }
        let goal = self.goal;
        let corrections = &self.corrections;
        let result = search::astar_with_expansions(
            &start,
            |node| {
                grid.free_neighbours(*node)
                    .into_iter()
                    .map(|p| (p, 1))
                    .collect::<Vec<(Point, i32)>>()
            },
            |point| {
                corrections
                    .get(point)
                    .copied()
                    .unwrap_or_else(|| manhattan_distance(point, &goal))
            },
            |point| *point == goal,
        );
        match result {
            Some((path, cost, expanded)) => {
                for (point, g) in expanded {
                    self.corrections.insert(point, cost - g);
                }
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_util::grid::Grid;

    fn blocked_center_grid() -> MazeGrid {
        let mut grid = MazeGrid::new(3, 3, false);
        grid.set(1, 1, true);
        grid.generate_components();
        grid
    }

    #[test]
    fn first_search_matches_plain_astar() {
        let grid = blocked_center_grid();
        let goal = Point::new(2, 2);
        let mut engine = AdaptiveAstar::new(goal);
        let adaptive = engine.search(&grid, Point::new(0, 0)).unwrap().unwrap();
        let plain = grid
            .shortest_path(Point::new(0, 0), goal)
            .unwrap()
            .unwrap();
        assert_eq!(adaptive.len(), plain.len());
        assert_eq!(adaptive.len(), 5);
    }

    #[test]
    fn corrections_are_exact_remaining_distances() {
        let mut grid = MazeGrid::new(3, 3, false);
        grid.generate_components();
        let goal = Point::new(2, 2);
        let mut engine = AdaptiveAstar::new(goal);
        engine.search(&grid, Point::new(0, 0)).unwrap().unwrap();
        for (point, h) in engine.corrections() {
            assert_eq!(*h, manhattan_distance(point, &goal));
        }
    }

    #[test]
    fn second_search_stays_optimal() {
        let grid = blocked_center_grid();
        let goal = Point::new(2, 2);
        let mut engine = AdaptiveAstar::new(goal);
        engine.search(&grid, Point::new(0, 0)).unwrap().unwrap();
        let second = engine.search(&grid, Point::new(0, 2)).unwrap().unwrap();
        assert_eq!(second.first(), Some(&Point::new(0, 2)));
        assert_eq!(second.last(), Some(&goal));
        // (0,2) -> (2,2) skirts the blocked center in 2 steps.
        assert_eq!(second.len(), 3);
    }

    #[test]
    fn failed_search_learns_nothing() {
        // 0#0
        // 0#0
        let mut grid = MazeGrid::new(3, 2, false);
        grid.set(1, 0, true);
        grid.set(1, 1, true);
        grid.generate_components();
        let mut engine = AdaptiveAstar::new(Point::new(2, 0));
        let outcome = engine.search(&grid, Point::new(0, 0)).unwrap();
        assert!(outcome.is_none());
        assert!(engine.corrections().is_empty());
    }

    #[test]
    fn heuristic_falls_back_to_manhattan() {
        let engine = AdaptiveAstar::new(Point::new(4, 4));
        assert_eq!(engine.heuristic(&Point::new(0, 0)), 8);
    }
}
