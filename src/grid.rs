//! The occupancy grid and the A* engine entry point.
//!
//! [`MazeGrid`] keeps the raw [bool] occupancy values in a [BoolGrid]
//! (`true` = blocked) and maintains connected components in a [UnionFind]
//! so that searches between separated regions answer without flooding the
//! frontier. Cells are addressed by [Point] with `x` as column and `y` as
//! row; the grid is meant to be generated or loaded once and read by any
//! number of searches afterwards.

use crate::error::GridError;
use crate::manhattan_distance;
use crate::search;
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use log::info;
use petgraph::unionfind::UnionFind;

/// The four orthogonal neighbours of a point, in-bounds or not.
pub(crate) fn orthogonal_neighbours(p: Point) -> [Point; 4] {
    [
        Point::new(p.x - 1, p.y),
        Point::new(p.x + 1, p.y),
        Point::new(p.x, p.y - 1),
        Point::new(p.x, p.y + 1),
    ]
}

/// A 2-D occupancy grid with 4-connected movement.
#[derive(Clone, Debug)]
pub struct MazeGrid {
    pub grid: BoolGrid,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl MazeGrid {
    /// The in-bounds, unblocked orthogonal neighbours of `p`.
    ///
    /// Positions handed out by this query are themselves valid inputs to
    /// it, so normal traversal never sees the `OutOfBounds` case.
    pub fn neighbours(&self, p: Point) -> Result<Vec<Point>, GridError> {
        self.ensure_in_bounds(p)?;
        Ok(self.free_neighbours(p))
    }

    pub(crate) fn free_neighbours(&self, p: Point) -> Vec<Point> {
        orthogonal_neighbours(p)
            .into_iter()
            .filter(|p| self.can_move_to(*p))
            .collect::<Vec<Point>>()
    }

    fn can_move_to(&self, pos: Point) -> bool {
        self.in_bounds(pos.x, pos.y) && !self.grid.get(pos.x as usize, pos.y as usize)
    }

    fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && self.grid.index_in_bounds(x as usize, y as usize)
    }

    pub(crate) fn ensure_in_bounds(&self, p: Point) -> Result<(), GridError> {
        if self.in_bounds(p.x, p.y) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                point: p,
                width: self.grid.width,
                height: self.grid.height,
            })
        }
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> usize {
        self.components.find(self.get_ix_point(point))
    }

    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }

    /// Checks if start and goal are not on the same component.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if self.in_bounds(start.x, start.y) && self.in_bounds(goal.x, goal.y) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            if self.components.equiv(start_ix, goal_ix) {
                false
            } else {
                info!("{} and {} are not equivalent components", start_ix, goal_ix);
                true
            }
        } else {
            true
        }
    }

    /// Computes a shortest path from `start` to `goal` using A* with the
    /// Manhattan-distance heuristic and unit step costs.
    ///
    /// Returns `Ok(None)` when no path exists; the path otherwise runs from
    /// `start` to `goal` inclusive, each step between orthogonal
    /// neighbours.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `start` or `goal` lies outside the
    /// grid.
    pub fn shortest_path(&self, start: Point, goal: Point) -> Result<Option<Vec<Point>>, GridError> {
        self.ensure_in_bounds(start)?;
        self.ensure_in_bounds(goal)?;
        if self.unreachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Ok(None);
        }
        info!("{} is reachable from {}, computing path", goal, start);
        let result = search::astar(
            &start,
            |node| {
                self.free_neighbours(*node)
                    .into_iter()
                    .map(|p| (p, 1))
                    .collect::<Vec<(Point, i32)>>()
            },
            |point| manhattan_distance(point, &goal),
            |point| *point == goal,
        );
        Ok(result.map(|(path, _cost)| path))
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours
    /// to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        let w = self.grid.width;
        let h = self.grid.height;
        self.components = UnionFind::new(w * h);
        self.components_dirty = false;
        for x in 0..w {
            for y in 0..h {
                if !self.grid.get(x, y) {
                    let parent_ix = self.grid.get_ix(x, y);
                    let point = Point::new(x as i32, y as i32);
                    // Right and down cover every orthogonal adjacency once.
                    let neighbours = [
                        Point::new(point.x + 1, point.y),
                        Point::new(point.x, point.y + 1),
                    ]
                    .into_iter()
                    .filter(|p| self.can_move_to(*p))
                    .map(|p| self.grid.get_ix(p.x as usize, p.y as usize))
                    .collect::<Vec<usize>>();
                    for ix in neighbours {
                        self.components.union(parent_ix, ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for MazeGrid {
    /// Renders the grid in its text format: one row per line, '0' for free
    /// cells and '#' for blocked ones.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.grid.height {
            let row = (0..self.grid.width)
                .map(|x| if self.grid.get(x, y) { '#' } else { '0' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl Grid<bool> for MazeGrid {
    fn new(width: usize, height: usize, default_value: bool) -> Self {
        MazeGrid {
            grid: BoolGrid::new(width, height, default_value),
            components: UnionFind::new(width * height),
            components_dirty: false,
        }
    }
    fn get(&self, x: usize, y: usize) -> bool {
        self.grid.get(x, y)
    }
    /// Updates a position on the grid. Joins newly connected components and
    /// flags the components as dirty if components are (potentially) broken
    /// apart into multiple.
    fn set(&mut self, x: usize, y: usize, blocked: bool) {
        let p = Point::new(x as i32, y as i32);
        if self.grid.get(x, y) != blocked && blocked {
            self.components_dirty = true;
        } else {
            for p in self.free_neighbours(p) {
                self.components.union(
                    self.grid.get_ix(x, y),
                    self.grid.get_ix(p.x as usize, p.y as usize),
                );
            }
        }
        self.grid.set(x, y, blocked);
    }
    fn width(&self) -> usize {
        self.grid.width()
    }
    fn height(&self) -> usize {
        self.grid.height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_generation() {
        let mut maze_grid = MazeGrid::new(3, 4, true);
        maze_grid.grid.set(1, 1, false);
        maze_grid.generate_components();
        assert!(!maze_grid.components.equiv(0, 4))
    }

    #[test]
    fn neighbours_skip_walls_and_borders() {
        // 0#0
        // 000
        let mut grid = MazeGrid::new(3, 2, false);
        grid.set(1, 0, true);
        grid.generate_components();
        let around_corner = grid.neighbours(Point::new(0, 0)).unwrap();
        assert_eq!(around_corner, vec![Point::new(0, 1)]);
        let mut around_center = grid.neighbours(Point::new(1, 1)).unwrap();
        around_center.sort_by_key(|p| (p.x, p.y));
        assert_eq!(around_center, vec![Point::new(0, 1), Point::new(2, 1)]);
    }

    #[test]
    fn neighbours_out_of_bounds_is_an_error() {
        let grid = MazeGrid::new(3, 3, false);
        let err = grid.neighbours(Point::new(3, 0)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
        let err = grid.neighbours(Point::new(0, -1)).unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
    }

    #[test]
    fn shortest_path_on_open_grid_has_manhattan_length() {
        let mut grid = MazeGrid::new(3, 3, false);
        grid.generate_components();
        let path = grid
            .shortest_path(Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .unwrap();
        // 4 steps, 5 coordinates.
        assert_eq!(path.len(), 5);
        assert_eq!(path[0], Point::new(0, 0));
        assert_eq!(path[4], Point::new(2, 2));
    }

    #[test]
    fn shortest_path_detours_around_center_obstacle() {
        let mut grid = MazeGrid::new(3, 3, false);
        grid.set(1, 1, true);
        grid.generate_components();
        let path = grid
            .shortest_path(Point::new(0, 0), Point::new(2, 2))
            .unwrap()
            .unwrap();
        // The obstacle is off every shortest route: still 4 steps.
        assert_eq!(path.len(), 5);
        assert!(!path.contains(&Point::new(1, 1)));
    }

    #[test]
    fn equal_start_and_goal_is_a_single_cell_path() {
        let mut grid = MazeGrid::new(1, 1, false);
        grid.generate_components();
        let start = Point::new(0, 0);
        let path = grid.shortest_path(start, start).unwrap().unwrap();
        assert_eq!(path, vec![start]);
    }

    #[test]
    fn separated_components_report_not_found() {
        // 0#0
        // 0#0
        let mut grid = MazeGrid::new(3, 2, false);
        grid.set(1, 0, true);
        grid.set(1, 1, true);
        grid.generate_components();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
        let outcome = grid
            .shortest_path(Point::new(0, 0), Point::new(2, 1))
            .unwrap();
        assert!(outcome.is_none());
    }

    #[test]
    fn out_of_bounds_endpoints_are_rejected() {
        let mut grid = MazeGrid::new(4, 4, false);
        grid.generate_components();
        let err = grid
            .shortest_path(Point::new(0, 0), Point::new(4, 0))
            .unwrap_err();
        assert!(matches!(err, GridError::OutOfBounds { .. }));
    }

    #[test]
    fn blocking_a_cell_marks_components_dirty() {
        let mut grid = MazeGrid::new(3, 3, false);
        grid.generate_components();
        grid.set(1, 1, true);
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(2, 2)));
    }

    #[test]
    fn display_matches_text_format() {
        let mut grid = MazeGrid::new(3, 2, false);
        grid.set(1, 0, true);
        assert_eq!(grid.to_string(), "0#0\n000\n");
    }
}
