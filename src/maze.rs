//! Randomized maze-like grid generation.
//!
//! [`MazeGenerator`] carves free cells out of a fully blocked grid with a
//! backtracking depth-first walk. From the current cell it picks an
//! untouched orthogonal neighbour uniformly at random and either carves it
//! free and advances (with probability `1 - blocked_probability`) or marks
//! it permanently blocked without moving; when no untouched neighbour
//! remains it backtracks. Every free cell of the result is therefore
//! connected to the carving origin, which makes the grids convenient
//! solvable inputs for search. Whether a particular start or goal cell
//! ended up free is still the caller's to check.

use crate::error::GridError;
use crate::grid::{orthogonal_neighbours, MazeGrid};
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use rand::prelude::*;

// Working sheet states during carving.
const CARVED: u8 = 0;
const REJECTED: u8 = 1;
const UNTOUCHED: u8 = 2;

/// Configuration for randomized depth-first maze carving.
///
/// `blocked_probability` controls density: 0.0 carves every reachable cell
/// free, 1.0 rejects every neighbour of the origin and leaves a single free
/// cell. Generation is deterministic for a fixed seed.
#[derive(Clone, Debug)]
pub struct MazeGenerator {
    width: usize,
    height: usize,
    blocked_probability: f64,
    seed: Option<u64>,
}

impl MazeGenerator {
    /// Creates a generator for `width` x `height` grids.
    ///
    /// # Errors
    ///
    /// [`GridError::EmptyGrid`] for a zero dimension,
    /// [`GridError::InvalidDensity`] if `blocked_probability` is not in
    /// [0, 1].
    pub fn new(
        width: usize,
        height: usize,
        blocked_probability: f64,
    ) -> Result<MazeGenerator, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::EmptyGrid { width, height });
        }
        if !(0.0..=1.0).contains(&blocked_probability) {
            return Err(GridError::InvalidDensity(blocked_probability));
        }
        Ok(MazeGenerator {
            width,
            height,
            blocked_probability,
            seed: None,
        })
    }

    /// Fixes the random seed, making repeated generation reproducible.
    pub fn seed(mut self, seed: u64) -> MazeGenerator {
        self.seed = Some(seed);
        self
    }

    /// Carves a fresh grid, seeding the generator from [`Self::seed`] or
    /// from entropy when no seed was fixed.
    pub fn generate(&self) -> MazeGrid {
        match self.seed {
            Some(seed) => self.generate_with(&mut StdRng::seed_from_u64(seed)),
            None => self.generate_with(&mut StdRng::from_entropy()),
        }
    }

    /// Carves a fresh grid, drawing all randomness from `rng`.
    pub fn generate_with<R: Rng>(&self, rng: &mut R) -> MazeGrid {
        let mut cells: SimpleGrid<u8> = SimpleGrid::new(self.width, self.height, UNTOUCHED);
        let origin = Point::new(
            rng.gen_range(0..self.width) as i32,
            rng.gen_range(0..self.height) as i32,
        );
        cells.set_point(origin, CARVED);
        let mut stack = vec![origin];
        while let Some(&current) = stack.last() {
            let untouched = orthogonal_neighbours(current)
                .into_iter()
                .filter(|p| self.in_bounds(p) && cells.get_point(*p) == UNTOUCHED)
                .collect::<Vec<Point>>();
            if let Some(&next) = untouched.choose(rng) {
                if rng.gen_bool(1.0 - self.blocked_probability) {
                    cells.set_point(next, CARVED);
                    stack.push(next);
                } else {
                    // Rejected cells stay walls for good; the walk does not
                    // move there.
                    cells.set_point(next, REJECTED);
                }
            } else {
                stack.pop();
            }
        }

        let mut maze = MazeGrid::new(self.width, self.height, true);
        for x in 0..self.width {
            for y in 0..self.height {
                if cells.get(x, y) == CARVED {
                    maze.grid.set(x, y, false);
                }
            }
        }
        maze.generate_components();
        maze
    }

    fn in_bounds(&self, p: &Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }
}
