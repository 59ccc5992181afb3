use grid_util::grid::Grid;
use grid_util::point::Point;
use maze_pathfinding::{AdaptiveAstar, MazeGenerator};

// Runs a sequence of searches from different starts toward one goal on one
// carved maze. Each search folds the exact distances it realized into the
// heuristic used by the next one; the correction table growth is printed
// after every search.

fn main() {
    let maze = MazeGenerator::new(41, 41, 0.3)
        .expect("valid generator parameters")
        .seed(7)
        .generate();
    let free: Vec<Point> = (0..41)
        .flat_map(|y| (0..41).map(move |x| Point::new(x, y)))
        .filter(|p| !maze.get(p.x as usize, p.y as usize))
        .collect();
    let goal = *free.last().expect("carved maze has free cells");
    let mut engine = AdaptiveAstar::new(goal);

    for start in free.iter().step_by(free.len() / 6 + 1) {
        let path = engine
            .search(&maze, *start)
            .expect("start and goal are in bounds")
            .expect("free cells of one carving are connected");
        println!(
            "{} -> {}: {} steps, {} cells with sharpened estimates",
            start,
            goal,
            path.len() - 1,
            engine.corrections().len()
        );
    }
}
