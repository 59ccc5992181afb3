use grid_util::grid::Grid;
use grid_util::point::Point;
use maze_pathfinding::MazeGrid;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  E|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Nodes have a 4-neighborhood

fn main() {
    let mut grid = MazeGrid::new(3, 3, false);
    grid.set(1, 1, true);
    grid.generate_components();
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(2, 2);
    let path = grid
        .shortest_path(start, end)
        .expect("start and end are in bounds")
        .expect("a path exists around the obstacle");
    println!("Path:");
    for p in path {
        println!("{:?}", p);
    }
}
