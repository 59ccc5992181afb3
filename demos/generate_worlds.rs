use maze_pathfinding::{io, MazeGenerator};

// Generates a batch of 101x101 grid worlds at blocked probability 0.3 and
// stores each one in a text file next to the working directory, ready for
// external visualization or reloading with io::read_grid.

fn main() {
    let generator = MazeGenerator::new(101, 101, 0.3).expect("valid generator parameters");
    for i in 0..50 {
        let world = generator.generate();
        let file = format!("grid_world_{}.txt", i);
        io::write_grid(&file, &world).expect("writable working directory");
        println!("wrote {}", file);
    }
}
