use std::env;

use tracing_subscriber::EnvFilter;

use neon_laby::ascii_utils::render_grid;
use neon_laby::json_utils::solution_to_json;
use neon_laby::{dimensions_for_level, generate_maze, solve_maze, MazeError};

fn main() -> Result<(), MazeError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let level: u32 = env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3);
    let (cols, rows) = dimensions_for_level(level);

    let grid = generate_maze(cols, rows)?;
    let solution = solve_maze(&grid);

    println!(
        "Level {level}: {cols}x{rows} maze, {} open passages, solution covers {} cells",
        grid.open_passage_count(),
        solution.len()
    );
    println!("{}", render_grid(&grid, Some(&solution)));
    println!("solution keys: {}", solution_to_json(&solution));
    Ok(())
}
