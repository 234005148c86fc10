//! Maze generation and solvability engine for a drawing-based maze game.
//!
//! The builder carves a perfect maze (a spanning tree of open passages over a
//! grid of walled cells), the solver derives the unique entry-to-exit path as
//! a set of `"x,y"` keys, and the game module applies the consumer rules:
//! pixel-to-cell mapping, wrong-turn classification and the lives/score
//! session state. JSON and binary views move grids across the UI boundary.

pub mod ascii_utils;
pub mod builder;
pub mod codec;
pub mod error;
pub mod game;
pub mod grid;
pub mod json_utils;
pub mod solver;

pub use builder::{carve_entry_exit, generate, generate_maze, generate_with_rng, Algorithm};
pub use error::MazeError;
pub use game::{
    cell_at_point, dimensions_for_level, GamePhase, GameSession, MoveTracker, MAX_LIVES,
    MAX_WRONG_TURNS,
};
pub use grid::{cell_key, Cell, Grid, Walls};
pub use solver::{solve_maze, solve_path};
