use std::collections::HashSet;

use tracing::debug;

use crate::grid::cell_key;

/// Wall hits allowed per run.
pub const MAX_LIVES: u32 = 3;
/// Wrong path turns allowed per level.
pub const MAX_WRONG_TURNS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Start,
    Playing,
    LevelComplete,
    GameOver,
}

/// Maze dimensions for a level number, the game's difficulty curve.
pub fn dimensions_for_level(level: u32) -> (usize, usize) {
    let base = 4;
    let boost = level.min(8);
    let cols = base + boost + level / 2;
    let rows = base + boost + level * 3 / 10;
    (cols as usize, rows as usize)
}

/// Maps a screen-space point to its logical cell by integer division with the
/// cell pixel size. `None` for points off-canvas or a degenerate cell size.
pub fn cell_at_point(px: f64, py: f64, cell_size: f64) -> Option<(usize, usize)> {
    if cell_size <= 0.0 || px < 0.0 || py < 0.0 {
        return None;
    }
    Some(((px / cell_size) as usize, (py / cell_size) as usize))
}

/// Flags wrong turns as the player's pen moves across cells.
///
/// Remembers the last logical cell so a single excursion fires once per cell
/// entered, not once per sampled point. Classification is point-in-time: the
/// player may oscillate between solution and non-solution cells and each
/// off-path entry fires again.
#[derive(Debug)]
pub struct MoveTracker {
    last_cell: (usize, usize),
}

impl MoveTracker {
    /// Starts at the entry cell `(0,0)`.
    pub fn new() -> Self {
        Self { last_cell: (0, 0) }
    }

    /// Returns `true` when the move enters a new cell that is off the
    /// solution path.
    pub fn observe(&mut self, cell: (usize, usize), solution: &HashSet<String>) -> bool {
        if cell == self.last_cell {
            return false;
        }
        self.last_cell = cell;
        let wrong = !solution.contains(&cell_key(cell.0, cell.1));
        if wrong {
            debug!(x = cell.0, y = cell.1, "wrong turn");
        }
        wrong
    }

    pub fn reset(&mut self) {
        self.last_cell = (0, 0);
    }
}

impl Default for MoveTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Run-level rules: lives, wrong-turn allowance, score and phase transitions.
///
/// Crash detection itself is a rendering concern; the caller reports crash
/// and wrong-turn events and reads the resulting phase.
#[derive(Debug)]
pub struct GameSession {
    phase: GamePhase,
    level: u32,
    lives: u32,
    wrong_turns_left: u32,
    score: u32,
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            phase: GamePhase::Start,
            level: 1,
            lives: MAX_LIVES,
            wrong_turns_left: MAX_WRONG_TURNS,
            score: 0,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn wrong_turns_left(&self) -> u32 {
        self.wrong_turns_left
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Starts (or restarts) a run from level 1 with full allowances.
    pub fn start(&mut self) {
        self.level = 1;
        self.lives = MAX_LIVES;
        self.wrong_turns_left = MAX_WRONG_TURNS;
        self.score = 0;
        self.phase = GamePhase::Playing;
    }

    /// A wall crash costs a life; the run ends when none remain.
    pub fn record_crash(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.lives -= 1;
        if self.lives == 0 {
            self.phase = GamePhase::GameOver;
        }
    }

    /// A wrong turn spends the allowance; one past the last ends the run.
    pub fn record_wrong_turn(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.wrong_turns_left == 0 {
            self.phase = GamePhase::GameOver;
        } else {
            self.wrong_turns_left -= 1;
        }
    }

    /// Reaching the exit banks the level score.
    pub fn complete_level(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.score += self.level * 100 + self.lives * 50 + self.wrong_turns_left * 30;
        self.phase = GamePhase::LevelComplete;
    }

    /// Moves on to the next level: the wrong-turn allowance replenishes,
    /// remaining lives carry over.
    pub fn advance_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        self.level += 1;
        self.wrong_turns_left = MAX_WRONG_TURNS;
        self.phase = GamePhase::Playing;
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::generate_with_rng;
    use crate::builder::Algorithm;
    use crate::solver::solve_maze;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn difficulty_curve_matches_known_levels() {
        assert_eq!(dimensions_for_level(1), (5, 5));
        assert_eq!(dimensions_for_level(5), (11, 10));
        assert_eq!(dimensions_for_level(10), (17, 15));
        // The size boost caps at 8; only the tail terms keep growing.
        assert_eq!(dimensions_for_level(20), (22, 18));
    }

    #[test]
    fn pixel_mapping_uses_integer_division() {
        assert_eq!(cell_at_point(0.0, 0.0, 24.0), Some((0, 0)));
        assert_eq!(cell_at_point(23.9, 47.9, 24.0), Some((0, 1)));
        assert_eq!(cell_at_point(24.0, 48.0, 24.0), Some((1, 2)));
        assert_eq!(cell_at_point(10.0, 10.0, 0.0), None);
        assert_eq!(cell_at_point(-1.0, 10.0, 24.0), None);
    }

    #[test]
    fn tracker_fires_once_per_cell_entry() {
        let solution: HashSet<String> =
            ["0,0", "1,0", "1,1"].map(String::from).into();
        let mut tracker = MoveTracker::new();

        // Sampling inside the same cell is quiet.
        assert!(!tracker.observe((0, 0), &solution));
        assert!(!tracker.observe((0, 0), &solution));
        // Following the solution is quiet.
        assert!(!tracker.observe((1, 0), &solution));
        // Stepping off the path fires.
        assert!(tracker.observe((2, 0), &solution));
        // ...but not while lingering there.
        assert!(!tracker.observe((2, 0), &solution));
        // Oscillation fires on every off-path entry.
        assert!(!tracker.observe((1, 0), &solution));
        assert!(tracker.observe((2, 0), &solution));
    }

    #[test]
    fn tracker_classifies_against_a_real_solution() {
        let mut rng = StdRng::seed_from_u64(11);
        let grid =
            generate_with_rng(6, 6, Algorithm::RecursiveBacktracker, &mut rng).unwrap();
        let solution = solve_maze(&grid);
        let mut tracker = MoveTracker::new();

        // The entry cell is always on the path.
        assert!(!tracker.observe((0, 0), &solution));
    }

    #[test]
    fn three_crashes_end_the_run() {
        let mut session = GameSession::new();
        session.start();
        session.record_crash();
        session.record_crash();
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.lives(), 1);
        session.record_crash();
        assert_eq!(session.phase(), GamePhase::GameOver);
        // Further events are ignored once the run is over.
        session.record_crash();
        assert_eq!(session.lives(), 0);
    }

    #[test]
    fn fourth_wrong_turn_ends_the_run() {
        let mut session = GameSession::new();
        session.start();
        for _ in 0..3 {
            session.record_wrong_turn();
        }
        assert_eq!(session.phase(), GamePhase::Playing);
        assert_eq!(session.wrong_turns_left(), 0);
        session.record_wrong_turn();
        assert_eq!(session.phase(), GamePhase::GameOver);
    }

    #[test]
    fn scoring_and_level_advance() {
        let mut session = GameSession::new();
        session.start();
        session.record_crash();
        session.record_wrong_turn();
        session.complete_level();
        // level 1 * 100 + 2 lives * 50 + 2 turns * 30
        assert_eq!(session.score(), 260);
        assert_eq!(session.phase(), GamePhase::LevelComplete);

        session.advance_level();
        assert_eq!(session.level(), 2);
        assert_eq!(session.phase(), GamePhase::Playing);
        // Wrong turns replenish, lives do not.
        assert_eq!(session.wrong_turns_left(), MAX_WRONG_TURNS);
        assert_eq!(session.lives(), 2);
    }

    #[test]
    fn restart_resets_everything() {
        let mut session = GameSession::new();
        session.start();
        session.record_crash();
        session.complete_level();
        session.start();
        assert_eq!(session.level(), 1);
        assert_eq!(session.lives(), MAX_LIVES);
        assert_eq!(session.score(), 0);
        assert_eq!(session.phase(), GamePhase::Playing);
    }
}
