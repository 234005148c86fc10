use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::grid::{cell_key, Grid};

/// The set of `"x,y"` keys on the shortest path from `(0,0)` to
/// `(cols-1, rows-1)`.
///
/// For carved grids the passage graph is a tree, so the path is unique and
/// the set is exactly the corner-to-corner tree path. If the target is
/// unreachable (never the case for builder output) the set is empty. The
/// gameplay layer checks membership here to flag wrong turns.
pub fn solve_maze(grid: &Grid) -> HashSet<String> {
    solve_path(grid)
        .into_iter()
        .map(|(x, y)| cell_key(x, y))
        .collect()
}

/// The same path as [`solve_maze`], ordered from entry to exit.
///
/// Breadth-first search over wall-connectivity with a predecessor map; the
/// path is rebuilt backward from the target rather than copied per queue
/// entry, which keeps the search at O(rows * cols). Visitation is tracked in
/// a solver-local set; the grid is never mutated.
pub fn solve_path(grid: &Grid) -> Vec<(usize, usize)> {
    let start = (0, 0);
    let target = (grid.cols() - 1, grid.rows() - 1);

    let mut visited = HashSet::from([start]);
    let mut came_from: HashMap<(usize, usize), (usize, usize)> = HashMap::new();
    let mut queue = VecDeque::from([start]);

    while let Some((x, y)) = queue.pop_front() {
        if (x, y) == target {
            let mut path = vec![target];
            let mut current = target;
            while let Some(&prev) = came_from.get(&current) {
                path.push(prev);
                current = prev;
            }
            path.reverse();
            debug!(len = path.len(), "solved maze");
            return path;
        }
        for next in grid.connected_neighbors(x, y) {
            if visited.insert(next) {
                came_from.insert(next, (x, y));
                queue.push_back(next);
            }
        }
    }

    debug!("target unreachable");
    Vec::new()
}
