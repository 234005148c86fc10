use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::error::MazeError;
use crate::grid::Grid;

/// Perfect-maze carving algorithms. Every variant produces a spanning tree
/// over the grid cells; they differ only in the texture of the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    RecursiveBacktracker,
    Prims,
    HuntAndKill,
    BinaryTree,
    Sidewinder,
    AldousBroder,
    Wilsons,
    RecursiveDivision,
}

impl Algorithm {
    pub const ALL: [Algorithm; 8] = [
        Algorithm::RecursiveBacktracker,
        Algorithm::Prims,
        Algorithm::HuntAndKill,
        Algorithm::BinaryTree,
        Algorithm::Sidewinder,
        Algorithm::AldousBroder,
        Algorithm::Wilsons,
        Algorithm::RecursiveDivision,
    ];
}

/// Carves a `cols x rows` maze with randomized depth-first backtracking and
/// the thread-local RNG. This is the per-level entry point of the game.
pub fn generate_maze(cols: usize, rows: usize) -> Result<Grid, MazeError> {
    generate_with_rng(cols, rows, Algorithm::RecursiveBacktracker, &mut rand::rng())
}

/// Carves a maze with the chosen algorithm and the thread-local RNG.
pub fn generate(cols: usize, rows: usize, algorithm: Algorithm) -> Result<Grid, MazeError> {
    generate_with_rng(cols, rows, algorithm, &mut rand::rng())
}

/// Carves a maze from a caller-supplied random source.
///
/// The seam exists so tests can pass a seeded [`rand::rngs::StdRng`] and get
/// reproducible mazes; gameplay callers go through [`generate_maze`].
pub fn generate_with_rng<R: Rng + ?Sized>(
    cols: usize,
    rows: usize,
    algorithm: Algorithm,
    rng: &mut R,
) -> Result<Grid, MazeError> {
    let mut grid = Grid::with_all_walls(cols, rows)?;
    debug!(cols, rows, ?algorithm, "carving maze");
    match algorithm {
        Algorithm::RecursiveBacktracker => carve_backtracker(&mut grid, rng),
        Algorithm::Prims => carve_prims(&mut grid, rng),
        Algorithm::HuntAndKill => carve_hunt_and_kill(&mut grid, rng),
        Algorithm::BinaryTree => carve_binary_tree(&mut grid, rng),
        Algorithm::Sidewinder => carve_sidewinder(&mut grid, rng),
        Algorithm::AldousBroder => carve_aldous_broder(&mut grid, rng),
        Algorithm::Wilsons => carve_wilsons(&mut grid, rng),
        Algorithm::RecursiveDivision => carve_recursive_division(&mut grid, rng),
    }
    Ok(grid)
}

/// Opens the outer left wall of the entry cell `(0,0)` and the outer right
/// wall of the exit cell `(cols-1, rows-1)`, marking where the player enters
/// and leaves. Separate from carving: the core contract keeps the border
/// closed.
pub fn carve_entry_exit(grid: &mut Grid) {
    grid.cell_mut(0, 0).walls.left = false;
    let (ex, ey) = (grid.cols() - 1, grid.rows() - 1);
    grid.cell_mut(ex, ey).walls.right = false;
}

/// Visitation bitmap local to one carving run.
struct Visited {
    cols: usize,
    seen: Vec<bool>,
}

impl Visited {
    fn new(grid: &Grid) -> Self {
        Self {
            cols: grid.cols(),
            seen: vec![false; grid.cols() * grid.rows()],
        }
    }

    fn get(&self, (x, y): (usize, usize)) -> bool {
        self.seen[y * self.cols + x]
    }

    fn mark(&mut self, (x, y): (usize, usize)) {
        self.seen[y * self.cols + x] = true;
    }
}

/// Randomized depth-first carving with an explicit stack.
///
/// The stack top is the current cell; a random unvisited neighbor is carved
/// into and pushed, and the cell is popped once no unvisited neighbor
/// remains. Every cell is first reached exactly once, which is what makes the
/// result a spanning tree.
fn carve_backtracker<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut visited = Visited::new(grid);
    let start = (0, 0);
    visited.mark(start);
    let mut stack = vec![start];

    while let Some(&(x, y)) = stack.last() {
        let unvisited: Vec<(usize, usize)> = grid
            .adjacent(x, y)
            .into_iter()
            .filter(|&n| !visited.get(n))
            .collect();
        if let Some(&next) = unvisited.choose(rng) {
            grid.remove_walls_between((x, y), next);
            visited.mark(next);
            stack.push(next);
        } else {
            stack.pop();
        }
    }
}

/// Randomized Prim's: grow the tree one frontier edge at a time.
fn carve_prims<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut visited = Visited::new(grid);
    let start = (
        rng.random_range(0..grid.cols()),
        rng.random_range(0..grid.rows()),
    );
    visited.mark(start);

    let mut frontier: Vec<((usize, usize), (usize, usize))> = grid
        .adjacent(start.0, start.1)
        .into_iter()
        .map(|n| (start, n))
        .collect();

    while !frontier.is_empty() {
        let i = rng.random_range(0..frontier.len());
        let (a, b) = frontier.swap_remove(i);
        if visited.get(a) == visited.get(b) {
            continue;
        }
        let into = if visited.get(a) { b } else { a };
        grid.remove_walls_between(a, b);
        visited.mark(into);
        for n in grid.adjacent(into.0, into.1) {
            frontier.push((into, n));
        }
    }
}

/// Hunt-and-kill: random walk until stuck, then scan for the first unvisited
/// cell bordering the tree and restart the walk from there.
fn carve_hunt_and_kill<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut visited = Visited::new(grid);
    visited.mark((0, 0));
    let mut current = Some((0, 0));

    while let Some((x, y)) = current {
        let unvisited: Vec<(usize, usize)> = grid
            .adjacent(x, y)
            .into_iter()
            .filter(|&n| !visited.get(n))
            .collect();
        if let Some(&next) = unvisited.choose(rng) {
            grid.remove_walls_between((x, y), next);
            visited.mark(next);
            current = Some(next);
            continue;
        }

        current = None;
        'hunt: for hy in 0..grid.rows() {
            for hx in 0..grid.cols() {
                if visited.get((hx, hy)) {
                    continue;
                }
                let carved: Vec<(usize, usize)> = grid
                    .adjacent(hx, hy)
                    .into_iter()
                    .filter(|&n| visited.get(n))
                    .collect();
                if let Some(&link) = carved.choose(rng) {
                    grid.remove_walls_between((hx, hy), link);
                    visited.mark((hx, hy));
                    current = Some((hx, hy));
                    break 'hunt;
                }
            }
        }
    }
}

/// Binary tree: each cell carves toward its top or left neighbor.
fn carve_binary_tree<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let mut choices: Vec<(usize, usize)> = Vec::with_capacity(2);
            if y > 0 {
                choices.push((x, y - 1));
            }
            if x > 0 {
                choices.push((x - 1, y));
            }
            if let Some(&n) = choices.choose(rng) {
                grid.remove_walls_between((x, y), n);
            }
        }
    }
}

/// Sidewinder: carve eastward runs, closing each out with one northern link.
fn carve_sidewinder<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    for y in 0..grid.rows() {
        let mut run: Vec<(usize, usize)> = Vec::new();
        for x in 0..grid.cols() {
            run.push((x, y));
            let at_eastern_boundary = x + 1 == grid.cols();
            let at_northern_boundary = y == 0;
            let close_out = at_eastern_boundary || (!at_northern_boundary && rng.random_bool(0.5));

            if close_out {
                let (mx, my) = run[rng.random_range(0..run.len())];
                if my > 0 {
                    grid.remove_walls_between((mx, my), (mx, my - 1));
                }
                run.clear();
            } else {
                grid.remove_walls_between((x, y), (x + 1, y));
            }
        }
    }
}

/// Aldous-Broder: unbiased random walk, carving on each first visit.
fn carve_aldous_broder<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut visited = Visited::new(grid);
    let mut remaining = grid.cols() * grid.rows() - 1;
    let mut current = (
        rng.random_range(0..grid.cols()),
        rng.random_range(0..grid.rows()),
    );
    visited.mark(current);

    while remaining > 0 {
        let neighbors = grid.adjacent(current.0, current.1);
        let next = neighbors[rng.random_range(0..neighbors.len())];
        if !visited.get(next) {
            grid.remove_walls_between(current, next);
            visited.mark(next);
            remaining -= 1;
        }
        current = next;
    }
}

/// Wilson's: loop-erased random walks from unvisited cells into the tree.
fn carve_wilsons<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let mut visited = Visited::new(grid);
    let mut unvisited: Vec<(usize, usize)> = (0..grid.rows())
        .flat_map(|y| (0..grid.cols()).map(move |x| (x, y)))
        .collect();

    let first = unvisited.swap_remove(rng.random_range(0..unvisited.len()));
    visited.mark(first);

    while !unvisited.is_empty() {
        let mut cell = unvisited[rng.random_range(0..unvisited.len())];
        let mut walk = vec![cell];
        while !visited.get(cell) {
            let neighbors = grid.adjacent(cell.0, cell.1);
            let next = neighbors[rng.random_range(0..neighbors.len())];
            // Loop erasure: revisiting a walk cell discards the loop.
            if let Some(pos) = walk.iter().position(|&p| p == next) {
                walk.truncate(pos + 1);
            } else {
                walk.push(next);
            }
            cell = next;
        }

        for i in 0..walk.len() - 1 {
            grid.remove_walls_between(walk[i], walk[i + 1]);
            visited.mark(walk[i]);
            if let Some(pos) = unvisited.iter().position(|&p| p == walk[i]) {
                unvisited.swap_remove(pos);
            }
        }
    }
}

/// Recursive division: open everything inside the border, then split regions
/// with a wall pierced by a single passage.
fn carve_recursive_division<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) {
    let (cols, rows) = (grid.cols(), grid.rows());
    for y in 0..rows {
        for x in 0..cols {
            let walls = &mut grid.cell_mut(x, y).walls;
            walls.top = y == 0;
            walls.bottom = y + 1 == rows;
            walls.left = x == 0;
            walls.right = x + 1 == cols;
        }
    }
    divide(grid, rng, 0, 0, cols - 1, rows - 1);
}

fn divide<R: Rng + ?Sized>(
    grid: &mut Grid,
    rng: &mut R,
    x1: usize,
    y1: usize,
    x2: usize,
    y2: usize,
) {
    let width = x2 - x1;
    let height = y2 - y1;
    if width < 1 || height < 1 {
        return;
    }

    if width < height {
        // Horizontal wall below row `wall_y`, with one passage at `pass_x`.
        let wall_y = y1 + rng.random_range(0..height);
        let pass_x = x1 + rng.random_range(0..=width);
        for x in x1..=x2 {
            if x != pass_x {
                grid.cell_mut(x, wall_y).walls.bottom = true;
                grid.cell_mut(x, wall_y + 1).walls.top = true;
            }
        }
        divide(grid, rng, x1, y1, x2, wall_y);
        divide(grid, rng, x1, wall_y + 1, x2, y2);
    } else {
        // Vertical wall right of column `wall_x`, with one passage at `pass_y`.
        let wall_x = x1 + rng.random_range(0..width);
        let pass_y = y1 + rng.random_range(0..=height);
        for y in y1..=y2 {
            if y != pass_y {
                grid.cell_mut(wall_x, y).walls.right = true;
                grid.cell_mut(wall_x + 1, y).walls.left = true;
            }
        }
        divide(grid, rng, x1, y1, wall_x, y2);
        divide(grid, rng, wall_x + 1, y1, x2, y2);
    }
}
