use crate::error::MazeError;

/// The four walls of a cell. `true` means the wall is present (no passage).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Walls {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl Default for Walls {
    fn default() -> Self {
        Self {
            top: true,
            right: true,
            bottom: true,
            left: true,
        }
    }
}

/// One grid position with its wall configuration.
///
/// Cells carry no construction-time state; visitation bookkeeping during
/// carving and solving lives in the algorithms themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
    pub walls: Walls,
}

impl Cell {
    fn new(x: usize, y: usize) -> Self {
        Self {
            x,
            y,
            walls: Walls::default(),
        }
    }

    /// The `"x,y"` key used by the solution set and the gameplay layer.
    pub fn key(&self) -> String {
        cell_key(self.x, self.y)
    }
}

/// Formats a coordinate pair as the `"x,y"` key shared with the UI layer.
pub fn cell_key(x: usize, y: usize) -> String {
    format!("{x},{y}")
}

/// A `rows x cols` maze grid addressed by `(x, y)`.
///
/// After carving, the open-passage graph is a spanning tree over all cells:
/// every cell reachable from every other via exactly one simple path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cols: usize,
    rows: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates a grid with every wall present. Rejects non-positive dimensions.
    pub fn with_all_walls(cols: usize, rows: usize) -> Result<Self, MazeError> {
        if cols == 0 || rows == 0 {
            return Err(MazeError::InvalidDimensions { cols, rows });
        }
        let mut cells = Vec::with_capacity(cols * rows);
        for y in 0..rows {
            for x in 0..cols {
                cells.push(Cell::new(x, y));
            }
        }
        Ok(Self { cols, rows, cells })
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    fn idx(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.cols && y < self.rows);
        y * self.cols + x
    }

    pub fn cell(&self, x: usize, y: usize) -> &Cell {
        &self.cells[self.idx(x, y)]
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        let i = self.idx(x, y);
        &mut self.cells[i]
    }

    /// In-bounds axis-aligned neighbors of `(x, y)`, in top, right, bottom,
    /// left order.
    pub fn adjacent(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if y > 0 {
            out.push((x, y - 1));
        }
        if x + 1 < self.cols {
            out.push((x + 1, y));
        }
        if y + 1 < self.rows {
            out.push((x, y + 1));
        }
        if x > 0 {
            out.push((x - 1, y));
        }
        out
    }

    /// Neighbors reachable from `(x, y)` through an open wall.
    ///
    /// Wall absence and bounds are checked independently: a cleared wall on
    /// the grid edge (a carved entry or exit) must not produce an
    /// out-of-bounds neighbor.
    pub fn connected_neighbors(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let walls = &self.cell(x, y).walls;
        let mut out = Vec::with_capacity(4);
        if !walls.top && y > 0 {
            out.push((x, y - 1));
        }
        if !walls.right && x + 1 < self.cols {
            out.push((x + 1, y));
        }
        if !walls.bottom && y + 1 < self.rows {
            out.push((x, y + 1));
        }
        if !walls.left && x > 0 {
            out.push((x - 1, y));
        }
        out
    }

    /// Clears the shared wall between two adjacent cells, symmetrically on
    /// both sides of the edge. Non-adjacent pairs are left untouched.
    pub(crate) fn remove_walls_between(&mut self, a: (usize, usize), b: (usize, usize)) {
        let (ax, ay) = a;
        let (bx, by) = b;
        if ay == by && ax == bx + 1 {
            self.cell_mut(ax, ay).walls.left = false;
            self.cell_mut(bx, by).walls.right = false;
        } else if ay == by && bx == ax + 1 {
            self.cell_mut(ax, ay).walls.right = false;
            self.cell_mut(bx, by).walls.left = false;
        } else if ax == bx && ay == by + 1 {
            self.cell_mut(ax, ay).walls.top = false;
            self.cell_mut(bx, by).walls.bottom = false;
        } else if ax == bx && by == ay + 1 {
            self.cell_mut(ax, ay).walls.bottom = false;
            self.cell_mut(bx, by).walls.top = false;
        }
    }

    /// Number of open internal passages, counting each shared edge once.
    ///
    /// A perfect maze has exactly `rows * cols - 1` of them. Carved entry and
    /// exit openings on the outer border do not count.
    pub fn open_passage_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let walls = &self.cell(x, y).walls;
                if x + 1 < self.cols && !walls.right {
                    count += 1;
                }
                if y + 1 < self.rows && !walls.bottom {
                    count += 1;
                }
            }
        }
        count
    }

    /// Checks that every shared edge agrees on both sides: `A`'s flag facing
    /// `B` is open iff `B`'s flag facing `A` is open.
    pub fn walls_symmetric(&self) -> bool {
        for y in 0..self.rows {
            for x in 0..self.cols {
                let walls = &self.cell(x, y).walls;
                if x + 1 < self.cols && walls.right != self.cell(x + 1, y).walls.left {
                    return false;
                }
                if y + 1 < self.rows && walls.bottom != self.cell(x, y + 1).walls.top {
                    return false;
                }
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            Grid::with_all_walls(0, 5),
            Err(MazeError::InvalidDimensions { cols: 0, rows: 5 })
        ));
        assert!(matches!(
            Grid::with_all_walls(3, 0),
            Err(MazeError::InvalidDimensions { cols: 3, rows: 0 })
        ));
    }

    #[test]
    fn fresh_grid_has_all_walls() {
        let grid = Grid::with_all_walls(3, 2).unwrap();
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(grid.cell(x, y).walls, Walls::default());
            }
        }
        assert_eq!(grid.open_passage_count(), 0);
        assert!(grid.walls_symmetric());
    }

    #[test]
    fn remove_walls_is_symmetric_in_both_axes() {
        let mut grid = Grid::with_all_walls(3, 3).unwrap();
        grid.remove_walls_between((1, 1), (2, 1));
        assert!(!grid.cell(1, 1).walls.right);
        assert!(!grid.cell(2, 1).walls.left);

        grid.remove_walls_between((1, 2), (1, 1));
        assert!(!grid.cell(1, 2).walls.top);
        assert!(!grid.cell(1, 1).walls.bottom);

        assert!(grid.walls_symmetric());
        assert_eq!(grid.open_passage_count(), 2);
    }

    #[test]
    fn adjacent_respects_bounds_and_order() {
        let grid = Grid::with_all_walls(3, 3).unwrap();
        assert_eq!(grid.adjacent(0, 0), vec![(1, 0), (0, 1)]);
        assert_eq!(
            grid.adjacent(1, 1),
            vec![(1, 0), (2, 1), (1, 2), (0, 1)]
        );
        assert_eq!(grid.adjacent(2, 2), vec![(2, 1), (1, 2)]);
    }

    #[test]
    fn connected_neighbors_need_open_wall_and_bounds() {
        let mut grid = Grid::with_all_walls(2, 2).unwrap();
        assert!(grid.connected_neighbors(0, 0).is_empty());

        grid.remove_walls_between((0, 0), (1, 0));
        assert_eq!(grid.connected_neighbors(0, 0), vec![(1, 0)]);
        assert_eq!(grid.connected_neighbors(1, 0), vec![(0, 0)]);

        // An opening on the outer border must not leak out of bounds.
        grid.cell_mut(0, 0).walls.left = false;
        assert_eq!(grid.connected_neighbors(0, 0), vec![(1, 0)]);
    }

    #[test]
    fn cell_keys_match_ui_format() {
        let grid = Grid::with_all_walls(12, 7).unwrap();
        assert_eq!(grid.cell(0, 0).key(), "0,0");
        assert_eq!(grid.cell(11, 6).key(), "11,6");
        assert_eq!(cell_key(3, 10), "3,10");
    }
}
