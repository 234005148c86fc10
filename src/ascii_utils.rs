use std::collections::HashSet;

use crate::grid::{cell_key, Grid};

/// Renders the maze as `+--+` line art, two characters per cell interior.
/// Cells on the solution path (when given) are filled with `**`.
pub fn render_grid(grid: &Grid, solution: Option<&HashSet<String>>) -> String {
    let mut out = String::new();
    for y in 0..grid.rows() {
        // Top edge of this row.
        for x in 0..grid.cols() {
            out.push('+');
            out.push_str(if grid.cell(x, y).walls.top { "--" } else { "  " });
        }
        out.push_str("+\n");

        // Cell interiors with their left walls, then the row's right border.
        for x in 0..grid.cols() {
            let cell = grid.cell(x, y);
            out.push(if cell.walls.left { '|' } else { ' ' });
            let on_path = solution.is_some_and(|s| s.contains(&cell_key(x, y)));
            out.push_str(if on_path { "**" } else { "  " });
        }
        let last = grid.cell(grid.cols() - 1, y);
        out.push(if last.walls.right { '|' } else { ' ' });
        out.push('\n');
    }

    // Bottom border.
    for x in 0..grid.cols() {
        out.push('+');
        out.push_str(if grid.cell(x, grid.rows() - 1).walls.bottom {
            "--"
        } else {
            "  "
        });
    }
    out.push_str("+\n");
    out
}
