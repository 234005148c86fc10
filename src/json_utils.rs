use std::collections::HashSet;

use serde_json::{json, Value};

use crate::error::MazeError;
use crate::grid::Grid;

/// Renders a grid as the JSON shape the UI layer consumes:
/// `{cols, rows, cells: [{x, y, walls: {top, right, bottom, left}}]}`,
/// cells in row-major order.
pub fn grid_to_json(grid: &Grid) -> Value {
    let mut cells = Vec::with_capacity(grid.cols() * grid.rows());
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let walls = &grid.cell(x, y).walls;
            cells.push(json!({
                "x": x,
                "y": y,
                "walls": {
                    "top": walls.top,
                    "right": walls.right,
                    "bottom": walls.bottom,
                    "left": walls.left,
                },
            }));
        }
    }
    json!({
        "cols": grid.cols(),
        "rows": grid.rows(),
        "cells": cells,
    })
}

/// Solution set as a sorted key array, so output is stable across runs.
pub fn solution_to_json(solution: &HashSet<String>) -> Value {
    let mut keys: Vec<&String> = solution.iter().collect();
    keys.sort();
    json!(keys)
}

/// Parses a grid back out of the [`grid_to_json`] shape.
pub fn grid_from_json(value: &Value) -> Result<Grid, MazeError> {
    let cols = field_u64(value, "cols")? as usize;
    let rows = field_u64(value, "rows")? as usize;
    let mut grid = Grid::with_all_walls(cols, rows)?;

    let cells = value
        .get("cells")
        .and_then(Value::as_array)
        .ok_or_else(|| MazeError::MalformedGrid("missing cells array".into()))?;
    if cells.len() != cols * rows {
        return Err(MazeError::MalformedGrid(format!(
            "expected {} cells, got {}",
            cols * rows,
            cells.len()
        )));
    }

    for entry in cells {
        let x = field_u64(entry, "x")? as usize;
        let y = field_u64(entry, "y")? as usize;
        if x >= cols || y >= rows {
            return Err(MazeError::MalformedGrid(format!(
                "cell ({x},{y}) out of bounds"
            )));
        }
        let walls = entry
            .get("walls")
            .ok_or_else(|| MazeError::MalformedGrid(format!("cell ({x},{y}) missing walls")))?;
        let cell = grid.cell_mut(x, y);
        cell.walls.top = field_bool(walls, "top")?;
        cell.walls.right = field_bool(walls, "right")?;
        cell.walls.bottom = field_bool(walls, "bottom")?;
        cell.walls.left = field_bool(walls, "left")?;
    }

    if !grid.walls_symmetric() {
        return Err(MazeError::MalformedGrid(
            "wall flags disagree across a shared edge".into(),
        ));
    }
    Ok(grid)
}

/// Parses a grid from raw JSON text.
pub fn grid_from_str(text: &str) -> Result<Grid, MazeError> {
    let value: Value = serde_json::from_str(text)?;
    grid_from_json(&value)
}

fn field_u64(value: &Value, name: &str) -> Result<u64, MazeError> {
    value
        .get(name)
        .and_then(Value::as_u64)
        .ok_or_else(|| MazeError::MalformedGrid(format!("missing or non-integer {name}")))
}

fn field_bool(value: &Value, name: &str) -> Result<bool, MazeError> {
    value
        .get(name)
        .and_then(Value::as_bool)
        .ok_or_else(|| MazeError::MalformedGrid(format!("missing or non-boolean wall {name}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{generate_with_rng, Algorithm};
    use crate::solver::solve_maze;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn grid_survives_the_json_boundary() {
        let mut rng = StdRng::seed_from_u64(21);
        let grid = generate_with_rng(5, 4, Algorithm::Prims, &mut rng).unwrap();
        let value = grid_to_json(&grid);
        assert_eq!(value["cols"], 5);
        assert_eq!(value["rows"], 4);
        assert_eq!(value["cells"].as_array().unwrap().len(), 20);

        let parsed = grid_from_json(&value).unwrap();
        assert_eq!(parsed, grid);
    }

    #[test]
    fn solution_keys_come_out_sorted() {
        let mut rng = StdRng::seed_from_u64(22);
        let grid =
            generate_with_rng(4, 4, Algorithm::RecursiveBacktracker, &mut rng).unwrap();
        let solution = solve_maze(&grid);
        let value = solution_to_json(&solution);
        let keys: Vec<&str> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(keys.len(), solution.len());
        assert!(keys.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn missing_fields_are_rejected() {
        assert!(matches!(
            grid_from_json(&json!({"rows": 2, "cells": []})),
            Err(MazeError::MalformedGrid(_))
        ));
        assert!(matches!(
            grid_from_str(r#"{"cols": 1, "rows": 1, "cells": [{"x": 0, "y": 0}]}"#),
            Err(MazeError::MalformedGrid(_))
        ));
        assert!(matches!(
            grid_from_str("not json"),
            Err(MazeError::Json(_))
        ));
    }

    #[test]
    fn asymmetric_walls_are_rejected() {
        let mut rng = StdRng::seed_from_u64(23);
        let grid =
            generate_with_rng(3, 3, Algorithm::RecursiveBacktracker, &mut rng).unwrap();
        let mut value = grid_to_json(&grid);
        // Break one side of a shared edge.
        let open = value["cells"][0]["walls"]["right"].as_bool().unwrap();
        value["cells"][0]["walls"]["right"] = json!(!open);
        assert!(matches!(
            grid_from_json(&value),
            Err(MazeError::MalformedGrid(_))
        ));
    }

    #[test]
    fn zero_dimensions_in_json_are_invalid() {
        assert!(matches!(
            grid_from_json(&json!({"cols": 0, "rows": 3, "cells": []})),
            Err(MazeError::InvalidDimensions { .. })
        ));
    }
}
