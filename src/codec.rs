use std::io::{Cursor, Read};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

use crate::error::MazeError;
use crate::grid::Grid;

const WALL_TOP: u8 = 0b0001;
const WALL_RIGHT: u8 = 0b0010;
const WALL_BOTTOM: u8 = 0b0100;
const WALL_LEFT: u8 = 0b1000;

/// Encodes a grid as a compact level blob: little-endian `u32 cols`,
/// `u32 rows`, then one byte per cell (row-major) holding the four wall bits.
pub fn encode_grid(grid: &Grid) -> Result<Vec<u8>, MazeError> {
    let mut buf = Vec::with_capacity(8 + grid.cols() * grid.rows());
    buf.write_u32::<LittleEndian>(grid.cols() as u32)?;
    buf.write_u32::<LittleEndian>(grid.rows() as u32)?;
    for y in 0..grid.rows() {
        for x in 0..grid.cols() {
            let walls = &grid.cell(x, y).walls;
            let mut bits = 0u8;
            if walls.top {
                bits |= WALL_TOP;
            }
            if walls.right {
                bits |= WALL_RIGHT;
            }
            if walls.bottom {
                bits |= WALL_BOTTOM;
            }
            if walls.left {
                bits |= WALL_LEFT;
            }
            buf.push(bits);
        }
    }
    Ok(buf)
}

/// Decodes a grid from [`encode_grid`] output, validating dimensions, length,
/// reserved bits and wall symmetry across shared edges.
pub fn decode_grid(bytes: &[u8]) -> Result<Grid, MazeError> {
    let mut cursor = Cursor::new(bytes);
    let cols = cursor.read_u32::<LittleEndian>()? as usize;
    let rows = cursor.read_u32::<LittleEndian>()? as usize;

    // The header is untrusted; check the claimed size against the input
    // length before allocating anything from it.
    let expected_len = cols
        .checked_mul(rows)
        .and_then(|cells| cells.checked_add(8));
    if expected_len != Some(bytes.len()) {
        return Err(MazeError::MalformedGrid(format!(
            "length {} does not match {cols}x{rows} header",
            bytes.len()
        )));
    }

    let mut grid = Grid::with_all_walls(cols, rows)?;
    let mut cells = vec![0u8; cols * rows];
    cursor.read_exact(&mut cells)?;

    for (i, &bits) in cells.iter().enumerate() {
        if bits & !(WALL_TOP | WALL_RIGHT | WALL_BOTTOM | WALL_LEFT) != 0 {
            return Err(MazeError::MalformedGrid(format!(
                "reserved wall bits set in cell {i}"
            )));
        }
        let (x, y) = (i % cols, i / cols);
        let walls = &mut grid.cell_mut(x, y).walls;
        walls.top = bits & WALL_TOP != 0;
        walls.right = bits & WALL_RIGHT != 0;
        walls.bottom = bits & WALL_BOTTOM != 0;
        walls.left = bits & WALL_LEFT != 0;
    }

    if !grid.walls_symmetric() {
        return Err(MazeError::MalformedGrid(
            "wall flags disagree across a shared edge".into(),
        ));
    }
    Ok(grid)
}
