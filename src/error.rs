use thiserror::Error;

/// Errors produced by the maze engine.
///
/// Generation and solving are total over positive dimensions; everything here
/// is either a precondition violation or a malformed external representation.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("maze dimensions must be positive, got {cols}x{rows}")]
    InvalidDimensions { cols: usize, rows: usize },

    #[error("malformed grid: {0}")]
    MalformedGrid(String),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
