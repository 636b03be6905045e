//! Distance-matrix errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatrixError {
    #[error("Tile size must be at least 1")]
    InvalidTileSize,

    #[error("Location {index} is missing a longitude or latitude")]
    MissingCoordinate { index: usize },

    #[error("Matrix tile r={row_block} c={col_block} failed: response has no distances")]
    MissingDistances { row_block: usize, col_block: usize },

    #[error(
        "Matrix tile r={row_block} c={col_block} failed: expected {expected_rows}x{expected_cols} distances"
    )]
    ShapeMismatch {
        row_block: usize,
        col_block: usize,
        expected_rows: usize,
        expected_cols: usize,
    },

    #[error("Routing API error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
