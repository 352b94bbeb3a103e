//! Error types shared by the engine, the goals and the solvers.

use thiserror::Error;

/// Rejections raised while building or mutating a [`Board`](crate::engine::Board).
///
/// A rejected operation never leaves the board half-modified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Needs `2 <= size <= max` and `size <= tile_count <= size * size - size`.
    #[error("size {size} with {tile_count} tiles is not a valid board (size <= {max})")]
    InvalidDimensions {
        size: usize,
        tile_count: usize,
        max: usize,
    },
    #[error("column {col} is out of range for a board of size {size}")]
    ColumnOutOfRange { col: usize, size: usize },
    #[error("column {0} is full")]
    ColumnFull(usize),
    #[error("column {0} is empty")]
    ColumnEmpty(usize),
    #[error("tile {tile} is out of range (1..={tile_count})")]
    TileOutOfRange { tile: usize, tile_count: usize },
    #[error("tile {0} appears more than once")]
    DuplicateTile(u8),
    #[error("tile {0} is missing from the board")]
    MissingTile(u8),
    #[error("tile at row {row}, col {col} is floating above an empty cell")]
    FloatingTile { row: usize, col: usize },
    #[error("expected {expected} cells, found {found}")]
    CellCountMismatch { expected: usize, found: usize },
    #[error("illegal move from column {from} to column {to}")]
    IllegalAction { from: usize, to: usize },
    #[error("parse error: {0}")]
    Parse(String),
}

/// Rejections raised while building or validating a [`Goal`](crate::goals::Goal).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GoalError {
    #[error("unknown direction code {0} (expected -1 above, -2 below, -3 left, -4 right)")]
    UnknownDirection(i32),
    #[error("tile {tile} does not exist (tiles are 1..={tile_count})")]
    TileOutOfRange { tile: i32, tile_count: usize },
    #[error("coordinate ({row}, {col}) is outside a board of size {size}")]
    CoordinateOutOfRange { row: i32, col: i32, size: usize },
    #[error("tile {0} cannot be placed next to itself")]
    SelfReference(u8),
    #[error("parse error: {0}")]
    Parse(String),
}
