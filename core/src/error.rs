use thiserror::Error;

use crate::{CellCount, Coord2};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {0:?} are outside the grid")]
    OutOfBounds(Coord2),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
}

/// Reasons a grid configuration is refused before generation starts.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("too many mines, requested {requested} but only {cells} cells fit")]
    TooManyMines { requested: CellCount, cells: CellCount },
    #[error("grid must have at least one row and one column")]
    EmptyGrid,
    #[error("grid of {rows}x{cols} cells exceeds the coordinate range")]
    GridTooLarge { rows: usize, cols: usize },
    #[error("grid declares {declared} mines but holds {actual}")]
    MineCountMismatch { declared: CellCount, actual: CellCount },
    #[error("adjacent mine counts do not match the mine layout")]
    InconsistentHints,
}

pub type Result<T> = core::result::Result<T, GameError>;
