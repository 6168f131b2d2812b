use thiserror::Error;

use crate::grid::Cell;
use crate::symbol::Element;

/// Rejected proposition-encoder configurations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("grid size must be at least 1")]
    EmptyGrid,
    #[error("grid size {size} exceeds the collision-free maximum of {max}")]
    GridTooLarge { size: usize, max: usize },
}

/// Precondition violations at the move-selection boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("destination {to} is not one cardinal step from {from}")]
    NotAdjacent { from: Cell, to: Cell },
    #[error("no safe move and no recorded parent at {0}")]
    Stranded(Cell),
}

/// Errors building a ground-truth world.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorldError {
    #[error("cell {cell} is outside a {size}x{size} grid")]
    OutOfBounds { cell: Cell, size: usize },
    #[error("cell {cell} already holds {existing}")]
    Occupied { cell: Cell, existing: Element },
    #[error("the start cell {0} must stay free of hazards")]
    HazardAtStart(Cell),
    #[error(transparent)]
    Encoding(#[from] EncodingError),
}

/// Failures reported by the SAT backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SolverError {
    #[error("SAT backend rejected the call: {0}")]
    Backend(String),
    #[error("SAT backend was interrupted before reaching a verdict")]
    Interrupted,
}
