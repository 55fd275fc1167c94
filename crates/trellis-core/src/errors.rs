//! Error types for the Trellis layout solver.

use thiserror::Error;

use crate::geometry::Axis;

/// Errors raised while building or laying out a grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    /// A component asked for more space than it was offered.
    ///
    /// This means the component miscomputed its own minimum size; the layout
    /// pass is aborted rather than clamped.
    #[error(
        "Component at row {row}, column {col} requested {requested} along {axis} but was offered {offered}"
    )]
    ContractViolation {
        row: usize,
        col: usize,
        axis: Axis,
        requested: f64,
        offered: f64,
    },

    #[error("Cell at row {row}, column {col} is already occupied")]
    CellOccupied { row: usize, col: usize },

    #[error("Cannot add components to a grid that has already been attached")]
    Attached,

    #[error("Row {index} does not exist (grid has {count} rows)")]
    RowOutOfBounds { index: usize, count: usize },

    #[error("Column {index} does not exist (grid has {count} columns)")]
    ColumnOutOfBounds { index: usize, count: usize },

    #[error("Invalid weight {weight}: weights must be finite and non-negative")]
    InvalidWeight { weight: f64 },
}

impl LayoutError {
    /// Whether this error came from a component breaking the sizing contract,
    /// as opposed to misuse of the grid's structural API.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, LayoutError::ContractViolation { .. })
    }
}
