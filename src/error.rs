//! Error types for grid planning and subplot assembly.

use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while planning grids or assembling figures.
///
/// All of these are usage errors: they are raised synchronously at the point
/// of detection and are never retried internally. No partial figure is
/// produced on failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Explicit grid shape too small for the number of figures.
    #[error("shape {rows}x{cols} cannot hold {figures} figures")]
    InvalidShape {
        /// Requested row count.
        rows: usize,
        /// Requested column count.
        cols: usize,
        /// Number of figures that were supposed to fit.
        figures: usize,
    },

    /// Per-cell spec grid dimensions do not match the grid shape.
    #[error("cell specs are {spec_rows}x{spec_cols}, expected {rows}x{cols}")]
    InvalidSpecs {
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
        /// Rows in the provided spec grid.
        spec_rows: usize,
        /// Columns in the longest provided spec row.
        spec_cols: usize,
    },

    /// More figures than eligible (non-blank) grid cells.
    #[error("grid has {cells} usable cells for {figures} figures")]
    GridExhausted {
        /// Number of non-blank cells in the grid.
        cells: usize,
        /// Number of figures to place.
        figures: usize,
    },

    /// A zero-column table was passed to the scatter-matrix builder.
    #[error("table has no columns")]
    DegenerateInput,

    /// Theme name not present in the registry.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// Column name not present in the table.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// Inset addressed to a cell outside the grid.
    #[error("inset cell ({row},{col}) is outside the {rows}x{cols} grid")]
    InvalidInset {
        /// 1-based inset row.
        row: usize,
        /// 1-based inset column.
        col: usize,
        /// Grid row count.
        rows: usize,
        /// Grid column count.
        cols: usize,
    },

    /// String could not be parsed as an axis reference.
    #[error("invalid axis reference: {0:?}")]
    InvalidAxisRef(String),
}
