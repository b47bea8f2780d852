//! Error types for the upcycle-linalg crate.

/// Error type for all fallible operations in the upcycle-linalg crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LinalgError {
    /// Returned when the inner dimensions of a matrix product disagree.
    #[error("dimension mismatch: left operand has {left_cols} columns, right operand has {right_rows} rows")]
    DimensionMismatch {
        /// Column count of the left operand.
        left_cols: usize,
        /// Row count of the right operand.
        right_rows: usize,
    },

    /// Returned when an operation that needs a square matrix gets a rectangular one.
    #[error("matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows.
        rows: usize,
        /// Number of columns.
        cols: usize,
    },

    /// Returned when an elimination pivot is too close to zero.
    #[error("matrix is singular: pivot at row {row} is {pivot:e}")]
    SingularMatrix {
        /// Row whose diagonal pivot failed.
        row: usize,
        /// The offending pivot value.
        pivot: f64,
    },
}
