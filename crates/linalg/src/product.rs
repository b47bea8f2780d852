//! Shape-checked matrix product.

use ndarray::Array2;

use crate::error::LinalgError;

/// Computes the matrix product `a · b`.
///
/// # Errors
///
/// Returns [`LinalgError::DimensionMismatch`] if the column count of `a`
/// differs from the row count of `b`.
pub fn multiply(a: &Array2<f64>, b: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    if a.ncols() != b.nrows() {
        return Err(LinalgError::DimensionMismatch {
            left_cols: a.ncols(),
            right_rows: b.nrows(),
        });
    }
    Ok(a.dot(b))
}
