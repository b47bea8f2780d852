//! Gauss-Jordan inversion with diagonal pivots.

use ndarray::{Array2, Zip};
use tracing::trace;

use crate::error::LinalgError;

/// Smallest pivot magnitude accepted during elimination.
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Inverts a square matrix by Gauss-Jordan elimination.
///
/// Rows are processed from last to first. Each pivot row is normalised by
/// its diagonal entry and then subtracted from every row above it, so only
/// entries above the diagonal are eliminated and no row exchanges take
/// place. This is the exact inverse for upper-triangular input, which
/// covers every transition matrix this workspace builds (mass only ever
/// moves towards higher quality).
///
/// The input is never modified; work happens on private copies.
///
/// # Errors
///
/// - [`LinalgError::NotSquare`] if `m` is not square.
/// - [`LinalgError::SingularMatrix`] if a pivot magnitude falls below
///   [`PIVOT_TOLERANCE`].
pub fn invert(m: &Array2<f64>) -> Result<Array2<f64>, LinalgError> {
    let (rows, cols) = m.dim();
    if rows != cols {
        return Err(LinalgError::NotSquare { rows, cols });
    }
    let n = rows;

    let mut work = m.to_owned();
    let mut inv = Array2::<f64>::eye(n);

    for i in (0..n).rev() {
        let pivot = work[[i, i]];
        if pivot.abs() < PIVOT_TOLERANCE {
            return Err(LinalgError::SingularMatrix { row: i, pivot });
        }

        work.row_mut(i).mapv_inplace(|x| x / pivot);
        inv.row_mut(i).mapv_inplace(|x| x / pivot);

        let pivot_work = work.row(i).to_owned();
        let pivot_inv = inv.row(i).to_owned();
        for k in (0..i).rev() {
            let factor = work[[k, i]];
            Zip::from(work.row_mut(k))
                .and(&pivot_work)
                .for_each(|x, &p| *x -= factor * p);
            Zip::from(inv.row_mut(k))
                .and(&pivot_inv)
                .for_each(|x, &p| *x -= factor * p);
        }
    }

    trace!(n, "matrix inverted");
    Ok(inv)
}
