//! Limiting transition matrix by repeated squaring.

use tracing::{debug, warn};
use upcycle_linalg::multiply;

use crate::error::MarkovError;
use crate::transition::TransitionMatrix;

/// Number of squarings applied by [`steady_state`]; the result approximates
/// `matrix^(2^32)`.
pub const SQUARINGS: u32 = 32;

/// Approximates the limit of `matrix^k` as `k` grows.
///
/// Squares the matrix exactly [`SQUARINGS`] times. There is no convergence
/// test and no early exit: with at least one absorbing level and every
/// transient diagonal below one, transient mass has long vanished by then.
///
/// Row `i` of the result is the long-run output per unit of input at level
/// `i`. A chain whose mass grows without bound yields non-finite entries;
/// this is logged and returned as-is.
///
/// # Errors
///
/// Propagates [`MarkovError::Linalg`] from the matrix product (not expected
/// for a square matrix).
#[tracing::instrument(skip_all, fields(n_levels = matrix.n_levels()))]
pub fn steady_state(matrix: &TransitionMatrix) -> Result<TransitionMatrix, MarkovError> {
    let mut result = matrix.as_array().to_owned();
    for _ in 0..SQUARINGS {
        result = multiply(&result, &result)?;
    }

    let limit = TransitionMatrix::from_array_unchecked(result);
    if limit.is_finite() {
        debug!("steady state computed");
    } else {
        warn!("steady state has non-finite entries; the process amplifies material without bound");
    }
    Ok(limit)
}
