//! Expected transient visits before absorption.
//!
//! For a matrix with transient block `Q`, the fundamental matrix
//! `N = (I - Q)^-1` counts expected visits: `N[i][j]` is the expected
//! number of times a unit starting at transient level `i` passes through
//! transient level `j` before it is absorbed or lost. Weighted by an
//! initial state, the row sums give the material cost of running the loop
//! to completion.

use ndarray::{Array1, Array2};
use tracing::debug;
use upcycle_linalg::invert;

use crate::error::MarkovError;
use crate::transition::TransitionMatrix;

/// The fundamental matrix `(I - Q)^-1` of a transition matrix, together
/// with the transient levels it is indexed by.
#[derive(Debug, Clone, PartialEq)]
pub struct FundamentalMatrix {
    transient: Vec<usize>,
    n_levels: usize,
    r: Array2<f64>,
}

impl FundamentalMatrix {
    /// Transient level indices, ascending. Row and column `k` of
    /// [`as_array`](Self::as_array) correspond to level `transient()[k]`.
    pub fn transient(&self) -> &[usize] {
        &self.transient
    }

    /// Number of levels of the matrix this was derived from.
    pub fn n_levels(&self) -> usize {
        self.n_levels
    }

    /// The inverse `(I - Q)^-1`, indexed by position in
    /// [`transient`](Self::transient).
    pub fn as_array(&self) -> &Array2<f64> {
        &self.r
    }

    /// Expected visits to each transient level, weighted by `initial_state`
    /// and scattered back to full length (absorbing levels are 0).
    pub fn visits_from(&self, initial_state: &[f64]) -> Result<Vec<f64>, MarkovError> {
        check_state_len(initial_state, self.n_levels)?;
        let mut out = vec![0.0; self.n_levels];
        if self.transient.is_empty() {
            return Ok(out);
        }
        let s: Array1<f64> = self.transient.iter().map(|&i| initial_state[i]).collect();
        let weighted = s.dot(&self.r);
        for (&level, &v) in self.transient.iter().zip(weighted.iter()) {
            out[level] = v;
        }
        Ok(out)
    }
}

fn check_state_len(state: &[f64], n: usize) -> Result<(), MarkovError> {
    if state.len() != n {
        return Err(MarkovError::LengthMismatch {
            name: "initial_state",
            expected: n,
            got: state.len(),
        });
    }
    Ok(())
}

/// Unit mass at level 0, the default starting state.
pub fn unit_state(n: usize) -> Vec<f64> {
    let mut state = vec![0.0; n];
    if let Some(first) = state.first_mut() {
        *first = 1.0;
    }
    state
}

/// Computes the fundamental matrix over the transient levels of `matrix`.
///
/// # Errors
///
/// Returns [`MarkovError::Linalg`] if `I - Q` is singular.
pub fn fundamental_matrix(matrix: &TransitionMatrix) -> Result<FundamentalMatrix, MarkovError> {
    let n = matrix.n_levels();
    let transient = matrix.transient_levels();
    let k = transient.len();

    let mut operand = Array2::<f64>::eye(k);
    for (ri, &i) in transient.iter().enumerate() {
        for (rj, &j) in transient.iter().enumerate() {
            operand[[ri, rj]] -= matrix.get(i, j);
        }
    }

    let r = invert(&operand)?;
    debug!(n_levels = n, n_transient = k, "fundamental matrix computed");
    Ok(FundamentalMatrix {
        transient,
        n_levels: n,
        r,
    })
}

/// Total expected transient visits before absorption.
///
/// `initial_state` defaults to one unit at level 0. Returns 0.0 when every
/// level is absorbing.
///
/// # Errors
///
/// - [`MarkovError::LengthMismatch`] if `initial_state` has the wrong length.
/// - [`MarkovError::Linalg`] if `I - Q` is singular.
pub fn expected_visits(
    matrix: &TransitionMatrix,
    initial_state: Option<&[f64]>,
) -> Result<f64, MarkovError> {
    Ok(expected_visits_by_level(matrix, initial_state)?.iter().sum())
}

/// Expected transient visits before absorption, per level.
///
/// Same as [`expected_visits`] but keeps the per-level breakdown; absorbing
/// levels report 0.
///
/// # Errors
///
/// See [`expected_visits`].
#[tracing::instrument(skip_all, fields(n_levels = matrix.n_levels()))]
pub fn expected_visits_by_level(
    matrix: &TransitionMatrix,
    initial_state: Option<&[f64]>,
) -> Result<Vec<f64>, MarkovError> {
    let n = matrix.n_levels();
    let default_state;
    let state = match initial_state {
        Some(s) => s,
        None => {
            default_state = unit_state(n);
            &default_state
        }
    };
    check_state_len(state, n)?;

    if matrix.transient_levels().is_empty() {
        return Ok(vec![0.0; n]);
    }
    fundamental_matrix(matrix)?.visits_from(state)
}
