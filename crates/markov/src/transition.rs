//! Transition matrix construction for quality-tier production stages.

use ndarray::{Array2, ArrayView1};
use tracing::debug;
use upcycle_linalg::LinalgError;

use crate::config::TransitionConfig;
use crate::error::MarkovError;

/// Tolerance for recognising an absorbing level: `|m[i][i] - 1| < 1e-10`.
pub const ABSORBING_TOLERANCE: f64 = 1e-10;

/// A square matrix of expected output quantities between quality levels.
///
/// Row `i` holds, per unit of input at level `i`, the expected quantity
/// delivered to each level `j`. Rows need not sum to one: a recycler loses
/// material, an amplifying stage creates it.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionMatrix {
    m: Array2<f64>,
}

impl TransitionMatrix {
    /// Wraps a square array.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::Linalg`] wrapping [`LinalgError::NotSquare`]
    /// if `m` is not square.
    pub fn from_array(m: Array2<f64>) -> Result<Self, MarkovError> {
        let (rows, cols) = m.dim();
        if rows != cols {
            return Err(LinalgError::NotSquare { rows, cols }.into());
        }
        Ok(Self { m })
    }

    /// Builds a matrix from row vectors.
    ///
    /// # Errors
    ///
    /// Returns [`MarkovError::Linalg`] if the rows are ragged or do not form
    /// a square matrix.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Self, MarkovError> {
        let n = rows.len();
        let mut m = Array2::zeros((n, n));
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(LinalgError::NotSquare {
                    rows: n,
                    cols: row.len(),
                }
                .into());
            }
            for (j, &v) in row.iter().enumerate() {
                m[[i, j]] = v;
            }
        }
        Ok(Self { m })
    }

    /// The `n x n` identity: every level absorbing.
    pub fn identity(n: usize) -> Self {
        Self { m: Array2::eye(n) }
    }

    pub(crate) fn from_array_unchecked(m: Array2<f64>) -> Self {
        debug_assert_eq!(m.nrows(), m.ncols());
        Self { m }
    }

    /// Number of levels (rows and columns).
    pub fn n_levels(&self) -> usize {
        self.m.nrows()
    }

    /// Expected quantity moved from level `from` to level `to`.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn get(&self, from: usize, to: usize) -> f64 {
        self.m[[from, to]]
    }

    /// Returns row `from`.
    ///
    /// # Panics
    ///
    /// Panics if `from` is out of range.
    pub fn row(&self, from: usize) -> ArrayView1<'_, f64> {
        self.m.row(from)
    }

    /// Total expected output per unit of input at level `from`.
    pub fn row_sum(&self, from: usize) -> f64 {
        self.m.row(from).sum()
    }

    /// Returns the underlying array.
    pub fn as_array(&self) -> &Array2<f64> {
        &self.m
    }

    /// Consumes the matrix, returning the underlying array.
    pub fn into_array(self) -> Array2<f64> {
        self.m
    }

    /// Row-major copy, lowest level first.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.m.rows().into_iter().map(|r| r.to_vec()).collect()
    }

    /// Whether level `i` keeps exactly its own output.
    pub fn is_absorbing(&self, i: usize) -> bool {
        (self.m[[i, i]] - 1.0).abs() < ABSORBING_TOLERANCE
    }

    /// Absorbing level indices in ascending order.
    pub fn absorbing_levels(&self) -> Vec<usize> {
        (0..self.n_levels()).filter(|&i| self.is_absorbing(i)).collect()
    }

    /// Transient (non-absorbing) level indices in ascending order.
    pub fn transient_levels(&self) -> Vec<usize> {
        (0..self.n_levels()).filter(|&i| !self.is_absorbing(i)).collect()
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.m.iter().all(|v| v.is_finite())
    }
}

/// Builds the transition matrix of one production stage.
///
/// For every row `i`:
///
/// 1. the diagonal receives `production_multiplier[i]`;
/// 2. below the top level, `quality_bonus[i]` of it moves to `i + 1`;
/// 3. for `j` in `i+1..n-1`, `quality_next_probability[j]` of the mass at
///    `j` cascades on to `j + 1`.
///
/// Once every row is built, a single left-to-right sweep clamps negative
/// entries to zero and borrows the deficit from the next level up. The
/// sweep must not be interleaved with construction.
///
/// # Errors
///
/// Returns [`MarkovError`] if the configuration fails
/// [`TransitionConfig::validate`].
#[tracing::instrument(skip(config), fields(n_levels = config.n_levels()))]
pub fn build_transition_matrix(config: &TransitionConfig) -> Result<TransitionMatrix, MarkovError> {
    config.validate()?;

    let n = config.n_levels();
    let bonus = config.resolved_quality_bonus()?;
    let multiplier = config.resolved_production_multiplier();
    let cascade = config.quality_next_probability();

    let mut m = Array2::<f64>::zeros((n, n));
    for i in 0..n {
        m[[i, i]] = multiplier[i];

        if i < n - 1 {
            let upgrade = bonus[i] * m[[i, i]];
            m[[i, i]] -= upgrade;
            m[[i, i + 1]] += upgrade;
        }

        for j in (i + 1)..(n - 1) {
            let upgrade = cascade[j] * m[[i, j]];
            m[[i, j]] -= upgrade;
            m[[i, j + 1]] += upgrade;
        }
    }

    let borrowed = borrow_correction(&mut m);
    debug!(borrowed, "transition matrix built");

    Ok(TransitionMatrix::from_array_unchecked(m))
}

/// Clamps negative entries to zero, pushing each deficit into the next
/// column of the same row. A deficit in the last column is dropped.
///
/// Returns the number of entries that were clamped.
fn borrow_correction(m: &mut Array2<f64>) -> usize {
    let n = m.ncols();
    let mut clamped = 0;
    for mut row in m.rows_mut() {
        for j in 0..n {
            let v = row[j];
            if v < 0.0 {
                row[j] = 0.0;
                if j < n - 1 {
                    row[j + 1] += v;
                }
                clamped += 1;
            }
        }
    }
    clamped
}
