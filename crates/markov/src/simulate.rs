//! Monte Carlo sampling of single units through a transition matrix.
//!
//! When every transient row delivers at most one unit in total, a row can
//! be read as a sub-stochastic distribution: the unit moves to level `j`
//! with probability `m[i][j]` and is consumed with the remaining
//! probability. Averaging many sampled trajectories recovers the analytic
//! expected visits and the limit row of the steady state.

use tracing::debug;

use crate::error::MarkovError;
use crate::transition::TransitionMatrix;

/// Slack allowed above 1.0 when checking that a row can be sampled.
const ROW_SUM_TOLERANCE: f64 = 1e-12;

/// How a sampled trajectory ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    /// The unit reached an absorbing level.
    Absorbed(usize),
    /// The unit was lost in processing.
    Consumed,
    /// The step limit was reached while the unit sat at this transient level.
    Truncated(usize),
}

/// A single sampled trajectory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trajectory {
    /// Number of transient levels passed through, counting the start.
    pub visits: usize,
    /// How the trajectory ended.
    pub fate: Fate,
}

/// Averages over many sampled trajectories.
#[derive(Debug, Clone, PartialEq)]
pub struct MonteCarloEstimate {
    /// Number of trajectories sampled.
    pub n_trials: usize,
    /// Mean transient visits per trajectory.
    pub mean_visits: f64,
    /// Fraction of trajectories absorbed at each level.
    pub absorbed_fraction: Vec<f64>,
    /// Fraction of trajectories whose unit was consumed.
    pub consumed_fraction: f64,
    /// Fraction of trajectories cut off by the step limit.
    pub truncated_fraction: f64,
}

fn check_sampleable(matrix: &TransitionMatrix, start: usize) -> Result<(), MarkovError> {
    let n = matrix.n_levels();
    if start >= n {
        return Err(MarkovError::LevelOutOfRange { level: start, n });
    }
    for row in matrix.transient_levels() {
        let sum = matrix.row_sum(row);
        let has_negative = matrix.row(row).iter().any(|&v| v < 0.0);
        if sum > 1.0 + ROW_SUM_TOLERANCE || has_negative || !sum.is_finite() {
            return Err(MarkovError::NotSubStochastic { row, sum });
        }
    }
    Ok(())
}

fn walk(
    matrix: &TransitionMatrix,
    start: usize,
    max_steps: usize,
    rng: &mut impl rand::Rng,
) -> Trajectory {
    let mut level = start;
    let mut visits = 0;
    loop {
        if matrix.is_absorbing(level) {
            return Trajectory {
                visits,
                fate: Fate::Absorbed(level),
            };
        }
        if visits == max_steps {
            return Trajectory {
                visits,
                fate: Fate::Truncated(level),
            };
        }
        visits += 1;

        let u: f64 = rng.random();
        let mut cumulative = 0.0;
        let mut next = None;
        for (j, &p) in matrix.row(level).iter().enumerate() {
            cumulative += p;
            if u < cumulative {
                next = Some(j);
                break;
            }
        }
        match next {
            Some(j) => level = j,
            None => {
                return Trajectory {
                    visits,
                    fate: Fate::Consumed,
                };
            }
        }
    }
}

/// Samples one unit starting at level `start`.
///
/// The walk stops when the unit reaches an absorbing level, is consumed, or
/// has spent `max_steps` steps in transient levels.
///
/// # Errors
///
/// - [`MarkovError::LevelOutOfRange`] if `start` is not a level.
/// - [`MarkovError::NotSubStochastic`] if a transient row sums above 1.0 or
///   holds a negative entry.
pub fn sample_trajectory(
    matrix: &TransitionMatrix,
    start: usize,
    max_steps: usize,
    rng: &mut impl rand::Rng,
) -> Result<Trajectory, MarkovError> {
    check_sampleable(matrix, start)?;
    Ok(walk(matrix, start, max_steps, rng))
}

/// Estimates expected visits and absorption fractions from `n_trials`
/// sampled trajectories.
///
/// # Errors
///
/// - [`MarkovError::InvalidTrials`] if `n_trials` is zero.
/// - Any error from [`sample_trajectory`].
#[tracing::instrument(skip(matrix, rng), fields(n_levels = matrix.n_levels()))]
pub fn estimate_outcome(
    matrix: &TransitionMatrix,
    start: usize,
    n_trials: usize,
    max_steps: usize,
    rng: &mut impl rand::Rng,
) -> Result<MonteCarloEstimate, MarkovError> {
    if n_trials == 0 {
        return Err(MarkovError::InvalidTrials);
    }
    check_sampleable(matrix, start)?;

    let mut total_visits = 0usize;
    let mut absorbed = vec![0usize; matrix.n_levels()];
    let mut consumed = 0usize;
    let mut truncated = 0usize;
    for _ in 0..n_trials {
        let t = walk(matrix, start, max_steps, rng);
        total_visits += t.visits;
        match t.fate {
            Fate::Absorbed(level) => absorbed[level] += 1,
            Fate::Consumed => consumed += 1,
            Fate::Truncated(_) => truncated += 1,
        }
    }

    let nf = n_trials as f64;
    let estimate = MonteCarloEstimate {
        n_trials,
        mean_visits: total_visits as f64 / nf,
        absorbed_fraction: absorbed.iter().map(|&c| c as f64 / nf).collect(),
        consumed_fraction: consumed as f64 / nf,
        truncated_fraction: truncated as f64 / nf,
    };
    debug!(
        mean_visits = estimate.mean_visits,
        consumed = estimate.consumed_fraction,
        truncated = estimate.truncated_fraction,
        "monte carlo estimate complete"
    );
    Ok(estimate)
}
