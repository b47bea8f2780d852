//! One-call analyses of a recycle loop and of a craft-and-recycle loop.

use tracing::info;

use crate::absorb::{expected_visits, expected_visits_by_level};
use crate::combine::combine_stages;
use crate::config::TransitionConfig;
use crate::error::MarkovError;
use crate::steady::steady_state;
use crate::transition::{TransitionMatrix, build_transition_matrix};

/// Long-run result of feeding material through one stage repeatedly.
#[derive(Debug, Clone, PartialEq)]
pub struct RecycleOutcome {
    /// The stage's transition matrix.
    pub matrix: TransitionMatrix,
    /// Approximate limit of repeated application.
    pub limit: TransitionMatrix,
    /// Total expected transient visits for one unit starting at level 0.
    pub expected_visits: f64,
}

/// Long-run result of alternating a craft stage and a recycle stage.
#[derive(Debug, Clone, PartialEq)]
pub struct CraftRecycleOutcome {
    /// The combined `2N x 2N` matrix from [`combine_stages`].
    pub matrix: TransitionMatrix,
    /// Approximate limit of repeated application.
    pub limit: TransitionMatrix,
    /// Expected visits per combined state.
    pub visits: Vec<f64>,
}

/// Builds a stage from `config` and analyses its repeated application.
///
/// # Errors
///
/// Propagates any [`MarkovError`] from building or analysing the matrix.
pub fn recycle_outcome(config: &TransitionConfig) -> Result<RecycleOutcome, MarkovError> {
    let matrix = build_transition_matrix(config)?;
    let limit = steady_state(&matrix)?;
    let expected_visits = expected_visits(&matrix, None)?;
    info!(n_levels = matrix.n_levels(), expected_visits, "recycle loop analysed");
    Ok(RecycleOutcome {
        matrix,
        limit,
        expected_visits,
    })
}

/// Builds both stages, combines them and analyses the combined process.
///
/// `initial_state` has one entry per combined state (`2N`) and defaults to
/// one unit at state 0.
///
/// # Errors
///
/// Propagates any [`MarkovError`] from building, combining or analysing.
pub fn craft_recycle_outcome(
    craft: &TransitionConfig,
    recycle: &TransitionConfig,
    initial_state: Option<&[f64]>,
) -> Result<CraftRecycleOutcome, MarkovError> {
    let craft_m = build_transition_matrix(craft)?;
    let recycle_m = build_transition_matrix(recycle)?;
    let matrix = combine_stages(&craft_m, &recycle_m)?;
    let limit = steady_state(&matrix)?;
    let visits = expected_visits_by_level(&matrix, initial_state)?;
    info!(
        n_states = matrix.n_levels(),
        total_visits = visits.iter().sum::<f64>(),
        "craft and recycle loop analysed"
    );
    Ok(CraftRecycleOutcome {
        matrix,
        limit,
        visits,
    })
}
