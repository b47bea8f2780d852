//! Long-run quality outcomes of repeated production and recycling.
//!
//! Material moves between ordinal quality levels (normal → legendary). A
//! production stage is described by a square [`TransitionMatrix`] whose
//! row `i` holds the expected output at every level per unit of input at
//! level `i`. Repeating the stage is a Markov-style chain in which levels
//! that keep exactly their own output are absorbing.
//!
//! # Pipeline
//!
//! ```text
//!  ┌───────────────┐     ┌────────────────┐     ┌──────────────────┐
//!  │  transition   │────▶│    combine     │────▶│  absorb / steady │
//!  │  (build M)    │     │  (craft+recyc) │     │  (analyse M)     │
//!  └───────────────┘     └────────────────┘     └──────────────────┘
//! ```
//!
//! # Quick start
//!
//! ```rust
//! use upcycle_markov::{TransitionConfig, build_transition_matrix, expected_visits, steady_state};
//!
//! let config = TransitionConfig::new().with_quality_bonus(0.1);
//! let matrix = build_transition_matrix(&config).unwrap();
//!
//! let visits = expected_visits(&matrix, None).unwrap();
//! assert!(visits > 1.0 && visits < 4.0 / 3.0);
//!
//! let limit = steady_state(&matrix).unwrap();
//! assert!(limit.get(0, 4) > 0.0);
//! ```

pub mod absorb;
pub mod combine;
pub mod config;
pub mod error;
pub mod outcome;
pub mod simulate;
pub mod steady;
pub mod tier;
pub mod transition;

pub use absorb::{
    FundamentalMatrix, expected_visits, expected_visits_by_level, fundamental_matrix, unit_state,
};
pub use combine::{combine_stages, single_cycle_matrix};
pub use config::{Param, TransitionConfig};
pub use error::MarkovError;
pub use outcome::{CraftRecycleOutcome, RecycleOutcome, craft_recycle_outcome, recycle_outcome};
pub use simulate::{Fate, MonteCarloEstimate, Trajectory, estimate_outcome, sample_trajectory};
pub use steady::steady_state;
pub use tier::QualityTier;
pub use transition::{TransitionMatrix, build_transition_matrix};
pub use upcycle_linalg::multiply as matrix_multiply;
