//! JSON reports emitted by the subcommands.
//!
//! Non-finite matrix entries serialize as `null`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use upcycle_markov::{
    CraftRecycleOutcome, MonteCarloEstimate, QualityTier, RecycleOutcome, TransitionMatrix,
};

/// Labels for the levels of an `n`-level matrix.
pub fn level_labels(n: usize) -> Vec<String> {
    (0..n).map(QualityTier::label_for).collect()
}

/// Labels for the `2n` states of a combined craft-and-recycle process:
/// ingredients first, then crafted items.
pub fn combined_labels(n: usize) -> Vec<String> {
    let mut labels = level_labels(n);
    labels.extend((0..n).map(|i| format!("crafted {}", QualityTier::label_for(i))));
    labels
}

#[derive(Debug, Serialize)]
pub struct MatrixReport {
    pub levels: Vec<String>,
    pub absorbing: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
}

impl MatrixReport {
    pub fn new(matrix: &TransitionMatrix) -> Self {
        let levels = level_labels(matrix.n_levels());
        let absorbing = matrix
            .absorbing_levels()
            .into_iter()
            .map(|i| levels[i].clone())
            .collect();
        Self {
            levels,
            absorbing,
            matrix: matrix.to_rows(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RecycleReport {
    pub levels: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub limit: Vec<Vec<f64>>,
    pub expected_visits: f64,
}

impl From<&RecycleOutcome> for RecycleReport {
    fn from(out: &RecycleOutcome) -> Self {
        Self {
            levels: level_labels(out.matrix.n_levels()),
            matrix: out.matrix.to_rows(),
            limit: out.limit.to_rows(),
            expected_visits: out.expected_visits,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CraftRecycleReport {
    pub states: Vec<String>,
    pub matrix: Vec<Vec<f64>>,
    pub limit: Vec<Vec<f64>>,
    pub visits: Vec<f64>,
}

impl From<&CraftRecycleOutcome> for CraftRecycleReport {
    fn from(out: &CraftRecycleOutcome) -> Self {
        Self {
            states: combined_labels(out.matrix.n_levels() / 2),
            matrix: out.matrix.to_rows(),
            limit: out.limit.to_rows(),
            visits: out.visits.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SimulateReport {
    pub seed: Option<u64>,
    pub start: String,
    pub n_trials: usize,
    pub max_steps: usize,
    pub mean_visits: f64,
    pub analytic_visits: f64,
    pub levels: Vec<String>,
    pub absorbed_fraction: Vec<f64>,
    pub consumed_fraction: f64,
    pub truncated_fraction: f64,
}

impl SimulateReport {
    pub fn new(
        estimate: &MonteCarloEstimate,
        seed: Option<u64>,
        start: usize,
        max_steps: usize,
        analytic_visits: f64,
    ) -> Self {
        Self {
            seed,
            start: QualityTier::label_for(start),
            n_trials: estimate.n_trials,
            max_steps,
            mean_visits: estimate.mean_visits,
            analytic_visits,
            levels: level_labels(estimate.absorbed_fraction.len()),
            absorbed_fraction: estimate.absorbed_fraction.clone(),
            consumed_fraction: estimate.consumed_fraction,
            truncated_fraction: estimate.truncated_fraction,
        }
    }
}

/// Serializes `report` as pretty JSON to `output`, or to stdout.
pub fn emit<T: Serialize>(report: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize report")?;
    match output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write report: {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}
