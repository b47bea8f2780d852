use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level upcycle configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpcycleConfig {
    /// Global RNG seed.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Quality ladder settings shared by both stages.
    #[serde(default)]
    pub levels: LevelsToml,

    /// Craft stage settings.
    #[serde(default)]
    pub craft: StageToml,

    /// Recycle stage settings.
    #[serde(default)]
    pub recycle: StageToml,

    /// Monte Carlo settings.
    #[serde(default)]
    pub simulate: SimulateToml,
}

impl UpcycleConfig {
    /// Reads and parses a TOML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

/// A number applied to every level, or one number per level.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ParamToml {
    Scalar(f64),
    PerLevel(Vec<f64>),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LevelsToml {
    #[serde(default = "default_quality_next_probability")]
    pub quality_next_probability: Vec<f64>,
}

impl Default for LevelsToml {
    fn default() -> Self {
        Self {
            quality_next_probability: default_quality_next_probability(),
        }
    }
}

fn default_quality_next_probability() -> Vec<f64> {
    upcycle_markov::config::DEFAULT_QUALITY_NEXT_PROBABILITY.to_vec()
}

/// One production stage. `production_multiplier` falls back to the stage's
/// default during conversion.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StageToml {
    #[serde(default)]
    pub quality_bonus: Option<ParamToml>,
    #[serde(default)]
    pub production_multiplier: Option<ParamToml>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulateToml {
    #[serde(default = "default_n_trials")]
    pub n_trials: usize,
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
}

impl Default for SimulateToml {
    fn default() -> Self {
        Self {
            n_trials: default_n_trials(),
            max_steps: default_max_steps(),
        }
    }
}

fn default_n_trials() -> usize {
    100_000
}
fn default_max_steps() -> usize {
    10_000
}
