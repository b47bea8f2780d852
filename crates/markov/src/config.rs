//! Parameters for building a quality transition matrix.

use crate::error::MarkovError;

/// Cascade probabilities of the base game: each tier past the first upgrade
/// continues to the next with probability 0.1; the top tier cannot continue.
pub const DEFAULT_QUALITY_NEXT_PROBABILITY: [f64; 5] = [0.1, 0.1, 0.1, 0.1, 0.0];

/// Default production multiplier of a recycling stage (a recycler returns a
/// quarter of its input).
pub const DEFAULT_RECYCLE_MULTIPLIER: f64 = 0.25;

/// Default production multiplier of a crafting stage.
pub const DEFAULT_CRAFT_MULTIPLIER: f64 = 1.0;

/// A per-level parameter given either as one value for every level or as an
/// explicit list.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// The same value for every level.
    Scalar(f64),
    /// One value per level, lowest quality first.
    PerLevel(Vec<f64>),
}

impl Param {
    /// Returns the scalar value, if this parameter is a scalar.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Param::Scalar(v) => Some(*v),
            Param::PerLevel(_) => None,
        }
    }

    fn check(&self, name: &'static str, n: usize) -> Result<(), MarkovError> {
        match self {
            Param::Scalar(v) => check_finite(name, &[*v]),
            Param::PerLevel(values) => {
                if values.len() != n {
                    return Err(MarkovError::LengthMismatch {
                        name,
                        expected: n,
                        got: values.len(),
                    });
                }
                check_finite(name, values)
            }
        }
    }
}

impl From<f64> for Param {
    fn from(v: f64) -> Self {
        Param::Scalar(v)
    }
}

impl From<Vec<f64>> for Param {
    fn from(v: Vec<f64>) -> Self {
        Param::PerLevel(v)
    }
}

impl From<&[f64]> for Param {
    fn from(v: &[f64]) -> Self {
        Param::PerLevel(v.to_vec())
    }
}

fn check_finite(name: &'static str, values: &[f64]) -> Result<(), MarkovError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(MarkovError::NonFiniteParameter {
            name,
            index,
            value: values[index],
        }),
        None => Ok(()),
    }
}

/// Configuration for one production stage (a recycler, an assembler, ...).
///
/// Use the builder methods to customise parameters. The quality bonus has
/// no default and must be set before building.
///
/// # Example
///
/// ```
/// use upcycle_markov::TransitionConfig;
///
/// let config = TransitionConfig::new()
///     .with_quality_bonus(0.1)
///     .with_production_multiplier(0.25);
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct TransitionConfig {
    quality_bonus: Option<Param>,
    production_multiplier: Param,
    quality_next_probability: Vec<f64>,
}

impl TransitionConfig {
    /// Creates a recycling-stage configuration with defaults.
    ///
    /// Defaults: no quality bonus, `production_multiplier = 0.25`,
    /// `quality_next_probability = [0.1, 0.1, 0.1, 0.1, 0.0]`.
    pub fn new() -> Self {
        Self {
            quality_bonus: None,
            production_multiplier: Param::Scalar(DEFAULT_RECYCLE_MULTIPLIER),
            quality_next_probability: DEFAULT_QUALITY_NEXT_PROBABILITY.to_vec(),
        }
    }

    /// Creates a crafting-stage configuration: as [`new`](Self::new) but
    /// with `production_multiplier = 1.0`.
    pub fn craft() -> Self {
        Self::new().with_production_multiplier(DEFAULT_CRAFT_MULTIPLIER)
    }

    /// Sets the chance of advancing one level during the base step.
    pub fn with_quality_bonus(mut self, bonus: impl Into<Param>) -> Self {
        self.quality_bonus = Some(bonus.into());
        self
    }

    /// Sets the expected output per unit of input.
    ///
    /// A scalar applies to every level except the top, which keeps at
    /// least its full output: `max(1.0, scalar)`.
    pub fn with_production_multiplier(mut self, multiplier: impl Into<Param>) -> Self {
        self.production_multiplier = multiplier.into();
        self
    }

    /// Sets the cascade probabilities. Their length defines the number of
    /// quality levels.
    pub fn with_quality_next_probability(mut self, probs: impl Into<Vec<f64>>) -> Self {
        self.quality_next_probability = probs.into();
        self
    }

    // --- Accessors ---

    /// Returns the quality bonus, if set.
    pub fn quality_bonus(&self) -> Option<&Param> {
        self.quality_bonus.as_ref()
    }

    /// Returns the production multiplier.
    pub fn production_multiplier(&self) -> &Param {
        &self.production_multiplier
    }

    /// Returns the cascade probabilities.
    pub fn quality_next_probability(&self) -> &[f64] {
        &self.quality_next_probability
    }

    /// Number of quality levels described by this configuration.
    pub fn n_levels(&self) -> usize {
        self.quality_next_probability.len()
    }

    /// Validates this configuration.
    ///
    /// Checks, in order: at least two levels, a quality bonus is present,
    /// per-level parameters match the level count, and every value is
    /// finite.
    pub fn validate(&self) -> Result<(), MarkovError> {
        let n = self.n_levels();
        if n < 2 {
            return Err(MarkovError::TooFewLevels { n, min: 2 });
        }
        let bonus = self
            .quality_bonus
            .as_ref()
            .ok_or(MarkovError::MissingQualityBonus)?;
        bonus.check("quality_bonus", n)?;
        self.production_multiplier
            .check("production_multiplier", n)?;
        check_finite("quality_next_probability", &self.quality_next_probability)?;
        Ok(())
    }

    /// Per-level quality bonus; a scalar is broadcast to every level.
    pub(crate) fn resolved_quality_bonus(&self) -> Result<Vec<f64>, MarkovError> {
        let n = self.n_levels();
        match self.quality_bonus.as_ref() {
            None => Err(MarkovError::MissingQualityBonus),
            Some(Param::Scalar(v)) => Ok(vec![*v; n]),
            Some(Param::PerLevel(values)) => Ok(values.clone()),
        }
    }

    /// Per-level production multiplier; a scalar is broadcast to every level
    /// and the top level is floored at 1.0.
    pub(crate) fn resolved_production_multiplier(&self) -> Vec<f64> {
        let n = self.n_levels();
        match &self.production_multiplier {
            Param::Scalar(v) => {
                let mut out = vec![*v; n];
                if let Some(top) = out.last_mut() {
                    *top = v.max(1.0);
                }
                out
            }
            Param::PerLevel(values) => values.clone(),
        }
    }
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self::new()
    }
}
