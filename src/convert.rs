//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Result, bail};

use crate::config::{LevelsToml, ParamToml, SimulateToml, StageToml};

use upcycle_markov::config::{DEFAULT_CRAFT_MULTIPLIER, DEFAULT_RECYCLE_MULTIPLIER};
use upcycle_markov::{Param, TransitionConfig};

/// Converts a TOML parameter into a library [`Param`].
pub fn parse_param(p: &ParamToml) -> Param {
    match p {
        ParamToml::Scalar(v) => Param::Scalar(*v),
        ParamToml::PerLevel(v) => Param::PerLevel(v.clone()),
    }
}

fn build_stage_config(
    stage: &StageToml,
    levels: &LevelsToml,
    default_multiplier: f64,
) -> TransitionConfig {
    let multiplier = stage
        .production_multiplier
        .as_ref()
        .map_or(Param::Scalar(default_multiplier), parse_param);
    let mut cfg = TransitionConfig::new()
        .with_production_multiplier(multiplier)
        .with_quality_next_probability(levels.quality_next_probability.clone());
    if let Some(ref bonus) = stage.quality_bonus {
        cfg = cfg.with_quality_bonus(parse_param(bonus));
    }
    cfg
}

/// Builds the craft-stage [`TransitionConfig`].
///
/// `production_multiplier` defaults to 1.0.
pub fn build_craft_config(craft: &StageToml, levels: &LevelsToml) -> TransitionConfig {
    build_stage_config(craft, levels, DEFAULT_CRAFT_MULTIPLIER)
}

/// Builds the recycle-stage [`TransitionConfig`].
///
/// `production_multiplier` defaults to 0.25.
pub fn build_recycle_config(recycle: &StageToml, levels: &LevelsToml) -> TransitionConfig {
    build_stage_config(recycle, levels, DEFAULT_RECYCLE_MULTIPLIER)
}

/// Resolves Monte Carlo settings, applying CLI overrides.
///
/// Returns `(n_trials, max_steps)`.
pub fn build_simulate_settings(
    simulate: &SimulateToml,
    trials_override: Option<usize>,
) -> Result<(usize, usize)> {
    let n_trials = trials_override.unwrap_or(simulate.n_trials);
    if n_trials == 0 {
        bail!("n_trials must be at least 1");
    }
    if simulate.max_steps == 0 {
        bail!("max_steps must be at least 1");
    }
    Ok((n_trials, simulate.max_steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stage(bonus: Option<ParamToml>, multiplier: Option<ParamToml>) -> StageToml {
        StageToml {
            quality_bonus: bonus,
            production_multiplier: multiplier,
        }
    }

    #[test]
    fn stage_defaults_differ() {
        let levels = LevelsToml::default();
        let s = stage(Some(ParamToml::Scalar(0.1)), None);
        let craft = build_craft_config(&s, &levels);
        let recycle = build_recycle_config(&s, &levels);
        assert_eq!(craft.production_multiplier(), &Param::Scalar(1.0));
        assert_eq!(recycle.production_multiplier(), &Param::Scalar(0.25));
        assert_eq!(recycle.quality_bonus(), Some(&Param::Scalar(0.1)));
        assert_eq!(recycle.n_levels(), 5);
    }

    #[test]
    fn per_level_values_pass_through() {
        let levels = LevelsToml {
            quality_next_probability: vec![0.2, 0.2, 0.0],
        };
        let s = stage(
            Some(ParamToml::PerLevel(vec![0.3, 0.2, 0.0])),
            Some(ParamToml::PerLevel(vec![0.5, 0.5, 1.0])),
        );
        let cfg = build_recycle_config(&s, &levels);
        assert_eq!(cfg.n_levels(), 3);
        assert_eq!(
            cfg.production_multiplier(),
            &Param::PerLevel(vec![0.5, 0.5, 1.0])
        );
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_bonus_left_for_validation() {
        let cfg = build_recycle_config(&stage(None, None), &LevelsToml::default());
        assert!(cfg.quality_bonus().is_none());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn simulate_settings() {
        let sim = SimulateToml::default();
        assert_eq!(build_simulate_settings(&sim, None).unwrap(), (100_000, 10_000));
        assert_eq!(build_simulate_settings(&sim, Some(50)).unwrap(), (50, 10_000));
        assert!(build_simulate_settings(&sim, Some(0)).is_err());
        let sim = SimulateToml {
            n_trials: 10,
            max_steps: 0,
        };
        assert!(build_simulate_settings(&sim, None).is_err());
    }
}
