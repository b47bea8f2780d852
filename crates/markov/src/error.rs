//! Error types for the upcycle-markov crate.

use upcycle_linalg::LinalgError;

/// Error type for all fallible operations in the upcycle-markov crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarkovError {
    /// Returned when the cascade probabilities describe fewer than two levels.
    #[error("too few quality levels: got {n}, need at least {min}")]
    TooFewLevels {
        /// Number of levels provided.
        n: usize,
        /// Minimum required.
        min: usize,
    },

    /// Returned when no quality bonus was configured.
    #[error("quality_bonus is required")]
    MissingQualityBonus,

    /// Returned when a per-level parameter or state vector has the wrong length.
    #[error("length mismatch for {name}: expected {expected} levels, got {got}")]
    LengthMismatch {
        /// Name of the offending parameter.
        name: &'static str,
        /// Number of quality levels in the model.
        expected: usize,
        /// Length supplied.
        got: usize,
    },

    /// Returned when a parameter contains NaN or infinity.
    #[error("{name}[{index}] is not finite: {value}")]
    NonFiniteParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Level index of the bad value.
        index: usize,
        /// The bad value.
        value: f64,
    },

    /// Returned when the craft and recycle stages have different level counts.
    #[error("stage size mismatch: craft has {craft} levels, recycle has {recycle}")]
    StageSizeMismatch {
        /// Levels in the craft stage.
        craft: usize,
        /// Levels in the recycle stage.
        recycle: usize,
    },

    /// Returned when one craft-and-recycle cycle would create material.
    #[error("craft multiplier {craft} times recycle multiplier {recycle} exceeds 1.0")]
    MultiplierProductTooLarge {
        /// Craft production multiplier.
        craft: f64,
        /// Recycle production multiplier.
        recycle: f64,
    },

    /// Returned when the top tier of the craft stage produces nothing.
    #[error("craft top-tier output must be positive, got {value}")]
    DegenerateTopTier {
        /// The top-tier diagonal entry.
        value: f64,
    },

    /// Returned when a row delivers more than one unit and cannot be sampled.
    #[error("row {row} sums to {sum}, cannot sample a single unit")]
    NotSubStochastic {
        /// Level whose row is over-full.
        row: usize,
        /// Row sum.
        sum: f64,
    },

    /// Returned when a Monte Carlo run is asked for zero trials.
    #[error("number of trials must be positive")]
    InvalidTrials,

    /// Returned when a start level lies outside the model.
    #[error("level {level} out of range for {n} levels")]
    LevelOutOfRange {
        /// Requested level.
        level: usize,
        /// Number of levels.
        n: usize,
    },

    /// Propagated from the underlying matrix algebra.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_too_few_levels() {
        let e = MarkovError::TooFewLevels { n: 1, min: 2 };
        assert_eq!(e.to_string(), "too few quality levels: got 1, need at least 2");
    }

    #[test]
    fn error_missing_quality_bonus() {
        assert_eq!(
            MarkovError::MissingQualityBonus.to_string(),
            "quality_bonus is required"
        );
    }

    #[test]
    fn error_length_mismatch() {
        let e = MarkovError::LengthMismatch {
            name: "quality_bonus",
            expected: 5,
            got: 4,
        };
        assert_eq!(
            e.to_string(),
            "length mismatch for quality_bonus: expected 5 levels, got 4"
        );
    }

    #[test]
    fn error_non_finite_parameter() {
        let e = MarkovError::NonFiniteParameter {
            name: "production_multiplier",
            index: 2,
            value: f64::INFINITY,
        };
        assert_eq!(e.to_string(), "production_multiplier[2] is not finite: inf");
    }

    #[test]
    fn error_stage_size_mismatch() {
        let e = MarkovError::StageSizeMismatch {
            craft: 5,
            recycle: 4,
        };
        assert_eq!(
            e.to_string(),
            "stage size mismatch: craft has 5 levels, recycle has 4"
        );
    }

    #[test]
    fn error_multiplier_product_too_large() {
        let e = MarkovError::MultiplierProductTooLarge {
            craft: 5.0,
            recycle: 0.25,
        };
        assert_eq!(
            e.to_string(),
            "craft multiplier 5 times recycle multiplier 0.25 exceeds 1.0"
        );
    }

    #[test]
    fn error_degenerate_top_tier() {
        let e = MarkovError::DegenerateTopTier { value: 0.0 };
        assert_eq!(e.to_string(), "craft top-tier output must be positive, got 0");
    }

    #[test]
    fn error_not_sub_stochastic() {
        let e = MarkovError::NotSubStochastic { row: 3, sum: 1.5 };
        assert_eq!(e.to_string(), "row 3 sums to 1.5, cannot sample a single unit");
    }

    #[test]
    fn error_level_out_of_range() {
        let e = MarkovError::LevelOutOfRange { level: 7, n: 5 };
        assert_eq!(e.to_string(), "level 7 out of range for 5 levels");
    }

    #[test]
    fn error_linalg_is_transparent() {
        let e: MarkovError = LinalgError::SingularMatrix { row: 0, pivot: 0.0 }.into();
        assert_eq!(e.to_string(), "matrix is singular: pivot at row 0 is 0e0");
    }

    #[test]
    fn error_is_std_error() {
        fn assert_impl<T: std::error::Error>() {}
        assert_impl::<MarkovError>();
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_impl<T: Send + Sync>() {}
        assert_impl::<MarkovError>();
    }
}
