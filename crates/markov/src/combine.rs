//! Composition of a craft stage and a recycle stage into one process.

use ndarray::{Array2, s};
use tracing::debug;
use upcycle_linalg::multiply;

use crate::config::TransitionConfig;
use crate::error::MarkovError;
use crate::transition::{TransitionMatrix, build_transition_matrix};

/// Composes a craft stage and a recycle stage into a `2N x 2N` process.
///
/// States `0..N` hold material before a cycle, states `N..2N` after it.
/// The result is `F · G` where
///
/// ```text
///     F = | 0  C |        G = | I  0 |
///         | 0  I |            | R  I |
/// ```
///
/// with `C` the craft matrix and `R` the recycle matrix. Negative entries
/// in the inputs are not corrected.
///
/// # Errors
///
/// Returns [`MarkovError::StageSizeMismatch`] if the stages have different
/// level counts.
pub fn combine_stages(
    craft: &TransitionMatrix,
    recycle: &TransitionMatrix,
) -> Result<TransitionMatrix, MarkovError> {
    let n = craft.n_levels();
    if recycle.n_levels() != n {
        return Err(MarkovError::StageSizeMismatch {
            craft: n,
            recycle: recycle.n_levels(),
        });
    }

    let mut craft_stage = Array2::<f64>::zeros((2 * n, 2 * n));
    craft_stage
        .slice_mut(s![..n, n..])
        .assign(craft.as_array());
    craft_stage
        .slice_mut(s![n.., n..])
        .assign(&Array2::<f64>::eye(n));

    let mut recycle_stage = Array2::<f64>::eye(2 * n);
    recycle_stage
        .slice_mut(s![n.., ..n])
        .assign(recycle.as_array());

    let combined = multiply(&craft_stage, &recycle_stage)?;
    debug!(n_states = 2 * n, "craft and recycle stages combined");
    Ok(TransitionMatrix::from_array_unchecked(combined))
}

/// Builds the `N x N` matrix of one full craft-then-recycle cycle.
///
/// The recycle stage's top-tier entry is replaced by the reciprocal of the
/// craft stage's, so material that reaches the top tier is neither created
/// nor destroyed by a full cycle and that tier stays absorbing.
///
/// # Errors
///
/// - Any error from [`build_transition_matrix`] for either stage.
/// - [`MarkovError::StageSizeMismatch`] if the stages have different level
///   counts.
/// - [`MarkovError::MultiplierProductTooLarge`] if both production
///   multipliers are scalars whose product exceeds 1.0.
/// - [`MarkovError::DegenerateTopTier`] if the craft stage's top-tier entry
///   is not strictly positive.
pub fn single_cycle_matrix(
    craft: &TransitionConfig,
    recycle: &TransitionConfig,
) -> Result<TransitionMatrix, MarkovError> {
    if let (Some(c), Some(r)) = (
        craft.production_multiplier().as_scalar(),
        recycle.production_multiplier().as_scalar(),
    ) {
        if c * r > 1.0 {
            return Err(MarkovError::MultiplierProductTooLarge {
                craft: c,
                recycle: r,
            });
        }
    }

    let craft_m = build_transition_matrix(craft)?;
    let recycle_m = build_transition_matrix(recycle)?;
    let n = craft_m.n_levels();
    if recycle_m.n_levels() != n {
        return Err(MarkovError::StageSizeMismatch {
            craft: n,
            recycle: recycle_m.n_levels(),
        });
    }

    let top = craft_m.get(n - 1, n - 1);
    if top <= 0.0 {
        return Err(MarkovError::DegenerateTopTier { value: top });
    }

    let mut recycle_a = recycle_m.into_array();
    recycle_a[[n - 1, n - 1]] = 1.0 / top;

    let cycle = multiply(craft_m.as_array(), &recycle_a)?;
    Ok(TransitionMatrix::from_array_unchecked(cycle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn stages() -> (TransitionMatrix, TransitionMatrix) {
        let craft = build_transition_matrix(&TransitionConfig::craft().with_quality_bonus(0.2))
            .unwrap();
        let recycle =
            build_transition_matrix(&TransitionConfig::new().with_quality_bonus(0.1)).unwrap();
        (craft, recycle)
    }

    #[test]
    fn block_layout() {
        let (craft, recycle) = stages();
        let combined = combine_stages(&craft, &recycle).unwrap();
        let n = 5;
        assert_eq!(combined.n_levels(), 2 * n);

        let cr = multiply(craft.as_array(), recycle.as_array()).unwrap();
        for i in 0..n {
            for j in 0..n {
                // Upper-left: one craft step followed by one recycle step.
                assert_abs_diff_eq!(combined.get(i, j), cr[[i, j]], epsilon = 1e-12);
                // Upper-right: the craft matrix itself.
                assert_abs_diff_eq!(combined.get(i, n + j), craft.get(i, j), epsilon = 1e-12);
                // Lower-left: the recycle matrix.
                assert_abs_diff_eq!(combined.get(n + i, j), recycle.get(i, j), epsilon = 1e-12);
                // Lower-right: identity.
                let id = if i == j { 1.0 } else { 0.0 };
                assert_abs_diff_eq!(combined.get(n + i, n + j), id, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn known_first_row() {
        let (craft, recycle) = stages();
        let combined = combine_stages(&craft, &recycle).unwrap();
        let expected = [
            0.18, 0.0585, 0.0099, 0.001395, 0.000355, 0.8, 0.18, 0.018, 0.0018, 0.0002,
        ];
        for (j, &v) in expected.iter().enumerate() {
            assert_abs_diff_eq!(combined.get(0, j), v, epsilon = 1e-12);
        }
    }

    #[test]
    fn post_cycle_states_absorbing() {
        let (craft, recycle) = stages();
        let combined = combine_stages(&craft, &recycle).unwrap();
        assert_eq!(combined.transient_levels(), vec![0, 1, 2, 3]);
        assert_eq!(combined.absorbing_levels(), vec![4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn size_mismatch() {
        let a = TransitionMatrix::identity(3);
        let b = TransitionMatrix::identity(4);
        assert_eq!(
            combine_stages(&a, &b),
            Err(MarkovError::StageSizeMismatch {
                craft: 3,
                recycle: 4,
            })
        );
    }

    #[test]
    fn negative_inputs_pass_through() {
        let craft = TransitionMatrix::from_array(array![[-0.5, 0.0], [0.0, 1.0]]).unwrap();
        let recycle = TransitionMatrix::identity(2);
        let combined = combine_stages(&craft, &recycle).unwrap();
        assert_abs_diff_eq!(combined.get(0, 2), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn single_cycle_top_tier_absorbing() {
        let craft = TransitionConfig::craft().with_quality_bonus(0.2);
        let recycle = TransitionConfig::new().with_quality_bonus(0.1);
        let cycle = single_cycle_matrix(&craft, &recycle).unwrap();
        assert_eq!(cycle.n_levels(), 5);
        assert!(cycle.is_absorbing(4));
        assert_eq!(cycle.absorbing_levels(), vec![4]);
        // Row 0 matches the upper-left block of the 2N composition.
        assert_abs_diff_eq!(cycle.get(0, 0), 0.18, epsilon = 1e-12);
        assert_abs_diff_eq!(cycle.get(0, 1), 0.0585, epsilon = 1e-12);
    }

    #[test]
    fn single_cycle_top_tier_reciprocal() {
        // Craft top tier amplifies 2x; the recycle top tier becomes 0.5.
        let craft = TransitionConfig::craft()
            .with_quality_bonus(0.0)
            .with_production_multiplier(vec![1.0, 1.0, 1.0, 1.0, 2.0]);
        let recycle = TransitionConfig::new().with_quality_bonus(0.0);
        let cycle = single_cycle_matrix(&craft, &recycle).unwrap();
        assert_abs_diff_eq!(cycle.get(4, 4), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn single_cycle_rejects_amplifying_product() {
        let craft = TransitionConfig::craft()
            .with_quality_bonus(0.2)
            .with_production_multiplier(5.0);
        let recycle = TransitionConfig::new().with_quality_bonus(0.1);
        assert_eq!(
            single_cycle_matrix(&craft, &recycle),
            Err(MarkovError::MultiplierProductTooLarge {
                craft: 5.0,
                recycle: 0.25,
            })
        );
    }

    #[test]
    fn single_cycle_rejects_zero_top_tier() {
        let craft = TransitionConfig::craft()
            .with_quality_bonus(0.2)
            .with_production_multiplier(vec![1.0, 1.0, 1.0, 1.0, 0.0]);
        let recycle = TransitionConfig::new().with_quality_bonus(0.1);
        assert!(matches!(
            single_cycle_matrix(&craft, &recycle),
            Err(MarkovError::DegenerateTopTier { .. })
        ));
    }

    #[test]
    fn single_cycle_stage_size_mismatch() {
        let craft = TransitionConfig::craft().with_quality_bonus(0.2);
        let recycle = TransitionConfig::new()
            .with_quality_bonus(0.1)
            .with_quality_next_probability(vec![0.1, 0.1, 0.0]);
        assert!(matches!(
            single_cycle_matrix(&craft, &recycle),
            Err(MarkovError::StageSizeMismatch {
                craft: 5,
                recycle: 3,
            })
        ));
    }
}
