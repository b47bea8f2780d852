//! Craft-recycle command: alternate a craft stage and a recycle stage.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use upcycle_markov::{craft_recycle_outcome, expected_visits, single_cycle_matrix, steady_state};

use crate::cli::CraftRecycleArgs;
use crate::config::UpcycleConfig;
use crate::convert;
use crate::report::{self, CraftRecycleReport, RecycleReport};

/// Analyse the combined loop and write the report as JSON.
///
/// With `--compact` the N x N single-cycle matrix is analysed instead of the
/// 2N-state process.
pub fn run(args: CraftRecycleArgs) -> Result<()> {
    let _cmd = info_span!("craft_recycle", compact = args.compact).entered();
    let config = UpcycleConfig::load(&args.common.config)?;
    let craft_cfg = convert::build_craft_config(&config.craft, &config.levels);
    let recycle_cfg = convert::build_recycle_config(&config.recycle, &config.levels);
    let output = args.common.output.as_deref();

    if args.compact {
        let matrix = single_cycle_matrix(&craft_cfg, &recycle_cfg)
            .context("failed to build single-cycle matrix")?;
        let limit = steady_state(&matrix).context("steady state failed")?;
        let visits = expected_visits(&matrix, None).context("expected visits failed")?;
        info!(n_levels = matrix.n_levels(), visits, "single cycle analysed");
        let compact = RecycleReport {
            levels: report::level_labels(matrix.n_levels()),
            matrix: matrix.to_rows(),
            limit: limit.to_rows(),
            expected_visits: visits,
        };
        return report::emit(&compact, output);
    }

    let outcome = craft_recycle_outcome(&craft_cfg, &recycle_cfg, None)
        .context("craft and recycle analysis failed")?;
    report::emit(&CraftRecycleReport::from(&outcome), output)
}
