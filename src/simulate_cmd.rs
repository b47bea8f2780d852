//! Simulate command: Monte Carlo estimate of the recycle loop.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span};

use upcycle_markov::{build_transition_matrix, estimate_outcome, expected_visits};

use crate::cli::SimulateArgs;
use crate::config::UpcycleConfig;
use crate::convert;
use crate::report::{self, SimulateReport};

/// Sample the recycle loop and write the estimate as JSON.
pub fn run(args: SimulateArgs) -> Result<()> {
    let _cmd = info_span!("simulate").entered();
    let config = UpcycleConfig::load(&args.common.config)?;
    let recycle_cfg = convert::build_recycle_config(&config.recycle, &config.levels);
    let (n_trials, max_steps) = convert::build_simulate_settings(&config.simulate, args.trials)?;

    let matrix =
        build_transition_matrix(&recycle_cfg).context("failed to build recycle matrix")?;

    // CLI seed overrides config.
    let seed = args.seed.or(config.seed);
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };

    info!(n_trials, max_steps, start = args.start, "sampling trajectories");
    let estimate = estimate_outcome(&matrix, args.start, n_trials, max_steps, &mut rng)
        .context("monte carlo estimate failed")?;

    // `start` was range-checked by the estimate above.
    let mut initial = vec![0.0; matrix.n_levels()];
    initial[args.start] = 1.0;
    let analytic =
        expected_visits(&matrix, Some(&initial)).context("expected visits failed")?;
    info!(
        mean_visits = estimate.mean_visits,
        analytic_visits = analytic,
        "monte carlo estimate complete"
    );

    let summary = SimulateReport::new(&estimate, seed, args.start, max_steps, analytic);
    report::emit(&summary, args.common.output.as_deref())
}
