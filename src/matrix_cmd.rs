//! Matrix command: build and emit the recycle-stage transition matrix.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use upcycle_markov::build_transition_matrix;

use crate::cli::CommonArgs;
use crate::config::UpcycleConfig;
use crate::convert;
use crate::report::{self, MatrixReport};

/// Build the recycle-stage matrix and write it as JSON.
pub fn run(args: CommonArgs) -> Result<()> {
    let _cmd = info_span!("matrix").entered();
    let config = UpcycleConfig::load(&args.config)?;
    let recycle_cfg = convert::build_recycle_config(&config.recycle, &config.levels);

    let matrix =
        build_transition_matrix(&recycle_cfg).context("failed to build recycle matrix")?;
    info!(
        n_levels = matrix.n_levels(),
        n_absorbing = matrix.absorbing_levels().len(),
        "recycle matrix built"
    );

    report::emit(&MatrixReport::new(&matrix), args.output.as_deref())
}
