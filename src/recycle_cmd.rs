//! Recycle command: long-run outcome of repeatedly recycling one stage.

use anyhow::{Context, Result};
use tracing::info_span;

use upcycle_markov::recycle_outcome;

use crate::cli::CommonArgs;
use crate::config::UpcycleConfig;
use crate::convert;
use crate::report::{self, RecycleReport};

/// Analyse the recycle loop and write the report as JSON.
pub fn run(args: CommonArgs) -> Result<()> {
    let _cmd = info_span!("recycle").entered();
    let config = UpcycleConfig::load(&args.config)?;
    let recycle_cfg = convert::build_recycle_config(&config.recycle, &config.levels);

    let outcome = recycle_outcome(&recycle_cfg).context("recycle analysis failed")?;

    report::emit(&RecycleReport::from(&outcome), args.output.as_deref())
}
