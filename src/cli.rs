use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Upcycle quality-tier loop analyser.
#[derive(Parser)]
#[command(
    name = "upcycle",
    version,
    about = "Long-run quality outcomes of repeated craft and recycle loops"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Build the recycle-stage transition matrix.
    Matrix(CommonArgs),
    /// Analyse repeated recycling: limit matrix and expected visits.
    Recycle(CommonArgs),
    /// Analyse alternating craft and recycle stages.
    CraftRecycle(CraftRecycleArgs),
    /// Estimate the recycle loop by Monte Carlo sampling.
    Simulate(SimulateArgs),
}

/// Arguments shared by every subcommand.
#[derive(clap::Args)]
pub struct CommonArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "upcycle.toml")]
    pub config: PathBuf,

    /// Write JSON output to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `craft-recycle` subcommand.
#[derive(clap::Args)]
pub struct CraftRecycleArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Emit the N x N single-cycle matrix instead of the 2N-state process.
    #[arg(long)]
    pub compact: bool,
}

/// Arguments for the `simulate` subcommand.
#[derive(clap::Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Override global RNG seed from config.
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Override the number of sampled trajectories from config.
    #[arg(short = 'n', long)]
    pub trials: Option<usize>,

    /// Starting quality level.
    #[arg(long, default_value_t = 0)]
    pub start: usize,
}
