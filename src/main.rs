mod cli;
mod config;
mod convert;
mod craft_cmd;
mod logging;
mod matrix_cmd;
mod recycle_cmd;
mod report;
mod simulate_cmd;

use std::process;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Matrix(args) => matrix_cmd::run(args),
        Command::Recycle(args) => recycle_cmd::run(args),
        Command::CraftRecycle(args) => craft_cmd::run(args),
        Command::Simulate(args) => simulate_cmd::run(args),
    }
}
