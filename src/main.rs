mod apply_cmd;
mod cli;
mod climatology_cmd;
mod config;
mod convert;
mod fetch_cmd;
mod logging;
mod snow_cmd;

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
        Command::Climatology(args) => climatology_cmd::run(args),
        Command::SnowAnomaly(args) => snow_cmd::run(args),
        Command::Apply(args) => apply_cmd::run(args),
        Command::Fetch(args) => fetch_cmd::run(args),
    }
}
