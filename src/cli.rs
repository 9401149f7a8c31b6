use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Boreas perturbed-reanalysis forcing builder.
#[derive(Parser)]
#[command(
    name = "boreas",
    version,
    about = "Build perturbed reanalysis forcing from climate-model anomalies"
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
    /// Compute per-year monthly climatologies of 3-hourly reanalysis files.
    Climatology(ClimatologyArgs),
    /// Derive a 3-hourly snowfall anomaly from the precipitation anomaly.
    SnowAnomaly(SnowAnomalyArgs),
    /// Add anomaly fields onto yearly reanalysis files.
    Apply(ApplyArgs),
    /// Download monthly climate-model fields from a retrieval endpoint.
    Fetch(FetchArgs),
}

/// Arguments for the `climatology` subcommand.
#[derive(clap::Args)]
pub struct ClimatologyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// First year to process.
    #[arg(long)]
    pub start_year: i32,

    /// Last year to process (inclusive).
    #[arg(long)]
    pub end_year: i32,
}

/// Arguments for the `snow-anomaly` subcommand.
#[derive(clap::Args)]
pub struct SnowAnomalyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// Override the period extension used in anomaly file names
    /// (defaults to the one derived from the configured scenario periods).
    #[arg(long)]
    pub fileext: Option<String>,
}

/// Arguments for the `apply` subcommand.
#[derive(clap::Args)]
pub struct ApplyArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// First year to perturb.
    #[arg(long)]
    pub start_year: i32,

    /// Last year to perturb (inclusive).
    #[arg(long)]
    pub end_year: i32,

    /// Override the period extension used in anomaly file names
    /// (defaults to the one derived from the configured scenario periods).
    #[arg(long)]
    pub fileext: Option<String>,
}

/// Arguments for the `fetch` subcommand.
#[derive(clap::Args)]
pub struct FetchArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// Directory for downloaded archives (defaults to the configured
    /// output directory).
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
