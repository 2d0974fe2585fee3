use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Boreas regional climate indicator pipeline.
#[derive(Parser)]
#[command(
    name = "boreas",
    version,
    about = "Regional climate indicator pipeline"
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
    /// Run the full indicator pipeline.
    Run(RunArgs),
    /// Clean outliers in an existing combined table.
    Clean(CleanArgs),
    /// Delta-correct a projection table against a baseline table.
    Correct(CorrectArgs),
}

/// Arguments for the `run` subcommand.
#[derive(clap::Args)]
pub struct RunArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// Override output directory from config.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Disable on-disk caching for this run.
    #[arg(long)]
    pub no_cache: bool,
}

/// Arguments for the `clean` subcommand.
#[derive(clap::Args)]
pub struct CleanArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// Path to the combined input CSV.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path for the cleaned output CSV.
    #[arg(short, long)]
    pub output: PathBuf,
}

/// Arguments for the `correct` subcommand.
#[derive(clap::Args)]
pub struct CorrectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "boreas.toml")]
    pub config: PathBuf,

    /// Path to the projection combined CSV.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Path to the historical baseline combined CSV.
    #[arg(short, long)]
    pub baseline: PathBuf,

    /// Path for the corrected output CSV.
    #[arg(short, long)]
    pub output: PathBuf,
}
