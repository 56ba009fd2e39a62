//! Command-line interface definitions.
//!
//! Defines the CLI structure for the sentinel using `clap`. Every command
//! runs against the paper environment described by the configuration file.

use std::path::PathBuf;

use alloy_primitives::Address;
use clap::{Parser, Subcommand};

/// Default configuration path, relative to the working directory.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Price deviation sentinel for lending markets
#[derive(Parser, Debug)]
#[command(name = "sentinel")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the sentinel CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the keeper loop over every configured market
    Run(RunArgs),

    /// Compare both price feeds for a market without acting
    Check(MarketArgs),

    /// Apply or lift restrictions on a market once
    Handle(HandleArgs),

    /// Show sentinel flags and comptroller pauses
    Status(StatusArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `sentinel config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Shared `--config` argument.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Keeper identity to act as (overrides the configured keeper).
    #[arg(long)]
    pub keeper: Option<Address>,

    /// Override the poll interval in seconds.
    #[arg(long)]
    pub interval: Option<u64>,

    /// Perform a single pass and exit.
    #[arg(long)]
    pub once: bool,
}

/// Arguments for commands that target one market.
#[derive(Parser, Debug)]
pub struct MarketArgs {
    /// Market address.
    pub market: Address,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}

/// Arguments for the `handle` subcommand.
#[derive(Parser, Debug)]
pub struct HandleArgs {
    /// Market address.
    pub market: Address,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Keeper identity to act as (overrides the configured keeper).
    #[arg(long)]
    pub keeper: Option<Address>,
}

/// Arguments for the `status` subcommand.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Market address; every configured market when omitted.
    pub market: Option<Address>,

    /// Path to the configuration file.
    #[arg(short, long, default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,
}
