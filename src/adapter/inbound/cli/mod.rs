//! CLI module graph.

pub mod check;
pub mod command;
pub mod config;
pub mod handle;
pub mod output;
pub mod run;
pub mod status;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::bootstrap::{build_paper_environment, PaperEnvironment};
use crate::infrastructure::config::settings::Config;

use command::{Cli, Commands, ConfigCommand};

/// Load `path` and wire the paper environment it describes.
pub(crate) fn load_environment(path: &Path) -> Result<(Config, PaperEnvironment)> {
    let config = Config::load(path)?;
    let environment = build_paper_environment(&config)?;
    Ok((config, environment))
}

/// Dispatch a parsed command line.
pub async fn dispatch(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Check(args) => check::execute(&args),
        Commands::Handle(args) => handle::execute(&args),
        Commands::Status(args) => status::execute(&args),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}
