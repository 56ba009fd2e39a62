//! Handler for the `run` command.

use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::{load_environment, output};
use crate::application::keeper::{KeeperLoop, TickSummary};
use crate::error::{ConfigError, Result};

/// Execute the run command.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let (config, env) = load_environment(&args.config)?;
    config.init_logging();

    let keeper = args
        .keeper
        .or(config.sentinel.keeper)
        .ok_or(ConfigError::MissingField { field: "keeper" })?;
    let period = match args.interval {
        Some(0) => {
            return Err(ConfigError::InvalidValue {
                field: "interval",
                reason: "must be greater than 0".to_string(),
            }
            .into())
        }
        Some(secs) => Duration::from_secs(secs),
        None => config.poll_interval(),
    };

    let markets = env.markets();
    if !output::is_quiet() || output::is_json() {
        output::header(env!("CARGO_PKG_VERSION"));
        output::field("Keeper", keeper);
        output::field("Markets", markets.len());
        output::field("Interval", format!("{}s", period.as_secs()));
        if !env.state.is_trusted_keeper(keeper) {
            output::warning("Keeper is not trusted; every market will be rejected");
        }
    }

    let keeper_loop = KeeperLoop::new(env.sentinel.clone(), keeper, markets, period);

    if args.once {
        let summary = keeper_loop.tick().await;
        print_summary(summary);
        return Ok(());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let signal = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
            let _ = shutdown_tx.send(true);
        }
    });

    keeper_loop.run(shutdown_rx).await;
    signal.abort();
    Ok(())
}

fn print_summary(summary: TickSummary) {
    output::section("Pass complete");
    output::field("Checked", summary.checked);
    output::field("Changed", summary.changed);
    output::field("Failed", summary.failed);
}
