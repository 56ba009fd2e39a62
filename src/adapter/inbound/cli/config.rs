//! Handler for the `config` command group.

use std::collections::HashSet;
use std::path::Path;

use serde_json::json;

use crate::adapter::inbound::cli::{load_environment, output};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::record(
            "config",
            json!({
                "multi_pool_comptroller": config.sentinel.multi_pool_comptroller,
                "keeper": config.sentinel.keeper,
                "poll_interval_secs": config.sentinel.poll_interval_secs,
                "admins": config.sentinel.admins,
                "keepers": config.keepers,
                "tokens": config.tokens.len(),
                "markets": config.markets.len(),
            }),
        );
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Log level", &config.logging.level);
    output::field("Log format", &config.logging.format);

    output::section("Sentinel");
    output::field("Multi-pool", config.sentinel.multi_pool_comptroller);
    match config.sentinel.keeper {
        Some(keeper) => output::field("Keeper", keeper),
        None => output::field("Keeper", "(none)"),
    }
    output::field(
        "Interval",
        format!("{}s", config.sentinel.poll_interval_secs),
    );
    output::field("Admins", config.sentinel.admins.len());
    output::field("Keepers", config.keepers.len());

    output::section("Tokens");
    if config.tokens.is_empty() {
        output::note("(none configured)");
    }
    for token in &config.tokens {
        output::field(
            &token.token.to_string(),
            format!(
                "{}%{}",
                token.deviation_percent,
                if token.enabled { "" } else { " (disabled)" }
            ),
        );
    }

    output::section("Markets");
    if config.markets.is_empty() {
        output::note("(none configured)");
    }
    for market in &config.markets {
        output::field(
            &market.address.to_string(),
            format!("{} via {}", market.underlying, market.comptroller),
        );
    }
    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    output::section("Config Validation");
    output::field("Path", path.display());
    let (config, _) = load_environment(path)?;
    output::success("Config file is valid");

    let warnings = warnings(&config);
    if !warnings.is_empty() {
        output::section("Warnings");
        for warning in &warnings {
            output::warning(warning);
        }
    }

    output::field("Next", format!("sentinel run -c {}", path.display()));
    Ok(())
}

/// Settings that load fine but leave markets unprotected.
fn warnings(config: &Config) -> Vec<String> {
    let mut warnings = Vec::new();
    if config.sentinel.keeper.is_none() {
        warnings.push("No keeper configured; pass --keeper to run or handle".to_string());
    }

    let configured: HashSet<_> = config.tokens.iter().map(|t| t.token).collect();
    let priced: HashSet<_> = config.paper.prices.iter().map(|p| p.token).collect();
    for market in &config.markets {
        if !configured.contains(&market.underlying) {
            warnings.push(format!(
                "Market {} has no monitoring config for {}",
                market.address, market.underlying
            ));
        } else if !priced.contains(&market.underlying) {
            warnings.push(format!(
                "Market {} has no paper prices for {}",
                market.address, market.underlying
            ));
        }
    }
    warnings
}
