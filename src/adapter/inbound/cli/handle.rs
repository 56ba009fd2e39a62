//! Handler for the `handle` command.

use crate::adapter::inbound::cli::command::HandleArgs;
use crate::adapter::inbound::cli::{load_environment, output};
use crate::domain::PoolId;
use crate::error::{ConfigError, Result};
use crate::port::inbound::sentinel::MarketAction;

/// Execute the handle command.
pub fn execute(args: &HandleArgs) -> Result<()> {
    let (config, env) = load_environment(&args.config)?;
    let keeper = args
        .keeper
        .or(config.sentinel.keeper)
        .ok_or(ConfigError::MissingField { field: "keeper" })?;

    let outcome = env.sentinel.handle_deviation(keeper, args.market)?;

    if output::is_json() {
        output::record("transition", serde_json::to_value(&outcome)?);
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Market", outcome.market);
    output::field("Keeper", keeper);
    output::field(
        "Deviation",
        format!(
            "{}% (threshold {}%)",
            outcome.report.deviation_percent(),
            outcome.report.threshold()
        ),
    );

    if outcome.is_noop() {
        output::success("No transition required");
    } else {
        output::section("Actions");
        for action in &outcome.actions {
            let (verb, target) = describe(*action);
            output::action_done(verb, &target);
        }
    }

    if output::verbosity() > 0 {
        output::section("State");
        output::field("Borrow paused", output::flag(outcome.state.borrow_paused()));
        output::field("Supply paused", output::flag(outcome.state.supply_paused()));
        output::field("CF modified", output::flag(outcome.state.cf_modified()));
        output::field("Evaluated", outcome.evaluated_at.to_rfc3339());
    }
    Ok(())
}

/// Human-readable verb and target for one applied action.
pub(crate) fn describe(action: MarketAction) -> (&'static str, String) {
    let pool = |pool: Option<PoolId>| {
        pool.map_or_else(
            || "collateral factor".to_string(),
            |p| format!("collateral factor in pool {p}"),
        )
    };
    match action {
        MarketAction::BorrowPaused => ("Paused", "borrow".to_string()),
        MarketAction::BorrowUnpaused => ("Unpaused", "borrow".to_string()),
        MarketAction::SupplyPaused => ("Paused", "supply".to_string()),
        MarketAction::SupplyUnpaused => ("Unpaused", "supply".to_string()),
        MarketAction::CollateralFactorZeroed { pool: p } => ("Zeroed", pool(p)),
        MarketAction::CollateralFactorRestored { pool: p } => ("Restored", pool(p)),
    }
}
