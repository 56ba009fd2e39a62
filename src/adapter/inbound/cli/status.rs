//! Handler for the `status` command.

use crate::adapter::inbound::cli::command::StatusArgs;
use crate::adapter::inbound::cli::{load_environment, output};
use crate::error::Result;
use crate::port::inbound::sentinel::MarketStatus;

/// Execute the status command.
pub fn execute(args: &StatusArgs) -> Result<()> {
    let (_, env) = load_environment(&args.config)?;
    let markets = args.market.map_or_else(|| env.markets(), |m| vec![m]);

    let statuses = markets
        .into_iter()
        .map(|market| env.sentinel.market_status(market))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if output::is_json() {
        for status in &statuses {
            output::record("market_status", serde_json::to_value(status)?);
        }
        return Ok(());
    }
    if output::is_quiet() {
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    if statuses.is_empty() {
        output::note("No markets configured");
    }
    for status in &statuses {
        display(status);
    }
    Ok(())
}

fn display(status: &MarketStatus) {
    let state = &status.state;
    output::section(&output::highlight(status.market));
    output::field("Restricted", output::flag(state.is_restricted()));
    output::field("Borrow paused", output::flag(state.borrow_paused()));
    output::field("Supply paused", output::flag(state.supply_paused()));
    output::field("CF modified", output::flag(state.cf_modified()));

    // Governance may pause independently of the sentinel.
    if status.borrow_paused_on_comptroller != state.borrow_paused() {
        output::warning(&format!(
            "Comptroller borrow pause is {}",
            status.borrow_paused_on_comptroller
        ));
    }
    if status.supply_paused_on_comptroller != state.supply_paused() {
        output::warning(&format!(
            "Comptroller supply pause is {}",
            status.supply_paused_on_comptroller
        ));
    }

    if output::verbosity() > 0 {
        for (pool, params) in state.pool_snapshots() {
            output::field(
                &format!("Pool {pool}"),
                format!(
                    "cf {} / lt {}",
                    params.collateral_factor, params.liquidation_threshold
                ),
            );
        }
    }
}
