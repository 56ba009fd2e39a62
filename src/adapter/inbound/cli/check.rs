//! Handler for the `check` command.

use serde_json::json;

use crate::adapter::inbound::cli::command::MarketArgs;
use crate::adapter::inbound::cli::{load_environment, output};
use crate::domain::Skew;
use crate::error::Result;

/// Execute the check command.
pub fn execute(args: &MarketArgs) -> Result<()> {
    let (_, env) = load_environment(&args.config)?;
    let report = env.sentinel.check_price_deviation(args.market)?;

    if output::is_json() {
        output::record(
            "deviation",
            json!({
                "market": args.market,
                "report": serde_json::to_value(report)?,
            }),
        );
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Market", args.market);
    output::field("Primary", report.primary());
    output::field("Secondary", report.secondary());
    output::field("Deviation", format!("{}%", report.deviation_percent()));
    output::field("Threshold", format!("{}%", report.threshold()));

    if report.has_deviation() {
        output::warning(&format!(
            "Feeds disagree (secondary is {})",
            match report.skew() {
                Skew::High => "higher",
                Skew::Low => "lower",
            }
        ));
    } else {
        output::success("Feeds agree");
    }
    Ok(())
}
