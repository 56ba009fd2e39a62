//! Astral-style CLI output formatting.
//!
//! Every line the CLI prints goes through [`emit`], which picks one of two
//! renderings: a `{"type": ..., "payload": ...}` JSON record on stdout in
//! `--json` mode, or colored text otherwise. `-q` drops informational text
//! but never warnings, errors or JSON records.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Output settings taken from the global CLI flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON records instead of text.
    pub json: bool,
    /// Suppress informational text.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = extra detail such as snapshots).
    pub verbose: u8,
}

impl OutputConfig {
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn current() -> OutputConfig {
    *OUTPUT_CONFIG
        .get_or_init(|| RwLock::new(OutputConfig::default()))
        .read()
}

/// How a line behaves in text mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    /// Hidden by `-q`.
    Info,
    /// Always printed to stdout.
    Alert,
    /// Always printed to stderr, in JSON mode too.
    Failure,
}

/// Build the JSON record for one line.
fn json_record(kind: &str, payload: Value) -> Value {
    json!({
        "type": kind,
        "payload": payload,
    })
}

/// Print one line: a JSON record, or `text()` unless suppressed.
fn emit(kind: Kind, record: &str, payload: Value, text: impl FnOnce() -> String) {
    let config = current();
    if config.json {
        let line = json_record(record, payload);
        if kind == Kind::Failure {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }
        return;
    }

    match kind {
        Kind::Info if config.quiet => {}
        Kind::Info | Kind::Alert => println!("{}", text()),
        Kind::Failure => eprintln!("{}", text()),
    }
}

/// Apply output settings from global CLI flags.
///
/// Called once by the dispatcher before any handler runs.
pub fn configure(config: OutputConfig) {
    *OUTPUT_CONFIG
        .get_or_init(|| RwLock::new(OutputConfig::default()))
        .write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Print the `sentinel <version>` banner.
pub fn header(version: &str) {
    emit(
        Kind::Info,
        "header",
        json!({ "app": "sentinel", "version": version }),
        || format!("{} {}\n", "sentinel".bold(), version.dimmed()),
    );
}

/// Print a labeled value. JSON records carry the value as a string.
pub fn field(label: &str, value: impl Display) {
    let value = value.to_string();
    emit(
        Kind::Info,
        "field",
        json!({ "label": label, "value": value }),
        || format!("  {:<14} {}", label.dimmed(), value),
    );
}

pub fn success(message: &str) {
    emit(
        Kind::Info,
        "success",
        json!({ "message": message }),
        || format!("  {} {}", "✓".green(), message),
    );
}

/// Print a warning; shown even with `-q`.
pub fn warning(message: &str) {
    emit(
        Kind::Alert,
        "warning",
        json!({ "message": message }),
        || format!("  {} {}", "⚠".yellow(), message),
    );
}

/// Print an error to stderr.
pub fn error(message: &str) {
    emit(
        Kind::Failure,
        "error",
        json!({ "message": message }),
        || format!("  {} {}", "×".red(), message),
    );
}

pub fn section(title: &str) {
    emit(
        Kind::Info,
        "section",
        json!({ "title": title }),
        || format!("\n{}", title.bold()),
    );
}

/// Print a dimmed hint.
pub fn note(message: &str) {
    emit(
        Kind::Info,
        "note",
        json!({ "message": message }),
        || format!("  {}", message.dimmed()),
    );
}

/// Print a comptroller mutation a transition applied ("✓ Paused borrow").
pub fn action_done(verb: &str, target: &str) {
    emit(
        Kind::Info,
        "action",
        json!({ "verb": verb, "target": target, "status": "done" }),
        || format!("  {} {} {}", "✓".green(), verb.bold().green(), target),
    );
}

/// Emit a typed JSON record for a structured command result.
///
/// Handlers call this only in JSON mode; text mode renders results with
/// [`field`] and friends instead.
pub fn record(kind: &str, payload: Value) {
    println!("{}", json_record(kind, payload));
}

fn flag_text(restricted: bool) -> &'static str {
    if restricted {
        "yes"
    } else {
        "no"
    }
}

/// Format a restriction flag: red `yes`, green `no`, plain in JSON mode.
pub fn flag(restricted: bool) -> String {
    let text = flag_text(restricted);
    if is_json() {
        text.to_string()
    } else if restricted {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

/// Format a market address or other key value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        value
    } else {
        value.cyan().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_record_wraps_payload() {
        let line = json_record("transition", json!({ "market": "0x33" }));
        assert_eq!(line["type"], "transition");
        assert_eq!(line["payload"]["market"], "0x33");
    }

    #[test]
    fn flag_text_reads_as_yes_or_no() {
        assert_eq!(flag_text(true), "yes");
        assert_eq!(flag_text(false), "no");
    }
}
