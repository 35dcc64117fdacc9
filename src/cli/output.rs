//! Terminal output formatting.
//!
//! Handlers print through these helpers so that `--json` and `--quiet`
//! behave the same everywhere. In JSON mode each command writes a single
//! document via [`json_output`]; status lines become tagged JSON lines.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde_json::json;

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON instead of tables.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
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

fn cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

fn current() -> OutputConfig {
    *cell().read()
}

fn suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

fn emit_json_line(kind: &str, payload: serde_json::Value) {
    println!("{}", json!({ "type": kind, "payload": payload }));
}

/// Apply output settings from the global CLI flags.
pub fn configure(config: OutputConfig) {
    *cell().write() = config;
}

#[must_use]
pub fn is_json() -> bool {
    current().json
}

#[must_use]
pub fn is_quiet() -> bool {
    current().quiet
}

#[must_use]
pub fn verbosity() -> u8 {
    current().verbose
}

/// Print the application name and version.
pub fn header() {
    let config = current();
    if config.json || suppressed(config) {
        return;
    }
    println!("{} {}", "sedori".bold(), env!("CARGO_PKG_VERSION").dimmed());
    println!();
}

pub fn section(title: &str) {
    let config = current();
    if config.json || suppressed(config) {
        return;
    }
    println!();
    println!("{}", title.bold());
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = current();
    if config.json || suppressed(config) {
        return;
    }
    println!("  {:<22} {}", label.dimmed(), value);
}

pub fn success(message: &str) {
    let config = current();
    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if suppressed(config) {
        return;
    }
    println!("  {} {}", "✓".green(), message);
}

pub fn warning(message: &str) {
    if current().json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }
    println!("  {} {}", "⚠".yellow(), message);
}

/// Print an error line to stderr.
pub fn error(message: &str) {
    if current().json {
        eprintln!(
            "{}",
            json!({ "type": "error", "payload": { "message": message } })
        );
        return;
    }
    eprintln!("  {} {}", "×".red(), message);
}

pub fn note(message: &str) {
    let config = current();
    if config.json || suppressed(config) {
        return;
    }
    println!("  {}", message.dimmed());
}

/// Print pre-rendered content, such as a table, indented.
pub fn lines(content: &str) {
    let config = current();
    if config.json || suppressed(config) {
        return;
    }
    for line in content.lines() {
        println!("  {line}");
    }
}

/// Print a complete JSON document.
pub fn json_output(value: serde_json::Value) {
    println!("{value}");
}

/// Color a yen or currency amount by sign.
pub fn signed(value: Decimal) -> String {
    let text = value.to_string();
    if is_json() {
        return text;
    }
    if value < Decimal::ZERO {
        format!("{}", text.red())
    } else {
        format!("{}", text.green())
    }
}

pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.cyan())
}

pub fn muted(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.dimmed())
}
