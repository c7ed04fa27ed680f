//! ui::output
//!
//! Output formatting and display.
//!
//! # Design
//!
//! Rendering functions return strings; printing happens at the command
//! boundary through the helpers below, which respect the quiet flag.
//! When `--json` is enabled, result payloads are serialized verbatim.

use std::fmt::Display;

use comfy_table::{presets, Table};
use serde::Serialize;

use crate::core::config::OutputMode;

/// Output verbosity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Quiet mode - minimal output
    Quiet,
    /// Normal mode - standard output
    Normal,
    /// Debug mode - verbose output
    Debug,
}

impl Verbosity {
    /// Create verbosity from flags.
    pub fn from_flags(quiet: bool, debug: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Debug
        } else {
            Verbosity::Normal
        }
    }
}

/// Print command output. Always shown: it is what the user asked for.
pub fn print(message: impl Display) {
    println!("{}", message);
}

/// Print an error message (always shown).
pub fn error(message: impl Display) {
    eprintln!("error: {}", message);
}

/// Print a warning message (respects quiet mode).
pub fn warn(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        eprintln!("warning: {}", message);
    }
}

/// Print a success message (respects quiet mode).
pub fn success(message: impl Display, verbosity: Verbosity) {
    if verbosity != Verbosity::Quiet {
        println!("{}", message);
    }
}

/// Render an aligned table.
///
/// Rows are printed in the order given. An empty `rows` renders the header
/// alone.
pub fn render_table<H: AsRef<str>>(headers: &[H], rows: &[Vec<String>]) -> String {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_header(headers.iter().map(|h| h.as_ref().to_string()));
    for row in rows {
        table.add_row(row.clone());
    }
    table.to_string()
}

/// Render `payload` for the requested mode.
///
/// JSON mode serializes the payload verbatim; table mode defers to `table`.
pub fn output<T, F>(payload: &T, mode: OutputMode, table: F) -> serde_json::Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    match mode {
        OutputMode::Json => serde_json::to_string_pretty(payload),
        OutputMode::Table => Ok(table(payload)),
    }
}

/// Format a key/value listing with aligned keys.
pub fn format_pairs(pairs: &[(&str, String)]) -> String {
    let width = pairs.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
    pairs
        .iter()
        .map(|(k, v)| format!("{:width$}  {}", k, v, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
