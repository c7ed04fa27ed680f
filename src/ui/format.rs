//! ui::format
//!
//! Field helpers for table cells: truncation, colorization, timestamps.
//!
//! Colorization maps a closed set of known values to a decoration. Values
//! outside the set are returned unchanged; none of these helpers fail.

use chrono::{DateTime, Local};
use owo_colors::OwoColorize;

use crate::core::types::Status;

/// Placeholder for absent values.
pub const PLACEHOLDER: &str = "-";

const ELLIPSIS: char = '…';

/// Shorten `s` to at most `max_len` characters.
///
/// A shortened string ends with an ellipsis; a string that already fits is
/// returned unchanged.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    if max_len == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(max_len - 1).collect();
    out.push(ELLIPSIS);
    out
}

/// Decorate a status for terminal display.
pub fn color_status(status: &str) -> String {
    match Status::parse(status) {
        Some(Status::Completed | Status::Idle) => status.green().to_string(),
        Some(Status::Running | Status::Busy | Status::Assigned) => status.cyan().to_string(),
        Some(Status::Pending | Status::Queued) => status.yellow().to_string(),
        Some(Status::Failed) => status.red().to_string(),
        Some(Status::Cancelled | Status::Offline) => status.dimmed().to_string(),
        None => status.to_string(),
    }
}

/// Agent implementations known to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentType {
    ClaudeCode,
    Codex,
    Gemini,
    Aider,
    Shell,
}

impl AgentType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "claude-code" | "claude_code" | "claude" => Some(AgentType::ClaudeCode),
            "codex" => Some(AgentType::Codex),
            "gemini" => Some(AgentType::Gemini),
            "aider" => Some(AgentType::Aider),
            "shell" => Some(AgentType::Shell),
            _ => None,
        }
    }
}

/// Decorate an agent type for terminal display.
pub fn color_agent_type(agent_type: &str) -> String {
    match AgentType::parse(agent_type) {
        Some(AgentType::ClaudeCode) => agent_type.magenta().to_string(),
        Some(AgentType::Codex) => agent_type.blue().to_string(),
        Some(AgentType::Gemini) => agent_type.cyan().to_string(),
        Some(AgentType::Aider) => agent_type.green().to_string(),
        Some(AgentType::Shell) => agent_type.white().to_string(),
        None => agent_type.to_string(),
    }
}

/// Well-known boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    Production,
    Staging,
    Development,
    Local,
}

impl Boundary {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "production" | "prod" => Some(Boundary::Production),
            "staging" | "stage" => Some(Boundary::Staging),
            "development" | "dev" => Some(Boundary::Development),
            "local" => Some(Boundary::Local),
            _ => None,
        }
    }
}

/// Decorate a boundary for terminal display.
pub fn color_boundary(boundary: &str) -> String {
    match Boundary::parse(boundary) {
        Some(Boundary::Production) => boundary.red().bold().to_string(),
        Some(Boundary::Staging) => boundary.yellow().to_string(),
        Some(Boundary::Development) => boundary.green().to_string(),
        Some(Boundary::Local) => boundary.dimmed().to_string(),
        None => boundary.to_string(),
    }
}

/// Render an RFC 3339 timestamp in local time.
///
/// `None` renders as [`PLACEHOLDER`]; an unparseable value is shown as-is.
pub fn format_timestamp(timestamp: Option<&str>) -> String {
    match timestamp {
        None => PLACEHOLDER.to_string(),
        Some(raw) => match DateTime::parse_from_rfc3339(raw) {
            Ok(parsed) => parsed
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            Err(_) => raw.to_string(),
        },
    }
}

/// Display an optional value, using the placeholder when absent.
pub fn or_placeholder(value: Option<&str>) -> String {
    value.unwrap_or(PLACEHOLDER).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_is_a_no_op_when_it_fits() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn truncate_marks_shortened_strings() {
        let out = truncate("a very long title", 8);
        assert_eq!(out, "a very …");
        assert_eq!(out.chars().count(), 8);
        assert_eq!(truncate("abc", 0), "");
        assert_eq!(truncate("abc", 1), "…");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("ünïcödé", 7), "ünïcödé");
        assert_eq!(truncate("ünïcödé", 4).chars().count(), 4);
    }

    #[test]
    fn known_values_are_decorated() {
        let colored = color_status("failed");
        assert_ne!(colored, "failed");
        assert!(colored.contains("failed"));
        assert_ne!(color_agent_type("codex"), "codex");
        assert_ne!(color_boundary("production"), "production");
    }

    #[test]
    fn unknown_values_pass_through() {
        assert_eq!(color_status("hibernating"), "hibernating");
        assert_eq!(color_agent_type("robot"), "robot");
        assert_eq!(color_boundary("moon-base"), "moon-base");
        assert_eq!(color_status(""), "");
    }

    #[test]
    fn timestamp_placeholder_and_passthrough() {
        assert_eq!(format_timestamp(None), "-");
        assert_eq!(format_timestamp(Some("yesterday")), "yesterday");
    }

    #[test]
    fn timestamp_is_formatted() {
        let out = format_timestamp(Some("2024-03-01T12:30:45Z"));
        assert_eq!(out.len(), "2024-03-01 12:30:45".len());
        assert!(out.starts_with("2024-03-0") || out.starts_with("2024-02-29"));
    }
}
