//! core::types
//!
//! Records exchanged with the coordinator.
//!
//! # Types
//!
//! - [`WorkItem`] - A unit of work and its progress
//! - [`Agent`] - A worker registered with the coordinator
//! - [`SpinupTarget`] - A resource that can be activated to run an agent
//! - [`Spinup`] - One activation of a target
//! - [`Stats`] - Aggregate counts for a project
//! - [`Status`] - Known lifecycle states across all of the above
//!
//! # Forward compatibility
//!
//! Response records keep fields this client does not know about in an
//! `extra` map, so `--json` output shows everything the coordinator sent.
//! Known optional fields serialize as `null` when absent rather than being
//! omitted, so a key the coordinator sent as `null` is still printed.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A unit of work.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkItem {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: Option<i64>,
    pub boundary: Option<String>,
    pub assigned_agent: Option<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a work submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitWorkRequest {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
}

/// Body of a work cancellation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CancelWorkRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Filters for listing work.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

/// A worker registered with the coordinator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Agent {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub agent_type: String,
    pub status: String,
    pub boundary: Option<String>,
    pub current_work: Option<String>,
    pub last_seen: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of an agent shutdown request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ShutdownRequest {
    pub force: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// A resource that can be activated to run an agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpinupTarget {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub enabled: bool,
    pub boundary: Option<String>,
    pub agent_type: Option<String>,
    pub last_tested_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a target registration or update.
///
/// For updates every field is optional; only the provided ones change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<Value>,
}

/// Result of a target connectivity test.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetTestResult {
    pub success: bool,
    pub message: Option<String>,
    pub latency_ms: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One activation of a spin-up target.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spinup {
    pub id: String,
    pub target: String,
    pub status: String,
    pub agent_id: Option<String>,
    pub started_at: Option<String>,
    pub completed_at: Option<String>,
    pub error: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Body of a spin-up trigger.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerSpinupRequest {
    pub target: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_id: Option<String>,
}

/// Aggregate counts for a project.
///
/// Counts are kept as JSON values: the coordinator may report a group entry
/// that is not a plain integer, and that must not make the whole reply
/// unreadable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Stats {
    /// Work items by status
    pub work: BTreeMap<String, Value>,
    /// Agents by status
    pub agents: BTreeMap<String, Value>,
    /// Spin-up targets by state
    pub targets: BTreeMap<String, Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Lifecycle states reported by the coordinator.
///
/// Statuses of work items, agents and spin-ups share one vocabulary.
/// Values outside it are carried as strings and displayed unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Queued,
    Assigned,
    Running,
    Completed,
    Failed,
    Cancelled,
    Idle,
    Busy,
    Offline,
}

impl Status {
    /// Parse a status name, case-insensitively. Accepts common aliases.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Some(Status::Pending),
            "queued" => Some(Status::Queued),
            "assigned" => Some(Status::Assigned),
            "running" | "in_progress" | "in-progress" | "starting" => Some(Status::Running),
            "completed" | "complete" | "succeeded" | "done" => Some(Status::Completed),
            "failed" | "error" => Some(Status::Failed),
            "cancelled" | "canceled" => Some(Status::Cancelled),
            "idle" | "online" | "ready" => Some(Status::Idle),
            "busy" | "working" => Some(Status::Busy),
            "offline" | "stopped" | "shutdown" => Some(Status::Offline),
            _ => None,
        }
    }

    /// Whether no further transitions are expected.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Status::Completed | Status::Failed | Status::Cancelled
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Queued => "queued",
            Status::Assigned => "assigned",
            Status::Running => "running",
            Status::Completed => "completed",
            Status::Failed => "failed",
            Status::Cancelled => "cancelled",
            Status::Idle => "idle",
            Status::Busy => "busy",
            Status::Offline => "offline",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
