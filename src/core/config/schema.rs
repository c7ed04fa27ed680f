//! core::config::schema
//!
//! Configuration record types and validation rules.
//!
//! # File format
//!
//! The configuration file is a JSON object with camelCase keys. Absent
//! fields are omitted rather than written as `null`.
//!
//! ```json
//! {
//!   "natsUrl": "nats://localhost:4222",
//!   "projectId": "default",
//!   "defaultPriority": 5,
//!   "outputFormat": "table"
//! }
//! ```
//!
//! # Validation
//!
//! [`validate`] checks every rule independently and reports all violations
//! at once. It never fails; an empty list means the record is valid.

use std::fmt;
use std::ops::RangeInclusive;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// URL scheme required for the messaging endpoint.
pub const NATS_SCHEME: &str = "nats://";

/// Accepted range for `defaultPriority`.
pub const PRIORITY_RANGE: RangeInclusive<i64> = 1..=10;

/// One layer of configuration: every field is optional.
///
/// The same type is used for the built-in defaults, the persisted file, the
/// environment, the per-invocation override, and the resolved result. A
/// `None` field means "this layer has nothing to say", never "unset".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigLayer {
    /// Messaging endpoint (`nats://host:port`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nats_url: Option<String>,

    /// Project the client operates on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Path to a NATS credentials file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_path: Option<PathBuf>,

    /// Boundary attached to submitted work when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_boundary: Option<String>,

    /// Priority attached to submitted work when none is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_priority: Option<i64>,

    /// `table` or `json`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_format: Option<String>,

    /// REST endpoint of the coordinator
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Bearer token for the REST endpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
}

impl ConfigLayer {
    /// Whether this layer supplies a value for `key`.
    pub fn defines(&self, key: ConfigKey) -> bool {
        match key {
            ConfigKey::NatsUrl => self.nats_url.is_some(),
            ConfigKey::ProjectId => self.project_id.is_some(),
            ConfigKey::CredentialsPath => self.credentials_path.is_some(),
            ConfigKey::DefaultBoundary => self.default_boundary.is_some(),
            ConfigKey::DefaultPriority => self.default_priority.is_some(),
            ConfigKey::OutputFormat => self.output_format.is_some(),
            ConfigKey::ApiUrl => self.api_url.is_some(),
            ConfigKey::ApiToken => self.api_token.is_some(),
        }
    }

    /// Copy the value of `key` from `other` into this layer.
    pub fn copy_from(&mut self, other: &ConfigLayer, key: ConfigKey) {
        match key {
            ConfigKey::NatsUrl => self.nats_url = other.nats_url.clone(),
            ConfigKey::ProjectId => self.project_id = other.project_id.clone(),
            ConfigKey::CredentialsPath => {
                self.credentials_path = other.credentials_path.clone()
            }
            ConfigKey::DefaultBoundary => {
                self.default_boundary = other.default_boundary.clone()
            }
            ConfigKey::DefaultPriority => self.default_priority = other.default_priority,
            ConfigKey::OutputFormat => self.output_format = other.output_format.clone(),
            ConfigKey::ApiUrl => self.api_url = other.api_url.clone(),
            ConfigKey::ApiToken => self.api_token = other.api_token.clone(),
        }
    }

    /// Display form of the value for `key`, if this layer defines it.
    pub fn value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::NatsUrl => self.nats_url.clone(),
            ConfigKey::ProjectId => self.project_id.clone(),
            ConfigKey::CredentialsPath => self
                .credentials_path
                .as_ref()
                .map(|p| p.display().to_string()),
            ConfigKey::DefaultBoundary => self.default_boundary.clone(),
            ConfigKey::DefaultPriority => self.default_priority.map(|p| p.to_string()),
            ConfigKey::OutputFormat => self.output_format.clone(),
            ConfigKey::ApiUrl => self.api_url.clone(),
            ConfigKey::ApiToken => self.api_token.clone(),
        }
    }

    /// Build a layer holding exactly one field, parsed from its string form.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `raw` cannot be parsed as the
    /// key's type (only `defaultPriority` is non-textual).
    pub fn single(key: ConfigKey, raw: &str) -> Result<Self, ConfigError> {
        let mut layer = ConfigLayer::default();
        match key {
            ConfigKey::NatsUrl => layer.nats_url = Some(raw.to_string()),
            ConfigKey::ProjectId => layer.project_id = Some(raw.to_string()),
            ConfigKey::CredentialsPath => layer.credentials_path = Some(PathBuf::from(raw)),
            ConfigKey::DefaultBoundary => layer.default_boundary = Some(raw.to_string()),
            ConfigKey::DefaultPriority => {
                let priority = raw.trim().parse::<i64>().map_err(|_| {
                    ConfigError::InvalidValue(format!(
                        "defaultPriority must be an integer, got '{}'",
                        raw
                    ))
                })?;
                layer.default_priority = Some(priority);
            }
            ConfigKey::OutputFormat => layer.output_format = Some(raw.to_string()),
            ConfigKey::ApiUrl => layer.api_url = Some(raw.to_string()),
            ConfigKey::ApiToken => layer.api_token = Some(raw.to_string()),
        }
        Ok(layer)
    }
}

/// The closed set of configuration fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfigKey {
    NatsUrl,
    ProjectId,
    CredentialsPath,
    DefaultBoundary,
    DefaultPriority,
    OutputFormat,
    ApiUrl,
    ApiToken,
}

impl ConfigKey {
    /// Every key, in display order.
    pub const ALL: [ConfigKey; 8] = [
        ConfigKey::NatsUrl,
        ConfigKey::ProjectId,
        ConfigKey::CredentialsPath,
        ConfigKey::DefaultBoundary,
        ConfigKey::DefaultPriority,
        ConfigKey::OutputFormat,
        ConfigKey::ApiUrl,
        ConfigKey::ApiToken,
    ];

    /// The key as it appears in the configuration file.
    pub fn name(&self) -> &'static str {
        match self {
            ConfigKey::NatsUrl => "natsUrl",
            ConfigKey::ProjectId => "projectId",
            ConfigKey::CredentialsPath => "credentialsPath",
            ConfigKey::DefaultBoundary => "defaultBoundary",
            ConfigKey::DefaultPriority => "defaultPriority",
            ConfigKey::OutputFormat => "outputFormat",
            ConfigKey::ApiUrl => "apiUrl",
            ConfigKey::ApiToken => "apiToken",
        }
    }

    /// Parse a key name. Accepts the file's camelCase form and kebab-case.
    pub fn parse(s: &str) -> Option<Self> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        ConfigKey::ALL
            .into_iter()
            .find(|key| key.name().to_lowercase() == normalized)
    }

    /// Whether the value should be masked when displayed.
    pub fn is_secret(&self) -> bool {
        matches!(self, ConfigKey::ApiToken)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Output mode for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// Aligned table for terminals
    #[default]
    Table,
    /// Structured JSON
    Json,
}

impl OutputMode {
    /// Valid values for `outputFormat`.
    pub const VALID: &'static [&'static str] = &["table", "json"];

    /// Parse an exact output mode name.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "table" => Some(OutputMode::Table),
            "json" => Some(OutputMode::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Table => "table",
            OutputMode::Json => "json",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Check a candidate record against every rule.
///
/// Rules are independent and all of them are checked; the returned list is
/// ordered scheme, priority, boundary, output mode.
pub fn validate(candidate: &ConfigLayer) -> Vec<String> {
    let mut violations = Vec::new();

    if let Some(url) = &candidate.nats_url {
        if !url.starts_with(NATS_SCHEME) {
            violations.push(format!(
                "natsUrl must use the {} scheme, got '{}'",
                NATS_SCHEME, url
            ));
        }
    }

    if let Some(priority) = candidate.default_priority {
        if !PRIORITY_RANGE.contains(&priority) {
            violations.push(format!(
                "defaultPriority must be between {} and {}, got {}",
                PRIORITY_RANGE.start(),
                PRIORITY_RANGE.end(),
                priority
            ));
        }
    }

    if let Some(boundary) = &candidate.default_boundary {
        if boundary.trim().is_empty() {
            violations.push("defaultBoundary must not be empty".to_string());
        }
    }

    if let Some(format) = &candidate.output_format {
        if OutputMode::parse(format).is_none() {
            violations.push(format!(
                "outputFormat must be one of: {}, got '{}'",
                OutputMode::VALID.join(", "),
                format
            ));
        }
    }

    violations
}
