//! core::config
//!
//! Configuration loading, merging, validation and persistence.
//!
//! # Precedence
//!
//! Configuration values are resolved from four layers (later overrides earlier):
//! 1. Built-in defaults
//! 2. The configuration file (`~/.shuttle/config.json` unless overridden)
//! 3. Environment variables (`WEFT_NATS_URL`, `WEFT_PROJECT_ID`,
//!    `WEFT_API_URL`, `WEFT_API_TOKEN`)
//! 4. The per-invocation project override (`--project`)
//!
//! Each field takes its value from the highest layer that defines it. A layer
//! can only supply values; nothing can "unset" a field resolved below it.
//!
//! # Example
//!
//! ```no_run
//! use shuttle::core::config::{ConfigSource, ConfigStore};
//!
//! let store = ConfigStore::new();
//! let config = store.load(ConfigSource::default()).unwrap();
//! println!("project: {}", config.project_id());
//! println!("nats: {}", config.nats_url());
//! ```

pub mod schema;

pub use schema::{validate, ConfigKey, ConfigLayer, OutputMode, NATS_SCHEME, PRIORITY_RANGE};

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Directory under the home directory holding the configuration file.
pub const CONFIG_DIR: &str = ".shuttle";

/// Configuration file name.
pub const CONFIG_FILE: &str = "config.json";

/// Messaging endpoint used when nothing else is configured.
pub const DEFAULT_NATS_URL: &str = "nats://localhost:4222";

/// Project used when nothing else is configured.
pub const DEFAULT_PROJECT: &str = "default";

/// Priority used when nothing else is configured.
pub const DEFAULT_PRIORITY: i64 = 5;

/// Environment variables and the single field each one sets.
pub const ENV_VARS: [(&str, ConfigKey); 4] = [
    ("WEFT_NATS_URL", ConfigKey::NatsUrl),
    ("WEFT_PROJECT_ID", ConfigKey::ProjectId),
    ("WEFT_API_URL", ConfigKey::ApiUrl),
    ("WEFT_API_TOKEN", ConfigKey::ApiToken),
];

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid configuration: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("invalid config value: {0}")]
    InvalidValue(String),

    #[error("unknown configuration key '{0}' (known keys: {keys})", keys = known_keys())]
    UnknownKey(String),

    #[error("home directory not found")]
    NoHomeDir,
}

fn known_keys() -> String {
    ConfigKey::ALL
        .iter()
        .map(|k| k.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Where a resolved value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LayerSource {
    Default,
    File,
    Environment,
    Override,
}

impl fmt::Display for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayerSource::Default => write!(f, "default"),
            LayerSource::File => write!(f, "file"),
            LayerSource::Environment => write!(f, "env"),
            LayerSource::Override => write!(f, "flag"),
        }
    }
}

/// What to load: an explicit file path and/or a project override.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigSource {
    /// Configuration file to read instead of the default path
    pub config_path: Option<PathBuf>,
    /// Project id that wins over every other layer, if non-empty
    pub project_override: Option<String>,
}

impl ConfigSource {
    pub fn new(config_path: Option<PathBuf>, project_override: Option<String>) -> Self {
        Self {
            config_path,
            project_override,
        }
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        Self {
            config_path: Some(path.to_path_buf()),
            project_override: None,
        }
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
            project_override: None,
        }
    }
}

impl From<Option<&Path>> for ConfigSource {
    fn from(path: Option<&Path>) -> Self {
        Self {
            config_path: path.map(Path::to_path_buf),
            project_override: None,
        }
    }
}

/// Fully resolved configuration.
///
/// Accessors apply the built-in defaults, so callers never see a missing
/// endpoint or project.
#[derive(Debug, Clone)]
pub struct Config {
    resolved: ConfigLayer,
    provenance: BTreeMap<ConfigKey, LayerSource>,
    path: PathBuf,
}

impl Config {
    /// Resolve layers given in ascending precedence.
    pub fn resolve(layers: &[(LayerSource, ConfigLayer)], path: PathBuf) -> Self {
        let mut resolved = ConfigLayer::default();
        let mut provenance = BTreeMap::new();

        for key in ConfigKey::ALL {
            if let Some((source, layer)) = layers.iter().rev().find(|(_, l)| l.defines(key)) {
                resolved.copy_from(layer, key);
                provenance.insert(key, *source);
            }
        }

        Config {
            resolved,
            provenance,
            path,
        }
    }

    /// Get the messaging endpoint.
    pub fn nats_url(&self) -> &str {
        self.resolved.nats_url.as_deref().unwrap_or(DEFAULT_NATS_URL)
    }

    /// Get the project id.
    pub fn project_id(&self) -> &str {
        self.resolved.project_id.as_deref().unwrap_or(DEFAULT_PROJECT)
    }

    pub fn credentials_path(&self) -> Option<&Path> {
        self.resolved.credentials_path.as_deref()
    }

    pub fn default_boundary(&self) -> Option<&str> {
        self.resolved.default_boundary.as_deref()
    }

    pub fn default_priority(&self) -> i64 {
        self.resolved.default_priority.unwrap_or(DEFAULT_PRIORITY)
    }

    /// Get the configured output mode.
    ///
    /// Falls back to `table` for an unrecognised value; [`Config::ensure_valid`]
    /// rejects such values before any command runs.
    pub fn output_mode(&self) -> OutputMode {
        self.resolved
            .output_format
            .as_deref()
            .and_then(OutputMode::parse)
            .unwrap_or_default()
    }

    pub fn api_url(&self) -> Option<&str> {
        self.resolved.api_url.as_deref()
    }

    pub fn api_token(&self) -> Option<&str> {
        self.resolved.api_token.as_deref()
    }

    /// The resolved value of `key` in display form.
    pub fn value(&self, key: ConfigKey) -> Option<String> {
        self.resolved.value(key)
    }

    /// Which layer supplied `key`, if any did.
    pub fn source_of(&self, key: ConfigKey) -> Option<LayerSource> {
        self.provenance.get(&key).copied()
    }

    /// The merged record.
    pub fn layer(&self) -> &ConfigLayer {
        &self.resolved
    }

    /// The file this configuration was read from (it may not exist).
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rule violations of the resolved record.
    pub fn violations(&self) -> Vec<String> {
        validate(&self.resolved)
    }

    /// Fail with every violation if the resolved record is invalid.
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(violations))
        }
    }
}

type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Loads and persists the configuration record.
///
/// Environment access goes through a lookup function so tests can supply
/// their own variables without touching the process environment.
#[derive(Clone)]
pub struct ConfigStore {
    env: EnvLookup,
}

impl fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigStore").finish_non_exhaustive()
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore {
    /// Create a store reading the process environment.
    pub fn new() -> Self {
        Self {
            env: Arc::new(|name| std::env::var(name).ok()),
        }
    }

    /// Create a store with a custom environment lookup.
    pub fn with_env<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            env: Arc::new(lookup),
        }
    }

    /// The default configuration file path, `~/.shuttle/config.json`.
    ///
    /// Computed once per process.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        static DEFAULT_PATH: OnceLock<Option<PathBuf>> = OnceLock::new();
        DEFAULT_PATH
            .get_or_init(|| dirs::home_dir().map(|home| home.join(CONFIG_DIR).join(CONFIG_FILE)))
            .clone()
            .ok_or(ConfigError::NoHomeDir)
    }

    /// Load and resolve configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    /// A missing file is not an error.
    pub fn load(&self, source: impl Into<ConfigSource>) -> Result<Config, ConfigError> {
        let source = source.into();
        let path = resolve_path(source.config_path.as_deref())?;

        let layers = [
            (LayerSource::Default, defaults()),
            (LayerSource::File, read_layer(&path)?),
            (LayerSource::Environment, self.env_layer()),
            (
                LayerSource::Override,
                override_layer(source.project_override.as_deref()),
            ),
        ];

        let config = Config::resolve(&layers, path);
        debug!(
            path = %config.path().display(),
            project = config.project_id(),
            "configuration resolved"
        );
        Ok(config)
    }

    /// Merge `partial` into the file and write it back.
    ///
    /// Existing keys not present in `partial` (including keys this version
    /// does not know about) are preserved. Returns the path written.
    pub fn save(&self, partial: &ConfigLayer, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let path = resolve_path(path)?;
        let mut object = read_object(&path)?;

        let updates = serde_json::to_value(partial)
            .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
        if let Value::Object(updates) = updates {
            object.extend(updates);
        }

        write_object_atomic(&path, &object)?;
        debug!(path = %path.display(), "configuration saved");
        Ok(path)
    }

    /// Get one resolved value.
    pub fn get(&self, key: &str, path: Option<&Path>) -> Result<Option<String>, ConfigError> {
        let key = parse_key(key)?;
        Ok(self.load(path)?.value(key))
    }

    /// Persist one field.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` if the value breaks a validation rule;
    /// nothing is written in that case.
    pub fn set(&self, key: &str, value: &str, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let key = parse_key(key)?;
        let partial = ConfigLayer::single(key, value)?;

        let violations = validate(&partial);
        if !violations.is_empty() {
            return Err(ConfigError::Invalid(violations));
        }

        self.save(&partial, path)
    }

    /// Remove one field from the file. Returns whether it was present.
    pub fn unset(&self, key: &str, path: Option<&Path>) -> Result<bool, ConfigError> {
        let key = parse_key(key)?;
        let path = resolve_path(path)?;
        let mut object = read_object(&path)?;

        let removed = object.remove(key.name()).is_some();
        if removed {
            write_object_atomic(&path, &object)?;
        }
        Ok(removed)
    }

    /// The fully resolved configuration.
    pub fn list(&self, path: Option<&Path>) -> Result<Config, ConfigError> {
        self.load(path)
    }

    /// Check a candidate record. Never fails.
    pub fn validate(candidate: &ConfigLayer) -> Vec<String> {
        validate(candidate)
    }

    fn env_layer(&self) -> ConfigLayer {
        let mut layer = ConfigLayer::default();
        for (name, key) in ENV_VARS {
            let Some(value) = (self.env)(name).filter(|v| !v.is_empty()) else {
                continue;
            };
            match key {
                ConfigKey::NatsUrl => layer.nats_url = Some(value),
                ConfigKey::ProjectId => layer.project_id = Some(value),
                ConfigKey::ApiUrl => layer.api_url = Some(value),
                ConfigKey::ApiToken => layer.api_token = Some(value),
                _ => {}
            }
        }
        layer
    }
}

fn defaults() -> ConfigLayer {
    ConfigLayer {
        nats_url: Some(DEFAULT_NATS_URL.to_string()),
        project_id: Some(DEFAULT_PROJECT.to_string()),
        default_priority: Some(DEFAULT_PRIORITY),
        output_format: Some(OutputMode::Table.as_str().to_string()),
        ..Default::default()
    }
}

fn override_layer(project: Option<&str>) -> ConfigLayer {
    ConfigLayer {
        project_id: project.filter(|p| !p.is_empty()).map(str::to_string),
        ..Default::default()
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, ConfigError> {
    ConfigKey::parse(key).ok_or_else(|| ConfigError::UnknownKey(key.to_string()))
}

fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    match path {
        Some(path) => Ok(path.to_path_buf()),
        None => ConfigStore::default_path(),
    }
}

/// Read the file contents, `None` if it does not exist.
fn read_contents(path: &Path) -> Result<Option<String>, ConfigError> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

fn read_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    match read_contents(path)? {
        Some(contents) => serde_json::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        None => Ok(ConfigLayer::default()),
    }
}

fn read_object(path: &Path) -> Result<Map<String, Value>, ConfigError> {
    let Some(contents) = read_contents(path)? else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(&contents) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(_) => Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            message: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
    }
}

/// Write the file atomically: temp file in the same directory, then rename.
fn write_object_atomic(path: &Path, object: &Map<String, Value>) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let mut contents = serde_json::to_string_pretty(object)
        .map_err(|e| ConfigError::InvalidValue(e.to_string()))?;
    contents.push('\n');

    let temp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&temp_path).map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    file.write_all(contents.as_bytes())
        .map_err(|e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        })?;

    file.sync_all().map_err(|e| ConfigError::WriteError {
        path: temp_path.clone(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn store_with(vars: &[(&str, &str)]) -> ConfigStore {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ConfigStore::with_env(move |name| vars.get(name).cloned())
    }

    fn config_file(temp: &TempDir, contents: &str) -> PathBuf {
        let path = temp.path().join("config.json");
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("absent/config.json");

        let config = store_with(&[]).load(path.as_path()).unwrap();

        assert_eq!(config.project_id(), "default");
        assert_eq!(config.nats_url(), DEFAULT_NATS_URL);
        assert_eq!(config.default_priority(), 5);
        assert_eq!(config.output_mode(), OutputMode::Table);
        assert!(config.api_url().is_none());
        assert_eq!(config.source_of(ConfigKey::NatsUrl), Some(LayerSource::Default));
        assert_eq!(config.source_of(ConfigKey::ApiToken), None);
    }

    #[test]
    fn env_overrides_file() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"natsUrl":"nats://file:4222"}"#);

        let config = store_with(&[("WEFT_NATS_URL", "nats://env:4222")])
            .load(path.as_path())
            .unwrap();

        assert_eq!(config.nats_url(), "nats://env:4222");
        assert_eq!(
            config.source_of(ConfigKey::NatsUrl),
            Some(LayerSource::Environment)
        );
    }

    #[test]
    fn file_overrides_defaults_field_by_field() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"projectId":"alpha","defaultPriority":8}"#);

        let config = store_with(&[]).load(path.as_path()).unwrap();

        assert_eq!(config.project_id(), "alpha");
        assert_eq!(config.default_priority(), 8);
        assert_eq!(config.nats_url(), DEFAULT_NATS_URL);
    }

    #[test]
    fn project_override_wins_when_non_empty() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"projectId":"alpha"}"#);
        let store = store_with(&[("WEFT_PROJECT_ID", "beta")]);

        let config = store
            .load(ConfigSource::new(Some(path.clone()), Some("gamma".into())))
            .unwrap();
        assert_eq!(config.project_id(), "gamma");
        assert_eq!(
            config.source_of(ConfigKey::ProjectId),
            Some(LayerSource::Override)
        );

        let config = store
            .load(ConfigSource::new(Some(path), Some(String::new())))
            .unwrap();
        assert_eq!(config.project_id(), "beta");
    }

    #[test]
    fn empty_env_values_are_ignored() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"apiUrl":"https://file.example"}"#);

        let config = store_with(&[("WEFT_API_URL", "")])
            .load(path.as_path())
            .unwrap();

        assert_eq!(config.api_url(), Some("https://file.example"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, "{ not json");

        let err = store_with(&[]).load(path.as_path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
        assert!(err.to_string().contains("config.json"));
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"defaultPriority":"high"}"#);

        assert!(store_with(&[]).load(path.as_path()).is_err());
    }

    #[test]
    fn unknown_fields_are_tolerated() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"projectId":"p","theme":"dark"}"#);

        let config = store_with(&[]).load(path.as_path()).unwrap();
        assert_eq!(config.project_id(), "p");
    }

    #[test]
    fn save_creates_parent_directories() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested/dir/config.json");
        let partial = ConfigLayer {
            project_id: Some("alpha".to_string()),
            ..Default::default()
        };

        let written = store_with(&[]).save(&partial, Some(&path)).unwrap();

        assert_eq!(written, path);
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(r#""projectId": "alpha""#));
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn save_preserves_unrelated_fields() {
        let temp = TempDir::new().unwrap();
        let path = config_file(
            &temp,
            r#"{"natsUrl":"nats://keep:4222","theme":"dark","projectId":"old"}"#,
        );
        let store = store_with(&[]);

        store
            .save(
                &ConfigLayer {
                    project_id: Some("new".to_string()),
                    ..Default::default()
                },
                Some(&path),
            )
            .unwrap();

        let raw: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw["natsUrl"], "nats://keep:4222");
        assert_eq!(raw["projectId"], "new");
    }

    #[test]
    fn save_refuses_to_clobber_malformed_file() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, "[1, 2");

        let result = store_with(&[]).save(&ConfigLayer::default(), Some(&path));

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[1, 2");
    }

    #[test]
    fn set_then_get() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let store = store_with(&[]);

        store.set("defaultBoundary", "staging", Some(&path)).unwrap();

        assert_eq!(
            store.get("defaultBoundary", Some(&path)).unwrap().as_deref(),
            Some("staging")
        );
        assert_eq!(store.get("apiToken", Some(&path)).unwrap(), None);
    }

    #[test]
    fn set_rejects_invalid_values_without_writing() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        let store = store_with(&[]);

        let err = store.set("defaultPriority", "42", Some(&path)).unwrap_err();

        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(!path.exists());
    }

    #[test]
    fn set_rejects_unknown_keys() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");

        let err = store_with(&[]).set("colour", "red", Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownKey(_)));
        assert!(err.to_string().contains("natsUrl"));
    }

    #[test]
    fn unset_removes_key() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"projectId":"alpha","apiUrl":"http://x"}"#);
        let store = store_with(&[]);

        assert!(store.unset("apiUrl", Some(&path)).unwrap());
        assert!(!store.unset("apiUrl", Some(&path)).unwrap());

        let config = store.load(path.as_path()).unwrap();
        assert!(config.api_url().is_none());
        assert_eq!(config.project_id(), "alpha");
    }

    #[test]
    fn ensure_valid_reports_all_violations() {
        let temp = TempDir::new().unwrap();
        let path = config_file(&temp, r#"{"natsUrl":"http://x","defaultPriority":0}"#);

        let config = store_with(&[]).load(path.as_path()).unwrap();
        let err = config.ensure_valid().unwrap_err();

        match err {
            ConfigError::Invalid(violations) => assert_eq!(violations.len(), 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn default_path_is_stable_and_under_home() {
        let first = ConfigStore::default_path().unwrap();
        let second = ConfigStore::default_path().unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with(dirs::home_dir().unwrap()));
        assert!(first.ends_with(".shuttle/config.json"));
    }

    #[test]
    fn resolve_takes_highest_defining_layer() {
        let low = ConfigLayer {
            project_id: Some("low".into()),
            api_url: Some("http://low".into()),
            ..Default::default()
        };
        let high = ConfigLayer {
            project_id: Some("high".into()),
            ..Default::default()
        };

        let config = Config::resolve(
            &[(LayerSource::File, low), (LayerSource::Environment, high)],
            PathBuf::from("config.json"),
        );

        assert_eq!(config.project_id(), "high");
        assert_eq!(config.api_url(), Some("http://low"));
        assert_eq!(config.source_of(ConfigKey::ApiUrl), Some(LayerSource::File));
    }
}
