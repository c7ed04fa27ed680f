//! cli::context
//!
//! Per-invocation state shared by command handlers.
//!
//! [`Context`] carries the global flags and loads configuration on demand.
//! [`Session`] is what coordinator commands work against: the validated
//! configuration, the selected transport, and the output mode.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context as _, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use super::args::Cli;
use crate::core::config::{Config, ConfigSource, ConfigStore, OutputMode};
use crate::transport::{Category, Operation, RemoteError, Transport};
use crate::ui::output::{self, Verbosity};

/// Global flags and configuration access for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Configuration file override (`--config`)
    pub config_path: Option<PathBuf>,
    /// Project override (`--project`)
    pub project: Option<String>,
    /// Structured output (`--json`)
    pub json: bool,
    /// Minimal output (`--quiet`)
    pub quiet: bool,
    /// Debug logging (`--debug`)
    pub debug: bool,
    store: ConfigStore,
}

impl Context {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            config_path: cli.config.clone(),
            project: cli.project.clone(),
            json: cli.json,
            quiet: cli.quiet,
            debug: cli.debug,
            store: ConfigStore::new(),
        }
    }

    /// Replace the configuration store.
    pub fn with_store(mut self, store: ConfigStore) -> Self {
        self.store = store;
        self
    }

    pub fn verbosity(&self) -> Verbosity {
        Verbosity::from_flags(self.quiet, self.debug)
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Load the resolved configuration, honoring `--config` and `--project`.
    pub fn load_config(&self) -> Result<Config> {
        let source = ConfigSource::new(self.config_path.clone(), self.project.clone());
        Ok(self.store.load(source)?)
    }

    /// `--json` wins over the configured output format.
    pub fn output_mode(&self, config: &Config) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            config.output_mode()
        }
    }

    /// Load and validate configuration, then select a transport.
    ///
    /// No network traffic happens here.
    pub fn connect(&self) -> Result<Session> {
        let config = self.load_config()?;
        config.ensure_valid()?;

        let transport = Transport::from_config(&config)?;
        let mode = self.output_mode(&config);
        debug!(transport = %transport.kind(), mode = mode.as_str(), "session ready");

        Ok(Session {
            config,
            mode,
            transport,
        })
    }
}

/// Configuration plus an open transport.
#[derive(Debug)]
pub struct Session {
    pub config: Config,
    pub mode: OutputMode,
    transport: Transport,
}

impl Session {
    /// Send `operation` and return the reply payload.
    ///
    /// Failure envelopes become errors with a message suited to the
    /// operation (for example "work item 'w-9' not found").
    pub async fn call<P, T>(&mut self, operation: Operation, payload: &P) -> Result<T>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let envelope = self
            .transport
            .send::<P, T>(operation.clone(), payload)
            .await?;
        envelope
            .into_result()
            .map_err(|err| remote_failure(&operation, err))
    }

    /// Send an operation without a payload.
    pub async fn fetch<T: DeserializeOwned>(&mut self, operation: Operation) -> Result<T> {
        self.call(operation, &()).await
    }

    /// Render `payload` for this session's output mode.
    pub fn render<T, F>(&self, payload: &T, table: F) -> Result<String>
    where
        T: Serialize + ?Sized,
        F: FnOnce(&T) -> String,
    {
        output::output(payload, self.mode, table).context("failed to encode output")
    }

    pub fn is_json(&self) -> bool {
        self.mode == OutputMode::Json
    }

    /// Release the transport.
    ///
    /// A failure here never masks the command's own result; it is logged.
    pub async fn close(mut self) {
        if let Err(err) = self.transport.close().await {
            warn!(error = %err, "failed to close transport");
        }
    }
}

#[cfg(test)]
impl Session {
    /// A session over a resolved file layer. Nothing connects until used.
    pub(crate) fn for_test(layer: crate::core::config::ConfigLayer) -> Self {
        use crate::core::config::LayerSource;

        let config = Config::resolve(&[(LayerSource::File, layer)], PathBuf::from("config.json"));
        let transport = Transport::from_config(&config).expect("transport");
        let mode = config.output_mode();
        Self {
            config,
            mode,
            transport,
        }
    }
}

/// Noun used in messages about entities of a category.
fn entity_name(category: Category) -> &'static str {
    match category {
        Category::Work => "work item",
        Category::Agents => "agent",
        Category::Targets => "target",
        Category::Spinup => "spin-up",
        Category::Stats => "statistics",
    }
}

/// Turn a classified failure into a user-facing error.
pub fn remote_failure(operation: &Operation, err: RemoteError) -> anyhow::Error {
    match (&err, operation.entity_id()) {
        (RemoteError::NotFound(_), Some(id)) => {
            anyhow!("{} '{}' not found", entity_name(operation.category()), id)
        }
        _ => anyhow::Error::new(err).context(format!("{} failed", operation)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ConfigLayer, LayerSource};

    fn config(layer: ConfigLayer) -> Config {
        Config::resolve(&[(LayerSource::File, layer)], PathBuf::from("config.json"))
    }

    #[test]
    fn json_flag_overrides_configured_format() {
        let configured = config(ConfigLayer {
            output_format: Some("table".into()),
            ..Default::default()
        });
        let ctx = Context {
            json: true,
            ..Default::default()
        };
        assert_eq!(ctx.output_mode(&configured), OutputMode::Json);
        assert_eq!(
            Context::default().output_mode(&configured),
            OutputMode::Table
        );
    }

    #[test]
    fn configured_json_format_is_used() {
        let configured = config(ConfigLayer {
            output_format: Some("json".into()),
            ..Default::default()
        });
        assert_eq!(Context::default().output_mode(&configured), OutputMode::Json);
    }

    #[test]
    fn not_found_names_the_entity() {
        let err = remote_failure(
            &Operation::GetWork("w-9".into()),
            RemoteError::NotFound("no such item".into()),
        );
        assert_eq!(err.to_string(), "work item 'w-9' not found");

        let err = remote_failure(
            &Operation::GetTarget("gpu".into()),
            RemoteError::NotFound(String::new()),
        );
        assert_eq!(err.to_string(), "target 'gpu' not found");
    }

    #[test]
    fn other_failures_keep_the_remote_message() {
        let err = remote_failure(
            &Operation::GetWork("w-1".into()),
            RemoteError::Request {
                status: 500,
                message: "database unavailable".into(),
            },
        );
        let chain = format!("{:#}", err);
        assert!(chain.contains("work.get w-1 failed"));
        assert!(chain.contains("database unavailable"));
        assert!(!chain.contains("not found"));
    }
}
