//! transport::factory
//!
//! Binding selection and the typed request entry point.
//!
//! # Design
//!
//! The set of bindings is closed, so [`Transport`] is an enum rather than a
//! boxed trait object. It is chosen once per invocation by
//! [`Transport::from_config`]: when an HTTP endpoint is configured the REST
//! binding is used, otherwise the NATS binding. Commands only ever call
//! [`Transport::send`] and never learn which binding is active.
//!
//! # Example
//!
//! ```ignore
//! use shuttle::transport::{Operation, Transport};
//! use shuttle::core::types::Stats;
//!
//! let mut transport = Transport::from_config(&config)?;
//! let stats = transport.request::<Stats>(Operation::Stats).await?;
//! transport.close().await?;
//! ```

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::envelope::ResponseEnvelope;
use super::http::HttpTransport;
use super::nats::{NatsSettings, NatsTransport};
use super::operation::Operation;
use super::traits::{Coordinator, TransportError};
use crate::core::config::Config;

/// Available transport bindings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// NATS request/reply
    Nats,
    /// REST over HTTP
    Http,
}

impl TransportKind {
    /// The binding a configuration selects.
    pub fn for_config(config: &Config) -> Self {
        if config.api_url().is_some_and(|u| !u.is_empty()) {
            TransportKind::Http
        } else {
            TransportKind::Nats
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TransportKind::Nats => "nats",
            TransportKind::Http => "http",
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The active binding.
#[derive(Debug)]
pub enum Transport {
    Nats(NatsTransport),
    Http(HttpTransport),
}

impl Transport {
    /// Build the binding selected by `config`.
    ///
    /// No connection is opened here; the NATS binding connects on first use.
    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let kind = TransportKind::for_config(config);
        debug!(transport = %kind, project = config.project_id(), "selecting transport");

        match (kind, config.api_url()) {
            (TransportKind::Http, Some(api_url)) => Ok(Transport::Http(HttpTransport::new(
                api_url,
                config.project_id(),
                config.api_token().map(str::to_string),
            )?)),
            _ => Ok(Transport::Nats(NatsTransport::new(
                NatsSettings::new(
                    config.nats_url(),
                    config.credentials_path().map(|p| p.to_path_buf()),
                ),
                config.project_id(),
            )?)),
        }
    }

    pub fn kind(&self) -> TransportKind {
        match self {
            Transport::Nats(_) => TransportKind::Nats,
            Transport::Http(_) => TransportKind::Http,
        }
    }

    fn coordinator(&mut self) -> &mut dyn Coordinator {
        match self {
            Transport::Nats(nats) => nats,
            Transport::Http(http) => http,
        }
    }

    /// Send `operation` with `payload` and decode the reply payload as `T`.
    ///
    /// A payload serializing to `null` (such as `()`) is sent as no payload.
    ///
    /// # Errors
    ///
    /// Returns a `TransportError` only when the request could not be carried
    /// out; coordinator-reported failures are in the envelope.
    pub async fn send<P, T>(
        &mut self,
        operation: Operation,
        payload: &P,
    ) -> Result<ResponseEnvelope<T>, TransportError>
    where
        P: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload =
            serde_json::to_value(payload).map_err(|e| TransportError::Encode(e.to_string()))?;
        let payload = (!payload.is_null()).then_some(payload);

        let envelope = self.coordinator().call(&operation, payload).await?;
        if let Some(error) = envelope.error() {
            debug!(%operation, status = envelope.status(), error, "request failed");
        }
        envelope.decode()
    }

    /// Send an operation that carries no payload.
    pub async fn request<T: DeserializeOwned>(
        &mut self,
        operation: Operation,
    ) -> Result<ResponseEnvelope<T>, TransportError> {
        self.send(operation, &()).await
    }

    /// Release the binding's connection, if it holds one.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        self.coordinator().close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{ConfigLayer, LayerSource};
    use std::path::PathBuf;

    fn config(layer: ConfigLayer) -> Config {
        Config::resolve(&[(LayerSource::File, layer)], PathBuf::from("config.json"))
    }

    #[test]
    fn nats_is_selected_without_api_url() {
        let transport = Transport::from_config(&config(ConfigLayer::default())).unwrap();
        assert_eq!(transport.kind(), TransportKind::Nats);
    }

    #[test]
    fn http_is_selected_with_api_url() {
        let transport = Transport::from_config(&config(ConfigLayer {
            api_url: Some("http://localhost:8080".into()),
            ..Default::default()
        }))
        .unwrap();
        assert_eq!(transport.kind(), TransportKind::Http);
    }

    #[test]
    fn invalid_project_fails_nats_selection() {
        let result = Transport::from_config(&config(ConfigLayer {
            project_id: Some("has.dot".into()),
            ..Default::default()
        }));
        assert!(matches!(result, Err(TransportError::Subject(_))));
    }
}
