//! transport::nats
//!
//! Request/reply binding over NATS.
//!
//! # Design
//!
//! Each operation is published as a request on the subject derived by
//! [`SubjectNamer`]; the coordinator's reply body is decoded into a
//! [`ResponseEnvelope`]. The JSON request body is empty when the operation
//! carries no payload.
//!
//! # Connection lifecycle
//!
//! The [`ConnectionPool`] holds at most one client. It connects on first use,
//! hands out the cached client while it is still usable, and on
//! [`ConnectionPool::close`] drains in-flight work and forgets the client so
//! the next acquisition reconnects.

use std::path::PathBuf;
use std::time::Duration;

use async_nats::connection::State;
use async_nats::{Client, ConnectOptions, RequestErrorKind};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::envelope::ResponseEnvelope;
use super::operation::Operation;
use super::subject::SubjectNamer;
use super::traits::{Coordinator, TransportError};

/// Reply timeout for every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_millis(5000);

/// Reconnect attempts before the client gives up.
pub const MAX_RECONNECTS: usize = 10;

/// Wait between reconnect attempts.
pub const RECONNECT_DELAY: Duration = Duration::from_millis(1000);

/// Connection parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct NatsSettings {
    /// Server URL (`nats://host:port`)
    pub url: String,
    /// Credentials file used to authenticate, if any
    pub credentials_path: Option<PathBuf>,
    /// Reply timeout
    pub request_timeout: Duration,
}

impl NatsSettings {
    pub fn new(url: impl Into<String>, credentials_path: Option<PathBuf>) -> Self {
        Self {
            url: url.into(),
            credentials_path,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Build client options, reading the credentials file if configured.
    async fn connect_options(&self) -> Result<ConnectOptions, TransportError> {
        let options = match &self.credentials_path {
            Some(path) => {
                let creds = tokio::fs::read_to_string(path).await.map_err(|e| {
                    TransportError::Credentials {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?;
                ConnectOptions::with_credentials(&creds).map_err(|e| {
                    TransportError::Credentials {
                        path: path.clone(),
                        message: e.to_string(),
                    }
                })?
            }
            None => ConnectOptions::new(),
        };

        Ok(options
            .max_reconnects(Some(MAX_RECONNECTS))
            .reconnect_delay_callback(|_attempts| RECONNECT_DELAY)
            .request_timeout(Some(self.request_timeout)))
    }
}

/// Owner of the single cached NATS client.
#[derive(Debug)]
pub struct ConnectionPool {
    settings: NatsSettings,
    client: Option<Client>,
}

impl ConnectionPool {
    pub fn new(settings: NatsSettings) -> Self {
        Self {
            settings,
            client: None,
        }
    }

    pub fn settings(&self) -> &NatsSettings {
        &self.settings
    }

    /// Whether a client is cached and has not been closed.
    pub fn is_open(&self) -> bool {
        self.client
            .as_ref()
            .is_some_and(|c| c.connection_state() != State::Disconnected)
    }

    /// Get the cached client, connecting first if there is none.
    ///
    /// # Errors
    ///
    /// - `TransportError::Credentials` if the credentials file cannot be used
    /// - `TransportError::Connect` if the server cannot be reached
    pub async fn acquire(&mut self) -> Result<Client, TransportError> {
        if let Some(client) = &self.client {
            if client.connection_state() != State::Disconnected {
                return Ok(client.clone());
            }
        }

        let options = self.settings.connect_options().await?;
        debug!(url = %self.settings.url, "connecting to NATS");
        let client = options
            .connect(self.settings.url.as_str())
            .await
            .map_err(|e| TransportError::Connect {
                endpoint: self.settings.url.clone(),
                message: e.to_string(),
            })?;
        info!(url = %self.settings.url, "connected to NATS");

        self.client = Some(client.clone());
        Ok(client)
    }

    /// Drain in-flight work, close, and clear the cache.
    pub async fn close(&mut self) -> Result<(), TransportError> {
        if let Some(client) = self.client.take() {
            debug!(url = %self.settings.url, "draining NATS connection");
            client
                .drain()
                .await
                .map_err(|e| TransportError::Close(e.to_string()))?;
        }
        Ok(())
    }
}

/// NATS binding of the [`Coordinator`] contract.
#[derive(Debug)]
pub struct NatsTransport {
    pool: ConnectionPool,
    namer: SubjectNamer,
}

impl NatsTransport {
    /// Create a binding for `project`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Subject` if the project id cannot appear in a
    /// subject.
    pub fn new(settings: NatsSettings, project: &str) -> Result<Self, TransportError> {
        Ok(Self {
            pool: ConnectionPool::new(settings),
            namer: SubjectNamer::new(project)?,
        })
    }

    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Subject an operation is sent on.
    pub fn subject_for(&self, operation: &Operation) -> Result<String, TransportError> {
        Ok(self
            .namer
            .subject(operation.category(), operation.verb(), operation.entity_id())?)
    }
}

#[async_trait]
impl Coordinator for NatsTransport {
    fn name(&self) -> &'static str {
        "nats"
    }

    async fn call(
        &mut self,
        operation: &Operation,
        payload: Option<Value>,
    ) -> Result<ResponseEnvelope<Value>, TransportError> {
        let subject = self.subject_for(operation)?;
        let body = match payload {
            Some(value) => {
                serde_json::to_vec(&value).map_err(|e| TransportError::Encode(e.to_string()))?
            }
            None => Vec::new(),
        };

        let client = self.pool.acquire().await?;
        debug!(%subject, bytes = body.len(), "sending request");

        let message = match client.request(subject.clone(), body.into()).await {
            Ok(message) => message,
            Err(e) => {
                let timeout_ms = self.pool.settings().request_timeout.as_millis();
                return Ok(match e.kind() {
                    RequestErrorKind::TimedOut => ResponseEnvelope::failure(
                        504,
                        format!("no reply on {} within {}ms", subject, timeout_ms),
                    ),
                    RequestErrorKind::NoResponders => ResponseEnvelope::failure(
                        503,
                        format!("no coordinator is listening on {}", subject),
                    ),
                    _ => ResponseEnvelope::failure(502, format!("request on {} failed: {}", subject, e)),
                });
            }
        };

        debug!(%subject, bytes = message.payload.len(), "received reply");
        if message.payload.is_empty() {
            return Ok(ResponseEnvelope::success(200, Value::Null));
        }

        match serde_json::from_slice::<Value>(&message.payload) {
            Ok(body) => Ok(ResponseEnvelope::from_reply(200, body)),
            Err(e) => Ok(ResponseEnvelope::failure(
                502,
                format!("reply on {} is not JSON: {}", subject, e),
            )),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.pool.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn settings_defaults() {
        let settings = NatsSettings::new("nats://localhost:4222", None);
        assert_eq!(settings.request_timeout, Duration::from_millis(5000));
        assert!(settings.credentials_path.is_none());
    }

    #[test]
    fn subject_for_uses_project() {
        let transport = NatsTransport::new(NatsSettings::new("nats://localhost:4222", None), "alpha")
            .unwrap();
        assert_eq!(
            transport
                .subject_for(&Operation::CancelWork("w-1".into()))
                .unwrap(),
            "weft.alpha.work.cancel.w-1"
        );
    }

    #[test]
    fn invalid_project_is_rejected() {
        let result = NatsTransport::new(NatsSettings::new("nats://localhost:4222", None), "a.b");
        assert!(matches!(result, Err(TransportError::Subject(_))));
    }

    #[test]
    fn pool_starts_closed() {
        let pool = ConnectionPool::new(NatsSettings::new("nats://localhost:4222", None));
        assert!(!pool.is_open());
    }

    #[tokio::test]
    async fn close_without_connection_is_a_no_op() {
        let mut pool = ConnectionPool::new(NatsSettings::new("nats://localhost:4222", None));
        pool.close().await.unwrap();
        assert!(!pool.is_open());
    }

    #[tokio::test]
    async fn missing_credentials_file_names_the_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.creds");
        let mut pool = ConnectionPool::new(NatsSettings::new(
            "nats://127.0.0.1:1",
            Some(path.clone()),
        ));

        let err = pool.acquire().await.unwrap_err();

        match &err {
            TransportError::Credentials { path: failed, .. } => assert_eq!(failed, &path),
            other => panic!("unexpected error: {other}"),
        }
        assert!(err.to_string().contains("missing.creds"));
        assert!(!pool.is_open());
    }

    #[tokio::test]
    async fn unreachable_server_is_a_connect_error() {
        let mut transport =
            NatsTransport::new(NatsSettings::new("nats://127.0.0.1:1", None), "alpha").unwrap();

        let err = transport.call(&Operation::Stats, None).await.unwrap_err();

        assert!(matches!(err, TransportError::Connect { .. }));
        assert!(!transport.pool().is_open());
    }
}
