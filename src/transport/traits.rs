//! transport::traits
//!
//! The contract shared by every transport binding.
//!
//! # Error policy
//!
//! Failures the coordinator reports (HTTP error statuses, failure replies,
//! timeouts, nobody listening) come back as a failure
//! [`ResponseEnvelope`]. Failures that mean the transport itself cannot be
//! used (unreachable endpoint, unreadable credentials, malformed endpoint
//! URL) are returned as [`TransportError`], since retrying the same request
//! cannot help.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use super::envelope::ResponseEnvelope;
use super::operation::Operation;
use super::subject::SubjectError;

/// Errors that prevent a request from being issued at all.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The configured endpoint cannot be used.
    #[error("invalid endpoint '{endpoint}': {message}")]
    InvalidEndpoint { endpoint: String, message: String },

    /// The credentials file could not be read or parsed.
    #[error("failed to load credentials from '{path}': {message}")]
    Credentials { path: PathBuf, message: String },

    /// The connection could not be established.
    #[error("failed to connect to {endpoint}: {message}")]
    Connect { endpoint: String, message: String },

    /// The request could not be addressed.
    #[error(transparent)]
    Subject(#[from] SubjectError),

    /// The request payload could not be encoded.
    #[error("failed to encode request: {0}")]
    Encode(String),

    /// The reply could not be decoded.
    #[error("failed to decode reply: {0}")]
    Decode(String),

    /// Closing the connection failed.
    #[error("failed to close connection: {0}")]
    Close(String),
}

/// A binding able to carry requests to the coordinator.
///
/// Methods take `&mut self`: a binding may hold connection state, and only
/// one command runs per process.
#[async_trait]
pub trait Coordinator: Send {
    /// Binding name (e.g., "nats", "http").
    fn name(&self) -> &'static str;

    /// Issue one request and wait for its reply.
    ///
    /// `payload` is `None` when the operation carries no body.
    async fn call(
        &mut self,
        operation: &Operation,
        payload: Option<Value>,
    ) -> Result<ResponseEnvelope<Value>, TransportError>;

    /// Release any held connection.
    async fn close(&mut self) -> Result<(), TransportError> {
        Ok(())
    }
}
