//! transport::envelope
//!
//! The uniform success/failure wrapper every transport call returns.
//!
//! # Wire shape
//!
//! ```json
//! {"ok": true,  "status": 200, "data": {...}}
//! {"ok": false, "status": 404, "error": "work item w-9 not found"}
//! ```
//!
//! Exactly one of `data` and `error` is present.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

use super::TransportError;

/// Result of one request to the coordinator.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseEnvelope<T> {
    /// The coordinator handled the request.
    Success { status: u16, data: T },
    /// The coordinator, or the path to it, reported a failure.
    Failure { status: u16, error: String },
}

impl<T> ResponseEnvelope<T> {
    pub fn success(status: u16, data: T) -> Self {
        ResponseEnvelope::Success { status, data }
    }

    pub fn failure(status: u16, error: impl Into<String>) -> Self {
        ResponseEnvelope::Failure {
            status,
            error: error.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, ResponseEnvelope::Success { .. })
    }

    pub fn status(&self) -> u16 {
        match self {
            ResponseEnvelope::Success { status, .. } | ResponseEnvelope::Failure { status, .. } => {
                *status
            }
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ResponseEnvelope::Success { data, .. } => Some(data),
            ResponseEnvelope::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ResponseEnvelope::Success { .. } => None,
            ResponseEnvelope::Failure { error, .. } => Some(error),
        }
    }

    /// Convert into a `Result`, classifying failures by status.
    pub fn into_result(self) -> Result<T, RemoteError> {
        match self {
            ResponseEnvelope::Success { data, .. } => Ok(data),
            ResponseEnvelope::Failure { status, error } => Err(RemoteError::from_status(status, error)),
        }
    }
}

impl ResponseEnvelope<Value> {
    /// Interpret a decoded reply body.
    ///
    /// A body that is itself an envelope (an object with a boolean `ok`) is
    /// taken as-is. Its `status` is kept only when it agrees with `ok`: a
    /// success keeps a 2xx status and otherwise reports `default_status`; a
    /// failure keeps a non-2xx status and otherwise reports 500. Any other
    /// body is the payload of a success.
    pub fn from_reply(default_status: u16, body: Value) -> Self {
        let is_envelope = body
            .as_object()
            .is_some_and(|o| o.get("ok").is_some_and(Value::is_boolean));
        if !is_envelope {
            return ResponseEnvelope::success(default_status, body);
        }

        match serde_json::from_value::<WireReply>(body) {
            Ok(reply) if reply.ok => ResponseEnvelope::success(
                reply.status.filter(is_success).unwrap_or(default_status),
                reply.data.unwrap_or(Value::Null),
            ),
            Ok(reply) => ResponseEnvelope::failure(
                reply.status.filter(|s| !is_success(s)).unwrap_or(500),
                reply
                    .error
                    .or(reply.message)
                    .unwrap_or_else(|| "request failed".to_string()),
            ),
            Err(e) => ResponseEnvelope::failure(500, format!("malformed reply envelope: {}", e)),
        }
    }

    /// Decode the payload of a success into `T`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::Decode` if the payload does not match `T`.
    pub fn decode<T: DeserializeOwned>(self) -> Result<ResponseEnvelope<T>, TransportError> {
        match self {
            ResponseEnvelope::Success { status, data } => {
                let data = serde_json::from_value(data)
                    .map_err(|e| TransportError::Decode(e.to_string()))?;
                Ok(ResponseEnvelope::Success { status, data })
            }
            ResponseEnvelope::Failure { status, error } => {
                Ok(ResponseEnvelope::Failure { status, error })
            }
        }
    }
}

impl<T: Serialize> Serialize for ResponseEnvelope<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let wire = match self {
            ResponseEnvelope::Success { status, data } => WireEnvelope {
                ok: true,
                status: *status,
                data: Some(data),
                error: None,
            },
            ResponseEnvelope::Failure { status, error } => WireEnvelope {
                ok: false,
                status: *status,
                data: None,
                error: Some(error),
            },
        };
        wire.serialize(serializer)
    }
}

fn is_success(status: &u16) -> bool {
    (200..300).contains(status)
}

#[derive(Serialize)]
struct WireEnvelope<'a, T> {
    ok: bool,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

#[derive(Deserialize)]
struct WireReply {
    ok: bool,
    status: Option<u16>,
    data: Option<Value>,
    error: Option<String>,
    message: Option<String>,
}

/// A failure reported by the coordinator, classified for the user.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RemoteError {
    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The credential was missing, invalid, or lacked permission.
    #[error("authentication failed: {0}")]
    Unauthorized(String),

    /// No reply arrived in time.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// Nothing is serving the request.
    #[error("coordinator unavailable: {0}")]
    Unavailable(String),

    /// Any other failure.
    #[error("request failed ({status}): {message}")]
    Request {
        /// Status code
        status: u16,
        /// Error message from the coordinator
        message: String,
    },
}

impl RemoteError {
    /// Classify a failure by status code.
    pub fn from_status(status: u16, message: String) -> Self {
        match status {
            404 => RemoteError::NotFound(message),
            401 | 403 => RemoteError::Unauthorized(message),
            408 | 504 => RemoteError::Timeout(message),
            503 => RemoteError::Unavailable(message),
            _ => RemoteError::Request { status, message },
        }
    }

    /// The status code this error was classified from.
    pub fn status(&self) -> u16 {
        match self {
            RemoteError::NotFound(_) => 404,
            RemoteError::Unauthorized(_) => 401,
            RemoteError::Timeout(_) => 504,
            RemoteError::Unavailable(_) => 503,
            RemoteError::Request { status, .. } => *status,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RemoteError::NotFound(_))
    }
}
