//! transport::http
//!
//! REST binding of the coordinator contract.
//!
//! # Design
//!
//! Every operation is one HTTP call against
//! `<apiUrl>/api/projects/<project>/<route>`. Payloads of `GET` and `DELETE`
//! routes travel as query parameters, all others as a JSON body. When a token
//! is configured it is attached as a bearer credential.
//!
//! Unlike the messaging binding, connection failures are not raised: they
//! become failure envelopes (status 503, or 504 for a timeout) so the caller
//! handles every HTTP outcome the same way.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, Url};
use serde_json::Value;
use tracing::debug;

use super::envelope::ResponseEnvelope;
use super::operation::{Operation, Route};
use super::traits::{Coordinator, TransportError};

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("shuttle/", env!("CARGO_PKG_VERSION"));

/// Overall timeout of one HTTP call.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP binding of the [`Coordinator`] contract.
pub struct HttpTransport {
    client: Client,
    base: Url,
    project: String,
    token: Option<String>,
}

// Custom Debug to avoid exposing the token
impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base", &self.base.as_str())
            .field("project", &self.project)
            .field("has_token", &self.token.is_some())
            .finish()
    }
}

impl HttpTransport {
    /// Create a binding for `project` against `api_url`.
    ///
    /// # Errors
    ///
    /// Returns `TransportError::InvalidEndpoint` if `api_url` is not an
    /// absolute `http`/`https` URL.
    pub fn new(
        api_url: &str,
        project: impl Into<String>,
        token: Option<String>,
    ) -> Result<Self, TransportError> {
        let invalid = |message: &str| TransportError::InvalidEndpoint {
            endpoint: api_url.to_string(),
            message: message.to_string(),
        };

        let base = Url::parse(api_url).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if base.cannot_be_a_base() {
            return Err(invalid("URL cannot have a path"));
        }

        let client = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| TransportError::Connect {
                endpoint: api_url.to_string(),
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            base,
            project: project.into(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Full URL of a route.
    pub fn endpoint(&self, route: &Route) -> Result<Url, TransportError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| TransportError::InvalidEndpoint {
                endpoint: self.base.to_string(),
                message: "URL cannot have a path".to_string(),
            })?
            .pop_if_empty()
            .extend(["api", "projects", self.project.as_str()])
            .extend(route.segments.iter().map(String::as_str));
        Ok(url)
    }
}

#[async_trait]
impl Coordinator for HttpTransport {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn call(
        &mut self,
        operation: &Operation,
        payload: Option<Value>,
    ) -> Result<ResponseEnvelope<Value>, TransportError> {
        let route = operation.route();
        let url = self.endpoint(&route)?;

        let mut request = self
            .client
            .request(route.method.into(), url.clone())
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, USER_AGENT_VALUE);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(payload) = payload {
            if route.method.uses_query() {
                request = request.query(&query_pairs(&payload));
            } else {
                request = request.json(&payload);
            }
        }

        debug!(method = ?route.method, %url, "sending request");
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let status = if e.is_timeout() { 504 } else { 503 };
                return Ok(ResponseEnvelope::failure(
                    status,
                    format!("network error: {}", e),
                ));
            }
        };

        let status = response.status();
        debug!(status = status.as_u16(), %url, "received response");

        let text = match response.text().await {
            Ok(text) => text,
            Err(e) => {
                return Ok(ResponseEnvelope::failure(
                    502,
                    format!("failed to read response body: {}", e),
                ))
            }
        };

        if !status.is_success() {
            return Ok(ResponseEnvelope::failure(
                status.as_u16(),
                error_message(&text, status.canonical_reason()),
            ));
        }

        if text.trim().is_empty() {
            return Ok(ResponseEnvelope::success(status.as_u16(), Value::Null));
        }
        match serde_json::from_str::<Value>(&text) {
            Ok(body) => Ok(ResponseEnvelope::from_reply(status.as_u16(), body)),
            Err(e) => Ok(ResponseEnvelope::failure(
                502,
                format!("response body is not JSON: {}", e),
            )),
        }
    }
}

/// Flatten a payload object into query parameters.
///
/// Scalars become `key=value`; arrays repeat the key; nulls are skipped.
fn query_pairs(payload: &Value) -> Vec<(String, String)> {
    let Some(object) = payload.as_object() else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for (key, value) in object {
        match value {
            Value::Null => {}
            Value::String(s) => pairs.push((key.clone(), s.clone())),
            Value::Array(items) => {
                for item in items {
                    pairs.push((key.clone(), scalar_string(item)));
                }
            }
            other => pairs.push((key.clone(), scalar_string(other))),
        }
    }
    pairs
}

fn scalar_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Pick the most useful error text from an error response body.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(body) {
        for key in ["error", "message"] {
            if let Some(Value::String(message)) = object.get(key) {
                return message.clone();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        trimmed.to_string()
    } else {
        reason.unwrap_or("Unknown error").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn endpoint_appends_project_and_route() {
        let transport = HttpTransport::new("https://weft.example.com/", "alpha", None).unwrap();
        let url = transport
            .endpoint(&Operation::TestTarget("t-1".into()).route())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://weft.example.com/api/projects/alpha/targets/t-1/test"
        );
    }

    #[test]
    fn endpoint_keeps_base_path_and_escapes_ids() {
        let transport = HttpTransport::new("http://host:8080/weft", "alpha", None).unwrap();
        let url = transport
            .endpoint(&Operation::GetWork("a/b c".into()).route())
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://host:8080/weft/api/projects/alpha/work/a%2Fb%20c"
        );
    }

    #[test]
    fn rejects_non_http_endpoints() {
        assert!(matches!(
            HttpTransport::new("nats://host:4222", "alpha", None),
            Err(TransportError::InvalidEndpoint { .. })
        ));
        assert!(HttpTransport::new("not a url", "alpha", None).is_err());
    }

    #[test]
    fn empty_token_is_ignored() {
        let transport = HttpTransport::new("http://host", "alpha", Some(String::new())).unwrap();
        assert!(!transport.has_token());
    }

    #[test]
    fn debug_redacts_token() {
        let transport =
            HttpTransport::new("http://host", "alpha", Some("secret_token_abc".into())).unwrap();
        let debug_output = format!("{:?}", transport);
        assert!(!debug_output.contains("secret_token_abc"));
        assert!(debug_output.contains("has_token"));
    }

    #[test]
    fn query_pairs_flatten_scalars() {
        let mut pairs = query_pairs(&json!({"status": "running", "limit": 20, "boundary": null}));
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "20".to_string()),
                ("status".to_string(), "running".to_string())
            ]
        );
        assert!(query_pairs(&json!("scalar")).is_empty());
    }

    #[test]
    fn error_message_prefers_json_fields() {
        assert_eq!(error_message(r#"{"error":"no such work"}"#, Some("Not Found")), "no such work");
        assert_eq!(error_message(r#"{"message":"bad input"}"#, None), "bad input");
        assert_eq!(error_message("plain failure", None), "plain failure");
        assert_eq!(error_message("", Some("Not Found")), "Not Found");
    }
}
