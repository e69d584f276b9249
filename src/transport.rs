//! Transport client
//!
//! Single configured HTTP client shared by the orchestrators. Requests are
//! described by an [`ApiCall`]; a credential attached to a call is moved into
//! the `X-API-Key` header at send time and never appears in the call's
//! `Debug` output.

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value as JsonValue;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

pub type ApiResult<T> = Result<T, ApiError>;

/// Transport-level failure carrying, where available, the HTTP status and the
/// server-supplied detail text verbatim.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("HTTP {status}: {detail}")]
    Http { status: u16, detail: String },

    #[error("Network error: {message}")]
    Network { message: String, connect: bool },

    #[error("Decode error: {message}")]
    Decode { message: String },
}

impl ApiError {
    /// Retryable-failure predicate for the merchant-creation fallback:
    /// the preferred address was unreachable or returned 404.
    pub fn is_routing_miss(&self) -> bool {
        match self {
            ApiError::Http { status, .. } => *status == 404,
            ApiError::Network { connect, .. } => *connect,
            ApiError::Decode { .. } => false,
        }
    }
}

/// Opaque caller-supplied key identifying a merchant.
///
/// The raw key is only readable through [`Credential::expose`]; `Debug`
/// output is redacted so call descriptors can be logged safely.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

impl From<&str> for Credential {
    fn from(key: &str) -> Self {
        Credential::new(key)
    }
}

impl From<String> for Credential {
    fn from(key: String) -> Self {
        Credential::new(key)
    }
}

/// Description of one outbound request against a service base address.
#[derive(Debug, Clone)]
pub struct ApiCall {
    pub method: Method,
    pub base: String,
    pub path: String,
    pub credential: Option<Credential>,
    pub body: Option<JsonValue>,
}

impl ApiCall {
    pub fn new(method: Method, base: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method,
            base: base.into(),
            path: path.into(),
            credential: None,
            body: None,
        }
    }

    pub fn get(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::GET, base, path)
    }

    pub fn post(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::POST, base, path)
    }

    pub fn put(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::PUT, base, path)
    }

    pub fn patch(base: impl Into<String>, path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, base, path)
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }

    pub fn url(&self) -> String {
        format!("{}{}", self.base, self.path)
    }
}

/// Seam between the orchestrators and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue the call and decode the response body as JSON.
    async fn send(&self, call: ApiCall) -> ApiResult<JsonValue>;

    /// Issue the call and return the raw response body (opaque payloads such
    /// as the rendered dashboard document).
    async fn send_text(&self, call: ApiCall) -> ApiResult<String>;
}

/// reqwest-backed [`Transport`]. One configured client, no retries; the
/// timeout is fixed at construction and not overridable per call.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Network {
                message: format!("failed to initialize HTTP client: {}", e),
                connect: false,
            })?;

        Ok(Self { client })
    }

    async fn execute(&self, call: ApiCall) -> ApiResult<(StatusCode, String)> {
        let url = call.url();
        debug!(method = %call.method, url = %url, "issuing backend request");

        let mut request = self.client.request(call.method, &url);
        // The credential leaves the call descriptor here and only ever
        // exists as a header on the outbound request.
        if let Some(credential) = call.credential {
            request = request.header("X-API-Key", credential.expose());
        }
        if let Some(payload) = &call.body {
            request = request.json(payload);
        }

        let response = request.send().await.map_err(|e| ApiError::Network {
            message: format!("request to {} failed: {}", url, e),
            connect: e.is_connect(),
        })?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| body_read_error(&url, e))?;
        if status.is_success() {
            return Ok((status, text));
        }

        Err(ApiError::Http {
            status: status.as_u16(),
            detail: extract_detail(&text),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, call: ApiCall) -> ApiResult<JsonValue> {
        let (_, text) = self.execute(call).await?;
        serde_json::from_str(&text).map_err(|e| ApiError::Decode {
            message: format!("invalid JSON response: {}", e),
        })
    }

    async fn send_text(&self, call: ApiCall) -> ApiResult<String> {
        let (_, text) = self.execute(call).await?;
        Ok(text)
    }
}

/// A success status whose body cannot be read is a network failure naming
/// the real cause, not an empty or undecodable payload.
fn body_read_error(url: &str, err: impl fmt::Display) -> ApiError {
    ApiError::Network {
        message: format!("failed to read response body from {}: {}", url, err),
        connect: false,
    }
}

/// Pull the human-readable detail out of a backend error body. The services
/// answer with `{"detail": "..."}`; anything else is surfaced as-is.
fn extract_detail(body: &str) -> String {
    serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned())
        .and_then(|d| match d {
            JsonValue::String(s) => Some(s),
            other => Some(other.to_string()),
        })
        .unwrap_or_else(|| body.to_string())
}
