//! Remote auth client.
//!
//! Two single-attempt calls against one base address:
//! - `POST {base}/` with the credentials
//! - `POST {base}/otp` with `{"otp": "<code>"}`
//!
//! Transport problems and server rejections are reported as distinct
//! [`AuthError`] variants so the flow can show different messages.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{Map, Value};
use url::Url;

use crate::config::ServiceConfig;

/// Longest server message kept for display.
const MAX_REASON_CHARS: usize = 200;

/// Identifier and secret captured at submission. Never persisted.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub identifier: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Successful (2xx) response. The body is kept as text and not interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerAck {
    pub status: u16,
    pub body: String,
}

/// Failure of a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The request never produced a response (connect error, timeout, ...).
    Network { message: String },
    /// The server answered with a non-2xx status.
    Rejected { status: u16, reason: String },
}

impl AuthError {
    pub fn is_network(&self) -> bool {
        matches!(self, AuthError::Network { .. })
    }

    /// Short message for the user.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Network { .. } => {
                "Could not reach the sign-in service. Check your connection and try again."
                    .to_string()
            }
            AuthError::Rejected { reason, .. } => reason.clone(),
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Network { message } => write!(f, "Network error: {message}"),
            AuthError::Rejected { status, reason } => {
                write!(f, "Rejected by server (HTTP {status}): {reason}")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// The two remote operations the flow depends on.
pub trait AuthClient: Send + Sync {
    fn submit_credentials(
        &self,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<ServerAck, AuthError>> + Send;

    fn submit_otp(&self, code: &str) -> impl Future<Output = Result<ServerAck, AuthError>> + Send;
}

/// reqwest-backed client.
#[derive(Debug, Clone)]
pub struct HttpAuthClient {
    http: reqwest::Client,
    credentials_url: Url,
    otp_url: Url,
    identifier_field: String,
    secret_field: String,
}

impl HttpAuthClient {
    /// Builds a client from service settings.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn from_config(service: &ServiceConfig) -> Result<Self> {
        let base = service.parsed_base_url()?;
        Self::new(
            &base,
            service.request_timeout(),
            &service.identifier_field,
            &service.secret_field,
        )
    }

    /// # Errors
    /// Returns an error if the route URLs cannot be derived or the HTTP client cannot be built.
    pub fn new(
        base: &Url,
        timeout: Option<Duration>,
        identifier_field: &str,
        secret_field: &str,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().context("Failed to build HTTP client")?;

        let (credentials_url, otp_url) = route_urls(base)?;
        Ok(Self {
            http,
            credentials_url,
            otp_url,
            identifier_field: identifier_field.to_string(),
            secret_field: secret_field.to_string(),
        })
    }

    async fn post(&self, url: &Url, body: &Value) -> Result<ServerAck, AuthError> {
        let response = self
            .http
            .post(url.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = response.status();
        if status.is_success() {
            // A body cut short is a transport failure, not an acknowledgement.
            let text = response.text().await.map_err(|e| network_error(&e))?;
            Ok(ServerAck {
                status: status.as_u16(),
                body: text,
            })
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(AuthError::Rejected {
                status: status.as_u16(),
                reason: rejection_reason(status, &text),
            })
        }
    }
}

impl AuthClient for HttpAuthClient {
    async fn submit_credentials(&self, credentials: &Credentials) -> Result<ServerAck, AuthError> {
        let mut body = Map::new();
        body.insert(
            self.identifier_field.clone(),
            Value::String(credentials.identifier.clone()),
        );
        body.insert(
            self.secret_field.clone(),
            Value::String(credentials.secret.clone()),
        );
        tracing::debug!(url = %self.credentials_url, "submitting credentials");
        self.post(&self.credentials_url, &Value::Object(body)).await
    }

    async fn submit_otp(&self, code: &str) -> Result<ServerAck, AuthError> {
        tracing::debug!(url = %self.otp_url, "submitting otp");
        self.post(&self.otp_url, &serde_json::json!({ "otp": code }))
            .await
    }
}

/// Derives `{base}/` and `{base}/otp`, keeping any path prefix on the base.
fn route_urls(base: &Url) -> Result<(Url, Url)> {
    let mut root = base.clone();
    root.set_query(None);
    root.set_fragment(None);
    if !root.path().ends_with('/') {
        let path = format!("{}/", root.path());
        root.set_path(&path);
    }
    let otp = root
        .join("otp")
        .with_context(|| format!("Failed to derive OTP route from {base}"))?;
    Ok((root, otp))
}

fn network_error(err: &reqwest::Error) -> AuthError {
    let message = if err.is_timeout() {
        "request timed out".to_string()
    } else if err.is_connect() {
        format!("connection failed: {err}")
    } else if err.is_body() || err.is_decode() {
        format!("failed to read response: {err}")
    } else {
        err.to_string()
    };
    AuthError::Network { message }
}

/// Trimmed, truncated body, or the status reason when the body is blank.
///
/// A JSON body with a string `message` or `error` field contributes just that field.
fn rejection_reason(status: StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    let extracted = serde_json::from_str::<Value>(trimmed).ok().and_then(|v| {
        ["message", "error"]
            .iter()
            .find_map(|k| v.get(k).and_then(Value::as_str).map(str::to_string))
    });
    let text = extracted.as_deref().unwrap_or(trimmed).trim();

    if text.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        text.chars().take(MAX_REASON_CHARS).collect()
    }
}
