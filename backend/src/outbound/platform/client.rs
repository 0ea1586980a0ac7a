//! Reqwest-backed client for the hosted platform's REST interface.
//!
//! This module owns transport details only: endpoint construction, auth
//! headers, timeouts, HTTP error mapping, and JSON decoding. No retries are
//! performed anywhere; the remote procedures' idempotency is unknown, so
//! every call is exactly one attempt.

use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error as ThisError;
use tracing::debug;
use zeroize::Zeroizing;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
/// How much of an error body to keep for operator diagnostics.
const ERROR_BODY_SNIPPET_CHARS: usize = 300;

/// Service credential for the platform, wiped from memory on drop.
pub struct ServiceKey(Zeroizing<String>);

impl ServiceKey {
    /// Wrap a raw credential.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Borrow the credential for header construction.
    fn reveal(&self) -> &str {
        self.0.as_str()
    }

    /// Short SHA-256 fingerprint safe to log at startup.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        let hex = hex::encode(digest);
        hex.chars().take(12).collect()
    }
}

impl std::fmt::Debug for ServiceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ServiceKey({})", self.fingerprint())
    }
}

/// Connection settings for the platform.
pub struct PlatformSettings {
    /// REST root of the platform (the segment `rpc/` and table names are
    /// appended to it).
    pub rest_url: Url,
    /// Service credential sent as `apikey` and bearer token.
    pub service_key: ServiceKey,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl PlatformSettings {
    /// Settings with the default request timeout.
    pub fn new(rest_url: Url, service_key: ServiceKey) -> Self {
        Self {
            rest_url,
            service_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
        }
    }
}

/// Transport-level failures surfaced by [`PlatformClient`].
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum PlatformError {
    /// Client construction or endpoint configuration is invalid.
    #[error("platform configuration error: {message}")]
    Config {
        /// Operator-facing failure detail.
        message: String,
    },
    /// The request never produced an HTTP response.
    #[error("platform transport error: {message}")]
    Transport {
        /// Operator-facing failure detail.
        message: String,
    },
    /// The platform answered with a non-success status.
    #[error("platform responded {status}: {message}")]
    Status {
        /// HTTP status code received.
        status: u16,
        /// Truncated response body for diagnostics.
        message: String,
    },
    /// The response body was not the expected JSON.
    #[error("platform response decode error: {message}")]
    Decode {
        /// Operator-facing failure detail.
        message: String,
    },
}

impl PlatformError {
    fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    fn transport(error: &reqwest::Error) -> Self {
        Self::Transport {
            message: error.to_string(),
        }
    }

    fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Thin typed client over the platform's REST interface.
pub struct PlatformClient {
    http: Client,
    rest_url: Url,
    service_key: ServiceKey,
}

impl PlatformClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Config`] when the base URL cannot carry path
    /// segments or the HTTP client cannot be constructed.
    pub fn new(settings: PlatformSettings) -> Result<Self, PlatformError> {
        if settings.rest_url.cannot_be_a_base() {
            return Err(PlatformError::config("rest URL cannot be a base"));
        }
        let http = Client::builder()
            .timeout(settings.timeout)
            .build()
            .map_err(|error| PlatformError::config(error.to_string()))?;
        debug!(
            key_fingerprint = %settings.service_key.fingerprint(),
            "platform client initialised"
        );
        Ok(Self {
            http,
            rest_url: settings.rest_url,
            service_key: settings.service_key,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, PlatformError> {
        let mut url = self.rest_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|()| PlatformError::config("rest URL cannot carry path segments"))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", self.service_key.reveal())
            .header(
                AUTHORIZATION,
                format!("Bearer {}", self.service_key.reveal()),
            )
            .header(ACCEPT, "application/json")
    }

    /// Invoke a named remote procedure with a JSON parameter object.
    pub async fn rpc(&self, function: &str, params: &Value) -> Result<Value, PlatformError> {
        let url = self.endpoint(&["rpc", function])?;
        let response = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, "application/json")
            .json(params)
            .send()
            .await
            .map_err(|error| PlatformError::transport(&error))?;
        Self::read_json(response).await
    }

    /// Read rows from a table using query-string filters.
    pub async fn select(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<Value, PlatformError> {
        let url = self.endpoint(&[table])?;
        let response = self
            .request(Method::GET, url)
            .query(filters)
            .send()
            .await
            .map_err(|error| PlatformError::transport(&error))?;
        Self::read_json(response).await
    }

    /// Insert one row into a table.
    pub async fn insert(&self, table: &str, row: &Value) -> Result<(), PlatformError> {
        let url = self.endpoint(&[table])?;
        let response = self
            .request(Method::POST, url)
            .header("Prefer", "return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|error| PlatformError::transport(&error))?;
        Self::expect_success(response).await
    }

    /// Insert or replace one row, using `on_conflict` as the merge target.
    pub async fn upsert(
        &self,
        table: &str,
        row: &Value,
        on_conflict: &str,
    ) -> Result<(), PlatformError> {
        let url = self.endpoint(&[table])?;
        let response = self
            .request(Method::POST, url)
            .query(&[("on_conflict", on_conflict)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(row)
            .send()
            .await
            .map_err(|error| PlatformError::transport(&error))?;
        Self::expect_success(response).await
    }

    /// Delete rows matching the filters; returns the number removed.
    pub async fn delete(
        &self,
        table: &str,
        filters: &[(&str, String)],
    ) -> Result<u64, PlatformError> {
        let url = self.endpoint(&[table])?;
        let response = self
            .request(Method::DELETE, url)
            .query(filters)
            .header("Prefer", "return=representation")
            .send()
            .await
            .map_err(|error| PlatformError::transport(&error))?;
        let rows = Self::read_json(response).await?;
        Ok(rows.as_array().map(Vec::len).unwrap_or(0) as u64)
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, PlatformError> {
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|error| PlatformError::transport(&error))?;
        if !status.is_success() {
            return Err(Self::status_error(status, body.as_ref()));
        }
        if body.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(body.as_ref())
            .map_err(|error| PlatformError::decode(format!("invalid JSON payload: {error}")))
    }

    async fn expect_success(response: reqwest::Response) -> Result<(), PlatformError> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .bytes()
            .await
            .map_err(|error| PlatformError::transport(&error))?;
        Err(Self::status_error(status, body.as_ref()))
    }

    fn status_error(status: StatusCode, body: &[u8]) -> PlatformError {
        let snippet: String = String::from_utf8_lossy(body)
            .chars()
            .take(ERROR_BODY_SNIPPET_CHARS)
            .collect();
        PlatformError::Status {
            status: status.as_u16(),
            message: snippet,
        }
    }
}
