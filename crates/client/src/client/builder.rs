//! Client builder for constructing [`SecretStoreClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating and normalizing the sidecar base URL
//! - Configuring the underlying HTTP client (optional timeout)
//!
//! # What this module does NOT handle:
//! - Actual API calls (handled by [`crate::endpoints`])
//!
//! # Invariants
//! - `base_url` is required and must parse as an absolute `http`/`https` URL
//! - The base URL is always normalized to have no trailing slashes
//! - No timeout is applied unless one is set or a custom client carries one

use std::time::Duration;

use reqwest::Url;

use crate::client::SecretStoreClient;
use crate::error::{ClientError, Result};

/// Builder for creating a new [`SecretStoreClient`].
///
/// # Example
///
/// ```rust,ignore
/// use confstrap_client::SecretStoreClient;
///
/// let client = SecretStoreClient::builder()
///     .base_url("http://localhost:3500".to_string())
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Debug, Default)]
pub struct SecretStoreClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl SecretStoreClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sidecar base URL, e.g. `http://localhost:3500`.
    ///
    /// Trailing slashes will be automatically removed.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set a request timeout on the internally built HTTP client.
    ///
    /// Ignored when a custom client is supplied via [`Self::http_client`].
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a caller-configured HTTP client.
    pub fn http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Normalize a base URL by removing trailing slashes.
    ///
    /// - `"http://localhost:3500/"` -> `"http://localhost:3500"`
    /// - `"http://sidecar:3500//"` -> `"http://sidecar:3500"`
    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`SecretStoreClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` is missing or not an
    /// absolute `http`/`https` URL.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<SecretStoreClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let parsed = Url::parse(&base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidUrl(format!(
                "{base_url}: unsupported scheme '{}'",
                parsed.scheme()
            )));
        }

        let (http, timeout) = match self.http {
            Some(client) => (client, None),
            None => {
                let mut http_builder = reqwest::Client::builder();
                if let Some(timeout) = self.timeout {
                    http_builder = http_builder.timeout(timeout);
                }
                (http_builder.build()?, self.timeout)
            }
        };

        Ok(SecretStoreClient {
            http,
            base_url,
            timeout,
        })
    }
}
