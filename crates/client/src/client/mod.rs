//! Secret-store sidecar client.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Retries; a failed fetch is returned to the caller as-is

pub mod builder;

use std::time::Duration;

use confstrap_config::SecretEntry;

use crate::client::builder::SecretStoreClientBuilder;
use crate::endpoints;
use crate::error::Result;

/// HTTP client for the sidecar secrets API.
#[derive(Debug, Clone)]
pub struct SecretStoreClient {
    pub(crate) http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) timeout: Option<Duration>,
}

impl SecretStoreClient {
    /// Create a new client builder.
    pub fn builder() -> SecretStoreClientBuilder {
        SecretStoreClientBuilder::new()
    }

    /// Get the base URL of the sidecar.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request timeout configured on the internal HTTP client, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Fetch every secret in `store`.
    ///
    /// Entries keep the response order; null values are returned without a value.
    pub async fn fetch_bulk_secrets(&self, store: &str) -> Result<Vec<SecretEntry>> {
        endpoints::get_bulk_secrets(&self.http, &self.base_url, store, self.timeout).await
    }
}
