//! Secret sources backed by the sidecar client.
//!
//! Responsibilities:
//! - Adapt [`SecretStoreClient`] to the loader's `SecretSource` seam.
//! - Provide [`SidecarSecretSources`], the factory hosts hand to `ConfigLoader::load`.
//!
//! Does NOT handle:
//! - Key-vault access; hosts register their own key-vault source constructor.
//!
//! Invariants:
//! - Client errors are wrapped in `ConfigError::SecretSource` with their cause kept.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use confstrap_config::{ConfigError, SecretEntry, SecretSource, SecretSourceFactory};
use tracing::debug;

use crate::client::SecretStoreClient;

/// Constructor for a key-vault secret source, given the vault URL.
pub type KeyVaultConstructor = Arc<dyn Fn(&str) -> Arc<dyn SecretSource> + Send + Sync>;

/// One secret store reached through the sidecar.
#[derive(Debug, Clone)]
pub struct SecretStoreSource {
    base_url: String,
    store: String,
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
}

impl SecretStoreSource {
    pub fn new(base_url: impl Into<String>, store: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            store: store.into(),
            timeout: None,
            http: None,
        }
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    fn origin(&self) -> String {
        format!("secret-store:{}", self.store)
    }

    fn client(&self) -> Result<SecretStoreClient, ConfigError> {
        let mut builder = SecretStoreClient::builder().base_url(self.base_url.clone());
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(http) = &self.http {
            builder = builder.http_client(http.clone());
        }
        builder
            .build()
            .map_err(|e| ConfigError::secret_source(self.origin(), e))
    }
}

#[async_trait]
impl SecretSource for SecretStoreSource {
    async fn fetch_secrets(&self) -> Result<Vec<SecretEntry>, ConfigError> {
        let client = self.client()?;
        let entries = client
            .fetch_bulk_secrets(&self.store)
            .await
            .map_err(|e| ConfigError::secret_source(self.origin(), e))?;
        debug!(store = %self.store, count = entries.len(), "Fetched secrets");
        Ok(entries)
    }
}

/// Secret source factory for sidecar-hosted stores.
#[derive(Clone, Default)]
pub struct SidecarSecretSources {
    timeout: Option<Duration>,
    http: Option<reqwest::Client>,
    key_vault: Option<KeyVaultConstructor>,
}

impl SidecarSecretSources {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a request timeout to every sidecar request.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Use a caller-configured HTTP client for sidecar requests.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = Some(client);
        self
    }

    /// Register how to build a key-vault source when `KV_NAME` selects one.
    pub fn with_key_vault<F>(mut self, constructor: F) -> Self
    where
        F: Fn(&str) -> Arc<dyn SecretSource> + Send + Sync + 'static,
    {
        self.key_vault = Some(Arc::new(constructor));
        self
    }
}

impl fmt::Debug for SidecarSecretSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SidecarSecretSources")
            .field("timeout", &self.timeout)
            .field("custom_http_client", &self.http.is_some())
            .field("key_vault", &self.key_vault.is_some())
            .finish()
    }
}

impl SecretSourceFactory for SidecarSecretSources {
    fn secret_store(&self, base_url: &str, store: &str) -> Arc<dyn SecretSource> {
        Arc::new(SecretStoreSource {
            base_url: base_url.to_string(),
            store: store.to_string(),
            timeout: self.timeout,
            http: self.http.clone(),
        })
    }

    fn key_vault(&self, vault_url: &str) -> Option<Arc<dyn SecretSource>> {
        self.key_vault
            .as_ref()
            .map(|constructor| constructor(vault_url))
    }
}
