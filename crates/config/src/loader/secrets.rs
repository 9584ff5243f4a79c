//! Secret sources feeding the configuration tree.
//!
//! Responsibilities:
//! - Define the `SecretSource` seam implemented by the sidecar client and by
//!   integrator-provided key-vault adapters.
//! - Turn fetched secret entries into a configuration layer.
//!
//! Does NOT handle:
//! - Any network protocol (see the client crate).
//! - Choosing which backend to use (see `env.rs`).
//!
//! Invariants:
//! - Entries whose value is null are dropped.
//! - Duplicate keys (case-insensitive) are dropped; the first occurrence wins.
//! - Secret values stay wrapped in `SecretString` until written into the layer.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::error::ConfigError;
use crate::tree::{Layer, LayerSource};

/// A single secret returned by a secret source.
#[derive(Debug, Clone)]
pub struct SecretEntry {
    pub key: String,
    /// `None` when the store reported a null value.
    pub value: Option<SecretString>,
}

impl SecretEntry {
    pub fn new(key: impl Into<String>, value: Option<String>) -> Self {
        Self {
            key: key.into(),
            value: value.map(|v| SecretString::new(v.into())),
        }
    }
}

/// A source of secrets loaded once at startup.
#[async_trait]
pub trait SecretSource: Send + Sync {
    /// Fetch every secret the source exposes.
    ///
    /// Failures are returned as-is; the loader does not retry or swallow them.
    async fn fetch_secrets(&self) -> Result<Vec<SecretEntry>, ConfigError>;
}

/// Builds secret sources for the backend the environment selects.
pub trait SecretSourceFactory: Send + Sync {
    /// Source for the sidecar secret store at `base_url`.
    fn secret_store(&self, base_url: &str, store: &str) -> Arc<dyn SecretSource>;

    /// Source for the key vault at `vault_url`, if the host can provide one.
    fn key_vault(&self, vault_url: &str) -> Option<Arc<dyn SecretSource>>;
}

/// Factory for hosts that run without any secret backend.
///
/// Selecting a secret store or key vault with this factory fails the load.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoSecretSources;

struct UnavailableSource {
    origin: String,
}

#[async_trait]
impl SecretSource for UnavailableSource {
    async fn fetch_secrets(&self) -> Result<Vec<SecretEntry>, ConfigError> {
        Err(ConfigError::secret_source(
            self.origin.clone(),
            "no secret-store client is registered",
        ))
    }
}

impl SecretSourceFactory for NoSecretSources {
    fn secret_store(&self, _base_url: &str, store: &str) -> Arc<dyn SecretSource> {
        Arc::new(UnavailableSource {
            origin: format!("secret-store:{store}"),
        })
    }

    fn key_vault(&self, _vault_url: &str) -> Option<Arc<dyn SecretSource>> {
        None
    }
}

/// Build a secret layer, dropping null values and duplicate keys.
pub fn secret_layer(source: LayerSource, entries: Vec<SecretEntry>) -> Layer {
    let mut seen = HashSet::new();
    let mut layer = Layer::new(source);
    let mut dropped = 0usize;

    for entry in entries {
        let Some(value) = entry.value else {
            dropped += 1;
            continue;
        };
        if !seen.insert(entry.key.to_ascii_lowercase()) {
            dropped += 1;
            continue;
        }
        layer.insert(entry.key, value.expose_secret());
    }

    debug!(
        source = %layer.source(),
        secrets = layer.len(),
        dropped,
        "Built secret layer"
    );
    layer
}
