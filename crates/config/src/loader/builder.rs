//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for layered configuration assembly.
//! - Load the base and environment-specific settings files, the secret layer,
//!   and the process environment, in that precedence order.
//! - Run the placeholder expansion pass once the layers are in place.
//!
//! Does NOT handle:
//! - Environment variable parsing details (delegated to env.rs).
//! - JSON flattening (delegated to file.rs).
//! - Talking to a secret store (delegated to a `SecretSourceFactory`).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over secrets, secrets over files.
//! - Missing settings files are skipped; malformed ones fail the load.
//! - Secret source failures propagate unchanged; nothing is retried.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::env::{SecretBackend, environment_layer, is_local_from_env, resolve_environment_name};
use super::error::ConfigError;
use super::file::load_optional_json_file;
use super::secrets::{SecretSourceFactory, secret_layer};
use crate::constants::{BASE_SETTINGS_FILE, SETTINGS_FILE_STEM};
use crate::expand::expand_source;
use crate::tree::{ConfigurationTree, Layer, LayerSource};

/// Configuration loader that assembles the layered configuration tree.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    content_root: PathBuf,
    environment_name: Option<String>,
    local: bool,
    memory_layers: Vec<Layer>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader rooted at the current directory.
    pub fn new() -> Self {
        Self {
            content_root: PathBuf::from("."),
            environment_name: None,
            local: false,
            memory_layers: Vec::new(),
        }
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` environment variable is set to "true" or "1",
    /// the .env file will not be loaded (useful for testing).
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `.env` file exists but has invalid syntax (`ConfigError::DotenvParse`)
    /// - The `.env` file exists but cannot be read due to I/O errors (`ConfigError::DotenvIo`)
    ///
    /// Missing `.env` files are silently ignored (returns `Ok(self)`).
    ///
    /// SAFETY: Error messages never include raw .env line contents to prevent secret leakage.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    /// Check if a dotenv error indicates the file was not found.
    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Directory that holds `appsettings.json` and its environment variants.
    pub fn with_content_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.content_root = path.into();
        self
    }

    /// Environment name selecting `appsettings.{name}.json`.
    ///
    /// Blank names fall back to `ASPNETCORE_ENVIRONMENT`.
    pub fn with_environment_name(mut self, name: impl Into<String>) -> Self {
        self.environment_name = Some(name.into());
        self
    }

    /// Run in local mode: no secret layer is loaded.
    ///
    /// Local mode is also enabled when `IsLocal=true` is set in the environment.
    pub fn local(mut self, local: bool) -> Self {
        self.local = local;
        self
    }

    /// Add host-provided entries above the settings files and below secrets.
    pub fn with_memory_layer<I, K, V>(mut self, name: impl Into<String>, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.memory_layers.push(Layer::from_pairs(
            LayerSource::Memory { name: name.into() },
            pairs,
        ));
        self
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    /// Whether the loader will skip the secret layer.
    pub fn is_local(&self) -> bool {
        self.local || is_local_from_env()
    }

    /// Path of the environment-specific settings file, if an environment is set.
    pub fn environment_file(&self) -> Option<PathBuf> {
        resolve_environment_name(self.environment_name.as_deref()).map(|name| {
            self.content_root
                .join(format!("{SETTINGS_FILE_STEM}.{name}.json"))
        })
    }

    /// Assemble the configuration tree.
    ///
    /// # Errors
    ///
    /// Returns an error if a settings file exists but cannot be read or parsed,
    /// if a key vault is selected without a provider, or if fetching secrets fails.
    pub async fn load(
        &self,
        sources: &dyn SecretSourceFactory,
    ) -> Result<ConfigurationTree, ConfigError> {
        let mut tree = ConfigurationTree::new();

        let base_path = self.content_root.join(BASE_SETTINGS_FILE);
        if let Some(layer) = load_optional_json_file(&base_path)? {
            tree.push_layer(layer);
        }

        if let Some(path) = self.environment_file() {
            if path.exists() {
                if let Some(layer) = load_optional_json_file(&path)? {
                    tree.push_layer(layer);
                }
            } else {
                debug!(path = %path.display(), "No environment-specific settings file");
            }
        }

        for layer in &self.memory_layers {
            tree.push_layer(layer.clone());
        }

        let local = self.is_local();
        if local {
            debug!("Local mode, skipping secret layer");
        } else if let Some(layer) = Self::load_secret_layer(sources).await? {
            tree.push_layer(layer);
        }

        tree.push_layer(environment_layer());

        expand_source(&mut tree);

        info!(
            layers = tree.len(),
            content_root = %self.content_root.display(),
            local,
            "Configuration assembled"
        );
        Ok(tree)
    }

    async fn load_secret_layer(
        sources: &dyn SecretSourceFactory,
    ) -> Result<Option<Layer>, ConfigError> {
        match SecretBackend::from_env() {
            SecretBackend::None => {
                debug!("No secret store or key vault configured");
                Ok(None)
            }
            SecretBackend::SecretStore { base_url, store } => {
                debug!(%base_url, %store, "Fetching secrets from secret store");
                let entries = sources.secret_store(&base_url, &store).fetch_secrets().await?;
                Ok(Some(secret_layer(LayerSource::SecretStore { store }, entries)))
            }
            SecretBackend::KeyVault { name, vault_url } => {
                let Some(source) = sources.key_vault(&vault_url) else {
                    warn!(%vault_url, "Key vault configured but no provider registered");
                    return Err(ConfigError::KeyVaultUnavailable { vault_url });
                };
                debug!(%vault_url, "Fetching secrets from key vault");
                let entries = source.fetch_secrets().await?;
                Ok(Some(secret_layer(LayerSource::KeyVault { vault: name }, entries)))
            }
        }
    }
}
