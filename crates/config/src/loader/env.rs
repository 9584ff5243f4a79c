//! Environment variable handling for configuration loading.
//!
//! Responsibilities:
//! - Read environment variables with empty/whitespace filtering.
//! - Snapshot the process environment as the final configuration layer.
//! - Decide which secret backend (if any) the environment selects.
//!
//! Does NOT handle:
//! - Fetching secrets (see `secrets.rs` and the client crate).
//! - Placeholder expansion against the environment (see `expand.rs`).
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed (leading/trailing whitespace removed).
//! - Environment layer keys have `__` normalized to the `:` section delimiter.
//! - Variables whose name or value is not valid UTF-8 are skipped.

use crate::constants::{
    DEFAULT_SIDECAR_HOST, DEFAULT_SIDECAR_PORT, ENV_ENVIRONMENT_NAME, ENV_IS_LOCAL,
    ENV_KEY_VAULT_NAME, ENV_SECRET_STORE, ENV_SIDECAR_BASE_URL, ENV_SIDECAR_HTTP_PORT,
    KEY_DELIMITER,
};
use crate::tree::{Layer, LayerSource};

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            // No trimming needed, return original to avoid allocation
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Whether `IsLocal` is set to `true` (case-insensitive).
pub fn is_local_from_env() -> bool {
    env_var_or_none(ENV_IS_LOCAL).is_some_and(|value| value.eq_ignore_ascii_case("true"))
}

/// Pick the environment name: the explicit one if non-blank, else `ASPNETCORE_ENVIRONMENT`.
pub fn resolve_environment_name(explicit: Option<&str>) -> Option<String> {
    explicit
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .or_else(|| env_var_or_none(ENV_ENVIRONMENT_NAME))
}

/// Snapshot the process environment into a configuration layer.
pub fn environment_layer() -> Layer {
    let mut layer = Layer::new(LayerSource::Environment);
    for (name, value) in std::env::vars_os() {
        let (Some(name), Some(value)) = (name.to_str(), value.to_str()) else {
            continue;
        };
        layer.insert(normalize_env_key(name), value);
    }
    layer
}

/// Map `Section__Key` to `Section:Key`.
pub fn normalize_env_key(name: &str) -> String {
    name.replace("__", KEY_DELIMITER)
}

/// Base URL of the secret-store sidecar: `{AppSettings__BaseUrl}:{DAPR_HTTP_PORT}`.
pub fn sidecar_base_url() -> String {
    let host = env_var_or_none(ENV_SIDECAR_BASE_URL)
        .unwrap_or_else(|| DEFAULT_SIDECAR_HOST.to_string());
    let port =
        env_var_or_none(ENV_SIDECAR_HTTP_PORT).unwrap_or_else(|| DEFAULT_SIDECAR_PORT.to_string());
    format!("{}:{}", host.trim_end_matches('/'), port)
}

/// Vault URL for a key-vault name.
pub fn key_vault_url(name: &str) -> String {
    format!("https://{name}.vault.azure.net/")
}

/// Secret backend selected by the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretBackend {
    /// No secret layer is added.
    None,
    /// Bulk fetch from the sidecar secret store.
    SecretStore { base_url: String, store: String },
    /// Fetch all secrets from a key vault.
    KeyVault { name: String, vault_url: String },
}

impl SecretBackend {
    /// Select the backend from `DAPR_SECRET_STORE` and `KV_NAME`.
    ///
    /// The key vault is only used when no secret store is configured.
    pub fn from_env() -> Self {
        match (
            env_var_or_none(ENV_SECRET_STORE),
            env_var_or_none(ENV_KEY_VAULT_NAME),
        ) {
            (Some(store), _) => Self::SecretStore {
                base_url: sidecar_base_url(),
                store,
            },
            (None, Some(name)) => Self::KeyVault {
                vault_url: key_vault_url(&name),
                name,
            },
            (None, None) => Self::None,
        }
    }
}
