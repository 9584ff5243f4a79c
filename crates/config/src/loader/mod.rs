//! Configuration loader for settings files, secrets, and environment variables.
//!
//! Responsibilities:
//! - Build the layered `ConfigurationTree` from `appsettings*.json`, a secret
//!   backend, and the process environment.
//! - Provide a builder-pattern `ConfigLoader` and the `SecretSource` seam.
//! - Enforce the `DOTENV_DISABLED` gate before `.env` loading.
//!
//! Does NOT handle:
//! - HTTP communication with the secret sidecar (see `crates/client`).
//! - Resolving individual settings (see `resolver`).
//!
//! Invariants / Assumptions:
//! - Layer order is: base file, environment file, memory layers, secrets, environment.
//! - Placeholder expansion runs exactly once, after every layer is loaded.

mod builder;
mod env;
mod error;
mod file;
mod secrets;

#[cfg(test)]
mod tests;

pub use builder::ConfigLoader;
pub use env::{
    SecretBackend, env_var_or_none, environment_layer, is_local_from_env, key_vault_url,
    normalize_env_key, resolve_environment_name, sidecar_base_url,
};
pub use error::{ConfigError, SourceError};
pub use file::{load_optional_json_file, parse_json_layer};
pub use secrets::{NoSecretSources, SecretEntry, SecretSource, SecretSourceFactory, secret_layer};
