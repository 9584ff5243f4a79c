//! Layered configuration bootstrap.
//!
//! This crate assembles an application's configuration from settings files,
//! a secret backend, and the process environment, expands `%NAME%`
//! placeholders, and resolves settings through a cached precedence chain.

pub mod connection;
pub mod constants;
pub mod expand;
pub mod loader;
pub mod resolver;
mod service;
pub mod tree;

pub use connection::database_name_from_connection_string;
pub use expand::{ExpandableSource, expand_placeholders, expand_source};
pub use loader::{
    ConfigError, ConfigLoader, NoSecretSources, SecretBackend, SecretEntry, SecretSource,
    SecretSourceFactory, SourceError, env_var_or_none,
};
pub use resolver::{CacheStats, ResolutionCache, ResolverOptions, get_config_value};
pub use service::ConfigService;
pub use tree::{ConfigurationTree, Layer, LayerSource, SettingsSource};
