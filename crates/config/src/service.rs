//! Configuration service shared with request handlers.
//!
//! Responsibilities:
//! - Own the assembled configuration tree and its resolution cache.
//! - Expose the synchronous `get_config_value` lookup used after startup.
//!
//! Does NOT handle:
//! - Reloading; the tree is fixed once assembled.
//!
//! Invariants:
//! - One cache per service instance; services never share cached values.
//! - The service is immutable after construction and safe to share via `Arc`.

use std::sync::Arc;

use crate::connection::database_name_from_connection_string;
use crate::loader::{ConfigError, ConfigLoader, SecretSourceFactory};
use crate::resolver::{CacheStats, ResolutionCache, ResolverOptions, get_config_value};
use crate::tree::ConfigurationTree;

/// Assembled configuration plus its lookup cache.
#[derive(Debug)]
pub struct ConfigService {
    tree: ConfigurationTree,
    cache: ResolutionCache,
    options: ResolverOptions,
}

impl ConfigService {
    /// Wrap an already assembled tree.
    pub fn new(tree: ConfigurationTree) -> Self {
        Self::with_options(tree, ResolverOptions::default())
    }

    /// Wrap a tree with explicit resolver options.
    pub fn with_options(tree: ConfigurationTree, options: ResolverOptions) -> Self {
        Self {
            tree,
            cache: ResolutionCache::new(),
            options,
        }
    }

    /// Assemble the configuration once at startup.
    ///
    /// No timeout is applied; wrap the call in `tokio::time::timeout` to bound it.
    pub async fn assemble(
        loader: &ConfigLoader,
        sources: &dyn SecretSourceFactory,
        options: ResolverOptions,
    ) -> Result<Arc<Self>, ConfigError> {
        let tree = loader.load(sources).await?;
        Ok(Arc::new(Self::with_options(tree, options)))
    }

    /// Resolve `key` under `setting_name`, falling back to `default_value`.
    pub fn get_config_value(&self, key: &str, default_value: &str, setting_name: &str) -> String {
        get_config_value(
            &self.tree,
            &self.cache,
            self.options,
            key,
            default_value,
            setting_name,
        )
    }

    /// Resolve a connection string setting and extract its database name.
    pub fn database_name(&self, key: &str, setting_name: &str) -> Option<String> {
        let connection_string = self.get_config_value(key, "", setting_name);
        database_name_from_connection_string(&connection_string)
    }

    pub fn tree(&self) -> &ConfigurationTree {
        &self.tree
    }

    pub fn options(&self) -> ResolverOptions {
        self.options
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
