//! Resolution cache for configuration lookups.
//!
//! Purpose: Memoize resolved setting values for the lifetime of a configuration service.
//! Responsibilities: Store each value under the `(setting_name, key)` request that produced it,
//! remember the spelling that matched, and expose hit/miss counters.
//! Non-scope: Expiry, eviction, or invalidation; resolved values are immutable once cached.
//! Invariants/Assumptions:
//! - Entries are scoped to one request pair; a value resolved for one setting name is never
//!   returned for another, even when both chains share the bare `{key}` spelling.
//! - Inserts are insert-if-absent, so racing writers agree on the first value.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use moka::sync::Cache as MokaCache;
use tracing::trace;

/// The `(setting_name, key)` pair a caller asked for, exact case.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct RequestKey {
    setting_name: String,
    key: String,
}

impl RequestKey {
    fn new(setting_name: &str, key: &str) -> Self {
        Self {
            setting_name: setting_name.to_string(),
            key: key.to_string(),
        }
    }
}

#[derive(Clone)]
struct Resolved {
    spelling: Arc<str>,
    value: String,
}

/// Concurrent cache of resolved configuration values.
///
/// Cloning is cheap and shares the underlying storage.
#[derive(Clone)]
pub struct ResolutionCache {
    inner: MokaCache<RequestKey, Resolved>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl ResolutionCache {
    /// Create an empty, unbounded cache.
    pub fn new() -> Self {
        Self {
            inner: MokaCache::builder().build(),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Look up the cached value for a request without touching the counters.
    pub fn get(&self, setting_name: &str, key: &str) -> Option<String> {
        self.inner
            .get(&RequestKey::new(setting_name, key))
            .map(|resolved| resolved.value)
    }

    /// The spelling that supplied the cached value for a request.
    pub fn matched_spelling(&self, setting_name: &str, key: &str) -> Option<String> {
        self.inner
            .get(&RequestKey::new(setting_name, key))
            .map(|resolved| resolved.spelling.to_string())
    }

    /// Whether a value is cached for the request.
    pub fn contains(&self, setting_name: &str, key: &str) -> bool {
        self.inner.contains_key(&RequestKey::new(setting_name, key))
    }

    /// Store `value`, found under `spelling`, unless another caller already did.
    ///
    /// Returns the cached value.
    pub fn insert_if_absent(
        &self,
        setting_name: &str,
        key: &str,
        spelling: &str,
        value: String,
    ) -> String {
        trace!(setting_name, key, spelling, "Caching resolved setting");
        self.inner
            .entry(RequestKey::new(setting_name, key))
            .or_insert(Resolved {
                spelling: Arc::from(spelling),
                value,
            })
            .into_value()
            .value
    }

    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Get cache statistics.
    pub fn stats(&self) -> CacheStats {
        self.inner.run_pending_tasks();
        CacheStats {
            entry_count: self.inner.entry_count(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResolutionCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may be secrets.
        f.debug_struct("ResolutionCache")
            .field("stats", &self.stats())
            .finish()
    }
}

/// Cache statistics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of cached requests.
    pub entry_count: u64,
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to consult the configuration.
    pub misses: u64,
}

impl fmt::Display for CacheStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Cache {{ entries: {}, hits: {}, misses: {} }}",
            self.entry_count, self.hits, self.misses
        )
    }
}
