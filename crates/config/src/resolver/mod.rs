//! Lookup resolver for logical settings.
//!
//! Responsibilities:
//! - Resolve a `(setting_name, key)` pair through a fixed chain of key spellings.
//! - Memoize matched values in a [`ResolutionCache`], scoped to the requesting pair.
//!
//! Does NOT handle:
//! - Loading or expanding the configuration tree (see `loader` and `expand.rs`).
//! - Typed parsing of values; callers receive strings.
//!
//! Invariants:
//! - Resolution never fails: a miss everywhere yields the caller's default.
//! - Blank or whitespace-only values never match; the chain continues.
//! - The cache entry for the `(setting_name, key)` request is checked before any tree or
//!   environment lookup; entries for other setting names are never consulted.
//! - Defaults are never cached.

mod cache;

pub use cache::{CacheStats, ResolutionCache};

use tracing::trace;

use crate::constants::APP_SETTINGS_SECTION;
use crate::expand::expand_env_placeholders;
use crate::tree::SettingsSource;

/// Tunables for the resolution chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverOptions {
    /// Also try `{setting_name}s:{key}` before the bare key.
    pub plural_section_fallback: bool,
}

impl ResolverOptions {
    /// Enable the pluralized section fallback.
    pub fn with_plural_section_fallback(mut self, enabled: bool) -> Self {
        self.plural_section_fallback = enabled;
        self
    }
}

/// Where a spelling is looked up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Spelling {
    /// A flattened key in the configuration tree.
    Tree(String),
    /// A process environment variable.
    Env(String),
}

impl Spelling {
    /// The key this spelling is looked up and cached under.
    pub(crate) fn key(&self) -> &str {
        match self {
            Self::Tree(key) | Self::Env(key) => key,
        }
    }

    fn lookup<S>(&self, source: &S) -> Option<String>
    where
        S: SettingsSource + ?Sized,
    {
        match self {
            Self::Tree(key) => source.setting(key).map(str::to_string),
            Self::Env(key) => std::env::var(key).ok(),
        }
    }
}

/// Secret-style prefix: `AppSettings` becomes `AppSetting`, other names are kept.
fn secret_prefix(setting_name: &str) -> &str {
    if setting_name.eq_ignore_ascii_case(APP_SETTINGS_SECTION) {
        &setting_name[..setting_name.len() - 1]
    } else {
        setting_name
    }
}

/// The ordered key spellings tried for `key` under `setting_name`.
pub(crate) fn spellings(key: &str, setting_name: &str, options: ResolverOptions) -> Vec<Spelling> {
    let mut chain = vec![
        Spelling::Tree(format!("{}-{key}", secret_prefix(setting_name))),
        Spelling::Env(format!("{setting_name}__{key}")),
        Spelling::Tree(format!("{setting_name}:{key}")),
    ];
    if options.plural_section_fallback {
        chain.push(Spelling::Tree(format!("{setting_name}s:{key}")));
    }
    chain.push(Spelling::Tree(key.to_string()));
    chain
}

/// Resolve a setting value, falling back to `default_value`.
pub fn get_config_value<S>(
    source: &S,
    cache: &ResolutionCache,
    options: ResolverOptions,
    key: &str,
    default_value: &str,
    setting_name: &str,
) -> String
where
    S: SettingsSource + ?Sized,
{
    if let Some(cached) = cache.get(setting_name, key) {
        trace!(key, setting_name, "Resolved setting from cache");
        cache.record_hit();
        return cached;
    }
    cache.record_miss();

    for spelling in &spellings(key, setting_name, options) {
        let Some(raw) = spelling.lookup(source) else {
            continue;
        };
        if raw.trim().is_empty() {
            continue;
        }
        trace!(spelling = spelling.key(), "Resolved setting");
        let expanded = expand_env_placeholders(&raw);
        return cache.insert_if_absent(setting_name, key, spelling.key(), expanded);
    }

    trace!(key, setting_name, "Setting not found, using default");
    default_value.to_string()
}
