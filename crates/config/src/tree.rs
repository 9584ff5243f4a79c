//! Layered configuration tree.
//!
//! Responsibilities:
//! - Hold the ordered list of configuration layers built by the loader.
//! - Record where each layer came from so later passes can target file layers.
//! - Answer key lookups with "last explicit layer wins" semantics.
//!
//! Does NOT handle:
//! - Loading layers from disk, the secret store, or the environment (see `loader`).
//! - Placeholder expansion (see `expand.rs`).
//! - Key spelling precedence and caching (see `resolver`).
//!
//! Invariants:
//! - Key comparison is ASCII case-insensitive; the first spelling inserted is kept for display.
//! - A layer that contains a key shadows earlier layers even when its value is blank.
//! - Values of secret layers never appear in `Debug` output.

use std::collections::{BTreeMap, btree_map};
use std::fmt;
use std::path::PathBuf;

/// Read-only access to configuration settings by flattened key.
///
/// This is the narrow view the resolver and the expander need; implemented by
/// [`ConfigurationTree`] and by test doubles.
pub trait SettingsSource {
    /// Get the value stored at `key`, if any layer defines it.
    fn setting(&self, key: &str) -> Option<&str>;
}

/// Origin of a configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerSource {
    /// A JSON settings file on disk.
    File { path: PathBuf },
    /// Bulk secrets fetched from the sidecar secret store.
    SecretStore { store: String },
    /// Secrets fetched from a key vault.
    KeyVault { vault: String },
    /// Snapshot of the process environment.
    Environment,
    /// Entries supplied directly by the host application.
    Memory { name: String },
}

impl LayerSource {
    /// Whether the layer was read from a settings file.
    pub fn is_file(&self) -> bool {
        matches!(self, Self::File { .. })
    }

    /// Whether the layer carries secret values.
    pub fn is_secret(&self) -> bool {
        matches!(self, Self::SecretStore { .. } | Self::KeyVault { .. })
    }
}

impl fmt::Display for LayerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File { path } => write!(f, "file:{}", path.display()),
            Self::SecretStore { store } => write!(f, "secret-store:{store}"),
            Self::KeyVault { vault } => write!(f, "key-vault:{vault}"),
            Self::Environment => write!(f, "environment"),
            Self::Memory { name } => write!(f, "memory:{name}"),
        }
    }
}

#[derive(Clone)]
struct Entry {
    key: String,
    value: String,
}

/// One ordered source of configuration entries.
#[derive(Clone)]
pub struct Layer {
    source: LayerSource,
    entries: BTreeMap<String, Entry>,
}

impl Layer {
    /// Create an empty layer.
    pub fn new(source: LayerSource) -> Self {
        Self {
            source,
            entries: BTreeMap::new(),
        }
    }

    /// Build a layer from key/value pairs. Later pairs override earlier ones.
    pub fn from_pairs<I, K, V>(source: LayerSource, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut layer = Self::new(source);
        for (key, value) in pairs {
            layer.insert(key, value);
        }
        layer
    }

    /// Where this layer came from.
    pub fn source(&self) -> &LayerSource {
        &self.source
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.entry(key.to_ascii_lowercase()) {
            btree_map::Entry::Occupied(mut slot) => slot.get_mut().value = value,
            btree_map::Entry::Vacant(slot) => {
                slot.insert(Entry { key, value });
            }
        }
    }

    /// Get the value stored at `key` in this layer.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(&key.to_ascii_lowercase())
            .map(|entry| entry.value.as_str())
    }

    /// Whether this layer explicitly defines `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_ascii_lowercase())
    }

    /// Iterate entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .values()
            .map(|entry| (entry.key.as_str(), entry.value.as_str()))
    }

    /// Iterate entries with mutable access to the values.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut String)> {
        self.entries
            .values_mut()
            .map(|entry| (entry.key.as_str(), &mut entry.value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = self.source.is_secret();
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            if redact {
                map.entry(&key, &"[REDACTED]");
            } else {
                map.entry(&key, &value);
            }
        }
        map.finish()?;
        write!(f, " ({})", self.source)
    }
}

/// Ordered list of configuration layers; later layers take precedence.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationTree {
    layers: Vec<Layer>,
}

impl ConfigurationTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer with the highest precedence so far.
    pub fn push_layer(&mut self, layer: Layer) {
        self.layers.push(layer);
    }

    /// Builder-style variant of [`push_layer`](Self::push_layer).
    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.push_layer(layer);
        self
    }

    /// Layers in precedence order (lowest first).
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Mutable access to the layers, used by the expansion pass.
    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Resolve `key` against all layers; the last layer that defines it wins.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.layers.iter().rev().find_map(|layer| layer.get(key))
    }

    /// The layer that currently supplies `key`, if any.
    pub fn source_of(&self, key: &str) -> Option<&LayerSource> {
        self.layers
            .iter()
            .rev()
            .find(|layer| layer.contains_key(key))
            .map(Layer::source)
    }

    /// Flatten all layers into their effective key/value view.
    ///
    /// Each entry carries the layer that won, so callers can redact secrets.
    pub fn effective_entries(&self) -> Vec<(String, String, LayerSource)> {
        let mut merged: BTreeMap<String, (String, String, LayerSource)> = BTreeMap::new();
        for layer in &self.layers {
            for (key, value) in layer.iter() {
                merged.insert(
                    key.to_ascii_lowercase(),
                    (key.to_string(), value.to_string(), layer.source().clone()),
                );
            }
        }
        merged.into_values().collect()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl SettingsSource for ConfigurationTree {
    fn setting(&self, key: &str) -> Option<&str> {
        self.get(key)
    }
}
