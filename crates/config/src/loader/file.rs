//! JSON settings file loading.
//!
//! Responsibilities:
//! - Read `appsettings*.json` files into configuration layers.
//! - Flatten nested JSON into `Section:Child` keys.
//!
//! Does NOT handle:
//! - Deciding which files to load (see `builder.rs`).
//! - Expanding placeholders in the loaded values (see `expand.rs`).
//!
//! Invariants:
//! - A missing optional file is `Ok(None)`, never an error.
//! - A file that exists but is not a JSON object fails with `ConfigFileParse`.
//! - Arrays are flattened by index (`Hosts:0`); `null` becomes an empty string.

use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::error::ConfigError;
use crate::constants::KEY_DELIMITER;
use crate::tree::{Layer, LayerSource};

/// Load a settings file if it exists.
pub fn load_optional_json_file(path: &Path) -> Result<Option<Layer>, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "Optional settings file not found, skipping");
            return Ok(None);
        }
        Err(source) => {
            return Err(ConfigError::ConfigFileRead {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let layer = parse_json_layer(path, &contents)?;
    debug!(
        path = %path.display(),
        entries = layer.len(),
        "Loaded settings file"
    );
    Ok(Some(layer))
}

/// Parse JSON text into a file layer attributed to `path`.
pub fn parse_json_layer(path: &Path, contents: &str) -> Result<Layer, ConfigError> {
    let parse_error = |message: String| ConfigError::ConfigFileParse {
        path: path.to_path_buf(),
        message,
    };

    // Empty files are treated like an empty object.
    if contents.trim().is_empty() {
        return Ok(Layer::new(LayerSource::File {
            path: path.to_path_buf(),
        }));
    }

    let root: Value = serde_json::from_str(contents).map_err(|e| parse_error(e.to_string()))?;
    if !root.is_object() {
        return Err(parse_error("top-level JSON value must be an object".to_string()));
    }

    let mut layer = Layer::new(LayerSource::File {
        path: path.to_path_buf(),
    });
    flatten_into(&mut layer, None, &root);
    Ok(layer)
}

fn flatten_into(layer: &mut Layer, prefix: Option<&str>, value: &Value) {
    let join = |segment: &str| match prefix {
        Some(prefix) => format!("{prefix}{KEY_DELIMITER}{segment}"),
        None => segment.to_string(),
    };

    match value {
        Value::Object(map) => {
            for (name, child) in map {
                flatten_into(layer, Some(join(name).as_str()), child);
            }
        }
        Value::Array(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(layer, Some(join(&index.to_string()).as_str()), child);
            }
        }
        scalar => {
            if let Some(key) = prefix {
                layer.insert(key, scalar_text(scalar));
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
