//! Output formatters for CLI commands.
//!
//! Responsibilities:
//! - Provide JSON and table renderings of the effective settings list.
//! - Redact values that came from a secret layer.
//!
//! Does NOT handle:
//! - Direct printing to stdout (returns formatted strings).
//!
//! ## Empty-State Handling
//!
//! | Format | Empty State Behavior |
//! |--------|---------------------|
//! | JSON | `[]` |
//! | Table | `No settings found.` |

use anyhow::Result;
use clap::ValueEnum;
use confstrap_config::{ConfigurationTree, LayerSource};
use serde::Serialize;

mod json;
mod table;

pub use json::JsonFormatter;
pub use table::TableFormatter;

/// Placeholder shown instead of secret values.
pub const REDACTED: &str = "********";

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
}

/// One effective setting as shown by `list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingRow {
    pub key: String,
    pub value: String,
    pub source: String,
}

impl SettingRow {
    fn new(key: String, value: String, source: &LayerSource) -> Self {
        let value = if source.is_secret() {
            REDACTED.to_string()
        } else {
            value
        };
        Self {
            key,
            value,
            source: source.to_string(),
        }
    }
}

/// Collect the effective settings, optionally filtered by a case-insensitive key prefix.
pub fn setting_rows(tree: &ConfigurationTree, prefix: Option<&str>) -> Vec<SettingRow> {
    let prefix = prefix.map(str::to_ascii_lowercase);
    tree.effective_entries()
        .into_iter()
        .filter(|(key, _, _)| {
            prefix
                .as_deref()
                .is_none_or(|p| key.to_ascii_lowercase().starts_with(p))
        })
        .map(|(key, value, source)| SettingRow::new(key, value, &source))
        .collect()
}

/// Formatter trait for different output types.
pub trait Formatter {
    /// Format the effective settings list.
    fn format_settings(&self, rows: &[SettingRow]) -> Result<String>;
}

/// Get a formatter for the given format.
pub fn get_formatter(format: OutputFormat) -> Box<dyn Formatter> {
    match format {
        OutputFormat::Json => Box::new(JsonFormatter),
        OutputFormat::Table => Box::new(TableFormatter),
    }
}
