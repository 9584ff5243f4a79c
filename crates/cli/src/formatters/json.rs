//! JSON formatter implementation.
//!
//! Responsibilities:
//! - Format settings as a pretty-printed JSON array.
//!
//! Does NOT handle:
//! - Other output formats.

use anyhow::Result;

use crate::formatters::{Formatter, SettingRow};

/// JSON formatter.
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format_settings(&self, rows: &[SettingRow]) -> Result<String> {
        let mut output = serde_json::to_string_pretty(rows)?;
        output.push('\n');
        Ok(output)
    }
}
