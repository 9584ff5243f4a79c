//! Table formatter implementation.
//!
//! Responsibilities:
//! - Format settings as tab-separated columns with a header row.
//!
//! Does NOT handle:
//! - Column width alignment; terminals align on tabs.

use anyhow::Result;

use crate::formatters::{Formatter, SettingRow};

/// Table formatter.
pub struct TableFormatter;

impl Formatter for TableFormatter {
    fn format_settings(&self, rows: &[SettingRow]) -> Result<String> {
        if rows.is_empty() {
            return Ok("No settings found.\n".to_string());
        }

        let mut output = String::from("Key\tValue\tSource\n");
        for row in rows {
            output.push_str(&format!("{}\t{}\t{}\n", row.key, row.value, row.source));
        }
        Ok(output)
    }
}
