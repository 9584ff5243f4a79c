//! List command implementation.

use anyhow::Result;
use confstrap_config::ConfigService;
use tracing::info;

use crate::formatters::{OutputFormat, get_formatter, setting_rows};

pub fn run(service: &ConfigService, format: OutputFormat, prefix: Option<&str>) -> Result<()> {
    let rows = setting_rows(service.tree(), prefix);
    info!(count = rows.len(), "Listing effective settings");

    let formatter = get_formatter(format);
    print!("{}", formatter.format_settings(&rows)?);

    Ok(())
}
