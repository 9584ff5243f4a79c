//! Get command implementation.

use anyhow::Result;
use confstrap_config::ConfigService;
use tracing::debug;

pub fn run(service: &ConfigService, key: &str, setting: &str, default: &str) -> Result<()> {
    debug!(key, setting, "Resolving setting");

    let value = service.get_config_value(key, default, setting);
    println!("{}", value);

    Ok(())
}
