//! Database name command implementation.

use anyhow::{Result, bail};
use confstrap_config::ConfigService;

pub fn run(service: &ConfigService, key: &str, setting: &str) -> Result<()> {
    match service.database_name(key, setting) {
        Some(name) => {
            println!("{}", name);
            Ok(())
        }
        None => bail!("No database name found in {setting}:{key}"),
    }
}
