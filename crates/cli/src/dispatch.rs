//! Command dispatch logic.
//!
//! Responsibilities:
//! - Assemble configuration once and route the parsed command to its handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::config_context::assemble_service;

/// Dispatch CLI commands to their respective handlers.
pub(crate) async fn run_command(cli: Cli) -> Result<()> {
    let service = assemble_service(&cli).await?;

    match cli.command {
        Commands::Get {
            key,
            setting,
            default,
        } => commands::get::run(&service, &key, &setting, &default),
        Commands::List { output, prefix } => {
            commands::list::run(&service, output, prefix.as_deref())
        }
        Commands::DbName { key, setting } => commands::db_name::run(&service, &key, &setting),
    }
}
