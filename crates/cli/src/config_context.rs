//! Configuration assembly for CLI commands.
//!
//! Responsibilities:
//! - Translate global CLI flags into a `ConfigLoader`.
//! - Assemble the `ConfigService` once, bounded by `--secret-timeout`.
//!
//! Does NOT handle:
//! - Command execution (see `dispatch` module).

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use confstrap_client::SidecarSecretSources;
use confstrap_config::{ConfigLoader, ConfigService, ResolverOptions};
use tracing::debug;

use crate::args::Cli;
use crate::error::SecretTimeout;

/// Build the loader described by the global flags.
pub(crate) fn loader_from_cli(cli: &Cli) -> ConfigLoader {
    let mut loader = ConfigLoader::new().local(cli.local);

    // Blank values fall back to the current directory.
    if let Some(root) = cli
        .content_root
        .as_ref()
        .filter(|root| !root.as_os_str().is_empty())
    {
        loader = loader.with_content_root(root.clone());
    }
    if let Some(ref environment) = cli.environment {
        loader = loader.with_environment_name(environment.clone());
    }
    loader
}

/// Assemble the configuration service for this invocation.
pub(crate) async fn assemble_service(cli: &Cli) -> Result<Arc<ConfigService>> {
    let loader = loader_from_cli(cli);
    let sources = SidecarSecretSources::new();
    let options =
        ResolverOptions::default().with_plural_section_fallback(cli.plural_section_fallback);

    debug!(
        content_root = %loader.content_root().display(),
        local = loader.is_local(),
        "Assembling configuration"
    );

    let assemble = ConfigService::assemble(&loader, &sources, options);
    let service = match cli.secret_timeout {
        Some(secs) => {
            let limit = Duration::from_secs(secs);
            tokio::time::timeout(limit, assemble)
                .await
                .map_err(|_| SecretTimeout(limit))?
        }
        None => assemble.await,
    };

    service.context("Failed to assemble configuration")
}
