//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not assemble configuration (see `config_context` module).

use clap::{Parser, Subcommand};
use confstrap_config::constants::APP_SETTINGS_SECTION;
use std::path::PathBuf;

use crate::formatters::OutputFormat;

#[derive(Parser, Debug)]
#[command(name = "confstrap")]
#[command(about = "Inspect layered application configuration from the command line", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  confstrap get BaseUrl\n  confstrap --environment Production get Orders --setting ConnectionStrings\n  confstrap --local list --output json\n  confstrap db-name Orders --setting ConnectionStrings\n"
)]
pub struct Cli {
    /// Environment name selecting appsettings.{NAME}.json (falls back to ASPNETCORE_ENVIRONMENT)
    #[arg(short, long, global = true)]
    pub environment: Option<String>,

    /// Skip the secret layer (also enabled by IsLocal=true)
    #[arg(long, global = true)]
    pub local: bool,

    /// Directory containing appsettings.json
    #[arg(long, global = true, env = "CONFSTRAP_CONTENT_ROOT", value_name = "DIR")]
    pub content_root: Option<PathBuf>,

    /// Give up on loading secrets after this many seconds
    #[arg(long, global = true, env = "CONFSTRAP_SECRET_TIMEOUT", value_name = "SECONDS")]
    pub secret_timeout: Option<u64>,

    /// Also try the pluralized section ({SETTING}s:{KEY}) before the bare key
    #[arg(long, global = true)]
    pub plural_section_fallback: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve a single setting
    Get {
        /// Setting key (e.g., BaseUrl)
        key: String,

        /// Logical section the key belongs to
        #[arg(short, long, default_value = APP_SETTINGS_SECTION)]
        setting: String,

        /// Value printed when the setting is not found
        #[arg(short, long, default_value = "")]
        default: String,
    },

    /// List every effective setting and the layer that supplied it
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        output: OutputFormat,

        /// Only show keys starting with this prefix (case-insensitive)
        #[arg(long)]
        prefix: Option<String>,
    },

    /// Extract the database name from a connection-string setting
    DbName {
        /// Setting key holding the connection string
        key: String,

        /// Logical section the key belongs to
        #[arg(short, long, default_value = "ConnectionStrings")]
        setting: String,
    },
}
