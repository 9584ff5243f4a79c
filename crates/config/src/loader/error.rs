//! Error types for configuration loading.
//!
//! Responsibilities:
//! - Define error variants for all configuration loading failures.
//! - Carry secret source failures through unchanged so startup fails fast.
//! - Report `.env` failures without echoing file contents.
//!
//! Does NOT handle:
//! - Lookup failures (the resolver never fails; it falls back to defaults).
//! - HTTP-level error classification (see the client crate).
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths, etc.).
//! - Errors never include secret values or raw file contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Boxed error produced by a secret source implementation.
pub type SourceError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}")]
    ConfigFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {message}")]
    ConfigFileParse { path: PathBuf, message: String },

    /// A key-vault name is configured but the host registered no key-vault source.
    #[error("Key vault '{vault_url}' is configured via KV_NAME but no key-vault provider is registered")]
    KeyVaultUnavailable { vault_url: String },

    /// Fetching secrets failed; the underlying error is preserved.
    #[error("Failed to load secrets from {origin}")]
    SecretSource {
        origin: String,
        #[source]
        source: SourceError,
    },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// Wrap a secret source failure.
    pub fn secret_source(origin: impl Into<String>, source: impl Into<SourceError>) -> Self {
        Self::SecretSource {
            origin: origin.into(),
            source: source.into(),
        }
    }

    /// Whether this error came from a secret source.
    pub fn is_secret_source_error(&self) -> bool {
        matches!(
            self,
            Self::SecretSource { .. } | Self::KeyVaultUnavailable { .. }
        )
    }

    /// Whether this error came from reading or parsing a settings file.
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::ConfigFileRead { .. } | Self::ConfigFileParse { .. }
        )
    }
}
