//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map configuration and client errors to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes are stable; scripts may rely on them.

use std::time::Duration;

use confstrap_client::ClientError;
use confstrap_config::ConfigError;
use thiserror::Error;

/// Structured exit codes for confstrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Secret store failure - the sidecar or key vault could not supply secrets.
    ///
    /// Scripts may retry once the secret backend is reachable.
    SecretStoreError = 3,

    /// Configuration file error - a settings file exists but is unreadable or malformed.
    ///
    /// Scripts should fix the file and not retry.
    ConfigFileError = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Secret loading did not finish within `--secret-timeout`.
#[derive(Debug, Error)]
#[error("Timed out after {0:?} while loading secrets")]
pub struct SecretTimeout(pub Duration);

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        if err.is_secret_source_error() {
            ExitCode::SecretStoreError
        } else if err.is_file_error() {
            ExitCode::ConfigFileError
        } else {
            ExitCode::GeneralError
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(config_err);
            }
            if cause.is::<SecretTimeout>() || cause.is::<ClientError>() {
                return ExitCode::SecretStoreError;
            }
        }

        ExitCode::GeneralError
    }
}
