//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test settings file layering and environment-specific overrides.
//! - Test secret backend selection and secret layer construction.
//! - Test the environment layer and placeholder expansion after load.
//! - Test `.env` loading and the `DOTENV_DISABLED` gate.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Every test pins the secret-selection variables it depends on.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::future::Future;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::loader::error::ConfigError;
use crate::loader::secrets::{SecretEntry, SecretSource, SecretSourceFactory};

pub mod env_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Run a future to completion on a fresh current-thread runtime.
///
/// Lets async loader calls run inside `temp_env::with_vars` closures.
pub fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build test runtime")
        .block_on(future)
}

/// Write a settings file into `dir`.
pub fn write_settings(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).expect("failed to write settings file");
}

/// Variables that select a secret backend, cleared so tests start from "no secrets".
pub fn no_secret_vars() -> Vec<(&'static str, Option<&'static str>)> {
    vec![
        ("DAPR_SECRET_STORE", None),
        ("KV_NAME", None),
        ("IsLocal", None),
        ("ASPNETCORE_ENVIRONMENT", None),
        ("ENV_VARIABLES", None),
        ("AppSettings__BaseUrl", None),
        ("DAPR_HTTP_PORT", None),
    ]
}

/// The cleared secret-selection variables with `overrides` applied on top.
pub fn with_overrides(
    overrides: &[(&'static str, Option<&'static str>)],
) -> Vec<(&'static str, Option<&'static str>)> {
    let mut vars = no_secret_vars();
    for (name, value) in overrides {
        match vars.iter_mut().find(|(existing, _)| existing == name) {
            Some(slot) => slot.1 = *value,
            None => vars.push((*name, *value)),
        }
    }
    vars
}

/// A canned secret source.
pub struct StaticSource {
    result: Result<Vec<SecretEntry>, String>,
}

#[async_trait]
impl SecretSource for StaticSource {
    async fn fetch_secrets(&self) -> Result<Vec<SecretEntry>, ConfigError> {
        match &self.result {
            Ok(entries) => Ok(entries.clone()),
            Err(message) => Err(ConfigError::secret_source("test-source", message.clone())),
        }
    }
}

/// Factory that records which backend the loader asked for.
#[derive(Default)]
pub struct RecordingSources {
    pub store_entries: Vec<SecretEntry>,
    pub store_error: Option<String>,
    pub vault_entries: Option<Vec<SecretEntry>>,
    pub requests: Mutex<Vec<String>>,
}

impl RecordingSources {
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl SecretSourceFactory for RecordingSources {
    fn secret_store(&self, base_url: &str, store: &str) -> Arc<dyn SecretSource> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("store {base_url} {store}"));
        let result = match &self.store_error {
            Some(message) => Err(message.clone()),
            None => Ok(self.store_entries.clone()),
        };
        Arc::new(StaticSource { result })
    }

    fn key_vault(&self, vault_url: &str) -> Option<Arc<dyn SecretSource>> {
        self.requests
            .lock()
            .unwrap()
            .push(format!("vault {vault_url}"));
        self.vault_entries.clone().map(|entries| {
            Arc::new(StaticSource {
                result: Ok(entries),
            }) as Arc<dyn SecretSource>
        })
    }
}
