//! Shared test utilities for confstrap integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Create content roots holding settings files.
//! - Point the CLI at a mock secret-store sidecar.
//!
//! Invariants / Assumptions:
//! - All integration tests using these helpers are hermetic by default.
//! - Secret-selection variables from the host never leak into the child process.

use assert_cmd::Command;
use tempfile::TempDir;
use wiremock::MockServer;

/// Variables that change how configuration is assembled.
const HOST_VARS: &[&str] = &[
    "DAPR_SECRET_STORE",
    "KV_NAME",
    "IsLocal",
    "ASPNETCORE_ENVIRONMENT",
    "ENV_VARIABLES",
    "AppSettings__BaseUrl",
    "DAPR_HTTP_PORT",
    "CONFSTRAP_CONTENT_ROOT",
    "CONFSTRAP_SECRET_TIMEOUT",
    "RUST_LOG",
];

/// Returns a hermetic `confstrap` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - Secret-selection and content-root variables are cleared.
pub fn confstrap_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("confstrap");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    for var in HOST_VARS {
        cmd.env_remove(var);
    }

    cmd
}

/// Returns a hermetic command reading settings from `root`.
#[allow(dead_code)]
pub fn confstrap_cmd_in(root: &TempDir) -> Command {
    let mut cmd = confstrap_cmd();
    cmd.env("CONFSTRAP_CONTENT_ROOT", root.path());
    cmd
}

/// Create a content root containing the given settings files.
#[allow(dead_code)]
pub fn content_root(files: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("failed to create temp dir");
    for (name, contents) in files {
        std::fs::write(dir.path().join(name), contents).expect("failed to write settings file");
    }
    dir
}

/// Route the command's secret store requests to `server`.
#[allow(dead_code)]
pub fn with_sidecar(cmd: &mut Command, server: &MockServer, store: &str) {
    let address = server.address();
    cmd.env("DAPR_SECRET_STORE", store)
        .env("AppSettings__BaseUrl", format!("http://{}", address.ip()))
        .env("DAPR_HTTP_PORT", address.port().to_string());
}
