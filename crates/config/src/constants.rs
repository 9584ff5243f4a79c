//! Centralized constants for the confstrap workspace.
//!
//! File names, environment variable names, and defaults shared by the
//! loader, the secret-store client, and the host binary.

// =============================================================================
// Configuration Files
// =============================================================================

/// Base configuration file, loaded from the content root when present.
pub const BASE_SETTINGS_FILE: &str = "appsettings.json";

/// Prefix of environment-specific files (`appsettings.{environment}.json`).
pub const SETTINGS_FILE_STEM: &str = "appsettings";

/// Separator used between sections of a flattened configuration key.
pub const KEY_DELIMITER: &str = ":";

// =============================================================================
// Environment Variables
// =============================================================================

/// Fallback environment name when none is passed to the loader.
pub const ENV_ENVIRONMENT_NAME: &str = "ASPNETCORE_ENVIRONMENT";

/// `"true"` disables the secret-store and key-vault layers.
pub const ENV_IS_LOCAL: &str = "IsLocal";

/// Identifier of the sidecar secret store.
pub const ENV_SECRET_STORE: &str = "DAPR_SECRET_STORE";

/// Key-vault name, used only when no secret store is configured.
pub const ENV_KEY_VAULT_NAME: &str = "KV_NAME";

/// Host part of the sidecar base URL.
pub const ENV_SIDECAR_BASE_URL: &str = "AppSettings__BaseUrl";

/// Port of the sidecar HTTP API.
pub const ENV_SIDECAR_HTTP_PORT: &str = "DAPR_HTTP_PORT";

/// Comma-separated allow-list for placeholder expansion (read from the tree).
pub const ENV_VARIABLES_ALLOW_LIST: &str = "ENV_VARIABLES";

// =============================================================================
// Defaults
// =============================================================================

/// Sidecar host used when `AppSettings__BaseUrl` is not set.
pub const DEFAULT_SIDECAR_HOST: &str = "http://localhost";

/// Sidecar port used when `DAPR_HTTP_PORT` is not set.
pub const DEFAULT_SIDECAR_PORT: &str = "3500";

/// Setting name whose secret-style spelling drops the trailing `s`.
pub const APP_SETTINGS_SECTION: &str = "AppSettings";

/// Delimiter surrounding a placeholder name.
pub const PLACEHOLDER_DELIMITER: char = '%';
