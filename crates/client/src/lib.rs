//! Secret-store sidecar client.
//!
//! This crate fetches secrets in bulk from a sidecar's HTTP secrets API and
//! plugs them into the configuration loader through [`SidecarSecretSources`].

pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
mod source;

pub use client::SecretStoreClient;
pub use client::builder::SecretStoreClientBuilder;
pub use error::{ClientError, Result};
pub use models::BulkSecretsResponse;
pub use source::{KeyVaultConstructor, SecretStoreSource, SidecarSecretSources};
