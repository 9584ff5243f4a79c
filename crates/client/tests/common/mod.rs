//! Common test utilities for integration tests.
//!
//! Re-exports the types most sidecar tests need and helpers for mounting
//! bulk-secret responses on a mock server.
//!
//! # What this does NOT handle
//! - Test-specific assertions or test logic

use secrecy::ExposeSecret;

#[allow(unused_imports)]
pub use confstrap_client::{ClientError, SecretStoreClient};
#[allow(unused_imports)]
pub use confstrap_config::SecretEntry;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use wiremock::matchers::{method, path};

/// Mount a bulk-secrets response for `store`.
#[allow(dead_code)]
pub async fn mount_bulk(server: &MockServer, store: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(format!("/v1.0/secrets/{store}/bulk")))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

/// Build a client pointed at the mock server.
#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> SecretStoreClient {
    SecretStoreClient::builder()
        .base_url(server.uri())
        .build()
        .expect("mock server URI should be valid")
}

/// Flatten entries to `(key, value)` pairs for assertions.
#[allow(dead_code)]
pub fn exposed(entries: &[SecretEntry]) -> Vec<(String, Option<String>)> {
    entries
        .iter()
        .map(|e| {
            (
                e.key.clone(),
                e.value.as_ref().map(|v| v.expose_secret().to_string()),
            )
        })
        .collect()
}
