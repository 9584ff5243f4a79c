//! Bulk secrets endpoint.

use std::time::Duration;

use confstrap_config::SecretEntry;
use reqwest::Client;
use tracing::debug;

use crate::endpoints::url_encoding::encode_path_segment;
use crate::error::{ClientError, Result};
use crate::models::BulkSecretsResponse;

/// Fetch every secret in `store` with a single `GET .../bulk` request.
///
/// `timeout` is only used to label timeout errors; the limit itself is
/// enforced by `client`.
pub async fn get_bulk_secrets(
    client: &Client,
    base_url: &str,
    store: &str,
    timeout: Option<Duration>,
) -> Result<Vec<SecretEntry>> {
    let url = format!(
        "{}/v1.0/secrets/{}/bulk",
        base_url,
        encode_path_segment(store)
    );
    debug!(%url, "Requesting bulk secrets");

    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| ClientError::from_transport(e, timeout))?;

    let status = response.status().as_u16();

    if !response.status().is_success() {
        let url = response.url().to_string();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "Could not read error response body".to_string());
        return Err(ClientError::ApiError {
            status,
            url,
            message,
        });
    }

    let body = response
        .text()
        .await
        .map_err(|e| ClientError::from_transport(e, timeout))?;

    // serde_json messages can quote the offending value; report only its position.
    let parsed: BulkSecretsResponse = serde_json::from_str(&body).map_err(|e| {
        ClientError::InvalidResponse(format!(
            "Failed to parse bulk secrets response: {:?} error at line {} column {}",
            e.classify(),
            e.line(),
            e.column()
        ))
    })?;

    debug!(store, entries = parsed.len(), "Received bulk secrets");
    parsed.into_entries()
}
