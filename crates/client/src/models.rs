//! Response models for the secret-store sidecar.
//!
//! The bulk endpoint returns an object keyed by secret name whose values are
//! objects keyed by the same name:
//!
//! ```json
//! { "db-pass": { "db-pass": "s3cr3t" }, "api-key": { "api-key": null } }
//! ```
//!
//! # Invariants
//! - Outer entries keep their response order, duplicates included.
//! - Secret values never appear in error messages.

use std::fmt;

use confstrap_config::SecretEntry;
use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
use serde_json::Value;

use crate::error::{ClientError, Result};

/// Raw bulk-secrets response, in document order.
#[derive(Debug, Default)]
pub struct BulkSecretsResponse {
    entries: Vec<(String, Value)>,
}

impl BulkSecretsResponse {
    /// Number of outer entries, including ones that will be dropped.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick each secret's self-keyed value.
    ///
    /// Null values become entries without a value; the loader drops them.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidResponse`] if any payload is not an object,
    /// lacks its self-key, or holds a non-string, non-null value.
    pub fn into_entries(self) -> Result<Vec<SecretEntry>> {
        self.entries
            .into_iter()
            .map(|(key, payload)| {
                let Value::Object(mut inner) = payload else {
                    return Err(ClientError::InvalidResponse(format!(
                        "secret '{key}' payload is {}, expected an object",
                        json_kind(&payload)
                    )));
                };
                let value = match inner.remove(&key) {
                    Some(Value::String(value)) => Some(value),
                    Some(Value::Null) => None,
                    Some(other) => {
                        return Err(ClientError::InvalidResponse(format!(
                            "secret '{key}' value is {}, expected a string",
                            json_kind(&other)
                        )));
                    }
                    None => {
                        return Err(ClientError::InvalidResponse(format!(
                            "secret '{key}' payload has no '{key}' field"
                        )));
                    }
                };
                Ok(SecretEntry::new(key, value))
            })
            .collect()
    }
}

impl<'de> Deserialize<'de> for BulkSecretsResponse {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = BulkSecretsResponse;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of secret payloads")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(BulkSecretsResponse { entries })
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
