//! Database name extraction from connection strings.
//!
//! Handles URL-style strings (`postgres://host:5432/orders`) first and falls
//! back to `Key=Value;` pairs (`Server=db;Database=orders`). Failures are
//! logged and never propagated.

use percent_encoding::percent_decode_str;
use tracing::debug;

/// Keys that name the database in `Key=Value;` connection strings.
const DATABASE_KEYS: [&str; 3] = ["database", "initial catalog", "dbname"];

/// Extract the database name from a connection string.
pub fn database_name_from_connection_string(connection_string: &str) -> Option<String> {
    let trimmed = connection_string.trim();
    if trimmed.is_empty() {
        return None;
    }

    match url::Url::parse(trimmed) {
        Ok(parsed) if parsed.has_host() => {
            if let Some(name) = database_from_url(&parsed) {
                return Some(name);
            }
            // mongodb://host/?authSource=x and friends carry the name in the query.
            key_value_database(parsed.query().unwrap_or_default(), '&')
        }
        Ok(_) => key_value_database(trimmed, ';'),
        Err(e) => {
            debug!(error = %e, "Connection string is not a URL, trying key/value pairs");
            key_value_database(trimmed, ';')
        }
    }
}

fn database_from_url(parsed: &url::Url) -> Option<String> {
    let segment = parsed.path_segments()?.find(|s| !s.is_empty())?;
    match percent_decode_str(segment).decode_utf8() {
        Ok(name) => Some(name.into_owned()),
        Err(e) => {
            debug!(error = %e, "Database segment is not valid UTF-8");
            None
        }
    }
}

fn key_value_database(pairs: &str, separator: char) -> Option<String> {
    pairs.split(separator).find_map(|pair| {
        let (name, value) = pair.split_once('=')?;
        let name = name.trim().to_ascii_lowercase();
        let value = value.trim().trim_matches('"').trim_matches('\'');
        (DATABASE_KEYS.contains(&name.as_str()) && !value.is_empty()).then(|| value.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_style_connection_string() {
        assert_eq!(
            database_name_from_connection_string("postgres://user:pw@db.internal:5432/orders"),
            Some("orders".to_string())
        );
    }

    #[test]
    fn test_url_with_query_database() {
        assert_eq!(
            database_name_from_connection_string("mongodb://db.internal:27017/?dbname=events"),
            Some("events".to_string())
        );
    }

    #[test]
    fn test_key_value_connection_string() {
        assert_eq!(
            database_name_from_connection_string(
                "Server=tcp:sql.internal,1433;Initial Catalog=Billing;User ID=svc;"
            ),
            Some("Billing".to_string())
        );
        assert_eq!(
            database_name_from_connection_string("Host=db;Database = 'inventory' ;Port=5432"),
            Some("inventory".to_string())
        );
    }

    #[test]
    fn test_unparseable_connection_string_returns_none() {
        assert_eq!(database_name_from_connection_string("just some text"), None);
        assert_eq!(database_name_from_connection_string("   "), None);
        assert_eq!(database_name_from_connection_string("Server=db;Database=;"), None);
    }

    #[test]
    fn test_percent_encoded_segment_is_decoded() {
        assert_eq!(
            database_name_from_connection_string("postgres://db/my%20db"),
            Some("my db".to_string())
        );
    }
}
