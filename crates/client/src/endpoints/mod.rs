//! Secret-store sidecar endpoint implementations.

mod secrets;
pub mod url_encoding;

pub use secrets::get_bulk_secrets;
