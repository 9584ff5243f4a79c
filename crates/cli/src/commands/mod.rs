//! CLI command implementations.

pub mod db_name;
pub mod get;
pub mod list;
