//! Storage module for persisting scraped records
//!
//! This module handles all database operations for the scraper, including:
//! - SQLite database initialization and schema bootstrap/reset
//! - Single-row event and fighter appends
//! - Event date coercion at the storage boundary

mod schema;
mod sqlite;
mod traits;

pub use schema::{initialize_schema, reset_schema};
pub use sqlite::{coerce_event_date, SqliteStore};
pub use traits::{Store, StorageError, StorageResult};

use std::path::Path;

/// Opens or creates the store database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully opened store
/// * `Err(StorageError)` - Failed to open the database or create tables
pub fn open_store(path: &Path) -> StorageResult<SqliteStore> {
    SqliteStore::new(path)
}
