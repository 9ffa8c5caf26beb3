//! Storage traits and error types
//!
//! This module defines the append-only sink the crawler writes records to and
//! the errors a backend may report.

use crate::records::{EventRecord, FighterRecord};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Invalid event date '{0}'")]
    InvalidDate(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Durable, append-only sink for scraped records
///
/// Each insert is a single row with no enclosing transaction and no
/// uniqueness key: inserting the same record twice stores it twice.
pub trait Store {
    /// Appends one event row
    fn insert_event(&mut self, event: &EventRecord) -> StorageResult<()>;

    /// Appends one fighter row
    fn insert_fighter(&mut self, fighter: &FighterRecord) -> StorageResult<()>;

    fn count_events(&self) -> StorageResult<u64>;

    fn count_fighters(&self) -> StorageResult<u64>;
}
