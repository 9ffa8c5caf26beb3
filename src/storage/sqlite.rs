//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Store trait.

use crate::records::{EventRecord, FighterRecord};
use crate::storage::schema::{initialize_schema, reset_schema};
use crate::storage::traits::{Store, StorageError, StorageResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use std::path::Path;

/// Date layouts the event page is known to use, tried in order
const EVENT_DATE_FORMATS: [&str; 3] = ["%B %d, %Y", "%b %d, %Y", "%Y-%m-%d"];

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the database at `path`, creating missing tables
    pub fn new(path: &Path) -> StorageResult<Self> {
        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Drops and recreates both tables
    pub fn reset(&mut self) -> StorageResult<()> {
        reset_schema(&self.conn)?;
        Ok(())
    }

    /// All stored events in insertion order
    pub fn list_events(&self) -> StorageResult<Vec<EventRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT event_name, event_date, event_location FROM ufc_events ORDER BY id",
        )?;

        let events = stmt
            .query_map([], |row| {
                Ok(EventRecord {
                    name: row.get(0)?,
                    date: row.get(1)?,
                    location: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(events)
    }

    /// All stored fighters in insertion order
    pub fn list_fighters(&self) -> StorageResult<Vec<FighterRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT first_name, last_name, height, weight, reach, stance, slpm, str_acc,
             sapm, str_def, td_avg, td_acc, td_def, sub_avg
             FROM fighters ORDER BY id",
        )?;

        let fighters = stmt
            .query_map([], |row| {
                Ok(FighterRecord {
                    first_name: row.get(0)?,
                    last_name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    height: row.get(2)?,
                    weight: row.get(3)?,
                    reach: row.get(4)?,
                    stance: row.get(5)?,
                    slpm: row.get(6)?,
                    str_acc: row.get(7)?,
                    sapm: row.get(8)?,
                    str_def: row.get(9)?,
                    td_avg: row.get(10)?,
                    td_acc: row.get(11)?,
                    td_def: row.get(12)?,
                    sub_avg: row.get(13)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(fighters)
    }

    fn count(&self, table: &str) -> StorageResult<u64> {
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM {}", table),
            [],
            |row| row.get(0),
        )?;
        Ok(count as u64)
    }
}

/// Converts scraped date text to an ISO `YYYY-MM-DD` calendar date
///
/// # Example
///
/// ```
/// use fightstats_scraper::storage::coerce_event_date;
///
/// assert_eq!(coerce_event_date("January 1, 2025").unwrap(), "2025-01-01");
/// ```
pub fn coerce_event_date(text: &str) -> StorageResult<String> {
    let text = text.trim();
    EVENT_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .map(|date| date.format("%Y-%m-%d").to_string())
        .ok_or_else(|| StorageError::InvalidDate(text.to_string()))
}

impl Store for SqliteStore {
    fn insert_event(&mut self, event: &EventRecord) -> StorageResult<()> {
        if event.name.trim().is_empty() {
            return Err(StorageError::ConstraintViolation(
                "event_name cannot be empty".to_string(),
            ));
        }

        let date = event.date.as_deref().map(coerce_event_date).transpose()?;

        self.conn.execute(
            "INSERT INTO ufc_events (event_name, event_date, event_location) VALUES (?1, ?2, ?3)",
            params![event.name, date, event.location],
        )?;
        Ok(())
    }

    fn insert_fighter(&mut self, fighter: &FighterRecord) -> StorageResult<()> {
        if fighter.first_name.trim().is_empty() {
            return Err(StorageError::ConstraintViolation(
                "first_name cannot be empty".to_string(),
            ));
        }

        self.conn.execute(
            "INSERT INTO fighters (first_name, last_name, height, weight, reach, stance, slpm,
             str_acc, sapm, str_def, td_avg, td_acc, td_def, sub_avg)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                fighter.first_name,
                fighter.last_name,
                fighter.height,
                fighter.weight,
                fighter.reach,
                fighter.stance,
                fighter.slpm,
                fighter.str_acc,
                fighter.sapm,
                fighter.str_def,
                fighter.td_avg,
                fighter.td_acc,
                fighter.td_def,
                fighter.sub_avg,
            ],
        )?;
        Ok(())
    }

    fn count_events(&self) -> StorageResult<u64> {
        self.count("ufc_events")
    }

    fn count_fighters(&self) -> StorageResult<u64> {
        self.count("fighters")
    }
}
