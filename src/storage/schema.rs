//! Database schema definitions and bootstrap
//!
//! Tables carry a surrogate row id only; nothing stops duplicate records.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per scraped event detail page
CREATE TABLE IF NOT EXISTS ufc_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    event_name TEXT NOT NULL,
    event_date DATE,
    event_location TEXT
);

-- One row per scraped fighter detail page
CREATE TABLE IF NOT EXISTS fighters (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT,
    height TEXT,
    weight INT,
    reach INT,
    stance TEXT,
    slpm DECIMAL,
    str_acc DECIMAL,
    sapm DECIMAL,
    str_def DECIMAL,
    td_avg DECIMAL,
    td_acc DECIMAL,
    td_def DECIMAL,
    sub_avg DECIMAL
);
"#;

const DROP_SQL: &str = r#"
DROP TABLE IF EXISTS ufc_events;
DROP TABLE IF EXISTS fighters;
"#;

/// Creates any missing tables
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Drops both tables and recreates them empty
pub fn reset_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(DROP_SQL)?;
    initialize_schema(conn)
}
