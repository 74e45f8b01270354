//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Ad-Radar database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track monitoring runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    targets INTEGER NOT NULL DEFAULT 0,
    invalid_targets INTEGER NOT NULL DEFAULT 0,
    ads_found INTEGER NOT NULL DEFAULT 0,
    new_ads INTEGER NOT NULL DEFAULT 0,
    ads_extracted INTEGER NOT NULL DEFAULT 0,
    notifications INTEGER NOT NULL DEFAULT 0
);

-- Ad URLs already offered for extraction
CREATE TABLE IF NOT EXISTS seen_ads (
    url TEXT PRIMARY KEY,
    target TEXT NOT NULL,
    first_seen_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_seen_ads_target ON seen_ads(target);
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}
