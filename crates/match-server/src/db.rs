//! Database module for the matches server.

use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Thread-safe database connection pool.
pub type DbPool = Arc<Mutex<Connection>>;

/// Initialize database with schema.
///
/// Creates the `matches` table and its `created_at` index. Timestamps are
/// stored as RFC 3339 UTC text with millisecond precision so that text order
/// equals time order; `created_at` is filled in by SQLite on insert.
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file (use `:memory:` for in-memory)
///
/// # Errors
///
/// Returns an error if the database cannot be opened or schema creation fails.
pub fn init_db<P: AsRef<Path>>(path: P) -> SqliteResult<DbPool> {
    let conn = Connection::open(path)?;

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS matches (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            start_time TEXT NOT NULL,
            end_time TEXT NOT NULL,
            home_score INTEGER NOT NULL DEFAULT 0 CHECK (home_score >= 0),
            away_score INTEGER NOT NULL DEFAULT 0 CHECK (away_score >= 0),
            status TEXT NOT NULL DEFAULT 'scheduled'
                CHECK (status IN ('scheduled', 'live', 'finished')),
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );

        CREATE INDEX IF NOT EXISTS idx_matches_created_at ON matches(created_at);
        ",
    )?;

    Ok(Arc::new(Mutex::new(conn)))
}
