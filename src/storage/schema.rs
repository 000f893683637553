//! Database schema definitions
//!
//! This module contains all SQL schema definitions for the Job-Scout database.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- Track scout runs
CREATE TABLE IF NOT EXISTS runs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    started_at TEXT NOT NULL,
    finished_at TEXT,
    config_hash TEXT NOT NULL,
    status TEXT NOT NULL,
    jobs_collected INTEGER NOT NULL DEFAULT 0,
    digest_sent INTEGER NOT NULL DEFAULT 0
);

-- Tracked company domains and the outcome of their latest scrape
CREATE TABLE IF NOT EXISTS domains (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    domain TEXT NOT NULL UNIQUE,
    added_at TEXT NOT NULL,
    valid_domain INTEGER,
    scraped_at TEXT,
    total_found INTEGER NOT NULL DEFAULT 0,
    aligned_count INTEGER NOT NULL DEFAULT 0,
    digest_status TEXT
);

-- Jobs picked for a run's digest
CREATE TABLE IF NOT EXISTS selected_jobs (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    run_id INTEGER NOT NULL REFERENCES runs(id),
    domain TEXT NOT NULL,
    url TEXT NOT NULL,
    title TEXT NOT NULL,
    role_type TEXT NOT NULL,
    location_tag TEXT NOT NULL,
    score INTEGER NOT NULL,
    final_apply_url TEXT,
    selected_at TEXT NOT NULL,
    UNIQUE(run_id, url)
);

CREATE INDEX IF NOT EXISTS idx_selected_jobs_run ON selected_jobs(run_id);
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
