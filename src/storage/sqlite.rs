//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the DomainStore trait.

use crate::state::{EnrichedJob, ScrapeResult};
use crate::storage::schema::initialize_schema;
use crate::storage::traits::{DomainStore, StorageError, StorageResult};
use crate::storage::{DomainRecord, RunRecord, RunStatus, SelectedJobRecord};
use crate::url::normalize_domain;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQLite storage backend
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Creates a new SqliteStore instance
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(SqliteStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn new(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            PRAGMA foreign_keys = ON;
            PRAGMA temp_store = MEMORY;
        ",
        )?;

        initialize_schema(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        initialize_schema(&conn)?;
        Ok(Self { conn })
    }

    fn run_from_row(row: &Row<'_>) -> rusqlite::Result<RunRecord> {
        Ok(RunRecord {
            id: row.get(0)?,
            started_at: row.get(1)?,
            finished_at: row.get(2)?,
            config_hash: row.get(3)?,
            status: RunStatus::from_db_string(&row.get::<_, String>(4)?)
                .unwrap_or(RunStatus::Running),
            jobs_collected: row.get::<_, i64>(5)? as usize,
            digest_sent: row.get::<_, i64>(6)? != 0,
        })
    }
}

impl DomainStore for SqliteStore {
    // ===== Domains =====

    fn add_domains(&mut self, domains: &[String]) -> StorageResult<usize> {
        let now = Utc::now().to_rfc3339();
        let tx = self.conn.transaction()?;
        let mut added = 0;

        {
            let mut stmt =
                tx.prepare("INSERT OR IGNORE INTO domains (domain, added_at) VALUES (?1, ?2)")?;
            for raw in domains {
                let domain = normalize_domain(raw);
                if domain.is_empty() {
                    continue;
                }
                added += stmt.execute(params![domain, now])?;
            }
        }

        tx.commit()?;
        Ok(added)
    }

    fn load_domains(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self.conn.prepare("SELECT domain FROM domains ORDER BY id")?;
        let domains = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<String>, _>>()?;
        Ok(domains)
    }

    fn record_domain_result(
        &mut self,
        domain: &str,
        result: &ScrapeResult,
        scraped_at: DateTime<Utc>,
    ) -> StorageResult<()> {
        let scraped_at = scraped_at.to_rfc3339();
        self.conn.execute(
            "INSERT INTO domains (domain, added_at, valid_domain, scraped_at, total_found, aligned_count)
             VALUES (?1, ?2, ?3, ?2, ?4, ?5)
             ON CONFLICT(domain) DO UPDATE SET
                valid_domain = excluded.valid_domain,
                scraped_at = excluded.scraped_at,
                total_found = excluded.total_found,
                aligned_count = excluded.aligned_count",
            params![
                normalize_domain(domain),
                scraped_at,
                result.valid_domain,
                result.total_found as i64,
                result.aligned.len() as i64,
            ],
        )?;
        Ok(())
    }

    fn set_digest_status(&mut self, domain: &str, status: &str) -> StorageResult<()> {
        let domain = normalize_domain(domain);
        let updated = self.conn.execute(
            "UPDATE domains SET digest_status = ?1 WHERE domain = ?2",
            params![status, domain],
        )?;
        if updated == 0 {
            return Err(StorageError::DomainNotFound(domain));
        }
        Ok(())
    }

    fn load_domain_stats(&self) -> StorageResult<Vec<DomainRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT domain, added_at, valid_domain, scraped_at, total_found, aligned_count, digest_status
             FROM domains ORDER BY id",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(DomainRecord {
                    domain: row.get(0)?,
                    added_at: row.get(1)?,
                    valid_domain: row.get::<_, Option<bool>>(2)?,
                    scraped_at: row.get(3)?,
                    total_found: row.get::<_, i64>(4)? as usize,
                    aligned_count: row.get::<_, i64>(5)? as usize,
                    digest_status: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(records)
    }

    // ===== Runs =====

    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO runs (started_at, config_hash, status) VALUES (?1, ?2, ?3)",
            params![now, config_hash, RunStatus::Running.to_db_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn complete_run(
        &mut self,
        run_id: i64,
        jobs_collected: usize,
        digest_sent: bool,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        let updated = self.conn.execute(
            "UPDATE runs SET finished_at = ?1, status = ?2, jobs_collected = ?3, digest_sent = ?4
             WHERE id = ?5",
            params![
                now,
                RunStatus::Completed.to_db_string(),
                jobs_collected as i64,
                digest_sent,
                run_id
            ],
        )?;
        if updated == 0 {
            return Err(StorageError::RunNotFound(run_id));
        }
        Ok(())
    }

    fn latest_run(&self) -> StorageResult<Option<RunRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, started_at, finished_at, config_hash, status, jobs_collected, digest_sent
             FROM runs ORDER BY id DESC LIMIT 1",
        )?;

        let run = stmt.query_row([], Self::run_from_row).optional()?;
        Ok(run)
    }

    // ===== Selected jobs =====

    fn record_selected_job(
        &mut self,
        run_id: i64,
        domain: &str,
        job: &EnrichedJob,
    ) -> StorageResult<()> {
        let now = Utc::now().to_rfc3339();
        self.conn
            .execute(
                "INSERT OR IGNORE INTO selected_jobs
                 (run_id, domain, url, title, role_type, location_tag, score, final_apply_url, selected_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    run_id,
                    normalize_domain(domain),
                    job.url,
                    job.display_title(),
                    job.role_type.to_db_string(),
                    job.location_tag.to_db_string(),
                    job.score,
                    job.final_apply_url,
                    now
                ],
            )
            .map_err(|e| match e {
                rusqlite::Error::SqliteFailure(ref err, _)
                    if err.code == rusqlite::ErrorCode::ConstraintViolation =>
                {
                    StorageError::RunNotFound(run_id)
                }
                other => StorageError::Sqlite(other),
            })?;
        Ok(())
    }

    fn load_selected_jobs(&self, run_id: i64) -> StorageResult<Vec<SelectedJobRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT run_id, domain, url, title, role_type, location_tag, score, final_apply_url, selected_at
             FROM selected_jobs WHERE run_id = ?1 ORDER BY id",
        )?;

        let jobs = stmt
            .query_map(params![run_id], |row| {
                Ok(SelectedJobRecord {
                    run_id: row.get(0)?,
                    domain: row.get(1)?,
                    url: row.get(2)?,
                    title: row.get(3)?,
                    role_type: row.get(4)?,
                    location_tag: row.get(5)?,
                    score: row.get(6)?,
                    final_apply_url: row.get(7)?,
                    selected_at: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(jobs)
    }
}
