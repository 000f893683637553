//! Storage traits and error types
//!
//! This module defines the trait interface for the domain store and its
//! associated error types.

use crate::state::{EnrichedJob, ScrapeResult};
use crate::storage::{DomainRecord, RunRecord, SelectedJobRecord};
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Run not found: {0}")]
    RunNotFound(i64),

    #[error("Domain not tracked: {0}")]
    DomainNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Persistent store of tracked domains, runs, and selected jobs
///
/// Domains are kept in the order they were first added; that order is the
/// order the runner visits them in.
pub trait DomainStore: Send {
    // ===== Domains =====

    /// Adds domains (normalized) that are not tracked yet
    ///
    /// Returns the number of domains actually added.
    fn add_domains(&mut self, domains: &[String]) -> StorageResult<usize>;

    /// Lists every tracked domain in insertion order
    fn load_domains(&self) -> StorageResult<Vec<String>>;

    /// Records the outcome of one domain scrape
    fn record_domain_result(
        &mut self,
        domain: &str,
        result: &ScrapeResult,
        scraped_at: DateTime<Utc>,
    ) -> StorageResult<()>;

    /// Sets the digest column of a domain, e.g. `yes (<ts>)` or `no (3/10)`
    fn set_digest_status(&mut self, domain: &str, status: &str) -> StorageResult<()>;

    /// Loads every tracked domain with its latest recorded outcome
    fn load_domain_stats(&self) -> StorageResult<Vec<DomainRecord>>;

    // ===== Runs =====

    /// Starts a run and returns its ID
    fn create_run(&mut self, config_hash: &str) -> StorageResult<i64>;

    /// Marks a run finished
    fn complete_run(
        &mut self,
        run_id: i64,
        jobs_collected: usize,
        digest_sent: bool,
    ) -> StorageResult<()>;

    /// Gets the most recent run
    fn latest_run(&self) -> StorageResult<Option<RunRecord>>;

    // ===== Selected jobs =====

    /// Records a job picked for a run's digest; duplicates are ignored
    fn record_selected_job(
        &mut self,
        run_id: i64,
        domain: &str,
        job: &EnrichedJob,
    ) -> StorageResult<()>;

    /// Lists the jobs selected in a run, in selection order
    fn load_selected_jobs(&self, run_id: i64) -> StorageResult<Vec<SelectedJobRecord>>;
}
