//! Storage module for persisting scout results
//!
//! This module handles all database operations for the runner, including:
//! - SQLite database initialization and schema management
//! - Tracked domains and the outcome of their latest scrape
//! - Run tracking
//! - Jobs selected for each run's digest
//! - A write rate limiter for the store

mod rate_limit;
mod schema;
mod sqlite;
mod traits;

pub use rate_limit::{write_limiter, WriteLimiter};
pub use sqlite::SqliteStore;
pub use traits::{DomainStore, StorageError, StorageResult};

use crate::ScoutError;

use std::path::Path;

/// Initializes or opens a store database
///
/// # Arguments
///
/// * `path` - Path to the SQLite database file
///
/// # Returns
///
/// * `Ok(SqliteStore)` - Successfully initialized store
/// * `Err(ScoutError)` - Failed to initialize store
pub fn open_store(path: &Path) -> Result<SqliteStore, ScoutError> {
    Ok(SqliteStore::new(path)?)
}

/// A tracked domain together with its latest recorded outcome
#[derive(Debug, Clone, PartialEq)]
pub struct DomainRecord {
    pub domain: String,
    pub added_at: String,
    /// `None` until the domain has been scraped once
    pub valid_domain: Option<bool>,
    pub scraped_at: Option<String>,
    pub total_found: usize,
    pub aligned_count: usize,
    pub digest_status: Option<String>,
}

impl DomainRecord {
    pub fn is_scraped(&self) -> bool {
        self.scraped_at.is_some()
    }
}

/// A job stored as part of a run's digest
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedJobRecord {
    pub run_id: i64,
    pub domain: String,
    pub url: String,
    pub title: String,
    pub role_type: String,
    pub location_tag: String,
    pub score: u32,
    pub final_apply_url: Option<String>,
    pub selected_at: String,
}

/// Represents a scout run
#[derive(Debug, Clone)]
pub struct RunRecord {
    pub id: i64,
    pub started_at: String,
    pub finished_at: Option<String>,
    pub config_hash: String,
    pub status: RunStatus,
    pub jobs_collected: usize,
    pub digest_sent: bool,
}

/// Status of a scout run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Running,
    Completed,
}

impl RunStatus {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "running" => Some(Self::Running),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}
