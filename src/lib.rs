//! Job-Scout: career-site crawler and posting classifier
//!
//! This crate discovers job postings on a company's public web presence by
//! crawling its career pages (and any applicant-tracking-system hosts linked
//! from them), then classifies each posting against a candidate profile to
//! produce a ranked list of aligned openings.

pub mod classify;
pub mod config;
pub mod crawler;
pub mod output;
pub mod runner;
pub mod state;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Job-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Scrape of {domain} failed: {message}")]
    DomainScrape { domain: String, message: String },

    #[error("No domains to scrape")]
    NoDomains,
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid keyword pattern: {0}")]
    InvalidPattern(String),
}

/// Failure to retrieve a URL after every attempt was spent
///
/// Callers treat the URL as unreachable and carry on with the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request for {url} could not be built: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Gave up on {url} after {attempts} attempts: {last}")]
    RetriesExhausted {
        url: String,
        attempts: u32,
        last: String,
    },
}

/// Why a fetched or queued page was skipped without expanding it
///
/// None of these are errors; they are logged and the crawl moves on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Unnormalizable,
    AlreadyVisited,
    Unreachable,
    Status(u16),
    NotHtml(String),
    BlockedContent,
}

/// Result type alias for Job-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{DomainScraper, Fetcher};
pub use state::{EnrichedJob, JobCandidate, LocationTag, RoleType, ScrapeResult};
pub use crate::url::{normalize_domain, normalize_url};
