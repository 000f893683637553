//! Configuration module for Job-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional, so an empty file (or no file at all) yields the
//! default tuning.
//!
//! # Example
//!
//! ```no_run
//! use job_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("job-scout.toml")).unwrap();
//! println!("Visiting at most {} pages per domain", config.crawler.max_visited);
//! ```

mod keywords;
mod parser;
mod types;
mod validation;

// Re-export types
pub use keywords::{KeywordSets, KEYWORDS_VERSION};
pub use types::{
    Config, CrawlerConfig, FetchConfig, OutputConfig, RunConfig, StorageConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, hash_content, load_config, load_config_with_hash};
pub use validation::validate;
