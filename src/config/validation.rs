use crate::config::keywords::KeywordSets;
use crate::config::types::{
    Config, CrawlerConfig, FetchConfig, RunConfig, StorageConfig,
};
use crate::ConfigError;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_crawler_config(&config.crawler)?;
    validate_run_config(&config.run)?;
    validate_storage_config(&config.storage)?;
    validate_keywords(&config.keywords)?;
    Ok(())
}

/// Validates fetcher configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.fetch_retries < 1 {
        return Err(ConfigError::Validation(format!(
            "fetch_retries must be >= 1, got {}",
            config.fetch_retries
        )));
    }

    if config.timeout_ms == 0 || config.enrich_timeout_ms == 0 {
        return Err(ConfigError::Validation(
            "timeout_ms and enrich_timeout_ms must be > 0".to_string(),
        ));
    }

    if config.user_agents.is_empty() {
        return Err(ConfigError::Validation(
            "user_agents cannot be empty".to_string(),
        ));
    }

    if config.user_agents.iter().any(|ua| ua.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "user_agents cannot contain blank entries".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawl bounds
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.max_visited < 1 {
        return Err(ConfigError::Validation(format!(
            "max_visited must be >= 1, got {}",
            config.max_visited
        )));
    }

    if config.max_queue < 1 {
        return Err(ConfigError::Validation(format!(
            "max_queue must be >= 1, got {}",
            config.max_queue
        )));
    }

    if config.snippet_chars < 1 {
        return Err(ConfigError::Validation(
            "snippet_chars must be >= 1".to_string(),
        ));
    }

    if config.scheme != "https" && config.scheme != "http" {
        return Err(ConfigError::Validation(format!(
            "scheme must be 'https' or 'http', got '{}'",
            config.scheme
        )));
    }

    Ok(())
}

/// Validates the multi-domain run budget
fn validate_run_config(config: &RunConfig) -> Result<(), ConfigError> {
    if config.target_jobs < 1 {
        return Err(ConfigError::Validation(
            "target_jobs must be >= 1".to_string(),
        ));
    }

    if config.max_run_minutes < 1 {
        return Err(ConfigError::Validation(
            "max_run_minutes must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates store configuration
fn validate_storage_config(config: &StorageConfig) -> Result<(), ConfigError> {
    if config.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    if config.writes_per_minute < 1 {
        return Err(ConfigError::Validation(
            "writes_per_minute must be >= 1".to_string(),
        ));
    }

    Ok(())
}

/// Validates the keyword tuning
fn validate_keywords(keywords: &KeywordSets) -> Result<(), ConfigError> {
    if keywords.version < 1 {
        return Err(ConfigError::Validation(
            "keywords.version must be >= 1".to_string(),
        ));
    }

    if keywords.ats_hosts.is_empty() {
        return Err(ConfigError::Validation(
            "keywords.ats_hosts cannot be empty".to_string(),
        ));
    }

    let lists = [
        ("ats_hosts", &keywords.ats_hosts),
        ("internship_terms", &keywords.internship_terms),
        ("full_time_terms", &keywords.full_time_terms),
    ];
    for (name, list) in lists {
        if list.iter().any(|term| term.trim().is_empty()) {
            return Err(ConfigError::InvalidPattern(format!(
                "keywords.{} contains an empty entry",
                name
            )));
        }
    }

    Ok(())
}
