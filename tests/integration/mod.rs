//! Integration tests for Job-Scout
//!
//! These tests use wiremock to stand up mock career sites and drive the
//! real HTTP fetcher and domain scraper against them.

mod fetch_tests;
mod scrape_tests;

use job_scout::config::Config;
use wiremock::MockServer;

/// A configuration that crawls a local mock server without any delays
pub fn local_config() -> Config {
    let mut config = Config::default();
    config.crawler.scheme = "http".to_string();
    config.fetch.fetch_delay_ms = 0;
    config.fetch.retry_jitter_ms = 0;
    config.fetch.politeness_jitter_ms = 0;
    config.fetch.timeout_ms = 2_000;
    config.fetch.enrich_timeout_ms = 2_000;
    config
}

/// The `host:port` authority of a mock server, used as the scraped domain
pub fn domain_of(server: &MockServer) -> String {
    server.address().to_string()
}
