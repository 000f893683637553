use crate::config::keywords::KeywordSets;
use serde::Deserialize;

/// Main configuration structure for Job-Scout
///
/// Every section is optional; a missing section takes its defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub crawler: CrawlerConfig,
    pub run: RunConfig,
    pub storage: StorageConfig,
    pub output: OutputConfig,
    pub keywords: KeywordSets,
}

/// Network behaviour of the resilient fetcher
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct FetchConfig {
    /// Attempts per URL before giving up
    pub fetch_retries: u32,

    /// Base delay (milliseconds) for linear backoff and politeness pauses
    pub fetch_delay_ms: u64,

    /// Per-attempt timeout while crawling (milliseconds)
    pub timeout_ms: u64,

    /// Per-attempt timeout while enriching candidates (milliseconds)
    pub enrich_timeout_ms: u64,

    /// Upper bound of the random jitter added between attempts
    pub retry_jitter_ms: u64,

    /// Upper bound of the random jitter added after each page
    pub politeness_jitter_ms: u64,

    pub accept_language: String,

    pub referer: String,

    /// Rotation pool, one entry per attempt in round-robin order
    pub user_agents: Vec<String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            fetch_retries: 3,
            fetch_delay_ms: 450,
            timeout_ms: 10_000,
            enrich_timeout_ms: 9_000,
            retry_jitter_ms: 600,
            politeness_jitter_ms: 400,
            accept_language: "en-IN,en;q=0.9".to_string(),
            referer: "https://www.google.com/".to_string(),
            user_agents: DEFAULT_USER_AGENTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

const DEFAULT_USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 Chrome/132.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 13_6) AppleWebKit/537.36 Chrome/130.0.0.0 Safari/537.36",
];

/// Bounds of a single domain crawl
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CrawlerConfig {
    /// Maximum distinct URLs fetched by the frontier per domain
    pub max_visited: usize,

    /// Maximum pending entries in the frontier queue
    pub max_queue: usize,

    /// Job-like URLs taken from each sitemap
    pub sitemap_cap: usize,

    /// Minimum alignment score for a posting to be surfaced
    pub min_score: u32,

    /// Characters of page text kept as the enrichment snippet
    pub snippet_chars: usize,

    /// Scheme used for seed URLs
    pub scheme: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_visited: 40,
            max_queue: 120,
            sitemap_cap: 120,
            min_score: 2,
            snippet_chars: 900,
            scheme: "https".to_string(),
        }
    }
}

/// Multi-domain run budget
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RunConfig {
    /// Number of unique aligned jobs that completes a run
    pub target_jobs: usize,

    /// Wall-clock budget for the whole run
    pub max_run_minutes: u64,

    /// Pause after a pass over every domain that yielded no new job
    pub idle_wait_secs: u64,

    /// Never deliver the digest
    pub dry_run: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            target_jobs: 10,
            max_run_minutes: 120,
            idle_wait_secs: 60,
            dry_run: false,
        }
    }
}

/// Domain-stats store configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StorageConfig {
    /// Path to the SQLite database file
    pub database_path: String,

    /// Write quota enforced in front of the store
    pub writes_per_minute: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: "./job-scout.db".to_string(),
            writes_per_minute: 60,
        }
    }
}

/// Digest output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Path to the markdown digest file
    pub digest_path: String,

    /// Who the digest is addressed to
    pub recipient: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            digest_path: "./digest.md".to_string(),
            recipient: String::new(),
        }
    }
}
