//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building an HTTP client with browser-like defaults
//! - Per-attempt timeouts
//! - Retrying transient and anti-bot responses with linear backoff (`tokio-retry`)
//! - Rotating User-Agent strings across attempts

use crate::config::FetchConfig;
use crate::FetchError;
use async_trait::async_trait;
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CONNECTION, CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::{redirect::Policy, Client};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry::RetryIf;
use tracing::debug;
use url::Url;

/// Statuses treated as transient or anti-bot rather than final
pub const RETRYABLE_STATUSES: &[u16] = &[403, 408, 425, 429, 500, 502, 503, 504];

const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";

const MAX_REDIRECTS: usize = 10;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// URL after following redirects
    pub final_url: String,

    pub status: u16,

    /// Content-Type header value, empty if absent
    pub content_type: String,

    pub body: String,
}

impl FetchedPage {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_html(&self) -> bool {
        self.content_type.to_ascii_lowercase().contains("html")
    }
}

/// Anything that can retrieve a page by URL
///
/// The crawler only talks to the network through this trait.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches `url`, giving each attempt at most `timeout`
    ///
    /// Non-retryable HTTP statuses (404, 410, ...) are returned as pages,
    /// not errors; the caller decides what a status means.
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError>;
}

/// Returns true if a response with this status should be retried
pub fn is_retryable_status(status: u16) -> bool {
    RETRYABLE_STATUSES.contains(&status)
}

/// Uniform random delay in `[0, max_ms)`; zero when `max_ms` is zero
pub fn jitter(max_ms: u64) -> Duration {
    if max_ms == 0 {
        return Duration::ZERO;
    }
    Duration::from_millis(rand::random_range(0..max_ms))
}

/// Delay taken after every page fetch
pub fn politeness_delay(config: &FetchConfig) -> Duration {
    Duration::from_millis(config.fetch_delay_ms) + jitter(config.politeness_jitter_ms)
}

/// Delay taken before retry number `attempt + 1`
pub fn backoff_delay(config: &FetchConfig, attempt: u32) -> Duration {
    Duration::from_millis(config.fetch_delay_ms.saturating_mul(u64::from(attempt)))
        + jitter(config.retry_jitter_ms)
}

/// Sleeps between attempts: one per retry, none after the last attempt
pub fn backoff_strategy(config: &FetchConfig) -> impl Iterator<Item = Duration> + '_ {
    let retries = config.fetch_retries.max(1) - 1;
    (1..=retries).map(move |attempt| backoff_delay(config, attempt))
}

/// Why one attempt failed
#[derive(Debug)]
enum AttemptError {
    /// The request itself is malformed; retrying cannot help
    Invalid(String),

    /// Network failure, timeout or retryable status
    Transient(String),
}

impl AttemptError {
    fn is_transient(&self) -> bool {
        matches!(self, AttemptError::Transient(_))
    }
}

/// Retrying HTTP fetcher backed by `reqwest`
#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    /// Builds the HTTP client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use job_scout::config::FetchConfig;
    /// use job_scout::crawler::Fetcher;
    ///
    /// let fetcher = Fetcher::new(&FetchConfig::default()).unwrap();
    /// ```
    pub fn new(config: &FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .connect_timeout(Duration::from_millis(config.timeout_ms))
            .redirect(Policy::limited(MAX_REDIRECTS))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn user_agent(&self, attempt: u32) -> Option<&str> {
        if self.config.user_agents.is_empty() {
            return None;
        }
        let index = (attempt.saturating_sub(1) as usize) % self.config.user_agents.len();
        Some(self.config.user_agents[index].as_str())
    }

    async fn attempt(
        &self,
        url: &str,
        timeout: Duration,
        attempt: u32,
    ) -> Result<FetchedPage, AttemptError> {
        let mut request = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_HTML)
            .header(ACCEPT_LANGUAGE, self.config.accept_language.as_str())
            .header(CONNECTION, "keep-alive");

        if let Some(agent) = self.user_agent(attempt) {
            request = request.header(USER_AGENT, agent);
        }
        if !self.config.referer.is_empty() {
            request = request.header(REFERER, self.config.referer.as_str());
        }

        let exchange = async move {
            let response = request.send().await?;
            let final_url = response.url().to_string();
            let status = response.status().as_u16();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .unwrap_or("")
                .to_string();
            let body = response.text().await?;

            Ok::<_, reqwest::Error>(FetchedPage {
                final_url,
                status,
                content_type,
                body,
            })
        };

        match tokio::time::timeout(timeout, exchange).await {
            Ok(Ok(page)) => Ok(page),
            Ok(Err(e)) if e.is_builder() => Err(AttemptError::Invalid(e.to_string())),
            Ok(Err(e)) => Err(AttemptError::Transient(e.to_string())),
            Err(_) => Err(AttemptError::Transient(format!(
                "timed out after {}ms",
                timeout.as_millis()
            ))),
        }
    }
}

#[async_trait]
impl PageSource for Fetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<FetchedPage, FetchError> {
        if let Err(e) = Url::parse(url) {
            return Err(FetchError::InvalidUrl {
                url: url.to_string(),
                message: e.to_string(),
            });
        }

        let attempts = self.config.fetch_retries.max(1);
        let attempt_counter = AtomicU32::new(0);
        let counter = &attempt_counter;

        let outcome = RetryIf::spawn(
            backoff_strategy(&self.config),
            || async move {
                let attempt = counter.fetch_add(1, Ordering::Relaxed) + 1;
                let result = match self.attempt(url, timeout, attempt).await {
                    Ok(page) if is_retryable_status(page.status) => {
                        Err(AttemptError::Transient(format!("HTTP {}", page.status)))
                    }
                    other => other,
                };
                if let Err(AttemptError::Transient(message)) = &result {
                    debug!("Attempt {}/{} for {}: {}", attempt, attempts, url, message);
                }
                result
            },
            AttemptError::is_transient,
        )
        .await;

        match outcome {
            Ok(page) => Ok(page),
            Err(AttemptError::Invalid(message)) => Err(FetchError::InvalidUrl {
                url: url.to_string(),
                message,
            }),
            Err(AttemptError::Transient(last)) => {
                let attempts = attempt_counter.load(Ordering::Relaxed);
                debug!("Giving up on {} after {} attempts: {}", url, attempts, last);
                Err(FetchError::RetriesExhausted {
                    url: url.to_string(),
                    attempts,
                    last,
                })
            }
        }
    }
}
