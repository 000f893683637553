//! Domain scrape coordination
//!
//! This module ties the pieces of a single domain scrape together:
//! - Running the frontier to collect candidates
//! - Fetching and classifying each candidate page
//! - Filtering and ranking the aligned jobs

use crate::classify::Classifier;
use crate::config::Config;
use crate::crawler::fetcher::{politeness_delay, Fetcher, PageSource};
use crate::crawler::frontier::{Frontier, DEFAULT_JOB_TITLE};
use crate::crawler::parser::{parse_html, truncate_chars, Link};
use crate::state::{CrawlState, EnrichedJob, JobCandidate, ScrapeResult};
use crate::url::normalize_domain;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Scrapes one domain at a time; cheap to share across tasks
#[derive(Clone)]
pub struct DomainScraper {
    source: Arc<dyn PageSource>,
    classifier: Arc<Classifier>,
    config: Arc<Config>,
}

impl DomainScraper {
    /// Creates a scraper that fetches over HTTP
    pub fn new(config: Config) -> crate::Result<Self> {
        let fetcher = Fetcher::new(&config.fetch)?;
        Self::with_source(config, Arc::new(fetcher))
    }

    /// Creates a scraper that fetches through `source`
    pub fn with_source(config: Config, source: Arc<dyn PageSource>) -> crate::Result<Self> {
        let classifier = Classifier::new(&config.keywords)?;
        Ok(Self {
            source,
            classifier: Arc::new(classifier),
            config: Arc::new(config),
        })
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scrapes `domain` with no time limit
    pub async fn scrape(&self, domain: &str) -> ScrapeResult {
        self.scrape_with_deadline(domain, None).await
    }

    /// Scrapes `domain`, returning whatever was gathered once `deadline` passes
    ///
    /// Never fails: unreachable pages are skipped, and a domain where nothing
    /// could be fetched comes back with `valid_domain == false`.
    pub async fn scrape_with_deadline(&self, domain: &str, deadline: Option<Instant>) -> ScrapeResult {
        let domain = normalize_domain(domain);
        if domain.is_empty() {
            tracing::debug!("Empty domain, nothing to scrape");
            return ScrapeResult::invalid();
        }

        let state = self.crawl(&domain, deadline).await;
        let valid_domain = state.successful_fetches() > 0;
        let candidates = state.into_candidates();

        let mut enriched = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            if deadline.is_some_and(|d| Instant::now() >= d) {
                tracing::info!(
                    "Deadline reached while enriching {}; {} of {} candidates done",
                    domain,
                    enriched.len(),
                    candidates.len()
                );
                break;
            }
            if let Some(job) = self.enrich(candidate).await {
                enriched.push(job);
            }
        }

        let total_found = enriched.len();
        let mut aligned: Vec<EnrichedJob> = enriched
            .into_iter()
            .filter(|job| self.is_aligned(job))
            .collect();
        aligned.sort_by(|a, b| b.score.cmp(&a.score));

        tracing::info!(
            "Scraped {}: valid={}, found={}, aligned={}",
            domain,
            valid_domain,
            total_found,
            aligned.len()
        );

        ScrapeResult {
            valid_domain,
            total_found,
            aligned,
        }
    }

    /// Runs the breadth-first crawl of `domain` (already normalized)
    pub async fn crawl(&self, domain: &str, deadline: Option<Instant>) -> CrawlState {
        Frontier::new(
            self.source.as_ref(),
            &self.classifier,
            &self.config,
            domain,
            deadline,
        )
        .run()
        .await
    }

    /// Fetches a candidate page and classifies it
    ///
    /// Returns `None` only when the page turned out to be a block page. A
    /// page that cannot be fetched still yields a job, with an empty snippet
    /// and no apply URL. A page that answered with an error status or
    /// non-HTML content may still resolve to its own URL.
    pub async fn enrich(&self, candidate: &JobCandidate) -> Option<EnrichedJob> {
        let timeout = Duration::from_millis(self.config.fetch.enrich_timeout_ms);

        let mut title = candidate.title.clone();
        let mut snippet = String::new();
        let mut links: Option<Vec<Link>> = None;

        match self.source.fetch(&candidate.url, timeout).await {
            Ok(page) if page.is_success() && page.is_html() => {
                let base_url = Url::parse(&candidate.url).or_else(|_| Url::parse(&page.final_url));
                if let Ok(base_url) = base_url {
                    let parsed = parse_html(&page.body, &base_url);
                    if self.classifier.is_blocked_page_content(&parsed.text) {
                        tracing::debug!("Dropping {}: block page", candidate.url);
                        tokio::time::sleep(politeness_delay(&self.config.fetch)).await;
                        return None;
                    }
                    if !parsed.title.is_empty() {
                        title = parsed.title;
                    }
                    snippet = truncate_chars(&parsed.text, self.config.crawler.snippet_chars);
                    links = Some(parsed.links);
                }
            }
            Ok(page) => {
                tracing::debug!(
                    "Candidate {} not enriched: HTTP {} ({})",
                    candidate.url,
                    page.status,
                    page.content_type
                );
                links = Some(Vec::new());
            }
            Err(e) => {
                tracing::debug!("Candidate {} not enriched: {}", candidate.url, e);
            }
        }

        tokio::time::sleep(politeness_delay(&self.config.fetch)).await;

        if title.trim().is_empty() {
            title = DEFAULT_JOB_TITLE.to_string();
        }

        Some(self.classify(candidate, title, snippet, links.as_deref()))
    }

    /// Builds the enriched record; `links` is `None` when the fetch failed
    fn classify(
        &self,
        candidate: &JobCandidate,
        title: String,
        snippet: String,
        links: Option<&[Link]>,
    ) -> EnrichedJob {
        let classifier = &self.classifier;
        let details = format!("{} {}", title, snippet);
        let location = classifier.location_eligibility(&format!("{} {}", details, candidate.url));
        let final_apply_url =
            links.and_then(|links| classifier.final_apply_url(links, &candidate.url));

        EnrichedJob {
            url: candidate.url.clone(),
            source_page: candidate.source_page.clone(),
            score: classifier.score_alignment(&details),
            role_type: classifier.classify_role_type(&details),
            fresher_friendly: classifier.is_fresher_friendly(&details),
            tech_aligned: classifier.is_tech_aligned(&details),
            india_eligible: location.india_eligible,
            location_tag: location.tag,
            final_apply_url,
            title,
            snippet,
        }
    }

    /// True if the job passes every aligned-set predicate
    pub fn is_aligned(&self, job: &EnrichedJob) -> bool {
        let apply_ok = job.final_apply_url.as_deref().is_some_and(|apply_url| {
            self.classifier.looks_like_direct_apply_url(apply_url)
                && self
                    .classifier
                    .is_likely_job_page(apply_url, &job.title, &job.snippet)
        });

        job.score >= self.config.crawler.min_score
            && job.fresher_friendly
            && job.tech_aligned
            && job.india_eligible
            && job.role_type.is_eligible()
            && apply_ok
    }
}
