//! Breadth-first crawl of one domain's career pages
//!
//! The frontier seeds the queue with conventional career URLs, tops it up
//! from the domain's sitemaps, then expands pages FIFO until the queue runs
//! dry, the visited cap is hit, or the caller's deadline passes. Every fetch
//! is followed by a politeness delay.

use crate::classify::Classifier;
use crate::config::Config;
use crate::crawler::fetcher::{politeness_delay, PageSource};
use crate::crawler::parser::{parse_html, parse_sitemap_urls};
use crate::state::{CrawlState, JobCandidate, PendingUrl};
use crate::url::{is_same_root, normalize_url};
use crate::SkipReason;
use std::net::IpAddr;
use std::time::Duration;
use tokio::time::Instant;
use url::Url;

/// Title given to candidates with no better name
pub const DEFAULT_JOB_TITLE: &str = "Job Opening";

/// Conventional career-page URLs for a domain, bare domain last
///
/// Subdomain seeds are left out when the domain is an IP address.
pub fn seed_urls(domain: &str, scheme: &str) -> Vec<String> {
    let mut seeds = vec![
        format!("{}://{}/careers", scheme, domain),
        format!("{}://{}/career", scheme, domain),
        format!("{}://{}/jobs", scheme, domain),
    ];

    if !is_ip_authority(domain) {
        seeds.push(format!("{}://careers.{}", scheme, domain));
        seeds.push(format!("{}://jobs.{}", scheme, domain));
    }

    seeds.push(format!("{}://{}/join-us", scheme, domain));
    seeds.push(format!("{}://{}/careers/jobs", scheme, domain));
    seeds.push(format!("{}://{}", scheme, domain));
    seeds
}

/// Sitemap locations probed before expansion
pub fn sitemap_urls(domain: &str, scheme: &str) -> Vec<String> {
    vec![
        format!("{}://{}/sitemap.xml", scheme, domain),
        format!("{}://{}/sitemap_index.xml", scheme, domain),
    ]
}

fn is_ip_authority(domain: &str) -> bool {
    let host = match domain.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => host,
        _ => domain,
    };
    host.trim_start_matches('[')
        .trim_end_matches(']')
        .parse::<IpAddr>()
        .is_ok()
}

/// Crawl engine for a single domain
pub struct Frontier<'a> {
    source: &'a dyn PageSource,
    classifier: &'a Classifier,
    config: &'a Config,
    domain: &'a str,
    deadline: Option<Instant>,
}

impl<'a> Frontier<'a> {
    pub fn new(
        source: &'a dyn PageSource,
        classifier: &'a Classifier,
        config: &'a Config,
        domain: &'a str,
        deadline: Option<Instant>,
    ) -> Self {
        Self {
            source,
            classifier,
            config,
            domain,
            deadline,
        }
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.fetch.timeout_ms)
    }

    fn past_deadline(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    async fn pause(&self) {
        tokio::time::sleep(politeness_delay(&self.config.fetch)).await;
    }

    /// Runs seed, sitemap bootstrap and expansion; returns the final state
    pub async fn run(&self) -> CrawlState {
        let mut state = CrawlState::new(self.config.crawler.max_visited, self.config.crawler.max_queue);

        for seed in seed_urls(self.domain, &self.config.crawler.scheme) {
            state.enqueue(&seed);
        }

        self.bootstrap_from_sitemaps(&mut state).await;

        while !state.is_queue_empty() && state.can_visit() {
            if self.past_deadline() {
                tracing::info!(
                    "Deadline reached while crawling {}; stopping with {} visited, {} queued",
                    self.domain,
                    state.visited_count(),
                    state.queue_len()
                );
                break;
            }

            let Some(next) = state.pop() else {
                break;
            };

            match self.visit(&mut state, &next).await {
                Ok(()) => {
                    tracing::debug!("Expanded {}", next.url);
                    self.pause().await;
                }
                Err(SkipReason::AlreadyVisited) | Err(SkipReason::Unnormalizable) => {
                    tracing::trace!("Skipping {}: not fetched", next.url);
                }
                Err(reason) => {
                    tracing::debug!("Skipping {}: {:?}", next.url, reason);
                    self.pause().await;
                }
            }
        }

        tracing::debug!(
            "Crawl of {} finished: {} visited, {} candidates, peak queue {}",
            self.domain,
            state.visited_count(),
            state.candidates().len(),
            state.peak_queue_len()
        );

        state
    }

    async fn bootstrap_from_sitemaps(&self, state: &mut CrawlState) {
        for sitemap in sitemap_urls(self.domain, &self.config.crawler.scheme) {
            if self.past_deadline() {
                return;
            }

            let page = match self.source.fetch(&sitemap, self.timeout()).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::debug!("Sitemap {} unavailable: {}", sitemap, e);
                    self.pause().await;
                    continue;
                }
            };

            if page.is_success() {
                state.record_success();

                let urls = parse_sitemap_urls(&page.body)
                    .into_iter()
                    .filter(|url| self.classifier.looks_like_job_url(url, ""))
                    .take(self.config.crawler.sitemap_cap);

                let mut added = 0;
                for url in urls {
                    if !self.classifier.is_blocked_non_job_url(&url, "") && state.enqueue(&url) {
                        added += 1;
                    }
                }
                tracing::debug!("Sitemap {} contributed {} URLs", sitemap, added);
            } else {
                tracing::trace!("Sitemap {} returned HTTP {}", sitemap, page.status);
            }

            self.pause().await;
        }
    }

    /// Fetches one page and expands it into the queue and candidate map
    async fn visit(&self, state: &mut CrawlState, next: &PendingUrl) -> Result<(), SkipReason> {
        if state.is_visited(&next.key) {
            return Err(SkipReason::AlreadyVisited);
        }
        if !state.mark_visited(&next.key) {
            return Err(SkipReason::AlreadyVisited);
        }

        let page = self
            .source
            .fetch(&next.url, self.timeout())
            .await
            .map_err(|e| {
                tracing::debug!("Fetch failed: {}", e);
                SkipReason::Unreachable
            })?;

        if !page.is_success() {
            return Err(SkipReason::Status(page.status));
        }
        state.record_success();

        if !page.is_html() {
            return Err(SkipReason::NotHtml(page.content_type));
        }

        let base_url = Url::parse(&page.final_url).map_err(|_| SkipReason::Unnormalizable)?;
        let parsed = parse_html(&page.body, &base_url);

        if self.classifier.is_blocked_page_content(&parsed.text) {
            return Err(SkipReason::BlockedContent);
        }

        let page_title = if parsed.title.is_empty() {
            DEFAULT_JOB_TITLE.to_string()
        } else {
            parsed.title.clone()
        };

        for ats in self.classifier.ats_links(&page.body, &parsed.links) {
            if !self.classifier.is_blocked_non_job_url(&ats, "") && state.enqueue(&ats) {
                tracing::trace!("Queued ATS link {}", ats);
            }
            if self.classifier.looks_like_job_url(&ats, "") {
                state.add_candidate(JobCandidate {
                    url: ats,
                    title: page_title.clone(),
                    source_page: next.key.clone(),
                });
            }
        }

        for link in &parsed.links {
            let Some(url) = normalize_url(&link.url) else {
                continue;
            };

            if !is_same_root(&url, self.domain) && !self.classifier.is_ats_url(&url) {
                continue;
            }
            if self.classifier.is_blocked_non_job_url(&url, &link.text) {
                continue;
            }
            if !self.classifier.looks_like_job_url(&url, &link.text) {
                continue;
            }

            let title = if link.text.is_empty() {
                page_title.clone()
            } else {
                link.text.clone()
            };

            state.add_candidate(JobCandidate {
                url: url.clone(),
                title,
                source_page: next.key.clone(),
            });

            if state.enqueue(&url) {
                tracing::trace!("Queued {}", url);
            }
        }

        Ok(())
    }
}
