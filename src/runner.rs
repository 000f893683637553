//! Multi-domain runner
//!
//! Repeatedly passes over the domain list until enough unique aligned jobs
//! have been collected or the wall-clock budget runs out:
//! - Each domain scrape runs in its own task, so a panic only loses that domain
//! - Every domain outcome is written to the store, behind the write rate limiter
//! - The digest goes out only when exactly the target number of jobs was
//!   collected, and never in dry-run mode

use crate::config::RunConfig;
use crate::crawler::DomainScraper;
use crate::output::{compose_digest, Notifier, SelectedJob};
use crate::state::ScrapeResult;
use crate::storage::{write_limiter, DomainStore, StorageResult, WriteLimiter};
use crate::url::normalize_domain;
use crate::ScoutError;
use chrono::{SecondsFormat, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    pub run_id: i64,

    /// Number of passes started over the domain list
    pub passes: usize,

    /// Distinct domains scraped at least once, in first-scrape order
    pub domains_processed: Vec<String>,

    /// Selected jobs, in collection order
    pub jobs: Vec<SelectedJob>,

    pub target: usize,
    pub digest_sent: bool,
}

impl RunReport {
    /// Digest column value written for every processed domain
    pub fn digest_status(&self, sent_at: &str) -> String {
        if self.digest_sent {
            format!("yes ({})", sent_at)
        } else {
            format!("no ({}/{})", self.jobs.len(), self.target)
        }
    }
}

/// Drives scrapes across many domains and reports the results
pub struct Runner<S: DomainStore> {
    scraper: DomainScraper,
    store: S,
    notifier: Arc<dyn Notifier>,
    limiter: WriteLimiter,
    run: RunConfig,
    config_hash: String,
}

impl<S: DomainStore> Runner<S> {
    /// Creates a runner using the scraper's run and storage settings
    pub fn new(
        scraper: DomainScraper,
        store: S,
        notifier: Arc<dyn Notifier>,
        config_hash: impl Into<String>,
    ) -> Self {
        let run = scraper.config().run.clone();
        let limiter = write_limiter(scraper.config().storage.writes_per_minute);
        Self {
            scraper,
            store,
            notifier,
            limiter,
            run,
            config_hash: config_hash.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Runs over every domain held in the store
    pub async fn run_stored(&mut self) -> Result<RunReport, ScoutError> {
        let domains = self.store.load_domains()?;
        self.run(&domains).await
    }

    /// Runs over `domains` until the target is met or time is up
    ///
    /// # Returns
    ///
    /// * `Ok(RunReport)` - The run finished, with or without a digest
    /// * `Err(ScoutError)` - No usable domains, or the run could not be recorded
    pub async fn run(&mut self, domains: &[String]) -> Result<RunReport, ScoutError> {
        let domains = dedupe_domains(domains);
        if domains.is_empty() {
            return Err(ScoutError::NoDomains);
        }

        self.throttle().await;
        let run_id = self.store.create_run(&self.config_hash)?;

        let target = self.run.target_jobs;
        let deadline = Instant::now() + Duration::from_secs(self.run.max_run_minutes * 60);

        tracing::info!(
            "Run {} started: {} domains, target {} jobs, budget {} min",
            run_id,
            domains.len(),
            target,
            self.run.max_run_minutes
        );

        let mut report = RunReport {
            run_id,
            passes: 0,
            domains_processed: Vec::new(),
            jobs: Vec::new(),
            target,
            digest_sent: false,
        };
        let mut seen = HashSet::new();

        while report.jobs.len() < target && Instant::now() < deadline {
            report.passes += 1;
            let mut made_progress = false;

            for domain in &domains {
                if report.jobs.len() >= target || Instant::now() >= deadline {
                    break;
                }

                let scraped_at = Utc::now();
                let result = self.scrape_isolated(domain, deadline).await;

                for job in &result.aligned {
                    if report.jobs.len() >= target {
                        break;
                    }
                    if seen.insert(job.url.clone()) {
                        report.jobs.push(SelectedJob {
                            domain: domain.clone(),
                            job: job.clone(),
                        });
                        made_progress = true;
                    }
                }

                self.throttle().await;
                if let Err(e) = self.store.record_domain_result(domain, &result, scraped_at) {
                    tracing::warn!("Failed to record result for {}: {}", domain, e);
                }

                if !report.domains_processed.contains(domain) {
                    report.domains_processed.push(domain.clone());
                }
            }

            tracing::info!(
                "Pass {} done: {}/{} jobs collected",
                report.passes,
                report.jobs.len(),
                target
            );

            if !made_progress && report.jobs.len() < target {
                let remaining = deadline.saturating_duration_since(Instant::now());
                let idle = Duration::from_secs(self.run.idle_wait_secs).min(remaining);
                if !idle.is_zero() {
                    tracing::debug!("No new jobs this pass; waiting {:?}", idle);
                    tokio::time::sleep(idle).await;
                }
            }
        }

        report.digest_sent = self.deliver_digest(&report.jobs, target);

        let status = report.digest_status(&timestamp());
        for domain in &report.domains_processed {
            self.throttle().await;
            if let Err(e) = self.store.set_digest_status(domain, &status) {
                tracing::warn!("Failed to set digest status for {}: {}", domain, e);
            }
        }

        self.throttle().await;
        self.record_jobs(run_id, &report.jobs)?;
        self.store
            .complete_run(run_id, report.jobs.len(), report.digest_sent)?;

        tracing::info!(
            "Completed run {}. collected={}, target={}, digest_sent={}",
            run_id,
            report.jobs.len(),
            target,
            report.digest_sent
        );

        Ok(report)
    }

    /// Scrapes one domain in its own task; a panic yields an invalid result
    async fn scrape_isolated(&self, domain: &str, deadline: Instant) -> ScrapeResult {
        let scraper = self.scraper.clone();
        let owned = domain.to_string();
        let handle =
            tokio::spawn(async move { scraper.scrape_with_deadline(&owned, Some(deadline)).await });

        match handle.await {
            Ok(result) => result,
            Err(e) => {
                let failure = ScoutError::DomainScrape {
                    domain: domain.to_string(),
                    message: e.to_string(),
                };
                tracing::warn!("{}", failure);
                ScrapeResult::invalid()
            }
        }
    }

    fn deliver_digest(&self, jobs: &[SelectedJob], target: usize) -> bool {
        if jobs.len() != target {
            return false;
        }
        if self.run.dry_run {
            tracing::info!("Dry run: skipping digest delivery");
            return false;
        }

        let digest = compose_digest(jobs, Utc::now());
        match self.notifier.deliver(&digest) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Digest delivery failed: {}", e);
                false
            }
        }
    }

    fn record_jobs(&mut self, run_id: i64, jobs: &[SelectedJob]) -> StorageResult<()> {
        for selected in jobs {
            self.store
                .record_selected_job(run_id, &selected.domain, &selected.job)?;
        }
        Ok(())
    }

    async fn throttle(&self) {
        if self.limiter.check().is_err() {
            tracing::trace!("Store write quota exhausted; waiting");
            self.limiter.until_ready().await;
        }
    }
}

fn dedupe_domains(domains: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    domains
        .iter()
        .map(|d| normalize_domain(d))
        .filter(|d| !d.is_empty() && seen.insert(d.clone()))
        .collect()
}

fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
