//! Statistics generation from the domain store
//!
//! This module provides functionality for extracting and displaying
//! scout statistics from the storage layer.

use crate::storage::{DomainStore, RunRecord};

/// Scout statistics summary
#[derive(Debug, Clone, Default)]
pub struct ScoutStatistics {
    /// Number of tracked domains
    pub domains_tracked: usize,

    /// Domains whose latest scrape fetched at least one page
    pub valid_domains: usize,

    /// Domains scraped at least once
    pub scraped_domains: usize,

    /// Sum of candidates found in the latest scrape of each domain
    pub total_found: usize,

    /// Sum of aligned jobs in the latest scrape of each domain
    pub total_aligned: usize,

    pub last_run: Option<RunRecord>,
}

/// Loads statistics from the store
///
/// # Arguments
///
/// * `store` - The store to query
///
/// # Returns
///
/// * `Ok(ScoutStatistics)` - Successfully loaded statistics
/// * `Err(ScoutError)` - Failed to query statistics
pub fn load_statistics(store: &dyn DomainStore) -> crate::Result<ScoutStatistics> {
    let records = store.load_domain_stats()?;

    let mut stats = ScoutStatistics {
        domains_tracked: records.len(),
        last_run: store.latest_run()?,
        ..Default::default()
    };

    for record in &records {
        if record.valid_domain == Some(true) {
            stats.valid_domains += 1;
        }
        if record.is_scraped() {
            stats.scraped_domains += 1;
        }
        stats.total_found += record.total_found;
        stats.total_aligned += record.aligned_count;
    }

    Ok(stats)
}

/// Prints statistics to stdout in a formatted manner
///
/// # Arguments
///
/// * `stats` - The statistics to display
pub fn print_statistics(stats: &ScoutStatistics) {
    println!("=== Scout Statistics ===\n");

    println!("Domains:");
    println!("  Tracked: {}", stats.domains_tracked);
    println!("  Scraped: {}", stats.scraped_domains);
    println!("  Valid: {}", stats.valid_domains);
    println!();

    println!("Jobs (latest scrape per domain):");
    println!("  Total found: {}", stats.total_found);
    println!("  Aligned: {}", stats.total_aligned);
    println!();

    match &stats.last_run {
        Some(run) => {
            println!("Last Run:");
            println!("  ID: {}", run.id);
            println!("  Started: {}", run.started_at);
            if let Some(finished) = &run.finished_at {
                println!("  Finished: {}", finished);
            }
            println!("  Status: {}", run.status.to_db_string());
            println!("  Jobs collected: {}", run.jobs_collected);
            println!("  Digest sent: {}", if run.digest_sent { "yes" } else { "no" });
        }
        None => println!("No runs recorded yet."),
    }
}
