//! Job-Scout main entry point
//!
//! This is the command-line interface for the Job-Scout career-site crawler.

use anyhow::Context;
use clap::Parser;
use job_scout::config::{hash_content, load_config_with_hash, Config};
use job_scout::output::{headline, load_statistics, print_statistics, FileNotifier};
use job_scout::runner::Runner;
use job_scout::storage::{open_store, DomainStore};
use job_scout::DomainScraper;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Job-Scout: finds entry-level job postings on company career sites
///
/// Job-Scout crawls each tracked company's career pages (and the
/// applicant-tracking systems they link to), classifies every posting it
/// finds against a candidate profile, and writes a digest once enough
/// aligned roles have been collected.
#[derive(Parser, Debug)]
#[command(name = "job-scout")]
#[command(version = "1.0.0")]
#[command(about = "Finds aligned job postings on company career sites", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults are used when omitted)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// File with one domain per line; blank lines and `#` comments are ignored
    #[arg(long, value_name = "PATH")]
    domains_file: Option<PathBuf>,

    /// Run normally but never deliver the digest
    #[arg(long, conflicts_with_all = ["stats", "scrape"])]
    dry_run: bool,

    /// Show statistics from the database and exit
    #[arg(long, conflicts_with_all = ["dry_run", "scrape"])]
    stats: bool,

    /// Scrape the given domains once and print the aligned jobs, without touching the database
    #[arg(long, conflicts_with_all = ["dry_run", "stats"])]
    scrape: bool,

    /// Company domains to add before running
    #[arg(value_name = "DOMAIN")]
    domains: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = load(cli.config.as_deref())?;

    let mut domains = cli.domains.clone();
    if let Some(path) = &cli.domains_file {
        domains.extend(read_domains_file(path)?);
    }

    if cli.stats {
        handle_stats(&config)?;
    } else if cli.scrape {
        handle_scrape(config, &domains).await?;
    } else {
        if cli.dry_run {
            config.run.dry_run = true;
        }
        handle_run(config, config_hash, &domains).await?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("job_scout=info,warn"),
            1 => EnvFilter::new("job_scout=debug,info"),
            2 => EnvFilter::new("job_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file, or the defaults when none is given
fn load(path: Option<&Path>) -> anyhow::Result<(Config, String)> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok((config, hash))
        }
        None => {
            tracing::info!("No configuration file given; using defaults");
            Ok((Config::default(), hash_content("")))
        }
    }
}

fn read_domains_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read domains file {}", path.display()))?;

    Ok(content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect())
}

/// Handles the --stats mode: shows statistics from the database
fn handle_stats(config: &Config) -> anyhow::Result<()> {
    println!("Database: {}\n", config.storage.database_path);

    let store = open_store(Path::new(&config.storage.database_path))?;
    let stats = load_statistics(&store)?;
    print_statistics(&stats);

    Ok(())
}

/// Handles the --scrape mode: one pass over the given domains, printed to stdout
async fn handle_scrape(config: Config, domains: &[String]) -> anyhow::Result<()> {
    if domains.is_empty() {
        anyhow::bail!("--scrape needs at least one DOMAIN or --domains-file");
    }

    let scraper = DomainScraper::new(config)?;

    for domain in domains {
        let result = scraper.scrape(domain).await;
        println!(
            "=== {} (valid: {}, found: {}, aligned: {}) ===",
            domain,
            result.valid_domain,
            result.total_found,
            result.aligned.len()
        );
        for (i, job) in result.aligned.iter().enumerate() {
            println!("{}. {}", i + 1, headline(job));
            println!("   Apply: {}", job.final_apply_url.as_deref().unwrap_or("-"));
        }
        println!();
    }

    Ok(())
}

/// Handles the main run: adds domains, then runs over every stored domain
async fn handle_run(config: Config, config_hash: String, domains: &[String]) -> anyhow::Result<()> {
    let mut store = open_store(Path::new(&config.storage.database_path))?;

    if !domains.is_empty() {
        let added = store.add_domains(domains)?;
        tracing::info!("Added {} new domains ({} given)", added, domains.len());
    }

    let notifier = Arc::new(FileNotifier::new(
        &config.output.digest_path,
        config.output.recipient.clone(),
    ));
    let scraper = DomainScraper::new(config)?;
    let mut runner = Runner::new(scraper, store, notifier, config_hash);

    match runner.run_stored().await {
        Ok(report) => {
            println!(
                "Run {} finished after {} passes: {}/{} jobs collected, digest sent: {}",
                report.run_id,
                report.passes,
                report.jobs.len(),
                report.target,
                report.digest_sent
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Run failed: {}", e);
            Err(e.into())
        }
    }
}
