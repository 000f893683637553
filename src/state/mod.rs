//! State module for tracking crawl progress
//!
//! This module provides the per-domain crawl state and the job records that
//! flow out of a domain scrape.
//!
//! # Components
//!
//! - `CrawlState`: FIFO frontier, visited set and candidate map of one domain
//! - `JobCandidate` / `EnrichedJob`: a posting before and after classification
//! - `ScrapeResult`: what a domain scrape hands back to its caller

mod crawl_state;
mod job;

// Re-export main types
pub use crawl_state::{CrawlState, PendingUrl};
pub use job::{EnrichedJob, JobCandidate, LocationTag, RoleType, ScrapeResult};
