//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with retry logic
//! - HTML parsing and link extraction
//! - Breadth-first expansion of a domain's career pages
//! - Per-domain scrape coordination

mod coordinator;
pub mod fetcher;
pub mod frontier;
pub mod parser;

pub use coordinator::DomainScraper;
pub use fetcher::{FetchedPage, Fetcher, PageSource};
pub use frontier::{seed_urls, sitemap_urls, Frontier};
pub use parser::{extract_links, extract_title, parse_html, parse_sitemap_urls, strip_html, Link, ParsedPage};
