//! URL handling module for Job-Scout
//!
//! This module provides URL normalization for dedup keys, bare-domain
//! normalization for seed generation, and same-root host matching.

mod domain;
mod matcher;
mod normalize;

use ::url::Url;

// Re-export main functions
pub use domain::{extract_authority, normalize_domain};
pub use matcher::matches_wildcard;
pub use normalize::normalize_url;

/// Returns true if `url` is hosted on `domain` or one of its subdomains
///
/// `domain` is a bare host as produced by [`normalize_domain`] and may carry
/// a port. Unparseable URLs never match.
///
/// # Examples
///
/// ```
/// use job_scout::url::is_same_root;
///
/// assert!(is_same_root("https://careers.acme.com/jobs", "acme.com"));
/// assert!(is_same_root("https://acme.com/jobs/1", "acme.com"));
/// assert!(!is_same_root("https://acme.co/jobs", "acme.com"));
/// ```
pub fn is_same_root(url: &str, domain: &str) -> bool {
    let authority = match Url::parse(url).ok().as_ref().and_then(extract_authority) {
        Some(a) => a,
        None => return false,
    };

    let domain = domain.strip_prefix("www.").unwrap_or(domain);
    let authority = authority.strip_prefix("www.").unwrap_or(&authority);

    matches_wildcard(&format!("*.{}", domain), authority)
}
