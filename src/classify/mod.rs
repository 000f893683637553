//! Keyword-driven classification of links, pages, and postings
//!
//! A [`Classifier`] is compiled once from a [`KeywordSets`] and then shared
//! (read-only) across every domain scrape. All matching is case-insensitive
//! substring matching unless a method says otherwise.
//!
//! - [`links`]: job-likeness and block filters for URLs, ATS link discovery
//! - [`content`]: scoring and classification of fetched posting text
//! - [`apply`]: resolution of the final application URL of a posting

pub mod apply;
pub mod content;
pub mod links;

use crate::config::KeywordSets;
use crate::ConfigError;
use regex::Regex;

pub use content::LocationEligibility;

/// Compiled form of the keyword sets
#[derive(Debug, Clone)]
pub struct Classifier {
    keywords: KeywordSets,

    /// Raw-text scan for absolute URLs on an ATS host
    ats_raw: Option<Regex>,

    internship: Option<Regex>,

    full_time: Option<Regex>,
}

impl Classifier {
    /// Compiles the regexes derived from `keywords`
    ///
    /// Every list is lower-cased first. An empty list compiles to a matcher
    /// that never matches.
    pub fn new(keywords: &KeywordSets) -> Result<Self, ConfigError> {
        let keywords = lowercased(keywords);
        Ok(Self {
            ats_raw: ats_raw_pattern(&keywords.ats_hosts)?,
            internship: word_pattern(&keywords.internship_terms)?,
            full_time: word_pattern(&keywords.full_time_terms)?,
            keywords,
        })
    }

    /// The keyword sets this classifier was built from
    pub fn keywords(&self) -> &KeywordSets {
        &self.keywords
    }
}

/// True if `haystack` (already lower-cased) contains any of `needles`
pub(crate) fn contains_any(haystack: &str, needles: &[String]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

fn lowercased(keywords: &KeywordSets) -> KeywordSets {
    let lower = |list: &Vec<String>| -> Vec<String> {
        list.iter().map(|keyword| keyword.to_lowercase()).collect()
    };

    KeywordSets {
        version: keywords.version,
        resume: lower(&keywords.resume),
        stack_required: lower(&keywords.stack_required),
        stack_excluded: lower(&keywords.stack_excluded),
        fresher_positive: lower(&keywords.fresher_positive),
        senior_negative: lower(&keywords.senior_negative),
        india_positive: lower(&keywords.india_positive),
        non_india_negative: lower(&keywords.non_india_negative),
        internship_terms: lower(&keywords.internship_terms),
        full_time_terms: lower(&keywords.full_time_terms),
        job_url_hints: lower(&keywords.job_url_hints),
        blocked_url_markers: lower(&keywords.blocked_url_markers),
        direct_apply_markers: lower(&keywords.direct_apply_markers),
        apply_signals: lower(&keywords.apply_signals),
        job_page_signals: lower(&keywords.job_page_signals),
        block_page_signals: lower(&keywords.block_page_signals),
        ats_hosts: lower(&keywords.ats_hosts),
    }
}

fn compile(pattern: &str) -> Result<Regex, ConfigError> {
    Regex::new(pattern).map_err(|e| ConfigError::InvalidPattern(e.to_string()))
}

fn alternation(terms: &[String]) -> String {
    terms
        .iter()
        .map(|term| regex::escape(&term.to_lowercase()))
        .collect::<Vec<_>>()
        .join("|")
}

fn word_pattern(terms: &[String]) -> Result<Option<Regex>, ConfigError> {
    if terms.is_empty() {
        return Ok(None);
    }
    compile(&format!(r"\b(?:{})\b", alternation(terms))).map(Some)
}

fn ats_raw_pattern(hosts: &[String]) -> Result<Option<Regex>, ConfigError> {
    if hosts.is_empty() {
        return Ok(None);
    }
    compile(&format!(
        r#"(?i)https?://[^\s"'<>&\\/`]*?(?:{})[^\s"'<>&\\`]*"#,
        alternation(hosts)
    ))
    .map(Some)
}
