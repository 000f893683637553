use super::{contains_any, Classifier};
use crate::crawler::parser::{extract_links, Link};
use crate::url::normalize_url;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use url::Url;

static DIRECT_APPLY_PATH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)/job/\d+|/jobs/\d+|/positions/\d+").expect("valid direct-apply regex")
});

impl Classifier {
    /// Recall-favoring filter: URL or anchor text mentions anything job-like
    pub fn looks_like_job_url(&self, url: &str, text: &str) -> bool {
        let haystack = format!("{} {}", url, text).to_lowercase();
        contains_any(&haystack, &self.keywords.job_url_hints)
    }

    /// Precision filter for auth, legal, support and navigation targets
    pub fn is_blocked_non_job_url(&self, url: &str, text: &str) -> bool {
        let haystack = format!("{} {}", url, text).to_lowercase();
        contains_any(&haystack, &self.keywords.blocked_url_markers)
    }

    /// True if the URL mentions a known applicant-tracking host
    pub fn is_ats_url(&self, url: &str) -> bool {
        contains_any(&url.to_lowercase(), &self.keywords.ats_hosts)
    }

    /// True if the URL points at a specific requisition rather than a listing
    pub fn looks_like_direct_apply_url(&self, url: &str) -> bool {
        let lower = url.to_lowercase();
        contains_any(&lower, &self.keywords.direct_apply_markers)
            || DIRECT_APPLY_PATH_RE.is_match(url)
    }

    /// Finds ATS URLs both in raw page text and among its anchors
    ///
    /// Widgets often embed postings in script or JSON data rather than
    /// anchors, so the whole document is scanned as text first. The result
    /// is deduplicated by normalized URL, in discovery order.
    pub fn extract_ats_links_from_html(&self, html: &str, base_url: &Url) -> Vec<String> {
        let links = extract_links(html, base_url);
        self.ats_links(html, &links)
    }

    /// Same as [`Classifier::extract_ats_links_from_html`] with anchors
    /// already extracted
    pub(crate) fn ats_links(&self, html: &str, links: &[Link]) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();

        let raw_matches = self
            .ats_raw
            .iter()
            .flat_map(|re| re.find_iter(html))
            .map(|m| m.as_str());

        let anchor_matches = links
            .iter()
            .map(|link| link.url.as_str())
            .filter(|url| self.is_ats_url(url));

        for candidate in raw_matches.chain(anchor_matches) {
            if let Some(normalized) = normalize_url(candidate) {
                if seen.insert(normalized.clone()) {
                    found.push(normalized);
                }
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordSets;

    fn classifier() -> Classifier {
        Classifier::new(&KeywordSets::default()).unwrap()
    }

    fn base_url() -> Url {
        Url::parse("https://acme.com/careers").unwrap()
    }

    #[test]
    fn test_job_url_by_path() {
        let c = classifier();
        assert!(c.looks_like_job_url("https://acme.com/careers/backend", ""));
        assert!(c.looks_like_job_url("https://acme.com/openings", ""));
        assert!(c.looks_like_job_url("https://jobs.lever.co/acme/123", ""));
    }

    #[test]
    fn test_job_url_by_anchor_text() {
        let c = classifier();
        assert!(c.looks_like_job_url("https://acme.com/p/42", "Summer Internship 2025"));
        assert!(!c.looks_like_job_url("https://acme.com/blog/launch", "Product launch"));
    }

    #[test]
    fn test_blocked_url() {
        let c = classifier();
        assert!(c.is_blocked_non_job_url("https://acme.com/login", ""));
        assert!(c.is_blocked_non_job_url("https://acme.com/jobs", "Sign-in to apply"));
        assert!(c.is_blocked_non_job_url("https://acme.com/privacy-policy", ""));
        assert!(!c.is_blocked_non_job_url("https://acme.com/jobs/42", "Backend Engineer"));
    }

    #[test]
    fn test_direct_apply_markers() {
        let c = classifier();
        assert!(c.looks_like_direct_apply_url("https://acme.com/careers/apply/123"));
        assert!(c.looks_like_direct_apply_url("https://boards.greenhouse.io/acme/jobs/4567"));
        assert!(c.looks_like_direct_apply_url("https://acme.com/listing?jobId=9"));
        assert!(!c.looks_like_direct_apply_url("https://acme.com/careers"));
    }

    #[test]
    fn test_direct_apply_numeric_path() {
        let c = classifier();
        assert!(c.looks_like_direct_apply_url("https://acme.com/positions/77"));
    }

    #[test]
    fn test_ats_links_from_script_data() {
        let c = classifier();
        let html = r#"<html><body>
            <script>window.__jobs = [{"url":"https://boards.greenhouse.io/acme/jobs/4567?gh_jid=4567"}];</script>
            <div data-src='https://jobs.lever.co/acme/abc-123'></div>
            </body></html>"#;
        let links = c.extract_ats_links_from_html(html, &base_url());
        assert_eq!(
            links,
            vec![
                "https://boards.greenhouse.io/acme/jobs/4567".to_string(),
                "https://jobs.lever.co/acme/abc-123".to_string(),
            ]
        );
    }

    #[test]
    fn test_ats_links_from_anchors_are_deduplicated() {
        let c = classifier();
        let html = r#"
            <a href="https://acme.wd5.myworkdayjobs.com/External/job/Pune/SDE_R1/">SDE</a>
            <a href="https://acme.wd5.myworkdayjobs.com/External/job/Pune/SDE_R1">SDE again</a>
            <a href="/careers/team">Team</a>
        "#;
        let links = c.extract_ats_links_from_html(html, &base_url());
        assert_eq!(
            links,
            vec!["https://acme.wd5.myworkdayjobs.com/External/job/Pune/SDE_R1".to_string()]
        );
    }

    #[test]
    fn test_ats_raw_scan_ignores_host_fragment_in_path() {
        let c = classifier();
        let html = "see https://acme.com/blog/why-we-chose-greenhouse for details";
        assert!(c.extract_ats_links_from_html(html, &base_url()).is_empty());
    }

    #[test]
    fn test_no_ats_links() {
        let c = classifier();
        assert!(c
            .extract_ats_links_from_html("<p>No openings</p>", &base_url())
            .is_empty());
    }
}
