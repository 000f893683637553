use super::{contains_any, Classifier};
use crate::crawler::parser::{extract_links, Link};
use crate::url::normalize_url;
use url::Url;

impl Classifier {
    /// Resolves the application target of a posting page
    ///
    /// Returns the first anchor with apply-intent text that is not blocked
    /// and normalizes to a direct-apply URL. Failing that, the page's own
    /// URL is used when it is job-like, not blocked, and direct-apply.
    /// `None` means the posting has no resolvable application target.
    pub fn find_final_apply_url(&self, html: &str, base_url: &str) -> Option<String> {
        let links = match Url::parse(base_url) {
            Ok(base) => extract_links(html, &base),
            Err(_) => Vec::new(),
        };
        self.final_apply_url(&links, base_url)
    }

    pub(crate) fn final_apply_url(&self, links: &[Link], base_url: &str) -> Option<String> {
        let from_anchor = links
            .iter()
            .filter(|link| !self.is_blocked_non_job_url(&link.url, &link.text))
            .filter(|link| {
                let haystack = format!("{} {}", link.url, link.text).to_lowercase();
                contains_any(&haystack, &self.keywords.apply_signals)
            })
            .filter_map(|link| normalize_url(&link.url))
            .find(|url| self.looks_like_direct_apply_url(url));

        from_anchor.or_else(|| {
            normalize_url(base_url).filter(|own| {
                self.looks_like_job_url(own, "")
                    && !self.is_blocked_non_job_url(own, "")
                    && self.looks_like_direct_apply_url(own)
            })
        })
    }
}
