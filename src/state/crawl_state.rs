use super::JobCandidate;
use crate::url::normalize_url;
use std::collections::{HashSet, VecDeque};

/// A URL waiting in the frontier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingUrl {
    /// URL as discovered; this is what gets fetched
    pub url: String,

    /// Normalized form used for deduplication
    pub key: String,
}

/// Per-domain frontier, visited set, and candidate map
///
/// Owned by exactly one domain scrape. The queue is FIFO so expansion is
/// breadth-first. Both caps are enforced here: `enqueue` refuses once
/// `max_queue` entries are pending, and `mark_visited` refuses once
/// `max_visited` distinct URLs were visited.
#[derive(Debug)]
pub struct CrawlState {
    queue: VecDeque<PendingUrl>,
    pending: HashSet<String>,
    visited: HashSet<String>,

    /// Candidates in discovery order
    candidates: Vec<JobCandidate>,
    candidate_urls: HashSet<String>,

    max_visited: usize,
    max_queue: usize,

    peak_queue_len: usize,
    successful_fetches: usize,
}

impl CrawlState {
    pub fn new(max_visited: usize, max_queue: usize) -> Self {
        Self {
            queue: VecDeque::new(),
            pending: HashSet::new(),
            visited: HashSet::new(),
            candidates: Vec::new(),
            candidate_urls: HashSet::new(),
            max_visited,
            max_queue,
            peak_queue_len: 0,
            successful_fetches: 0,
        }
    }

    /// Appends a URL to the back of the queue
    ///
    /// Returns false (and leaves the queue untouched) if the URL does not
    /// normalize, was already visited, is already pending, or the queue is
    /// full.
    pub fn enqueue(&mut self, url: &str) -> bool {
        if self.queue.len() >= self.max_queue {
            return false;
        }

        let key = match normalize_url(url) {
            Some(key) => key,
            None => return false,
        };

        if self.visited.contains(&key) || !self.pending.insert(key.clone()) {
            return false;
        }

        self.queue.push_back(PendingUrl {
            url: url.to_string(),
            key,
        });
        self.peak_queue_len = self.peak_queue_len.max(self.queue.len());
        true
    }

    /// Removes and returns the head of the queue
    pub fn pop(&mut self) -> Option<PendingUrl> {
        let next = self.queue.pop_front()?;
        self.pending.remove(&next.key);
        Some(next)
    }

    /// True while the visited cap leaves room for another fetch
    pub fn can_visit(&self) -> bool {
        self.visited.len() < self.max_visited
    }

    pub fn is_visited(&self, key: &str) -> bool {
        self.visited.contains(key)
    }

    /// Records a normalized URL as visited
    ///
    /// Returns false if it was already visited or the cap is reached.
    pub fn mark_visited(&mut self, key: &str) -> bool {
        if !self.can_visit() {
            return false;
        }
        self.visited.insert(key.to_string())
    }

    /// Adds a candidate unless its URL is already one; first discovery wins
    pub fn add_candidate(&mut self, candidate: JobCandidate) -> bool {
        if !self.candidate_urls.insert(candidate.url.clone()) {
            return false;
        }
        self.candidates.push(candidate);
        true
    }

    /// Counts a fetch that came back with a 2xx status
    pub fn record_success(&mut self) {
        self.successful_fetches += 1;
    }

    pub fn successful_fetches(&self) -> usize {
        self.successful_fetches
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_queue_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Largest number of pending entries seen at any point
    pub fn peak_queue_len(&self) -> usize {
        self.peak_queue_len
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn candidates(&self) -> &[JobCandidate] {
        &self.candidates
    }

    pub fn into_candidates(self) -> Vec<JobCandidate> {
        self.candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(url: &str, title: &str) -> JobCandidate {
        JobCandidate {
            url: url.to_string(),
            title: title.to_string(),
            source_page: "https://acme.com/careers".to_string(),
        }
    }

    #[test]
    fn test_fifo_order() {
        let mut state = CrawlState::new(10, 10);
        assert!(state.enqueue("https://acme.com/careers"));
        assert!(state.enqueue("https://acme.com/jobs"));

        assert_eq!(state.pop().unwrap().url, "https://acme.com/careers");
        assert_eq!(state.pop().unwrap().url, "https://acme.com/jobs");
        assert!(state.pop().is_none());
    }

    #[test]
    fn test_queue_cap() {
        let mut state = CrawlState::new(10, 2);
        assert!(state.enqueue("https://acme.com/a"));
        assert!(state.enqueue("https://acme.com/b"));
        assert!(!state.enqueue("https://acme.com/c"));
        assert_eq!(state.queue_len(), 2);
        assert_eq!(state.peak_queue_len(), 2);
    }

    #[test]
    fn test_pending_dedup_by_normalized_url() {
        let mut state = CrawlState::new(10, 10);
        assert!(state.enqueue("https://acme.com/jobs/"));
        assert!(!state.enqueue("https://acme.com/jobs?ref=home"));
        assert_eq!(state.queue_len(), 1);

        let popped = state.pop().unwrap();
        assert_eq!(popped.url, "https://acme.com/jobs/");
        assert_eq!(popped.key, "https://acme.com/jobs");
    }

    #[test]
    fn test_visited_urls_are_not_requeued() {
        let mut state = CrawlState::new(10, 10);
        assert!(state.mark_visited("https://acme.com/jobs"));
        assert!(!state.mark_visited("https://acme.com/jobs"));
        assert!(!state.enqueue("https://acme.com/jobs/"));
        assert_eq!(state.visited_count(), 1);
    }

    #[test]
    fn test_visited_cap() {
        let mut state = CrawlState::new(2, 10);
        assert!(state.mark_visited("https://acme.com/a"));
        assert!(state.mark_visited("https://acme.com/b"));
        assert!(!state.can_visit());
        assert!(!state.mark_visited("https://acme.com/c"));
        assert_eq!(state.visited_count(), 2);
    }

    #[test]
    fn test_unnormalizable_is_rejected() {
        let mut state = CrawlState::new(10, 10);
        assert!(!state.enqueue("mailto:jobs@acme.com"));
        assert!(state.is_queue_empty());
    }

    #[test]
    fn test_first_candidate_wins() {
        let mut state = CrawlState::new(10, 10);
        assert!(state.add_candidate(candidate("https://acme.com/jobs/1", "First")));
        assert!(!state.add_candidate(candidate("https://acme.com/jobs/1", "Second")));
        assert!(state.add_candidate(candidate("https://acme.com/jobs/2", "Other")));

        let candidates = state.into_candidates();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].title, "First");
        assert_eq!(candidates[1].url, "https://acme.com/jobs/2");
    }
}
