use super::{contains_any, Classifier};
use crate::state::{LocationTag, RoleType};
use once_cell::sync::Lazy;
use regex::Regex;

static YEARS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*\+?\s*(?:year|years|yr|yrs)").expect("valid years regex"));

static REMOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bremote\b").expect("valid remote regex"));

/// Most years of required experience still considered fresher-friendly
const MAX_FRESHER_YEARS: u32 = 2;

/// India-eligibility of a posting and the tag describing it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationEligibility {
    pub india_eligible: bool,
    pub tag: LocationTag,
}

impl Classifier {
    /// One point per resume keyword present
    pub fn score_alignment(&self, text: &str) -> u32 {
        let lower = text.to_lowercase();
        self.keywords
            .resume
            .iter()
            .filter(|keyword| lower.contains(keyword.as_str()))
            .count() as u32
    }

    /// Internship terms take priority over full-time terms
    pub fn classify_role_type(&self, text: &str) -> RoleType {
        let lower = text.to_lowercase();
        let matches = |re: &Option<Regex>| re.as_ref().is_some_and(|re| re.is_match(&lower));

        if matches(&self.internship) {
            RoleType::Internship
        } else if matches(&self.full_time) {
            RoleType::Fte
        } else {
            RoleType::Unknown
        }
    }

    /// Seniority markers rule a posting out before anything else is checked
    ///
    /// Without a seniority or fresher marker, the first "<N> years" mention
    /// decides; no experience signal at all means not fresher-friendly.
    pub fn is_fresher_friendly(&self, text: &str) -> bool {
        let lower = text.to_lowercase();

        if contains_any(&lower, &self.keywords.senior_negative) {
            return false;
        }
        if contains_any(&lower, &self.keywords.fresher_positive) {
            return true;
        }

        YEARS_RE
            .captures(&lower)
            .and_then(|caps| caps.get(1))
            .and_then(|years| years.as_str().parse::<u32>().ok())
            .is_some_and(|years| years <= MAX_FRESHER_YEARS)
    }

    /// Excluded stacks win even when a required stack also matches
    pub fn is_tech_aligned(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        !contains_any(&lower, &self.keywords.stack_excluded)
            && contains_any(&lower, &self.keywords.stack_required)
    }

    /// Decides India-eligibility from location tokens and the word "remote"
    ///
    /// "remote" together with the plain substring "india" is eligible even
    /// without an explicit India location token.
    pub fn location_eligibility(&self, text: &str) -> LocationEligibility {
        let lower = text.to_lowercase();
        let has_india = contains_any(&lower, &self.keywords.india_positive);
        let has_non_india = contains_any(&lower, &self.keywords.non_india_negative);
        let has_remote = REMOTE_RE.is_match(&lower);

        let india_eligible = has_india || (has_remote && lower.contains("india"));

        let (india_eligible, tag) = if !india_eligible {
            (false, LocationTag::NonIndiaUnknown)
        } else if has_non_india && !has_india {
            (false, LocationTag::NonIndia)
        } else if has_remote {
            (true, LocationTag::RemoteIndia)
        } else {
            (true, LocationTag::IndiaOnsiteHybrid)
        };

        LocationEligibility { india_eligible, tag }
    }

    /// True if the text carries an anti-bot or block-page signature
    pub fn is_blocked_page_content(&self, text: &str) -> bool {
        contains_any(&text.to_lowercase(), &self.keywords.block_page_signals)
    }

    /// Final sanity gate: not blocked and at least one job-page signal
    pub fn is_likely_job_page(&self, url: &str, title: &str, snippet: &str) -> bool {
        let details = format!("{} {}", title, snippet);
        if self.is_blocked_non_job_url(url, &details) {
            return false;
        }

        let haystack = format!("{} {}", url, details).to_lowercase();
        contains_any(&haystack, &self.keywords.job_page_signals)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KeywordSets;

    fn classifier() -> Classifier {
        Classifier::new(&KeywordSets::default()).unwrap()
    }

    const INTERN_SNIPPET: &str =
        "Software Engineer Intern - Remote (India), React, Node.js, 0-1 years experience";

    #[test]
    fn test_remote_india_intern() {
        let c = classifier();
        assert_eq!(c.classify_role_type(INTERN_SNIPPET), RoleType::Internship);
        assert!(c.is_tech_aligned(INTERN_SNIPPET));
        assert!(c.is_fresher_friendly(INTERN_SNIPPET));
        assert_eq!(
            c.location_eligibility(INTERN_SNIPPET),
            LocationEligibility {
                india_eligible: true,
                tag: LocationTag::RemoteIndia,
            }
        );
    }

    #[test]
    fn test_senior_is_never_fresher_friendly() {
        let c = classifier();
        assert!(!c.is_fresher_friendly("Senior Backend Engineer, 6+ years experience"));
        assert!(!c.is_fresher_friendly("Senior Backend Engineer, open to freshers"));
    }

    #[test]
    fn test_excluded_stack_and_us_only() {
        let c = classifier();
        let snippet = ".NET, Azure DevOps Engineer, US Only";
        assert!(!c.is_tech_aligned(snippet));
        assert!(!c.location_eligibility(snippet).india_eligible);
    }

    #[test]
    fn test_excluded_stack_beats_required() {
        let c = classifier();
        assert!(!c.is_tech_aligned("Python and C# developer"));
        assert!(c.is_tech_aligned("Python developer"));
        assert!(!c.is_tech_aligned("Marketing coordinator"));
    }

    #[test]
    fn test_years_rule() {
        let c = classifier();
        assert!(c.is_fresher_friendly("Backend developer, 2 yrs experience"));
        assert!(!c.is_fresher_friendly("Backend developer, 4 yrs experience"));
        assert!(!c.is_fresher_friendly("Backend developer"));
    }

    #[test]
    fn test_role_type_priority() {
        let c = classifier();
        assert_eq!(
            c.classify_role_type("Full-time internship program"),
            RoleType::Internship
        );
        assert_eq!(c.classify_role_type("Full time SDE"), RoleType::Fte);
        assert_eq!(c.classify_role_type("Product designer"), RoleType::Unknown);
    }

    #[test]
    fn test_role_type_word_boundaries() {
        let c = classifier();
        assert_eq!(c.classify_role_type("International sales"), RoleType::Unknown);
        assert_eq!(c.classify_role_type("Web developers"), RoleType::Unknown);
    }

    #[test]
    fn test_score_alignment_counts_each_keyword_once() {
        let c = classifier();
        assert_eq!(c.score_alignment("Nothing relevant here"), 0);
        assert!(c.score_alignment("Backend engineer with Python and React") >= 3);
        let once = c.score_alignment("python");
        let twice = c.score_alignment("python python");
        assert_eq!(once, twice);
    }

    #[test]
    fn test_location_onsite() {
        let c = classifier();
        assert_eq!(
            c.location_eligibility("Backend engineer, Bengaluru office"),
            LocationEligibility {
                india_eligible: true,
                tag: LocationTag::IndiaOnsiteHybrid,
            }
        );
    }

    #[test]
    fn test_location_unknown() {
        let c = classifier();
        assert_eq!(
            c.location_eligibility("Backend engineer, Berlin").tag,
            LocationTag::NonIndiaUnknown
        );
        assert_eq!(
            c.location_eligibility("Fully remote role").tag,
            LocationTag::NonIndiaUnknown
        );
    }

    #[test]
    fn test_block_page_content() {
        let c = classifier();
        assert!(c.is_blocked_page_content("Please complete the CAPTCHA to continue"));
        assert!(c.is_blocked_page_content("Access Denied"));
        assert!(!c.is_blocked_page_content("Software Engineer Intern"));
    }

    #[test]
    fn test_likely_job_page() {
        let c = classifier();
        assert!(c.is_likely_job_page(
            "https://acme.com/jobs/42",
            "Backend Engineer",
            "Job description: build APIs. Responsibilities include ..."
        ));
        assert!(!c.is_likely_job_page(
            "https://acme.com/jobs/42",
            "Backend Engineer",
            "We build things."
        ));
        assert!(!c.is_likely_job_page(
            "https://acme.com/login",
            "Sign in",
            "Job description"
        ));
    }
}
