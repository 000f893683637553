//! Job postings as they move from discovery to classification

use std::fmt;

/// A URL suspected to be a job posting, as first discovered
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCandidate {
    /// Normalized URL; unique within one domain scrape
    pub url: String,

    /// Anchor text or title of the page it was found on
    pub title: String,

    /// Normalized URL of the page that linked to it
    pub source_page: String,
}

/// Kind of position a posting advertises
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoleType {
    Internship,
    Fte,
    Unknown,
}

impl RoleType {
    /// Only internships and full-time roles can be aligned
    pub fn is_eligible(&self) -> bool {
        matches!(self, Self::Internship | Self::Fte)
    }

    /// Converts the role type to its database and digest representation
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::Internship => "internship",
            Self::Fte => "fte",
            Self::Unknown => "unknown",
        }
    }

    /// Parses a role type from its database representation
    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "internship" => Some(Self::Internship),
            "fte" => Some(Self::Fte),
            "unknown" => Some(Self::Unknown),
            _ => None,
        }
    }
}

impl fmt::Display for RoleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

/// Where a posting can be worked from, relative to India
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationTag {
    RemoteIndia,
    IndiaOnsiteHybrid,
    NonIndia,
    NonIndiaUnknown,
}

impl LocationTag {
    pub fn to_db_string(&self) -> &'static str {
        match self {
            Self::RemoteIndia => "remote-india",
            Self::IndiaOnsiteHybrid => "india-onsite/hybrid",
            Self::NonIndia => "non-india",
            Self::NonIndiaUnknown => "non-india/unknown",
        }
    }

    pub fn from_db_string(s: &str) -> Option<Self> {
        match s {
            "remote-india" => Some(Self::RemoteIndia),
            "india-onsite/hybrid" => Some(Self::IndiaOnsiteHybrid),
            "non-india" => Some(Self::NonIndia),
            "non-india/unknown" => Some(Self::NonIndiaUnknown),
            _ => None,
        }
    }
}

impl fmt::Display for LocationTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_string())
    }
}

/// A candidate after its page was fetched and classified
///
/// Every classification field is derived from `title` and `snippet` (and
/// the URL, for location); a candidate whose page could not be fetched is
/// still enriched, with an empty snippet and no apply URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedJob {
    pub url: String,
    pub title: String,
    pub source_page: String,

    /// Leading visible text of the posting page
    pub snippet: String,

    /// Alignment score; higher is better
    pub score: u32,

    pub role_type: RoleType,
    pub fresher_friendly: bool,
    pub tech_aligned: bool,
    pub india_eligible: bool,
    pub location_tag: LocationTag,

    /// Direct application target, if one could be resolved
    pub final_apply_url: Option<String>,
}

impl EnrichedJob {
    /// Title with internal whitespace collapsed, for single-line display
    pub fn display_title(&self) -> String {
        self.title.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Outcome of scraping one domain
///
/// `valid_domain == false` means nothing was fetched successfully;
/// `total_found == 0` with a valid domain means the crawl worked but found
/// nothing job-shaped. Both are normal outcomes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeResult {
    pub valid_domain: bool,

    /// Number of enriched candidates, aligned or not
    pub total_found: usize,

    /// Aligned jobs, sorted by score descending
    pub aligned: Vec<EnrichedJob>,
}

impl ScrapeResult {
    /// Result recorded for a domain whose scrape failed outright
    pub fn invalid() -> Self {
        Self::default()
    }
}
