//! Keyword sets driving the link and content classifiers
//!
//! The lists are plain configuration data: any list left out of the
//! `[keywords]` table falls back to the built-in tuning below, and the
//! `version` field identifies which tuning a run used.

use serde::Deserialize;

/// Current version of the built-in keyword tuning
pub const KEYWORDS_VERSION: u32 = 1;

/// Every keyword list consulted by the classifiers
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct KeywordSets {
    pub version: u32,

    /// Each match adds one to the alignment score
    pub resume: Vec<String>,

    pub stack_required: Vec<String>,

    /// Any match rules a posting out regardless of required matches
    pub stack_excluded: Vec<String>,

    pub fresher_positive: Vec<String>,

    pub senior_negative: Vec<String>,

    pub india_positive: Vec<String>,

    pub non_india_negative: Vec<String>,

    /// Matched on word boundaries
    pub internship_terms: Vec<String>,

    /// Matched on word boundaries
    pub full_time_terms: Vec<String>,

    pub job_url_hints: Vec<String>,

    pub blocked_url_markers: Vec<String>,

    pub direct_apply_markers: Vec<String>,

    pub apply_signals: Vec<String>,

    pub job_page_signals: Vec<String>,

    pub block_page_signals: Vec<String>,

    /// Host fragments of applicant-tracking systems
    pub ats_hosts: Vec<String>,
}

fn owned(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for KeywordSets {
    fn default() -> Self {
        Self {
            version: KEYWORDS_VERSION,
            resume: owned(RESUME),
            stack_required: owned(STACK_REQUIRED),
            stack_excluded: owned(STACK_EXCLUDED),
            fresher_positive: owned(FRESHER_POSITIVE),
            senior_negative: owned(SENIOR_NEGATIVE),
            india_positive: owned(INDIA_POSITIVE),
            non_india_negative: owned(NON_INDIA_NEGATIVE),
            internship_terms: owned(INTERNSHIP_TERMS),
            full_time_terms: owned(FULL_TIME_TERMS),
            job_url_hints: owned(JOB_URL_HINTS),
            blocked_url_markers: owned(BLOCKED_URL_MARKERS),
            direct_apply_markers: owned(DIRECT_APPLY_MARKERS),
            apply_signals: owned(APPLY_SIGNALS),
            job_page_signals: owned(JOB_PAGE_SIGNALS),
            block_page_signals: owned(BLOCK_PAGE_SIGNALS),
            ats_hosts: owned(ATS_HOSTS),
        }
    }
}

const RESUME: &[&str] = &[
    "software engineer",
    "software developer",
    "sde",
    "backend",
    "full stack",
    "node",
    "react",
    "javascript",
    "typescript",
    "python",
    "java",
    "ai",
    "ml",
    "machine learning",
    "deep learning",
    "llm",
    "rag",
    "langchain",
    "langgraph",
    "api",
    "intern",
];

const STACK_REQUIRED: &[&str] = &[
    "software engineer",
    "software developer",
    "sde",
    "backend",
    "full stack",
    "node",
    "node.js",
    "react",
    "javascript",
    "typescript",
    "python",
    "java",
    "api",
    "ai",
    "ml",
    "llm",
];

const STACK_EXCLUDED: &[&str] = &[
    ".net",
    "dotnet",
    "asp.net",
    "c#",
    "azure devops engineer",
    "sharepoint",
    "dynamics 365",
];

const FRESHER_POSITIVE: &[&str] = &[
    "fresher",
    "freshers",
    "entry level",
    "entry-level",
    "graduate",
    "new grad",
    "intern",
    "internship",
    "trainee",
    "associate",
    "junior",
    "0-1 years",
    "0-2 years",
    "0 to 1 years",
    "0 to 2 years",
    "1 year",
    "2 years",
];

const SENIOR_NEGATIVE: &[&str] = &[
    "senior",
    "staff",
    "lead",
    "principal",
    "architect",
    "manager",
    "director",
    "vp",
    "head of",
    "8+ years",
    "7+ years",
    "6+ years",
    "5+ years",
    "4+ years",
    "3+ years",
];

const INDIA_POSITIVE: &[&str] = &[
    "india",
    "bengaluru",
    "bangalore",
    "hyderabad",
    "pune",
    "chennai",
    "gurgaon",
    "gurugram",
    "noida",
    "mumbai",
    "delhi",
    "kolkata",
    "ahmedabad",
    "coimbatore",
    "kochi",
    "remote india",
    "work from india",
    "wfh india",
];

const NON_INDIA_NEGATIVE: &[&str] = &[
    "united states",
    "usa",
    "canada",
    "europe",
    "uk",
    "australia",
    "singapore",
    "germany",
    "only us",
    "us only",
    "eu only",
];

const INTERNSHIP_TERMS: &[&str] = &["intern", "internship"];

const FULL_TIME_TERMS: &[&str] = &[
    "full-time",
    "full time",
    "fulltime",
    "software engineer",
    "developer",
    "sde",
];

const JOB_URL_HINTS: &[&str] = &[
    "job",
    "career",
    "opening",
    "vacanc",
    "position",
    "workdayjobs",
    "greenhouse",
    "lever.co",
    "smartrecruiters",
    "ashby",
    "job-",
    "intern",
    "software-engineer",
    "developer",
];

const BLOCKED_URL_MARKERS: &[&str] = &[
    "login",
    "signin",
    "sign-in",
    "auth",
    "sso",
    "oauth",
    "account",
    "register",
    "signup",
    "sign-up",
    "faq",
    "help",
    "support",
    "contact",
    "about",
    "privacy",
    "terms",
    "home",
    "/#",
    "javascript:void",
];

const DIRECT_APPLY_MARKERS: &[&str] = &[
    "apply",
    "requisition",
    "jobid=",
    "job_id=",
    "/jobs/",
    "/job/",
    "/careers/job",
    "workdayjobs",
    "greenhouse.io",
    "lever.co",
    "smartrecruiters",
    "ashby",
];

const APPLY_SIGNALS: &[&str] = &[
    "apply",
    "apply now",
    "submit application",
    "job details",
    "view job",
    "start application",
];

const JOB_PAGE_SIGNALS: &[&str] = &[
    "job description",
    "responsibilities",
    "qualifications",
    "apply",
    "requisition",
    "job id",
    "job title",
    "opening",
    "position",
];

const BLOCK_PAGE_SIGNALS: &[&str] = &[
    "access denied",
    "are you a robot",
    "captcha",
    "forbidden",
    "temporarily unavailable",
    "request blocked",
    "security check",
    "cloudflare",
    "akamai",
];

const ATS_HOSTS: &[&str] = &[
    "workdayjobs",
    "greenhouse",
    "lever.co",
    "smartrecruiters",
    "ashby",
];
