//! Digest composition and file delivery
//!
//! A digest lists the selected jobs, one numbered entry each, with the final
//! apply link and the company domain the job was found on.

use crate::output::traits::{Digest, Notifier, OutputResult, SelectedJob};
use crate::state::EnrichedJob;
use chrono::{DateTime, SecondsFormat, Utc};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Composes the digest for a set of selected jobs
///
/// # Arguments
///
/// * `jobs` - The selected jobs, in the order they were collected
/// * `generated_at` - Timestamp printed at the end of the body
pub fn compose_digest(jobs: &[SelectedJob], generated_at: DateTime<Utc>) -> Digest {
    let subject = format!(
        "Daily Job Hunt India: {} aligned internship/job links",
        jobs.len()
    );

    let entries: Vec<String> = jobs
        .iter()
        .enumerate()
        .map(|(i, selected)| format_entry(i + 1, selected))
        .collect();

    let body = format!(
        "Found {} unique India-eligible resume-aligned roles.\nOnly final apply links are included.\n\n{}\n\nGenerated at: {}",
        jobs.len(),
        entries.join("\n\n"),
        generated_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );

    Digest { subject, body }
}

/// One-line headline of a job
pub fn headline(job: &EnrichedJob) -> String {
    format!(
        "{} [{}] [{}] (match score: {})",
        job.display_title(),
        job.role_type,
        job.location_tag,
        job.score
    )
}

fn format_entry(index: usize, selected: &SelectedJob) -> String {
    let job = &selected.job;
    format!(
        "{}. {}\nType: {}\nFinal Apply Link: {}\nCompany domain: {}",
        index,
        headline(job),
        job.role_type,
        job.final_apply_url.as_deref().unwrap_or(""),
        selected.domain
    )
}

/// Renders a digest as a markdown document
pub fn format_digest_markdown(digest: &Digest, recipient: &str) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", digest.subject));
    if !recipient.is_empty() {
        md.push_str(&format!("- **To**: {}\n\n", recipient));
    }
    md.push_str(&digest.body);
    md.push('\n');
    md
}

/// Notifier that writes the digest as markdown to a file
#[derive(Debug, Clone)]
pub struct FileNotifier {
    path: PathBuf,
    recipient: String,
}

impl FileNotifier {
    pub fn new(path: impl Into<PathBuf>, recipient: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            recipient: recipient.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Notifier for FileNotifier {
    fn deliver(&self, digest: &Digest) -> OutputResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let markdown = format_digest_markdown(digest, &self.recipient);
        let mut file = File::create(&self.path)?;
        file.write_all(markdown.as_bytes())?;

        tracing::info!("Digest written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{LocationTag, RoleType};
    use chrono::TimeZone;

    fn selected(url: &str, title: &str, role_type: RoleType, score: u32) -> SelectedJob {
        SelectedJob {
            domain: "acme.com".to_string(),
            job: EnrichedJob {
                url: url.to_string(),
                title: title.to_string(),
                source_page: "https://acme.com/careers".to_string(),
                snippet: String::new(),
                score,
                role_type,
                fresher_friendly: true,
                tech_aligned: true,
                india_eligible: true,
                location_tag: LocationTag::IndiaOnsiteHybrid,
                final_apply_url: Some(format!("{}/apply", url)),
            },
        }
    }

    fn generated_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_subject_counts_jobs() {
        let jobs = vec![
            selected("https://acme.com/jobs/1", "Backend Intern", RoleType::Internship, 4),
            selected("https://acme.com/jobs/2", "SDE I", RoleType::Fte, 3),
        ];
        let digest = compose_digest(&jobs, generated_at());
        assert_eq!(
            digest.subject,
            "Daily Job Hunt India: 2 aligned internship/job links"
        );
    }

    #[test]
    fn test_entry_format() {
        let jobs = vec![selected(
            "https://acme.com/jobs/1",
            "  Backend\n  Intern ",
            RoleType::Internship,
            4,
        )];
        let digest = compose_digest(&jobs, generated_at());

        assert!(digest.body.starts_with(
            "Found 1 unique India-eligible resume-aligned roles.\nOnly final apply links are included.\n\n"
        ));
        assert!(digest.body.contains(
            "1. Backend Intern [internship] [india-onsite/hybrid] (match score: 4)\n\
             Type: internship\n\
             Final Apply Link: https://acme.com/jobs/1/apply\n\
             Company domain: acme.com"
        ));
        assert!(digest
            .body
            .ends_with("Generated at: 2024-03-01T09:30:00.000Z"));
    }

    #[test]
    fn test_entries_numbered_in_order() {
        let jobs = vec![
            selected("https://acme.com/jobs/1", "A", RoleType::Fte, 2),
            selected("https://acme.com/jobs/2", "B", RoleType::Fte, 5),
        ];
        let digest = compose_digest(&jobs, generated_at());
        let first = digest.body.find("1. A").unwrap();
        let second = digest.body.find("2. B").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_file_notifier_writes_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("digest.md");
        let notifier = FileNotifier::new(&path, "me@example.com");

        let digest = compose_digest(
            &[selected("https://acme.com/jobs/1", "SDE", RoleType::Fte, 3)],
            generated_at(),
        );
        notifier.deliver(&digest).unwrap();

        let written = std::fs::read_to_string(notifier.path()).unwrap();
        assert!(written.starts_with("# Daily Job Hunt India: 1 aligned internship/job links\n"));
        assert!(written.contains("- **To**: me@example.com"));
        assert!(written.contains("Company domain: acme.com"));
    }

    #[test]
    fn test_markdown_without_recipient() {
        let digest = Digest {
            subject: "S".to_string(),
            body: "B".to_string(),
        };
        assert_eq!(format_digest_markdown(&digest, ""), "# S\n\nB\n");
    }
}
