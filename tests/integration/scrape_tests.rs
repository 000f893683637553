//! End-to-end domain scrapes against mock career sites

use super::{domain_of, local_config};
use job_scout::state::{LocationTag, RoleType};
use job_scout::DomainScraper;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const INTERN_POSTING: &str = r#"<html><head><title>Software Engineer Intern - Remote India</title></head><body>
    <h1>Software Engineer Intern</h1>
    <p>Job description: build APIs with React, Node.js, TypeScript and Python.</p>
    <p>0-1 years experience.</p>
    <a href="/careers/software-engineer-intern/apply">Apply now</a>
</body></html>"#;

const SENIOR_POSTING: &str = r#"<html><head><title>Senior Engineer - Bengaluru</title></head><body>
    <p>Job description: lead a team. 6+ years experience with Python.</p>
    <a href="/careers/senior-engineer/apply">Apply now</a>
</body></html>"#;

async fn mount_html(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_string(), "text/html"))
        .mount(server)
        .await;
}

fn scraper() -> DomainScraper {
    DomainScraper::new(local_config()).expect("Failed to build scraper")
}

#[tokio::test]
async fn test_full_scrape_single_domain() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/careers",
        r#"<html><head><title>Careers at Acme</title></head><body>
            <a href="/careers/software-engineer-intern">Software Engineer Intern</a>
            <a href="/careers/senior-engineer">Senior Engineer</a>
            <a href="/about">About us</a>
        </body></html>"#,
    )
    .await;
    mount_html(&mock_server, "/careers/software-engineer-intern", INTERN_POSTING).await;
    mount_html(&mock_server, "/careers/senior-engineer", SENIOR_POSTING).await;

    let result = scraper().scrape(&domain_of(&mock_server)).await;

    // Both postings plus the apply links found on them
    assert!(result.valid_domain);
    assert_eq!(result.total_found, 4);
    assert_eq!(result.aligned.len(), 1);

    let job = &result.aligned[0];
    let base = mock_server.uri();
    assert_eq!(job.url, format!("{}/careers/software-engineer-intern", base));
    assert_eq!(job.title, "Software Engineer Intern - Remote India");
    assert_eq!(job.role_type, RoleType::Internship);
    assert_eq!(job.location_tag, LocationTag::RemoteIndia);
    assert_eq!(
        job.final_apply_url,
        Some(format!("{}/careers/software-engineer-intern/apply", base))
    );
}

#[tokio::test]
async fn test_unreachable_site_is_invalid() {
    let mock_server = MockServer::start().await;

    let result = scraper().scrape(&domain_of(&mock_server)).await;

    assert!(!result.valid_domain);
    assert_eq!(result.total_found, 0);
    assert!(result.aligned.is_empty());
}

#[tokio::test]
async fn test_block_page_is_not_expanded() {
    let mock_server = MockServer::start().await;

    mount_html(
        &mock_server,
        "/careers",
        r#"<html><body>
            <p>Please complete the captcha to continue.</p>
            <a href="/careers/software-engineer-intern">Software Engineer Intern</a>
        </body></html>"#,
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/careers/software-engineer-intern"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(INTERN_POSTING, "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = scraper().scrape(&domain_of(&mock_server)).await;

    assert!(result.valid_domain);
    assert_eq!(result.total_found, 0);
}

#[tokio::test]
async fn test_sitemap_urls_are_crawled() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            format!(
                r#"<?xml version="1.0"?><urlset>
                    <url><loc>{base}/careers/backend-intern</loc></url>
                    <url><loc>{base}/blog/company-news</loc></url>
                </urlset>"#
            ),
            "application/xml",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/careers/backend-intern"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            "<html><head><title>Backend Intern</title></head><body>Job description</body></html>",
            "text/html",
        ))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/blog/company-news"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>news</p>", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = scraper().scrape(&domain_of(&mock_server)).await;
    assert!(result.valid_domain);
}

#[tokio::test]
async fn test_non_html_pages_are_not_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"jobs": ["<a href='/careers/ml-intern'>ML Intern</a>"]}"#,
            "application/json",
        ))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/careers/ml-intern"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>intern</p>", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = scraper().scrape(&domain_of(&mock_server)).await;

    // A 2xx response still proves the domain is alive
    assert!(result.valid_domain);
    assert_eq!(result.total_found, 0);
}

#[tokio::test]
async fn test_visited_cap_limits_fetches() {
    let mock_server = MockServer::start().await;

    let links: String = (1..=20)
        .map(|i| format!(r#"<a href="/careers/job-{i}">Engineer {i}</a>"#))
        .collect();
    mount_html(
        &mock_server,
        "/careers",
        &format!("<html><head><title>Careers</title></head><body>{links}</body></html>"),
    )
    .await;

    let mut config = local_config();
    config.crawler.max_visited = 3;
    let scraper = DomainScraper::new(config).unwrap();

    let result = scraper.scrape(&domain_of(&mock_server)).await;

    // Every linked posting is a candidate even though few pages were visited
    assert_eq!(result.total_found, 20);
}
