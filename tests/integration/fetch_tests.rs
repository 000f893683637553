//! Integration tests for the retrying HTTP fetcher

use super::local_config;
use job_scout::crawler::{Fetcher, PageSource};
use job_scout::FetchError;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TIMEOUT: Duration = Duration::from_secs(2);

fn fetcher() -> Fetcher {
    Fetcher::new(&local_config().fetch).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_fetch_html_page_with_browser_headers() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/careers"))
        .and(header("referer", "https://www.google.com/"))
        .and(header_exists("accept-language"))
        .and(header_exists("user-agent"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><title>Careers</title></html>", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/careers", mock_server.uri());
    let page = fetcher().fetch(&url, TIMEOUT).await.unwrap();

    assert_eq!(page.status, 200);
    assert!(page.is_success());
    assert!(page.is_html());
    assert!(page.body.contains("Careers"));
}

#[tokio::test]
async fn test_retryable_status_exhausts_attempts() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(ResponseTemplate::new(503))
        .expect(3)
        .mount(&mock_server)
        .await;

    let url = format!("{}/careers", mock_server.uri());
    let err = fetcher().fetch(&url, TIMEOUT).await.unwrap_err();

    match err {
        FetchError::RetriesExhausted { attempts, last, .. } => {
            assert_eq!(attempts, 3);
            assert_eq!(last, "HTTP 503");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_recovers_after_transient_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/jobs"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>ok</p>", "text/html"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/jobs", mock_server.uri());
    let page = fetcher().fetch(&url, TIMEOUT).await.unwrap();
    assert_eq!(page.status, 200);
}

#[tokio::test]
async fn test_not_found_is_returned_without_retry() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&mock_server)
        .await;

    let url = format!("{}/missing", mock_server.uri());
    let page = fetcher().fetch(&url, TIMEOUT).await.unwrap();
    assert_eq!(page.status, 404);
    assert!(!page.is_success());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<p>late</p>", "text/html")
                .set_delay(Duration::from_millis(800)),
        )
        .mount(&mock_server)
        .await;

    let mut config = local_config();
    config.fetch.fetch_retries = 1;
    let fetcher = Fetcher::new(&config.fetch).unwrap();

    let url = format!("{}/slow", mock_server.uri());
    let result = fetcher.fetch(&url, Duration::from_millis(100)).await;
    assert!(matches!(
        result,
        Err(FetchError::RetriesExhausted { attempts: 1, .. })
    ));
}

#[tokio::test]
async fn test_redirect_reports_final_url() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/career"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/careers", mock_server.uri()).as_str()),
        )
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/careers"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("<p>here</p>", "text/html"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/career", mock_server.uri());
    let page = fetcher().fetch(&url, TIMEOUT).await.unwrap();
    assert_eq!(page.final_url, format!("{}/careers", mock_server.uri()));
}

#[tokio::test]
async fn test_non_html_content_type() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/brochure.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/brochure.pdf", mock_server.uri());
    let page = fetcher().fetch(&url, TIMEOUT).await.unwrap();
    assert!(page.is_success());
    assert!(!page.is_html());
    assert_eq!(page.content_type, "application/pdf");
}
