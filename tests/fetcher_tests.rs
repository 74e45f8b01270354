//! Fetcher behaviour against a mock server

use std::time::{Duration, Instant};

use ad_radar::crawler::{compile_selector, inline_text, FetchFailure, Fetcher};
use wiremock::matchers::{header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(delay: Duration) -> Fetcher {
    Fetcher::with_client(reqwest::Client::new(), delay)
}

#[tokio::test]
async fn test_fetch_returns_queryable_document() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/d/ad-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><h1 class="css-1soizd2"> Road bike </h1></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/d/ad-1.html", server.uri());
    let title = {
        let document = fetcher(Duration::ZERO).fetch(&url).await.unwrap();
        let selector = compile_selector("h1.css-1soizd2").unwrap();
        document.select_first(&selector).map(inline_text)
    };

    assert_eq!(title.as_deref(), Some("Road bike"));
}

#[tokio::test]
async fn test_fetch_reports_status_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/d/missing.html"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let url = format!("{}/d/missing.html", server.uri());
    let failure = fetcher(Duration::ZERO).fetch(&url).await.unwrap_err();

    assert_eq!(
        failure,
        FetchFailure::Status {
            url: url.clone(),
            status: 404
        }
    );
    assert_eq!(failure.url(), url);
}

#[tokio::test]
async fn test_connection_refused_is_a_failure() {
    let url = "http://127.0.0.1:1/d/ad-1.html";

    let failure = fetcher(Duration::ZERO).fetch_html(url).await.unwrap_err();

    assert!(matches!(
        failure,
        FetchFailure::Connect { .. } | FetchFailure::Transport { .. }
    ));
    assert_eq!(failure.url(), url);
}

#[tokio::test]
async fn test_fetch_waits_for_configured_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&server)
        .await;

    let started = Instant::now();
    fetcher(Duration::from_millis(150))
        .fetch_html(&server.uri())
        .await
        .unwrap();

    assert!(started.elapsed() >= Duration::from_millis(150));
}

#[tokio::test]
async fn test_configured_fetcher_sends_browser_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("user-agent"))
        .and(header_exists("accept-language"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(1)
        .mount(&server)
        .await;

    let config = ad_radar::config::ScraperConfig {
        request_delay_ms: 0,
        ..Default::default()
    };
    let body = Fetcher::new(&config)
        .unwrap()
        .fetch_html(&server.uri())
        .await
        .unwrap();

    assert_eq!(body, "<html></html>");
}
