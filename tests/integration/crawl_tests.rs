//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end.

use std::sync::Arc;
use sumi_sweep::analyzer::{AnalyzerRegistry, EchoUrlAnalyzer};
use sumi_sweep::config::{Config, CrawlerConfig, UserAgentConfig};
use sumi_sweep::output::MemorySink;
use sumi_sweep::{CrawlState, Crawler};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration with the given crawl limit
fn create_test_config(max_crawls: i64) -> Config {
    Config {
        crawler: CrawlerConfig {
            max_crawls,
            request_timeout: 5,
            connect_timeout: 2,
            max_redirects: 5,
        },
        user_agent: UserAgentConfig {
            crawler_name: "TestBot".to_string(),
            crawler_version: "1.0.0".to_string(),
            contact_url: "https://example.com/contact".to_string(),
            contact_email: "test@example.com".to_string(),
        },
    }
}

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/html"))
        .mount(server)
        .await;
}

fn page(links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|href| format!(r#"<a href="{}">link</a>"#, href))
        .collect();
    format!(
        "<html><head><title>Test</title></head><body>{}</body></html>",
        anchors
    )
}

/// Builds a registry whose only analyzer echoes into the returned sink
fn echo_registry() -> (Arc<MemorySink>, AnalyzerRegistry) {
    let sink = Arc::new(MemorySink::new());
    let mut registry = AnalyzerRegistry::new();
    registry
        .add(
            Arc::new(EchoUrlAnalyzer::new(sink.clone())),
            Some("echo"),
            false,
        )
        .unwrap();
    (sink, registry)
}

#[tokio::test]
async fn test_full_crawl_breadth_first() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page(&["/a", "/b"])).await;
    mount_page(&server, "/a", page(&["/a/deep", "/"])).await;
    mount_page(&server, "/b", page(&["/b/deep"])).await;
    mount_page(&server, "/a/deep", page(&[])).await;
    mount_page(&server, "/b/deep", page(&[])).await;

    let (sink, registry) = echo_registry();
    let mut crawler =
        Crawler::new(&format!("{}/", base), Some(registry), &create_test_config(0)).unwrap();

    let stats = crawler.crawl().await.unwrap();

    assert_eq!(
        sink.lines(),
        vec![
            format!("{}/", base),
            format!("{}/a", base),
            format!("{}/b", base),
            format!("{}/a/deep", base),
            format!("{}/b/deep", base),
        ]
    );
    assert_eq!(stats.pages_processed, 5);
    assert_eq!(stats.pages_unavailable, 0);
    assert_eq!(crawler.state(), CrawlState::Finished);
}

#[tokio::test]
async fn test_crawl_respects_max_crawls() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page(&["/1", "/2", "/3"])).await;
    mount_page(&server, "/1", page(&["/4"])).await;
    mount_page(&server, "/2", page(&[])).await;
    mount_page(&server, "/3", page(&[])).await;

    let (sink, registry) = echo_registry();
    let mut crawler =
        Crawler::new(&format!("{}/", base), Some(registry), &create_test_config(2)).unwrap();

    let stats = crawler.crawl().await.unwrap();

    assert_eq!(sink.lines(), vec![format!("{}/", base), format!("{}/1", base)]);
    assert_eq!(crawler.frontier().len(), 2);
    assert_eq!(stats.links_rejected, 3);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2, "Only frontier entries should be fetched");
}

#[tokio::test]
async fn test_single_crawl_limit_fetches_root_only() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page(&["/x", "/y", "/z"])).await;

    let (sink, registry) = echo_registry();
    let mut crawler =
        Crawler::new(&format!("{}/", base), Some(registry), &create_test_config(1)).unwrap();

    crawler.crawl().await.unwrap();

    assert_eq!(sink.lines(), vec![format!("{}/", base)]);
    assert_eq!(crawler.frontier().len(), 1);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_unavailable_pages_are_skipped() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page(&["/missing", "/broken", "/ok"])).await;
    mount_page(&server, "/ok", page(&[])).await;

    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    // "/missing" has no mock; wiremock answers 404

    let (sink, registry) = echo_registry();
    let mut crawler =
        Crawler::new(&format!("{}/", base), Some(registry), &create_test_config(0)).unwrap();

    let stats = crawler.crawl().await.unwrap();

    assert_eq!(sink.lines(), vec![format!("{}/", base), format!("{}/ok", base)]);
    assert_eq!(stats.pages_processed, 2);
    assert_eq!(stats.pages_unavailable, 2);
    assert_eq!(stats.pages_visited(), 4);
}

#[tokio::test]
async fn test_non_html_pages_are_not_analyzed() {
    let server = MockServer::start().await;
    let base = server.uri();

    mount_page(&server, "/", page(&["/data.json", "/logo.png"])).await;

    Mock::given(method("GET"))
        .and(path("/data.json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"a": "/hidden"}"#, "application/json"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/logo.png"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(vec![0u8, 1, 2], "image/png"))
        .mount(&server)
        .await;

    let (sink, registry) = echo_registry();
    let mut crawler =
        Crawler::new(&format!("{}/", base), Some(registry), &create_test_config(0)).unwrap();

    let stats = crawler.crawl().await.unwrap();

    assert_eq!(sink.lines(), vec![format!("{}/", base)]);
    assert_eq!(stats.pages_unavailable, 2);
    assert_eq!(crawler.frontier().len(), 3);
}

#[tokio::test]
async fn test_relative_links_resolve_against_redirect_target() {
    let server = MockServer::start().await;
    let base = server.uri();
    let location = format!("{}/docs/", base);

    Mock::given(method("GET"))
        .and(path("/start"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", location.as_str()),
        )
        .mount(&server)
        .await;
    mount_page(&server, "/docs/", page(&["./guide"])).await;
    mount_page(&server, "/docs/guide", page(&[])).await;

    let (sink, registry) = echo_registry();
    let mut crawler =
        Crawler::new(&format!("{}/start", base), Some(registry), &create_test_config(0))
            .unwrap();

    crawler.crawl().await.unwrap();

    // The frontier keeps the pre-redirect URL; links resolve against the final one
    assert_eq!(
        sink.lines(),
        vec![format!("{}/start", base), format!("{}/docs/guide", base)]
    );
}

#[tokio::test]
async fn test_schemeless_root() {
    let server = MockServer::start().await;
    let address = server.address().to_string();

    mount_page(&server, "/", page(&[])).await;

    let (sink, registry) = echo_registry();
    let mut crawler = Crawler::new(&address, Some(registry), &create_test_config(0)).unwrap();

    assert_eq!(crawler.root(), format!("http://{}", address));

    let stats = crawler.crawl().await.unwrap();

    assert_eq!(sink.lines(), vec![format!("http://{}", address)]);
    assert_eq!(stats.pages_processed, 1);
}
