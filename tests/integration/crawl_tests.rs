//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from the seed fetch to INDEX.md.

use site_archiver::config::Config;
use site_archiver::crawler::{run_crawl, HttpExtractor};
use site_archiver::filter::RejectReason;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration writing under `root`
fn create_test_config(root: &Path, max_depth: u32, max_pages: u32) -> Config {
    let mut config = Config::default();
    config.crawler.max_depth = max_depth;
    config.crawler.max_pages = max_pages;
    config.crawler.delay_ms = 0;
    config.crawler.timeout_secs = 5;
    config.user_agent.value = "TestArchiver/1.0".to_string();
    config.output.root = root.to_string_lossy().into_owned();
    config
}

/// Archive directory of the mock server's host
fn host_dir(root: &Path, server: &MockServer) -> PathBuf {
    root.join(format!("127.0.0.1_{}", server.address().port()))
}

fn html_page(title: &str, body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!(
            "<html><head><title>{}</title></head><body>{}</body></html>",
            title, body
        ),
        "text/html; charset=utf-8",
    )
}

async fn mount_page(server: &MockServer, route: &str, title: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html_page(title, body))
        .mount(server)
        .await;
}

async fn crawl(config: &Config, seed: &str) -> site_archiver::CrawlReport {
    let extractor = HttpExtractor::new(config).expect("Failed to build extractor");
    run_crawl(config, seed, extractor)
        .await
        .expect("Crawl failed")
}

#[tokio::test]
async fn test_full_crawl_single_domain() {
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Home",
        &format!(
            r##"<nav><a href="/nav-only">Menu</a></nav>
            <h1>Welcome</h1>
            <p>Start here.</p>
            <a href="/about">About</a>
            <a href="{}/docs">Docs</a>
            <a href="https://facebook.com/ex">Facebook</a>
            <a href="#comment-12">12 comments</a>
            <a href="/wp-admin/">Admin</a>
            <a href="mailto:owner@example.com">Mail</a>"##,
            base_url
        ),
    )
    .await;
    mount_page(
        &mock_server,
        "/about",
        "About",
        r#"<p>About us.</p><a href="/docs">Docs</a><a href="/team">Team</a><a href="/">Home</a>"#,
    )
    .await;
    mount_page(&mock_server, "/docs", "Docs", "<h2>Reference</h2>").await;
    mount_page(
        &mock_server,
        "/team",
        "Team",
        r#"<ul><li>Ada</li><li>Grace</li></ul><a href="/deeper">Deeper</a>"#,
    )
    .await;

    for never in ["/nav-only", "/deeper", "/wp-admin/"] {
        Mock::given(method("GET"))
            .and(path(never))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(dir.path(), 2, 10);
    let report = crawl(&config, &format!("{}/", base_url)).await;

    assert_eq!(report.pages_crawled, 4);
    assert_eq!(report.pages_written, 4);
    assert_eq!(report.extraction_failures, 0);
    assert_eq!(report.deepest_level, 2);
    assert_eq!(report.rejections.get(&RejectReason::SocialDomain), Some(&1));

    let host = host_dir(dir.path(), &mock_server);
    let home = std::fs::read_to_string(host.join("index.md")).unwrap();
    assert!(home.starts_with("# Home\n"));
    assert!(home.contains("# Welcome"));
    assert!(home.contains("Start here."));
    assert!(!home.contains("Menu"));

    let team = std::fs::read_to_string(host.join("team.md")).unwrap();
    assert!(team.contains("- Ada\n- Grace"));
    assert!(team.contains("**Depth:** 2"));
    assert!(host.join("about.md").is_file());
    assert!(host.join("docs.md").is_file());

    let index = std::fs::read_to_string(dir.path().join("INDEX.md")).unwrap();
    assert!(index.contains("**Pages converted:** 4"));
    assert!(index.contains("**Max depth:** 2"));
    let port = mock_server.address().port();
    let order: Vec<usize> = [
        format!("- [/](127.0.0.1_{}/index.md) (depth 0)", port),
        format!("- [/about](127.0.0.1_{}/about.md) (depth 1)", port),
        format!("- [/docs](127.0.0.1_{}/docs.md) (depth 1)", port),
        format!("- [/team](127.0.0.1_{}/team.md) (depth 2)", port),
    ]
    .iter()
    .map(|line| index.find(line.as_str()).expect(line))
    .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
async fn test_failed_seed_produces_error_page() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(dir.path(), 2, 10);
    let report = crawl(&config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.extraction_failures, 1);
    assert!(report.is_complete());

    let page = std::fs::read_to_string(host_dir(dir.path(), &mock_server).join("index.md")).unwrap();
    assert!(page.contains("# Conversion error"));
    assert!(page.contains("HTTP status 500"));

    let index = std::fs::read_to_string(dir.path().join("INDEX.md")).unwrap();
    assert_eq!(index.matches("(depth ").count(), 1);
}

#[tokio::test]
async fn test_page_limit() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/p1">1</a><a href="/p2">2</a><a href="/p3">3</a><a href="/p4">4</a><a href="/p5">5</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/p1"))
        .respond_with(html_page("P1", "<p>one</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;
    for route in ["/p2", "/p3", "/p4", "/p5"] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(html_page("Pn", "<p>n</p>"))
            .expect(0)
            .mount(&mock_server)
            .await;
    }

    let config = create_test_config(dir.path(), 2, 2);
    let report = crawl(&config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_crawled, 2);
    let index = std::fs::read_to_string(dir.path().join("INDEX.md")).unwrap();
    assert!(index.contains("**Pages converted:** 2"));
    assert_eq!(index.matches("(depth ").count(), 2);
}

#[tokio::test]
async fn test_crawl_with_depth_zero() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", "Home", r#"<a href="/child">Child</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/child"))
        .respond_with(html_page("Child", ""))
        .expect(0)
        .mount(&mock_server)
        .await;

    let config = create_test_config(dir.path(), 0, 10);
    let report = crawl(&config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_crawled, 1);
    assert_eq!(report.links_seen, 0);
}

#[tokio::test]
async fn test_content_type_handling() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/report">Report</a><a href="/next">Next</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("%PDF-1.4", "application/pdf"))
        .mount(&mock_server)
        .await;
    mount_page(&mock_server, "/next", "Next", "<p>after the pdf</p>").await;

    let config = create_test_config(dir.path(), 1, 10);
    let report = crawl(&config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_crawled, 3);
    assert_eq!(report.extraction_failures, 1);

    let host = host_dir(dir.path(), &mock_server);
    let report_page = std::fs::read_to_string(host.join("report.md")).unwrap();
    assert!(report_page.contains("application/pdf"));
    let next = std::fs::read_to_string(host.join("next.md")).unwrap();
    assert!(next.contains("after the pdf"));
}

#[tokio::test]
async fn test_tracking_parameters_are_deduplicated() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/article?id=1&amp;utm_source=a">A</a>
           <a href="/article?utm_source=b&amp;id=1">B</a>
           <a href="/article?id=1&amp;fbclid=xyz">C</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/article"))
        .and(query_param("id", "1"))
        .respond_with(html_page("Article", "<p>body</p>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = create_test_config(dir.path(), 1, 10);
    let report = crawl(&config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.links_admitted, 3);
    assert_eq!(report.links_queued, 1);
    assert!(host_dir(dir.path(), &mock_server)
        .join("article_id=1.md")
        .is_file());
}

#[tokio::test]
async fn test_delay_between_fetches() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(&mock_server, "/", "Home", r#"<a href="/a">A</a><a href="/b">B</a>"#).await;
    mount_page(&mock_server, "/a", "A", "").await;
    mount_page(&mock_server, "/b", "B", "").await;

    let mut config = create_test_config(dir.path(), 1, 10);
    config.crawler.delay_ms = 150;

    let started = Instant::now();
    let report = crawl(&config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_crawled, 3);
    // two pauses: none after the last page
    assert!(started.elapsed() >= Duration::from_millis(300));
}

#[tokio::test]
async fn test_seed_redirect_to_other_host() {
    let seed_server = MockServer::start().await;
    let target_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(301)
                .insert_header("location", format!("{}/target/", target_server.uri()).as_str()),
        )
        .mount(&seed_server)
        .await;
    mount_page(
        &target_server,
        "/target/",
        "Target",
        r#"<p>moved</p><a href="/about">About</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/about"))
        .respond_with(html_page("About", "<p>about us</p>"))
        .expect(1)
        .mount(&seed_server)
        .await;

    let config = create_test_config(dir.path(), 1, 10);
    let report = crawl(&config, &format!("{}/", seed_server.uri())).await;

    assert_eq!(report.pages_crawled, 2);
    assert_eq!(report.links_queued, 1);
    assert_eq!(report.rejections.get(&RejectReason::OffDomain), None);

    let host = host_dir(dir.path(), &seed_server);
    let home = std::fs::read_to_string(host.join("index.md")).unwrap();
    assert!(home.contains("moved"));
    let about = std::fs::read_to_string(host.join("about.md")).unwrap();
    assert!(about.contains("about us"));
}

#[tokio::test]
async fn test_directory_and_file_pages_do_not_collide() {
    let mock_server = MockServer::start().await;
    let dir = TempDir::new().unwrap();

    mount_page(
        &mock_server,
        "/",
        "Home",
        r#"<a href="/docs">Docs</a><a href="/docs/">Docs index</a>"#,
    )
    .await;
    mount_page(&mock_server, "/docs", "Docs file", "<p>file page</p>").await;
    mount_page(&mock_server, "/docs/", "Docs dir", "<p>directory page</p>").await;

    let config = create_test_config(dir.path(), 1, 10);
    let report = crawl(&config, &format!("{}/", mock_server.uri())).await;

    assert_eq!(report.pages_written, 3);
    let host = host_dir(dir.path(), &mock_server);
    let file = std::fs::read_to_string(host.join("docs.md")).unwrap();
    let index = std::fs::read_to_string(host.join("docs").join("index.md")).unwrap();
    assert!(file.contains("file page"));
    assert!(index.contains("directory page"));
}

#[tokio::test]
async fn test_unwritable_root_is_fatal() {
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("taken");
    std::fs::write(&blocker, "file").unwrap();

    let config = create_test_config(&blocker, 1, 10);
    let extractor = HttpExtractor::new(&config).unwrap();
    let result = run_crawl(&config, "http://127.0.0.1:9/", extractor).await;

    assert!(matches!(
        result,
        Err(site_archiver::ArchiveError::RootUnavailable { .. })
    ));
}
