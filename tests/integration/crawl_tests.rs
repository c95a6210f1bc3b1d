//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small forum and run the full crawl
//! over HTTP, from the home page to the rendered sitemap.

use forum_sitemap::config::{Config, ListingCategory};
use forum_sitemap::crawler::{run_crawl, CrawlOrchestrator, HttpFetcher};
use forum_sitemap::output::format_sitemap;
use forum_sitemap::{ChangeFrequency, ConfigError, SitemapError};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn item(class: &str, href: &str, date: &str) -> String {
    format!(
        r#"<article class="{}"><h2><a href="{}">title</a></h2><span class="date">{}</span></article>"#,
        class, href, date
    )
}

fn page(body: &str, more: Option<&str>) -> String {
    let pages = more
        .map(|flag| format!(r#"<div class="pages" data-more="{}"></div>"#, flag))
        .unwrap_or_default();
    format!(
        "<html><head><title>forum</title></head><body>{}{}</body></html>",
        body, pages
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

async fn serve(server: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(html(body))
        .mount(server)
        .await;
}

/// Creates a test configuration pointing at the mock server
fn create_test_config(server: &MockServer, categories: Vec<ListingCategory>) -> Config {
    let mut config = Config::default();
    config.site.root_url = format!("{}/", server.uri());
    config.crawler.request_timeout_secs = 5;
    config.categories = categories;
    config
}

fn threads() -> ListingCategory {
    ListingCategory::new("threads", "article.thread-item", ChangeFrequency::Daily, 0.6)
}

#[tokio::test]
async fn test_single_thread_end_to_end() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        page(&item("thread-item", "/t/7", "15/03/2024 10:30"), None),
    )
    .await;
    serve(
        &server,
        "/threads",
        page(&item("thread-item", "/t/1", "14/03/2024 09:00"), None),
    )
    .await;

    let config = create_test_config(&server, vec![threads()]);
    let records = run_crawl(&config).await.expect("crawl failed");
    let xml = format_sitemap(&records, false).unwrap();

    let root = format!("{}/", server.uri());
    let expected = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
    <url>
        <loc>{}</loc>
        <lastmod>2024-03-15T10:30:00+00:00</lastmod>
        <changefreq>hourly</changefreq>
        <priority>1.00</priority>
    </url>
    <url>
        <loc>/t/1</loc>
        <lastmod>2024-03-14T09:00:00+00:00</lastmod>
        <changefreq>daily</changefreq>
        <priority>0.60</priority>
    </url>
</urlset>
"#,
        root
    );
    assert_eq!(xml, expected);
}

#[tokio::test]
async fn test_default_categories_with_pagination() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        page(&item("thread-item", "/t/3", "15/03/2024 10:30"), None),
    )
    .await;
    serve(
        &server,
        "/threads",
        page(
            &format!(
                "{}{}",
                item("thread-item", "/t/3", "15/03/2024 10:30"),
                item("thread-item", "/t/2", "14/03/2024 10:30")
            ),
            Some("yes"),
        ),
    )
    .await;
    serve(
        &server,
        "/threads/page/2",
        page(&item("thread-item", "/t/1", "13/03/2024 10:30"), Some("yes")),
    )
    .await;
    serve(
        &server,
        "/threads/page/3",
        page(&item("thread-item", "/t/0", "12/03/2024 10:30"), Some("no")),
    )
    .await;
    serve(
        &server,
        "/tags",
        page(&item("tag-item", "/tags/rust", "11/03/2024 10:30"), None),
    )
    .await;
    serve(
        &server,
        "/stiki",
        page(&item("thread-item", "/s/faq", "01/01/2024 00:00"), None),
    )
    .await;
    // Must never be requested: page 3 said "no".
    Mock::given(method("GET"))
        .and(path("/threads/page/4"))
        .respond_with(html(page("", None)))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(&server, forum_sitemap::config::default_categories());
    let records = run_crawl(&config).await.expect("crawl failed");

    let locations: Vec<&str> = records.iter().map(|r| r.location.as_str()).collect();
    let root = format!("{}/", server.uri());
    assert_eq!(
        locations,
        vec![
            root.as_str(),
            "/t/3",
            "/t/2",
            "/t/1",
            "/t/0",
            "/tags/rust",
            "/s/faq"
        ]
    );
    assert_eq!(records[0].change_frequency, ChangeFrequency::Hourly);
    assert_eq!(records[5].priority_text(), "0.50");
    assert_eq!(records[6].change_frequency, ChangeFrequency::Monthly);
    assert_eq!(records[6].priority_text(), "0.70");

    let xml = format_sitemap(&records, false).unwrap();
    assert_eq!(xml.matches("<url>").count(), 7);
}

#[tokio::test]
async fn test_missing_listing_aborts_crawl() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        page(&item("thread-item", "/t/1", "15/03/2024 10:30"), None),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/threads"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let config = create_test_config(&server, vec![threads()]);
    let result = run_crawl(&config).await;

    assert!(matches!(
        result,
        Err(SitemapError::HttpStatus { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_malformed_date_aborts_crawl() {
    let server = MockServer::start().await;
    serve(
        &server,
        "/",
        page(&item("thread-item", "/t/1", "15/03/2024 10:30"), None),
    )
    .await;
    serve(
        &server,
        "/threads",
        page(&item("thread-item", "/t/1", "March 14, 2024"), None),
    )
    .await;

    let config = create_test_config(&server, vec![threads()]);
    match run_crawl(&config).await {
        Err(SitemapError::DateParse { text, .. }) => assert_eq!(text, "March 14, 2024"),
        other => panic!("expected DateParse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_priority_rejected_before_any_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(html(page("", None)))
        .expect(0)
        .mount(&server)
        .await;

    let config = create_test_config(
        &server,
        vec![ListingCategory::new(
            "threads",
            "article.thread-item",
            ChangeFrequency::Daily,
            1.5,
        )],
    );

    assert!(matches!(
        run_crawl(&config).await,
        Err(SitemapError::Config(ConfigError::Validation(_)))
    ));
}

#[tokio::test]
async fn test_unreachable_site() {
    let mut config = Config::default();
    // Nothing listens on port 9 of the loopback interface.
    config.site.root_url = "http://127.0.0.1:9/".to_string();
    config.crawler.request_timeout_secs = 2;

    assert!(matches!(
        run_crawl(&config).await,
        Err(SitemapError::Http { .. })
    ));
}

#[tokio::test]
async fn test_sends_configured_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header_regex("user-agent", r"^TestBot/2\.0 \(\+https://example\.com/bot\)$"))
        .respond_with(html(page(
            &item("thread-item", "/t/1", "15/03/2024 10:30"),
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    serve(&server, "/threads", page("", None)).await;

    let mut config = create_test_config(&server, vec![threads()]);
    config.user_agent.crawler_name = "TestBot".to_string();
    config.user_agent.crawler_version = "2.0".to_string();
    config.user_agent.contact_url = Some("https://example.com/bot".to_string());

    let fetcher = HttpFetcher::from_config(&config.user_agent, &config.crawler).unwrap();
    let records = CrawlOrchestrator::new(fetcher, &config)
        .unwrap()
        .crawl()
        .await
        .expect("crawl failed");

    assert_eq!(records.len(), 1);
}
