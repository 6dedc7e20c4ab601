//! Integration tests for the site crawler
//!
//! Every test serves a small site from a wiremock server and checks the
//! admitted URL set.

mod common;

use a11y_sweep::crawler::SiteCrawler;
use a11y_sweep::{site_base, UrlSet};
use common::{html_page, mount_html_head, mount_page, mount_robots, test_config};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn expected(server: &MockServer, paths: &[&str]) -> UrlSet {
    paths
        .iter()
        .map(|p| format!("{}{}", server.uri(), p))
        .collect()
}

async fn crawl(server: &MockServer, seed_path: &str, max_depth: u32) -> UrlSet {
    let seed = site_base(&format!("{}{}", server.uri(), seed_path)).unwrap();
    SiteCrawler::new(&test_config()).crawl(&seed, max_depth).await
}

#[tokio::test]
async fn test_depth_bound_on_link_chain() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;

    mount_page(&server, "/", r#"<a href="/l1">Level 1</a>"#).await;
    mount_page(&server, "/l1", r#"<a href="/l2">Level 2</a>"#).await;
    mount_page(&server, "/l2", r#"<a href="/l3">Level 3</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/l3"))
        .respond_with(html_page(r#"<a href="/l4">Level 4</a>"#))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/l4"))
        .respond_with(html_page("end"))
        .expect(0)
        .mount(&server)
        .await;

    // Depth 2 admits the seed and two hops; level-2 pages are fetched but not expanded
    let urls = crawl(&server, "/", 2).await;
    assert_eq!(urls, expected(&server, &["/", "/l1", "/l2"]));
}

#[tokio::test]
async fn test_depth_zero_visits_only_the_seed() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;
    mount_page(&server, "/", r#"<a href="/a">A</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page("A"))
        .expect(0)
        .mount(&server)
        .await;

    let urls = crawl(&server, "/", 0).await;
    assert_eq!(urls, expected(&server, &["/"]));
}

#[tokio::test]
async fn test_nofollow_links_are_never_fetched() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;

    mount_page(
        &server,
        "/",
        r#"<a rel="nofollow" href="/x">Login</a><a href="/y">Blog</a>"#,
    )
    .await;
    mount_page(&server, "/y", "Blog").await;
    Mock::given(method("GET"))
        .and(path("/x"))
        .respond_with(html_page("Login"))
        .expect(0)
        .mount(&server)
        .await;

    let urls = crawl(&server, "/", 3).await;
    assert_eq!(urls, expected(&server, &["/", "/y"]));
}

#[tokio::test]
async fn test_robots_disallowed_pages_are_skipped() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;
    mount_robots(&server, "User-agent: *\nDisallow: /private\n").await;

    mount_page(
        &server,
        "/",
        r#"<a href="/private/report">Report</a><a href="/public">Public</a>"#,
    )
    .await;
    mount_page(&server, "/public", "Public").await;
    Mock::given(method("GET"))
        .and(path("/private/report"))
        .respond_with(html_page("Secret"))
        .expect(0)
        .mount(&server)
        .await;

    let urls = crawl(&server, "/", 2).await;
    assert_eq!(urls, expected(&server, &["/", "/public"]));
}

#[tokio::test]
async fn test_failures_do_not_abort_the_crawl() {
    let server = MockServer::start().await;

    Mock::given(method("HEAD"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/json"))
        .mount(&server)
        .await;
    mount_html_head(&server).await;

    mount_page(
        &server,
        "/",
        r#"<a href="/missing">Gone</a><a href="/broken">Broken</a><a href="/data">Data</a><a href="/ok">Ok</a>"#,
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_page(&server, "/ok", "Fine").await;

    let urls = crawl(&server, "/", 2).await;
    assert_eq!(urls, expected(&server, &["/", "/ok"]));
}

#[tokio::test]
async fn test_each_page_fetched_at_most_once() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(html_page(r#"<a href="/a">A</a><a href="/b">B</a><a href="/">Home</a>"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/a"))
        .respond_with(html_page(r##"<a href="/b">B</a><a href="/a#top">Top</a>"##))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/b"))
        .respond_with(html_page(r#"<a href="/a">A</a><a href="/">Home</a>"#))
        .expect(1)
        .mount(&server)
        .await;

    let urls = crawl(&server, "/", 5).await;
    assert_eq!(urls, expected(&server, &["/", "/a", "/b"]));
}

#[tokio::test]
async fn test_external_links_are_not_followed() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;

    mount_page(
        &server,
        "/",
        r#"<a href="https://elsewhere.example/page">Partner</a><a href="/about">About</a>"#,
    )
    .await;
    mount_page(&server, "/about", r#"<a href="//cdn.elsewhere.example/x">CDN</a>"#).await;

    let urls = crawl(&server, "/", 3).await;
    assert_eq!(urls, expected(&server, &["/", "/about"]));
}

#[tokio::test]
async fn test_query_and_asset_links_are_filtered() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;

    mount_page(
        &server,
        "/",
        r#"<a href="/search?q=a11y">Search</a><a href="/brochure.pdf">PDF</a><a href="/team">Team</a>"#,
    )
    .await;
    mount_page(&server, "/team", "Team").await;

    let urls = crawl(&server, "/", 2).await;
    assert_eq!(urls, expected(&server, &["/", "/team"]));
}

#[tokio::test]
async fn test_crawl_stays_under_seed_path() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;

    // Links resolve against the base, so "intro" lands in /docs/
    mount_page(
        &server,
        "/docs/",
        r#"<a href="intro">Intro</a><a href="/blog/post">Blog</a>"#,
    )
    .await;
    mount_page(&server, "/docs/intro", "Intro").await;
    Mock::given(method("GET"))
        .and(path("/blog/post"))
        .respond_with(html_page("Blog"))
        .expect(0)
        .mount(&server)
        .await;

    let urls = crawl(&server, "/docs", 2).await;
    assert_eq!(urls, expected(&server, &["/docs/", "/docs/intro"]));
}

#[tokio::test]
async fn test_non_html_seed_yields_empty_set() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "application/pdf"))
        .mount(&server)
        .await;

    assert!(crawl(&server, "/", 2).await.is_empty());
}

#[tokio::test]
async fn test_redirect_off_site_is_not_admitted() {
    let server = MockServer::start().await;
    let elsewhere = MockServer::start().await;
    mount_html_head(&server).await;
    mount_page(&elsewhere, "/landing", r#"<a href="/deeper">Deeper</a>"#).await;

    mount_page(&server, "/", r#"<a href="/moved">Moved</a><a href="/kept">Kept</a>"#).await;
    mount_page(&server, "/kept", "Kept").await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", format!("{}/landing", elsewhere.uri()).as_str()),
        )
        .mount(&server)
        .await;

    let urls = crawl(&server, "/", 2).await;
    assert_eq!(urls, expected(&server, &["/", "/kept"]));
}

#[tokio::test]
async fn test_non_html_get_response_is_not_admitted() {
    let server = MockServer::start().await;
    mount_html_head(&server).await;

    mount_page(&server, "/", r#"<a href="/export">Export</a>"#).await;
    Mock::given(method("GET"))
        .and(path("/export"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{}", "application/json"))
        .mount(&server)
        .await;

    let urls = crawl(&server, "/", 2).await;
    assert_eq!(urls, expected(&server, &["/"]));
}

#[tokio::test]
async fn test_unresponsive_server_is_cut_off_by_request_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/html")
                .set_delay(Duration::from_secs(60)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(html_page("slow").set_delay(Duration::from_secs(60)))
        .mount(&server)
        .await;

    let mut config = test_config();
    config.discovery.request_timeout_secs = 1;
    let seed = site_base(&server.uri()).unwrap();

    let urls = tokio::time::timeout(
        Duration::from_secs(15),
        SiteCrawler::new(&config).crawl(&seed, 2),
    )
    .await
    .expect("crawl should finish within the request timeout");
    assert!(urls.is_empty());
}
