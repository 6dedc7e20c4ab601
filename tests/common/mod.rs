//! Shared helpers for the wiremock-backed integration tests

#![allow(dead_code)]

use a11y_sweep::config::Config;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config with short timeouts for local mock servers
pub fn test_config() -> Config {
    let mut config = Config::default();
    config.discovery.request_timeout_secs = 5;
    config.discovery.max_concurrent_requests = 2;
    config
}

/// A 200 HTML response wrapping `body`
pub fn html_page(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(
        format!("<html><head><title>Test</title></head><body>{}</body></html>", body),
        "text/html; charset=utf-8",
    )
}

/// A 200 XML response
pub fn xml_document(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/xml")
}

/// Answers every HEAD request with an HTML content type
pub async fn mount_html_head(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html; charset=utf-8"))
        .mount(server)
        .await;
}

/// Serves an HTML page on GET `page_path`
pub async fn mount_page(server: &MockServer, page_path: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(html_page(body))
        .mount(server)
        .await;
}

/// Serves robots.txt
pub async fn mount_robots(server: &MockServer, content: &str) {
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string(content.to_string()))
        .mount(server)
        .await;
}

/// Builds a `urlset` document
pub fn urlset(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| format!("<url><loc>{}</loc></url>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</urlset>"#,
        entries
    )
}

/// Builds a `sitemapindex` document
pub fn sitemap_index(locations: &[String]) -> String {
    let entries: String = locations
        .iter()
        .map(|loc| format!("<sitemap><loc>{}</loc></sitemap>", loc))
        .collect();
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?><sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">{}</sitemapindex>"#,
        entries
    )
}
