//! Integration tests for robots.txt permission checks

mod common;

use a11y_sweep::robots::RobotsPolicy;
use common::mount_robots;
use reqwest::Client;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_missing_robots_allows_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let policy = RobotsPolicy::new(Client::new());
    for page in ["/", "/admin", "/private/data", "/a/b/c?x=1"] {
        let url = format!("{}{}", server.uri(), page);
        assert!(policy.can_fetch(&url, "*").await, "{}", url);
    }
}

#[tokio::test]
async fn test_server_error_allows_everything() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let policy = RobotsPolicy::new(Client::new());
    assert!(policy.can_fetch(&format!("{}/page", server.uri()), "*").await);
}

#[tokio::test]
async fn test_unreachable_robots_allows_everything() {
    let policy = RobotsPolicy::new(Client::new());
    assert!(policy.can_fetch("http://127.0.0.1:9/page", "*").await);
}

#[tokio::test]
async fn test_disallow_rules_apply() {
    let server = MockServer::start().await;
    mount_robots(&server, "User-agent: *\nDisallow: /private\nAllow: /private/press\n").await;

    let policy = RobotsPolicy::new(Client::new());
    let uri = server.uri();

    assert!(policy.can_fetch(&format!("{}/public", uri), "*").await);
    assert!(!policy.can_fetch(&format!("{}/private/data", uri), "*").await);
    assert!(policy.can_fetch(&format!("{}/private/press", uri), "*").await);
}

#[tokio::test]
async fn test_agent_specific_group_wins() {
    let server = MockServer::start().await;
    mount_robots(
        &server,
        "User-agent: AuditBot\nDisallow: /\n\nUser-agent: *\nDisallow: /tmp\n",
    )
    .await;

    let policy = RobotsPolicy::new(Client::new());
    let page = format!("{}/about", server.uri());

    assert!(!policy.can_fetch(&page, "AuditBot").await);
    assert!(policy.can_fetch(&page, "OtherBot").await);
}

#[tokio::test]
async fn test_robots_fetched_once_per_origin() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/robots.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("User-agent: *\nDisallow: /x\n"))
        .expect(1)
        .mount(&server)
        .await;

    let policy = RobotsPolicy::new(Client::new());
    for page in ["/a", "/b", "/x", "/c"] {
        policy.can_fetch(&format!("{}{}", server.uri(), page), "*").await;
    }
}
