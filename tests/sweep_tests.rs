//! Integration tests for the end-to-end sweep

mod common;

use a11y_sweep::config::{AuditConfig, OutputConfig};
use a11y_sweep::{sweep_url, ConfigError, SweepError, UrlError};
use common::{test_config, urlset, xml_document};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer};

#[tokio::test]
async fn test_invalid_seed_is_a_url_error() {
    let mut config = test_config();
    config.audit = Some(AuditConfig {
        command: "true".to_string(),
        args: Vec::new(),
        timeout_secs: 5,
    });

    let err = sweep_url(&config, "example.com/no-scheme").await.unwrap_err();
    assert!(matches!(err, SweepError::Url(UrlError::Parse(_))));
}

#[tokio::test]
async fn test_missing_audit_section_fails_before_discovery() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(xml_document(&urlset(&[])))
        .expect(0)
        .mount(&server)
        .await;

    let err = sweep_url(&test_config(), &server.uri()).await.unwrap_err();
    assert!(matches!(
        err,
        SweepError::Config(ConfigError::MissingSection("audit"))
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_sweep_audits_every_discovered_page() {
    let server = MockServer::start().await;
    let uri = server.uri();
    Mock::given(method("GET"))
        .and(path("/sitemap.xml"))
        .respond_with(xml_document(&urlset(&[
            format!("{}/about", uri),
            format!("{}/contact", uri),
        ])))
        .mount(&server)
        .await;

    let results = TempDir::new().unwrap();
    let mut config = test_config();
    config.audit = Some(AuditConfig {
        command: "sh".to_string(),
        args: vec![
            "-c".to_string(),
            r#"printf '{"url":"%s","testEngine":{"version":"4.8.2"},"violations":[]}' "$1""#
                .to_string(),
            "audit".to_string(),
        ],
        timeout_secs: 5,
    });
    config.output = Some(OutputConfig {
        results_directory: results.path().to_string_lossy().into_owned(),
    });

    let outcome = sweep_url(&config, &uri).await.unwrap();

    assert_eq!(outcome.urls.len(), 2);
    assert_eq!(outcome.run.reports.len(), 2);
    assert!(outcome.run.failed.is_empty());
    assert_eq!(outcome.run.engine_version.as_deref(), Some("4.8.2"));

    let directory = outcome.run.directory.unwrap();
    assert!(directory.starts_with(results.path()));
    assert!(directory.join("about_accessibility_test.json").is_file());
    assert!(directory.join("contact_accessibility_test.json").is_file());
}
