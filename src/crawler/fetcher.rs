//! HTTP fetcher implementation
//!
//! This module handles all page requests for the crawler and the sitemap
//! resolver, including:
//! - Building HTTP clients with the configured user agent and timeouts
//! - GET requests for page and document bodies
//! - Error classification

use crate::config::{DiscoveryConfig, UserAgentConfig};
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Maximum redirect hops followed per request
const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Server answered 200
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Content-Type header value
        content_type: String,
        /// Response body
        body: String,
    },

    /// Server answered with anything other than 200
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, body read failure)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client for one discovery session
///
/// Every request made through the client is bounded by the configured
/// timeout, so a server that never answers cannot stall the run.
///
/// # Example
///
/// ```no_run
/// use a11y_sweep::config::{DiscoveryConfig, UserAgentConfig};
/// use a11y_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&DiscoveryConfig::default(), &UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(
    discovery: &DiscoveryConfig,
    user_agent: &UserAgentConfig,
) -> Result<Client, reqwest::Error> {
    let timeout = Duration::from_secs(discovery.request_timeout_secs);

    Client::builder()
        .user_agent(user_agent.http.as_str())
        .timeout(timeout)
        .connect_timeout(timeout)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET
///
/// Only a 200 answer counts as success; redirects are followed by the client.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(&e),
    };

    let status = response.status();
    if status != StatusCode::OK {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            content_type,
            body,
        },
        Err(e) => classify_error(&e),
    }
}

fn classify_error(e: &reqwest::Error) -> FetchResult {
    let error = if e.is_timeout() {
        "Request timeout".to_string()
    } else if e.is_connect() {
        "Connection refused".to_string()
    } else {
        e.to_string()
    };

    FetchResult::NetworkError { error }
}
