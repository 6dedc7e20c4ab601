//! Robots.txt handling module
//!
//! This module fetches, parses and caches robots.txt files and answers
//! "may this agent fetch this URL" questions.
//!
//! Unlike the scope filter, the policy fails open: a robots.txt that is
//! missing, answers with a non-200 status, or cannot be fetched permits
//! everything.

mod cache;
mod parser;

pub use cache::{CachedRobots, ROBOTS_CACHE_TTL_HOURS};
pub use parser::ParsedRobots;

use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::Mutex;
use url::Url;

/// Builds the robots.txt location for the origin of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use a11y_sweep::robots::robots_url;
///
/// let url = Url::parse("https://example.com/blog/post?x=1").unwrap();
/// assert_eq!(robots_url(&url).unwrap().as_str(), "https://example.com/robots.txt");
/// ```
pub fn robots_url(url: &Url) -> Option<Url> {
    url.join("/robots.txt").ok()
}

/// Fetches and parses robots.txt
///
/// # Returns
///
/// * `Some(ParsedRobots)` - robots.txt answered 200
/// * `None` - robots.txt is absent, answered non-200, or the fetch failed
pub async fn fetch_robots(client: &Client, robots_url: &Url) -> Option<ParsedRobots> {
    let response = match client.get(robots_url.as_str()).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Error fetching {}: {}", robots_url, e);
            return None;
        }
    };

    if response.status() != StatusCode::OK {
        tracing::info!(
            "No robots.txt found at {} (HTTP {}). Assuming crawling is allowed.",
            robots_url,
            response.status().as_u16()
        );
        return None;
    }

    match response.text().await {
        Ok(body) => Some(ParsedRobots::from_content(&body)),
        Err(e) => {
            tracing::warn!("Error reading {}: {}", robots_url, e);
            None
        }
    }
}

/// Robots.txt permission checks with a per-origin cache
#[derive(Debug)]
pub struct RobotsPolicy {
    client: Client,
    cache: Mutex<HashMap<String, CachedRobots>>,
}

impl RobotsPolicy {
    /// Creates a policy that fetches robots.txt with the given client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Checks whether `user_agent` may fetch `url`
    ///
    /// URLs that cannot be parsed have no robots.txt to consult and are
    /// allowed; the scope filter rejects them on its own.
    pub async fn can_fetch(&self, url: &str, user_agent: &str) -> bool {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(_) => return true,
        };

        let robots = self.robots_for(&parsed).await;
        let allowed = robots.is_allowed(parsed.as_str(), user_agent);
        if !allowed {
            tracing::debug!(
                "Fetching disallowed by robots.txt: {} for user-agent {}",
                url,
                user_agent
            );
        }
        allowed
    }

    /// Returns the robots.txt rules for the origin of `url`
    ///
    /// Fetched at most once per origin while the cached entry is fresh.
    pub async fn robots_for(&self, url: &Url) -> ParsedRobots {
        let key = url.origin().ascii_serialization();

        if let Some(cached) = self.cached(&key) {
            tracing::trace!("Using cached robots.txt for {}", key);
            return cached;
        }

        tracing::debug!("Fetching robots.txt for {}", key);
        let robots = match robots_url(url) {
            Some(location) => fetch_robots(&self.client, &location)
                .await
                .unwrap_or_else(ParsedRobots::allow_all),
            None => ParsedRobots::allow_all(),
        };

        if let Ok(mut cache) = self.cache.lock() {
            cache.insert(key, CachedRobots::new(robots.clone()));
        }

        robots
    }

    fn cached(&self, key: &str) -> Option<ParsedRobots> {
        let cache = self.cache.lock().ok()?;
        cache
            .get(key)
            .filter(|entry| !entry.is_stale())
            .map(|entry| entry.content.clone())
    }
}
