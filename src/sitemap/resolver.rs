//! Sitemap resolver
//!
//! Walks `INIT -> ROBOTS_LOOKUP -> {SITEMAP_INDEX_FETCHED, SITEMAP_FETCHED, NOT_FOUND} -> DONE`:
//!
//! 1. The first `Sitemap:` line of robots.txt, if any, is the first candidate
//! 2. `sitemap_index.xml` and `sitemap.xml` under the base follow, in that order
//! 3. The first candidate that yields at least one page URL wins
//!
//! Index documents are expanded through a work queue; children are re-checked
//! by root element, so an index may point at further indexes up to
//! [`MAX_INDEX_NESTING`] levels. Fetch and parse failures are logged and the
//! document is treated as absent.

use super::parser::{is_blocked, parse_sitemap, SitemapDocument, SitemapKind};
use crate::config::{Config, DiscoveryConfig, UserAgentConfig};
use crate::crawler::{build_http_client, fetch_url, FetchResult};
use crate::discovery::{DiscoveryRequest, UrlSet, UrlSource};
use crate::robots::{fetch_robots, robots_url};
use crate::url::strip_fragment;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Well-known sitemap locations probed under the base, in order
pub const PROBE_PATHS: &[&str] = &["sitemap_index.xml", "sitemap.xml"];

/// How many index levels below the first document are followed
pub const MAX_INDEX_NESTING: usize = 3;

/// Resolver progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolverState {
    Init,
    RobotsLookup,
    SitemapIndexFetched,
    SitemapFetched,
    NotFound,
    Done,
}

impl fmt::Display for ResolverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResolverState::Init => "INIT",
            ResolverState::RobotsLookup => "ROBOTS_LOOKUP",
            ResolverState::SitemapIndexFetched => "SITEMAP_INDEX_FETCHED",
            ResolverState::SitemapFetched => "SITEMAP_FETCHED",
            ResolverState::NotFound => "NOT_FOUND",
            ResolverState::Done => "DONE",
        };
        f.write_str(name)
    }
}

/// Outcome of one resolver run
#[derive(Debug, Clone)]
pub struct Resolution {
    /// Page URLs found, empty when no usable sitemap exists
    pub urls: UrlSet,

    /// The state the run settled in before `DONE`
    pub outcome: ResolverState,

    /// The sitemap that produced `urls`
    pub source: Option<Url>,
}

/// Sitemap-based URL source
#[derive(Debug, Clone)]
pub struct SitemapResolver {
    discovery: DiscoveryConfig,
    user_agent: UserAgentConfig,
}

/// HTTP state owned by a single resolver run
struct ResolveSession<'a> {
    client: Client,
    cancel: &'a CancellationToken,
    state: ResolverState,
}

impl SitemapResolver {
    /// Creates a resolver from the discovery and user-agent sections
    pub fn new(config: &Config) -> Self {
        Self::from_parts(config.discovery.clone(), config.user_agent.clone())
    }

    /// Creates a resolver from explicit config sections
    pub fn from_parts(discovery: DiscoveryConfig, user_agent: UserAgentConfig) -> Self {
        Self {
            discovery,
            user_agent,
        }
    }

    /// Resolves the sitemap URLs of the site rooted at `base`
    pub async fn resolve(&self, base: &Url) -> Resolution {
        self.resolve_with_cancellation(base, &CancellationToken::new())
            .await
    }

    /// Resolves like [`resolve`](Self::resolve), stopping between fetches once
    /// `cancel` fires
    pub async fn resolve_with_cancellation(
        &self,
        base: &Url,
        cancel: &CancellationToken,
    ) -> Resolution {
        let client = match build_http_client(&self.discovery, &self.user_agent) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("Failed to build HTTP client: {}", e);
                return Resolution {
                    urls: UrlSet::new(),
                    outcome: ResolverState::NotFound,
                    source: None,
                };
            }
        };

        let mut session = ResolveSession {
            client,
            cancel,
            state: ResolverState::Init,
        };

        let resolution = session.run(base).await;
        session.transition(ResolverState::Done);
        drop(session);

        tracing::info!(
            "Sitemap resolution for {} finished: {} ({} URLs). Session closed.",
            base,
            resolution.outcome,
            resolution.urls.len()
        );

        resolution
    }
}

impl ResolveSession<'_> {
    fn transition(&mut self, next: ResolverState) {
        tracing::debug!("Sitemap resolver: {} -> {}", self.state, next);
        self.state = next;
    }

    async fn run(&mut self, base: &Url) -> Resolution {
        self.transition(ResolverState::RobotsLookup);

        let mut candidates = Vec::new();
        if let Some(location) = self.sitemap_from_robots(base).await {
            candidates.push(location);
        }
        for path in PROBE_PATHS {
            match base.join(path) {
                Ok(probe) if !candidates.contains(&probe) => candidates.push(probe),
                Ok(_) => {}
                Err(e) => tracing::warn!("Cannot build sitemap probe {} for {}: {}", path, base, e),
            }
        }

        for candidate in candidates {
            if self.cancel.is_cancelled() {
                tracing::warn!("Sitemap resolution cancelled before {}", candidate);
                break;
            }

            tracing::info!("Trying sitemap {}", candidate);
            let Some((kind, urls)) = self.expand(&candidate).await else {
                continue;
            };

            if urls.is_empty() {
                tracing::info!("Sitemap {} yielded no usable URLs", candidate);
                continue;
            }

            let outcome = match kind {
                SitemapKind::Index => ResolverState::SitemapIndexFetched,
                SitemapKind::UrlSet => ResolverState::SitemapFetched,
            };
            self.transition(outcome);

            return Resolution {
                urls,
                outcome,
                source: Some(candidate),
            };
        }

        self.transition(ResolverState::NotFound);
        Resolution {
            urls: UrlSet::new(),
            outcome: ResolverState::NotFound,
            source: None,
        }
    }

    async fn sitemap_from_robots(&self, base: &Url) -> Option<Url> {
        let location = robots_url(base)?;
        let robots = fetch_robots(&self.client, &location).await?;
        let declared = robots.sitemap()?;

        match base.join(&declared) {
            Ok(url) => {
                tracing::info!("Found sitemap in robots.txt: {}", url);
                Some(url)
            }
            Err(e) => {
                tracing::warn!("Ignoring unparseable Sitemap directive {}: {}", declared, e);
                None
            }
        }
    }

    /// Expands one candidate into page URLs
    ///
    /// Returns `None` when the candidate itself could not be fetched or
    /// parsed; the kind is that of the candidate's own root element.
    async fn expand(&self, start: &Url) -> Option<(SitemapKind, UrlSet)> {
        let mut queue: VecDeque<(Url, usize)> = VecDeque::new();
        let mut seen: HashSet<String> = HashSet::new();
        let mut urls = UrlSet::new();
        let mut root_kind = None;

        seen.insert(start.to_string());
        queue.push_back((start.clone(), 0));

        while let Some((location, level)) = queue.pop_front() {
            if self.cancel.is_cancelled() {
                tracing::warn!(
                    "Sitemap expansion cancelled with {} documents pending",
                    queue.len() + 1
                );
                break;
            }

            let Some(document) = self.fetch_document(&location).await else {
                if root_kind.is_none() {
                    return None;
                }
                continue;
            };
            root_kind.get_or_insert(document.kind);

            match document.kind {
                SitemapKind::Index => {
                    if level >= MAX_INDEX_NESTING {
                        tracing::warn!(
                            "Not following sitemap index {}: nested too deep",
                            location
                        );
                        continue;
                    }
                    for loc in document.locations {
                        let Some(child) = parse_loc(&loc) else {
                            continue;
                        };
                        if seen.insert(child.to_string()) {
                            tracing::info!("Found sitemap in index: {}", child);
                            queue.push_back((child, level + 1));
                        }
                    }
                }
                SitemapKind::UrlSet => {
                    for loc in document.locations {
                        let Some(page) = parse_loc(&loc) else {
                            continue;
                        };
                        if is_blocked(&page) {
                            tracing::debug!("Skipping blocklisted sitemap URL {}", page);
                            continue;
                        }
                        urls.insert(page.to_string());
                    }
                }
            }

            tracing::debug!(
                "Progress: {} sitemap URLs collected, {} documents pending",
                urls.len(),
                queue.len()
            );
        }

        root_kind.map(|kind| (kind, urls))
    }

    async fn fetch_document(&self, location: &Url) -> Option<SitemapDocument> {
        let body = match fetch_url(&self.client, location.as_str()).await {
            FetchResult::Success { body, .. } => body,
            FetchResult::HttpError { status_code } => {
                tracing::warn!(
                    "Fetch sitemap {} failed with status code: {}",
                    location,
                    status_code
                );
                return None;
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Error fetching sitemap {}: {}", location, error);
                return None;
            }
        };

        match parse_sitemap(body.as_bytes()) {
            Ok(document) => Some(document),
            Err(e) => {
                tracing::warn!("Ignoring sitemap {}: {}", location, e);
                None
            }
        }
    }
}

/// Parses a `<loc>` value into an absolute HTTP(S) URL without fragment
fn parse_loc(loc: &str) -> Option<Url> {
    match Url::parse(loc) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(strip_fragment(&url)),
        Ok(url) => {
            tracing::debug!("Skipping non-HTTP sitemap location {}", url);
            None
        }
        Err(e) => {
            tracing::debug!("Skipping invalid sitemap location {}: {}", loc, e);
            None
        }
    }
}

#[async_trait]
impl UrlSource for SitemapResolver {
    fn name(&self) -> &'static str {
        "sitemap"
    }

    async fn discover(&self, request: &DiscoveryRequest) -> UrlSet {
        self.resolve_with_cancellation(request.base(), request.cancel_token())
            .await
            .urls
    }
}
