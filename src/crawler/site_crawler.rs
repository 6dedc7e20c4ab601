//! Site crawler - bounded same-origin link following
//!
//! The crawl is a breadth-first walk over an explicit frontier:
//! - The seed sits at depth 0
//! - A visited URL passes the scope filter and robots.txt, then answers a GET
//!   with 200 and HTML, without being redirected off the site
//! - Links of a page at depth `d` are queued only while `d < max_depth`
//!
//! So `max_depth = 2` admits the seed, its links and their links, and never
//! fetches anything three hops away. Up to `max_concurrent_requests` pages
//! are fetched at once; results are merged in dequeue order, which keeps the
//! outcome independent of fetch timing.

use crate::config::{Config, DiscoveryConfig, UserAgentConfig};
use crate::crawler::fetcher::{build_http_client, fetch_url, FetchResult};
use crate::crawler::frontier::{Frontier, QueuedUrl};
use crate::crawler::parser::extract_links;
use crate::discovery::{DiscoveryRequest, UrlSet, UrlSource};
use crate::robots::RobotsPolicy;
use crate::url::{is_under_base, strip_fragment, UrlFilter};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Recursive same-origin crawler
#[derive(Debug, Clone)]
pub struct SiteCrawler {
    discovery: DiscoveryConfig,
    user_agent: UserAgentConfig,
}

/// What happened to one dequeued URL
#[derive(Debug)]
enum VisitOutcome {
    /// In scope, allowed and fetched; carries the page's outgoing links
    Admitted { url: String, links: Vec<String> },
    /// Filtered, disallowed or failed to fetch
    Skipped,
}

/// HTTP state owned by a single crawl
///
/// Dropping the session releases the connection pool.
struct CrawlSession<'a> {
    root: &'a Url,
    client: Client,
    filter: UrlFilter,
    robots: RobotsPolicy,
    robots_agent: &'a str,
}

impl SiteCrawler {
    /// Creates a crawler from the discovery and user-agent sections
    pub fn new(config: &Config) -> Self {
        Self::from_parts(config.discovery.clone(), config.user_agent.clone())
    }

    /// Creates a crawler from explicit config sections
    pub fn from_parts(discovery: DiscoveryConfig, user_agent: UserAgentConfig) -> Self {
        Self {
            discovery,
            user_agent,
        }
    }

    /// Crawls from `seed` up to `max_depth` link hops
    ///
    /// # Arguments
    ///
    /// * `seed` - The crawl root; also the base every URL must live under
    /// * `max_depth` - Maximum hops from the seed (0 visits only the seed)
    ///
    /// # Returns
    ///
    /// The set of admitted page URLs, possibly empty
    pub async fn crawl(&self, seed: &Url, max_depth: u32) -> UrlSet {
        self.crawl_with_cancellation(seed, max_depth, &CancellationToken::new())
            .await
    }

    /// Crawls like [`crawl`](Self::crawl), stopping early once `cancel` fires
    ///
    /// Cancellation is checked between fetch batches; the URLs admitted so far
    /// are returned.
    pub async fn crawl_with_cancellation(
        &self,
        seed: &Url,
        max_depth: u32,
        cancel: &CancellationToken,
    ) -> UrlSet {
        let client = match build_http_client(&self.discovery, &self.user_agent) {
            Ok(client) => client,
            Err(e) => {
                tracing::error!("Failed to build HTTP client: {}", e);
                return UrlSet::new();
            }
        };

        tracing::info!("Starting crawl for {} with depth {}", seed, max_depth);

        let session = CrawlSession {
            root: seed,
            filter: UrlFilter::new(client.clone()),
            robots: RobotsPolicy::new(client.clone()),
            client,
            robots_agent: &self.user_agent.robots,
        };

        let urls = session
            .run(max_depth, self.discovery.max_concurrent_requests, cancel)
            .await;
        drop(session);

        tracing::info!(
            "Crawling {} finished with {} URLs found. Session closed.",
            seed,
            urls.len()
        );

        urls
    }
}

impl CrawlSession<'_> {
    async fn run(&self, max_depth: u32, concurrency: usize, cancel: &CancellationToken) -> UrlSet {
        let concurrency = concurrency.max(1);
        let mut frontier = Frontier::new();
        let mut found = UrlSet::new();

        frontier.push(strip_fragment(self.root).to_string(), 0);

        while !frontier.is_empty() {
            if cancel.is_cancelled() {
                tracing::warn!(
                    "Crawl cancelled with {} URLs still in the frontier",
                    frontier.len()
                );
                break;
            }

            let batch = frontier.pop_batch(concurrency);
            let outcomes: Vec<(QueuedUrl, VisitOutcome)> = stream::iter(batch)
                .map(|queued| async move {
                    let outcome = self.visit(&queued.url).await;
                    (queued, outcome)
                })
                .buffered(concurrency)
                .collect()
                .await;

            for (queued, outcome) in outcomes {
                let VisitOutcome::Admitted { url, links } = outcome else {
                    continue;
                };

                tracing::info!("Added: {} (depth {})", url, queued.depth);
                found.insert(url);

                if queued.depth < max_depth {
                    for link in links {
                        frontier.push(link, queued.depth + 1);
                    }
                }
            }

            tracing::debug!(
                "Progress: {} URLs visited, {} admitted, {} in frontier",
                frontier.visited_count(),
                found.len(),
                frontier.len()
            );
        }

        found
    }

    async fn visit(&self, url: &str) -> VisitOutcome {
        if let Err(rejection) = self.filter.check(url, self.root).await {
            tracing::debug!("Skipping {}: {}", url, rejection);
            return VisitOutcome::Skipped;
        }

        if !self.robots.can_fetch(url, self.robots_agent).await {
            tracing::info!("URL {} disallowed by robots.txt", url);
            return VisitOutcome::Skipped;
        }

        match fetch_url(&self.client, url).await {
            FetchResult::Success {
                final_url,
                content_type,
                body,
            } => {
                if !redirect_stays_under(&final_url, self.root) {
                    tracing::info!("Skipping {}: redirected outside the site to {}", url, final_url);
                    return VisitOutcome::Skipped;
                }
                if !content_type.contains("text/html") {
                    tracing::debug!("Skipping {}: GET answered '{}'", url, content_type);
                    return VisitOutcome::Skipped;
                }
                VisitOutcome::Admitted {
                    url: url.to_string(),
                    links: extract_links(&body, self.root),
                }
            }
            FetchResult::HttpError { status_code } => {
                tracing::debug!("Skipping {}: HTTP {}", url, status_code);
                VisitOutcome::Skipped
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Error crawling URL {}: {}", url, error);
                VisitOutcome::Skipped
            }
        }
    }
}

fn redirect_stays_under(final_url: &str, root: &Url) -> bool {
    Url::parse(final_url)
        .map(|url| is_under_base(&url, root))
        .unwrap_or(false)
}

#[async_trait]
impl UrlSource for SiteCrawler {
    fn name(&self) -> &'static str {
        "crawler"
    }

    async fn discover(&self, request: &DiscoveryRequest) -> UrlSet {
        self.crawl_with_cancellation(request.base(), request.crawl_depth(), request.cancel_token())
            .await
    }
}
