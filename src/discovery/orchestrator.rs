//! URL discovery orchestrator
//!
//! Sitemaps are authoritative and cheap, so the primary source is asked
//! first; the crawler only runs when it comes back empty.

use super::{DiscoveryMode, DiscoveryRequest, UrlSet, UrlSource};
use crate::config::Config;
use crate::crawler::SiteCrawler;
use crate::sitemap::SitemapResolver;
use crate::UrlResult;

/// Chooses and runs URL sources for a discovery request
pub struct Orchestrator {
    primary: Box<dyn UrlSource>,
    fallback: Box<dyn UrlSource>,
}

impl Orchestrator {
    /// Creates the standard orchestrator: sitemap resolver, then crawler
    pub fn new(config: &Config) -> Self {
        Self::with_sources(
            Box::new(SitemapResolver::new(config)),
            Box::new(SiteCrawler::new(config)),
        )
    }

    /// Creates an orchestrator over arbitrary sources
    pub fn with_sources(primary: Box<dyn UrlSource>, fallback: Box<dyn UrlSource>) -> Self {
        Self { primary, fallback }
    }

    /// Discovers the page URLs of the site at `seed`
    ///
    /// # Arguments
    ///
    /// * `seed` - The URL entered by the user
    /// * `crawl_depth` - Maximum link hops if the crawler has to run
    ///
    /// # Returns
    ///
    /// * `Ok(UrlSet)` - The discovered URLs, possibly empty
    /// * `Err(UrlError)` - `seed` is not a usable absolute URL
    pub async fn discover_urls(&self, seed: &str, crawl_depth: u32) -> UrlResult<UrlSet> {
        let request = DiscoveryRequest::new(seed, crawl_depth)?;
        Ok(self.run(&request).await)
    }

    /// Runs discovery for a prepared request, honoring its mode
    pub async fn run(&self, request: &DiscoveryRequest) -> UrlSet {
        tracing::info!(
            "Discovering URLs for {} (mode: {}, crawl depth: {})",
            request.base(),
            request.mode(),
            request.crawl_depth()
        );

        let urls = match request.mode() {
            DiscoveryMode::SingleUrl => UrlSet::from([request.seed().to_string()]),
            DiscoveryMode::SitemapOnly => self.primary.discover(request).await,
            DiscoveryMode::CrawlOnly => self.fallback.discover(request).await,
            DiscoveryMode::Auto => self.sitemap_then_crawl(request).await,
        };

        tracing::info!("Discovery finished with {} URLs", urls.len());
        urls
    }

    async fn sitemap_then_crawl(&self, request: &DiscoveryRequest) -> UrlSet {
        let urls = self.primary.discover(request).await;
        if !urls.is_empty() {
            tracing::info!("{} returned {} URLs", self.primary.name(), urls.len());
            return urls;
        }

        if request.is_cancelled() {
            return urls;
        }

        tracing::info!(
            "{} found nothing, falling back to {}",
            self.primary.name(),
            self.fallback.name()
        );
        self.fallback.discover(request).await
    }
}
