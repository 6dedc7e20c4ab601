//! URL discovery module
//!
//! This module ties the URL sources together:
//! - [`UrlSource`], the capability shared by the sitemap resolver and the crawler
//! - [`DiscoveryRequest`], the request-scoped settings of one run
//! - [`Orchestrator`], which applies the sitemap-first, crawl-fallback policy

mod mode;
mod orchestrator;
mod request;

pub use mode::DiscoveryMode;
pub use orchestrator::Orchestrator;
pub use request::DiscoveryRequest;

use async_trait::async_trait;
use std::collections::BTreeSet;

/// Set of discovered page URLs
///
/// URLs are normalized (no fragment) before insertion, so membership is
/// plain string equality. Iteration order is lexical.
pub type UrlSet = BTreeSet<String>;

/// Something that turns a discovery request into a set of page URLs
///
/// Implementations never fail: network and parse problems are logged and an
/// empty set means "nothing usable found here".
#[async_trait]
pub trait UrlSource: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &'static str;

    /// Discovers page URLs for the site described by `request`
    async fn discover(&self, request: &DiscoveryRequest) -> UrlSet;
}
