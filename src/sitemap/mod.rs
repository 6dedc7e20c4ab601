//! Sitemap discovery module
//!
//! This module finds and reads sitemaps.org documents:
//! - XML parsing of `urlset` and `sitemapindex` documents
//! - The CMS path blocklist applied to page locations
//! - The resolver that walks robots.txt, the well-known probe locations and
//!   nested indexes into one flat URL set

mod parser;
mod resolver;

pub use parser::{is_blocked, parse_sitemap, SitemapDocument, SitemapKind, BLOCKED_SEGMENTS};
pub use resolver::{Resolution, ResolverState, SitemapResolver, MAX_INDEX_NESTING, PROBE_PATHS};

use thiserror::Error;

/// XML namespace of sitemap and sitemap index documents
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Errors raised while reading a sitemap document
///
/// These never escape the resolver; a document that fails to parse is
/// treated as absent.
#[derive(Debug, Error)]
pub enum SitemapError {
    #[error("Malformed XML: {0}")]
    Malformed(String),

    #[error("Unexpected root element: <{0}>")]
    UnexpectedRoot(String),

    #[error("Root element is not in the sitemap namespace: {0}")]
    WrongNamespace(String),

    #[error("Document has no root element")]
    Empty,
}

/// Result type alias for sitemap parsing
pub type SitemapResult<T> = std::result::Result<T, SitemapError>;
