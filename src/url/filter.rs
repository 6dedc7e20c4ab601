//! Scope filter for candidate page URLs
//!
//! A candidate is audit-worthy when it is an absolute HTTP(S) URL without
//! query or fragment, does not point at a static asset, lives under the site
//! base, and answers a HEAD request with an HTML content type. The checks run
//! in that order and stop at the first failure.

use crate::url::domain::same_origin;
use crate::url::normalize::parse_absolute;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use std::fmt;
use url::Url;

/// Path suffixes that never identify an HTML page
pub const IGNORED_EXTENSIONS: &[&str] = &[
    ".pdf", ".jpg", ".jpeg", ".webp", ".png", ".svg", ".css", ".js", ".xml",
];

/// Reason a candidate URL was filtered out
///
/// A rejection is a filter outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Not an absolute HTTP(S) URL with a host
    NotAbsolute,
    /// Carries a query string or fragment
    HasQueryOrFragment,
    /// Path ends with an ignored asset extension
    IgnoredExtension,
    /// Different origin, or a path outside the base path
    OutsideBase,
    /// HEAD answered with a non-HTML content type
    NotHtml(String),
    /// HEAD request failed
    Unreachable(String),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAbsolute => write!(f, "not an absolute http(s) URL"),
            Self::HasQueryOrFragment => write!(f, "has query or fragment"),
            Self::IgnoredExtension => write!(f, "ignored extension"),
            Self::OutsideBase => write!(f, "outside base URL"),
            Self::NotHtml(content_type) => write!(f, "content type '{}'", content_type),
            Self::Unreachable(error) => write!(f, "HEAD failed: {}", error),
        }
    }
}

/// Runs the offline scope rules (1 through 4) against a candidate
///
/// # Arguments
///
/// * `candidate` - The candidate URL string
/// * `base` - The site base (see [`site_base`](crate::url::site_base))
///
/// # Returns
///
/// * `Ok(Url)` - The parsed candidate, which passed every offline rule
/// * `Err(Rejection)` - The first rule it failed
pub fn check_static(candidate: &str, base: &Url) -> Result<Url, Rejection> {
    let url = parse_absolute(candidate).map_err(|_| Rejection::NotAbsolute)?;

    if url.query().is_some() || url.fragment().is_some() {
        return Err(Rejection::HasQueryOrFragment);
    }

    let path = url.path().to_lowercase();
    if IGNORED_EXTENSIONS.iter().any(|ext| path.ends_with(ext)) {
        return Err(Rejection::IgnoredExtension);
    }

    if !is_under_base(&url, base) {
        return Err(Rejection::OutsideBase);
    }

    Ok(url)
}

/// Returns true when `url` shares the base's origin and lives under its path
///
/// Containment on parsed components rather than string prefixes, so that
/// `https://example.com.evil.com/` is never considered under
/// `https://example.com/`.
pub fn is_under_base(url: &Url, base: &Url) -> bool {
    if !same_origin(url, base) {
        return false;
    }

    let base_path = base.path();
    let path = url.path();

    // The base path always ends with '/', the seed itself may not
    path.starts_with(base_path) || format!("{}/", path) == base_path
}

/// Filter bound to an HTTP client for the content-type probe
#[derive(Debug, Clone)]
pub struct UrlFilter {
    client: Client,
}

impl UrlFilter {
    /// Creates a filter that probes content types with the given client
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Runs every scope rule, returning the first rejection
    pub async fn check(&self, candidate: &str, base: &Url) -> Result<Url, Rejection> {
        let url = check_static(candidate, base)?;

        let response = self
            .client
            .head(url.as_str())
            .send()
            .await
            .map_err(|e| Rejection::Unreachable(e.to_string()))?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        if !content_type.contains("text/html") {
            return Err(Rejection::NotHtml(content_type));
        }

        Ok(url)
    }

    /// Returns true when the candidate passes every scope rule
    ///
    /// Network failures during the HEAD probe count as rejection.
    pub async fn is_in_scope(&self, candidate: &str, base: &Url) -> bool {
        match self.check(candidate, base).await {
            Ok(_) => true,
            Err(rejection) => {
                tracing::debug!("Rejected {}: {}", candidate, rejection);
                false
            }
        }
    }
}

/// Checks a candidate against a base URL string with an existing filter
///
/// Entry point for callers holding the base as text; an unparseable base
/// rejects every candidate.
pub async fn is_in_scope(filter: &UrlFilter, candidate: &str, base: &str) -> bool {
    let base = match parse_absolute(base) {
        Ok(base) => base,
        Err(e) => {
            tracing::debug!("Invalid base URL {}: {}", base, e);
            return false;
        }
    };

    filter.is_in_scope(candidate, &base).await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_accepts_page_under_base() {
        let url = check_static("https://example.com/about", &base()).unwrap();
        assert_eq!(url.as_str(), "https://example.com/about");
    }

    #[test]
    fn test_rejects_non_http_scheme() {
        assert_eq!(
            check_static("ftp://example.com/file", &base()),
            Err(Rejection::NotAbsolute)
        );
        assert_eq!(check_static("/relative", &base()), Err(Rejection::NotAbsolute));
    }

    #[test]
    fn test_rejects_query_and_fragment() {
        assert_eq!(
            check_static("https://example.com/page?session=1", &base()),
            Err(Rejection::HasQueryOrFragment)
        );
        assert_eq!(
            check_static("https://example.com/page#top", &base()),
            Err(Rejection::HasQueryOrFragment)
        );
    }

    #[test]
    fn test_rejects_ignored_extensions_case_insensitive() {
        for path in [
            "/doc.pdf", "/a.JPG", "/b.jpeg", "/c.webp", "/d.PNG", "/e.svg", "/f.css", "/g.js",
            "/sitemap.xml",
        ] {
            let candidate = format!("https://example.com{}", path);
            assert_eq!(
                check_static(&candidate, &base()),
                Err(Rejection::IgnoredExtension),
                "{} should be ignored",
                candidate
            );
        }
    }

    #[test]
    fn test_extension_needs_dot() {
        // "jpeg" without a dot is just a slug
        assert!(check_static("https://example.com/blog/why-jpeg", &base()).is_ok());
    }

    #[test]
    fn test_rejects_sibling_domain_sharing_prefix() {
        assert_eq!(
            check_static("https://example.com.evil.com/", &base()),
            Err(Rejection::OutsideBase)
        );
    }

    #[test]
    fn test_rejects_other_scheme_same_host() {
        assert_eq!(
            check_static("http://example.com/about", &base()),
            Err(Rejection::OutsideBase)
        );
    }

    #[test]
    fn test_path_containment() {
        let docs = Url::parse("https://example.com/docs/").unwrap();
        assert!(check_static("https://example.com/docs/intro", &docs).is_ok());
        assert!(check_static("https://example.com/docs", &docs).is_ok());
        assert_eq!(
            check_static("https://example.com/blog/post", &docs),
            Err(Rejection::OutsideBase)
        );
        assert_eq!(
            check_static("https://example.com/docsearch", &docs),
            Err(Rejection::OutsideBase)
        );
    }
}
