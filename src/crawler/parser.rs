//! HTML link extraction
//!
//! Anchors are resolved against the crawl root, not the page they appear on.
//! Links to another host are rewritten to the root itself, which keeps the
//! crawl contained without following external sites; the root is always
//! visited first, so a rewritten link never adds work.

use crate::url::strip_fragment;
use scraper::{Html, Selector};
use url::Url;

/// Extracts followable links from an HTML page
///
/// # Link Extraction Rules
///
/// **Exclude:**
/// - anchors carrying `rel="nofollow"` (any token of the rel list)
/// - `javascript:`, `mailto:`, `tel:` and `data:` links
/// - fragment-only links (same page anchors)
/// - links that do not resolve to an HTTP(S) URL
///
/// Returned URLs carry no fragment and appear once, in document order.
///
/// # Example
///
/// ```
/// use a11y_sweep::crawler::extract_links;
/// use url::Url;
///
/// let root = Url::parse("https://example.com/").unwrap();
/// let html = r#"<a href="/about">About</a><a rel="nofollow" href="/login">Login</a>"#;
/// assert_eq!(extract_links(html, &root), vec!["https://example.com/about".to_string()]);
/// ```
pub fn extract_links(html: &str, root: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links: Vec<String> = Vec::new();

    let a_selector = match Selector::parse("a[href]") {
        Ok(selector) => selector,
        Err(_) => return links,
    };

    for element in document.select(&a_selector) {
        if is_nofollow(element.value().attr("rel")) {
            continue;
        }

        if let Some(href) = element.value().attr("href") {
            if let Some(resolved) = resolve_link(href, root) {
                if !links.contains(&resolved) {
                    links.push(resolved);
                }
            }
        }
    }

    links
}

fn is_nofollow(rel: Option<&str>) -> bool {
    rel.map_or(false, |rel| {
        rel.split_whitespace()
            .any(|token| token.eq_ignore_ascii_case("nofollow"))
    })
}

/// Resolves an href against the crawl root
///
/// Same-host links are kept, cross-host links become the root.
fn resolve_link(href: &str, root: &Url) -> Option<String> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    let lower = href.to_ascii_lowercase();
    if lower.starts_with("javascript:")
        || lower.starts_with("mailto:")
        || lower.starts_with("tel:")
        || lower.starts_with("data:")
    {
        return None;
    }

    let resolved = root.join(href).ok()?;
    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }

    let same_host = match (resolved.host_str(), root.host_str()) {
        (Some(a), Some(b)) => a.eq_ignore_ascii_case(b),
        _ => false,
    };

    if same_host {
        Some(strip_fragment(&resolved).to_string())
    } else {
        Some(strip_fragment(root).to_string())
    }
}
