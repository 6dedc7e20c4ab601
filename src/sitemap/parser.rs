//! Sitemap XML parsing
//!
//! The document kind comes from the root element: its local name must be
//! `urlset` or `sitemapindex` and it must be bound to the sitemaps.org
//! namespace. Entry and `<loc>` elements are matched by local name, so a
//! document that re-binds the namespace to a prefix is still read.

use super::{SitemapError, SitemapResult, SITEMAP_NAMESPACE};
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;
use url::Url;

/// Path segments that mark CMS or shop infrastructure rather than content
pub const BLOCKED_SEGMENTS: &[&str] = &[
    "wp-content",
    "wp-admin",
    "wp-includes",
    "plugins",
    "templates",
    "components",
    "node",
    "user",
    "catalog",
    "author",
    "checkout",
    "customer",
    "collections",
    "products",
    "app",
    "site",
];

/// Segment prefixes blocked in addition to [`BLOCKED_SEGMENTS`]
const BLOCKED_PREFIXES: &[&str] = &["elementor"];

/// Kind of sitemap document, taken from its root element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SitemapKind {
    /// `<sitemapindex>`: locations point at further sitemaps
    Index,
    /// `<urlset>`: locations are pages
    UrlSet,
}

impl SitemapKind {
    fn entry_element(self) -> &'static [u8] {
        match self {
            SitemapKind::Index => b"sitemap",
            SitemapKind::UrlSet => b"url",
        }
    }
}

/// A parsed sitemap document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapDocument {
    pub kind: SitemapKind,

    /// Trimmed, non-empty `<loc>` values in document order
    pub locations: Vec<String>,
}

/// Parses a sitemap or sitemap index
///
/// # Errors
///
/// * `SitemapError::Malformed` - The bytes are not well-formed XML
/// * `SitemapError::UnexpectedRoot` - The root is neither `urlset` nor `sitemapindex`
/// * `SitemapError::WrongNamespace` - The root is not in the sitemaps.org namespace
/// * `SitemapError::Empty` - There is no root element at all
///
/// # Example
///
/// ```
/// use a11y_sweep::sitemap::{parse_sitemap, SitemapKind};
///
/// let xml = br#"<?xml version="1.0" encoding="UTF-8"?>
/// <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
///   <url><loc>https://example.com/about</loc></url>
/// </urlset>"#;
///
/// let document = parse_sitemap(xml).unwrap();
/// assert_eq!(document.kind, SitemapKind::UrlSet);
/// assert_eq!(document.locations, vec!["https://example.com/about"]);
/// ```
pub fn parse_sitemap(xml: &[u8]) -> SitemapResult<SitemapDocument> {
    let mut reader = NsReader::from_reader(xml);
    reader.trim_text(true);

    let mut buf = Vec::new();
    let mut kind: Option<SitemapKind> = None;
    let mut path: Vec<Vec<u8>> = Vec::new();
    let mut loc_text: Option<String> = None;
    let mut locations = Vec::new();

    loop {
        let (namespace, event) = reader
            .read_resolved_event_into(&mut buf)
            .map_err(|e| SitemapError::Malformed(e.to_string()))?;

        match event {
            Event::Start(start) => {
                let local = start.local_name().as_ref().to_vec();
                match kind {
                    None => kind = Some(root_kind(&namespace, &local)?),
                    Some(k) => {
                        if path.len() == 2 && local == b"loc" && path[1] == k.entry_element() {
                            loc_text = Some(String::new());
                        }
                    }
                }
                path.push(local);
            }
            Event::Empty(start) => {
                if kind.is_none() {
                    let root = root_kind(&namespace, start.local_name().as_ref())?;
                    return Ok(SitemapDocument {
                        kind: root,
                        locations,
                    });
                }
            }
            Event::Text(text) => {
                if let Some(acc) = loc_text.as_mut() {
                    let unescaped = text
                        .unescape()
                        .map_err(|e| SitemapError::Malformed(e.to_string()))?;
                    acc.push_str(&unescaped);
                }
            }
            Event::CData(data) => {
                if let Some(acc) = loc_text.as_mut() {
                    acc.push_str(&String::from_utf8_lossy(&data.into_inner()));
                }
            }
            Event::End(_) => {
                let closed_depth = path.len();
                path.pop();

                if closed_depth == 3 {
                    if let Some(text) = loc_text.take() {
                        let trimmed = text.trim();
                        if !trimmed.is_empty() {
                            locations.push(trimmed.to_string());
                        }
                    }
                }

                if path.is_empty() {
                    break;
                }
            }
            Event::Eof => {
                if kind.is_none() {
                    return Err(SitemapError::Empty);
                }
                return Err(SitemapError::Malformed(
                    "unexpected end of document".to_string(),
                ));
            }
            _ => {}
        }

        buf.clear();
    }

    match kind {
        Some(kind) => Ok(SitemapDocument { kind, locations }),
        None => Err(SitemapError::Empty),
    }
}

fn root_kind(namespace: &ResolveResult, local: &[u8]) -> SitemapResult<SitemapKind> {
    let kind = match local {
        b"urlset" => SitemapKind::UrlSet,
        b"sitemapindex" => SitemapKind::Index,
        other => {
            return Err(SitemapError::UnexpectedRoot(
                String::from_utf8_lossy(other).into_owned(),
            ))
        }
    };

    match namespace {
        ResolveResult::Bound(Namespace(uri)) if *uri == SITEMAP_NAMESPACE.as_bytes() => Ok(kind),
        ResolveResult::Bound(Namespace(uri)) => Err(SitemapError::WrongNamespace(
            String::from_utf8_lossy(uri).into_owned(),
        )),
        _ => Err(SitemapError::WrongNamespace("none".to_string())),
    }
}

/// Returns true if any path segment of `url` is on the blocklist
///
/// Segments compare case-insensitively; `elementor` matches as a prefix
/// (`elementor-hf`, `elementor_library`).
pub fn is_blocked(url: &Url) -> bool {
    url.path_segments().map_or(false, |mut segments| {
        segments.any(|segment| {
            let segment = segment.to_ascii_lowercase();
            BLOCKED_SEGMENTS.contains(&segment.as_str())
                || BLOCKED_PREFIXES
                    .iter()
                    .any(|prefix| segment.starts_with(prefix))
        })
    })
}
