use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// How the URL set of a run is obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum DiscoveryMode {
    /// Sitemap first, crawl when the sitemap yields nothing
    #[default]
    #[serde(rename = "auto")]
    Auto,

    /// Sitemap only, an empty result stays empty
    #[serde(rename = "sitemap")]
    SitemapOnly,

    /// Crawl only, sitemaps are ignored
    #[serde(rename = "crawl")]
    CrawlOnly,

    /// Just the seed URL itself
    #[serde(rename = "single")]
    SingleUrl,
}

impl DiscoveryMode {
    /// The name used in config files and on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::Auto => "auto",
            DiscoveryMode::SitemapOnly => "sitemap",
            DiscoveryMode::CrawlOnly => "crawl",
            DiscoveryMode::SingleUrl => "single",
        }
    }
}

impl fmt::Display for DiscoveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DiscoveryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(DiscoveryMode::Auto),
            "sitemap" => Ok(DiscoveryMode::SitemapOnly),
            "crawl" => Ok(DiscoveryMode::CrawlOnly),
            "single" => Ok(DiscoveryMode::SingleUrl),
            other => Err(format!(
                "unknown discovery mode '{}' (expected auto, sitemap, crawl or single)",
                other
            )),
        }
    }
}
