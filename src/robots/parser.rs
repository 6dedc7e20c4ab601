//! Robots.txt parser implementation
//!
//! Allow/disallow evaluation is delegated to the robotstxt crate (longest
//! matching rule wins, `*` groups apply when no group names the agent).
//! `Sitemap:` directives are read here since they sit outside agent groups.

use robotstxt::DefaultMatcher;

/// Parsed robots.txt data
#[derive(Debug, Clone)]
pub struct ParsedRobots {
    /// Raw robots.txt content (empty string means allow all)
    content: String,
    /// Whether to allow all (true = allow all, false = parse content)
    allow_all: bool,
}

impl ParsedRobots {
    /// Creates a new ParsedRobots from raw robots.txt content
    pub fn from_content(content: &str) -> Self {
        Self {
            content: content.to_string(),
            allow_all: false,
        }
    }

    /// Creates a permissive ParsedRobots that allows everything
    ///
    /// This is used when robots.txt is missing, returns a non-200 status, or
    /// cannot be fetched.
    pub fn allow_all() -> Self {
        Self {
            content: String::new(),
            allow_all: true,
        }
    }

    /// Checks if a URL is allowed for the given user agent
    ///
    /// # Arguments
    ///
    /// * `url` - The absolute URL (or path) to check
    /// * `user_agent` - The user agent token, `*` for the generic agent
    ///
    /// # Returns
    ///
    /// * `true` - If the URL is allowed
    /// * `false` - If the URL is disallowed
    pub fn is_allowed(&self, url: &str, user_agent: &str) -> bool {
        if self.allow_all || self.content.is_empty() {
            return true;
        }

        let mut matcher = DefaultMatcher::default();
        matcher.one_agent_allowed_by_robots(&self.content, user_agent, url)
    }

    /// Returns every `Sitemap:` URL in file order
    pub fn sitemaps(&self) -> Vec<String> {
        self.content
            .lines()
            .filter_map(|line| {
                let (key, value) = line.trim().split_once(':')?;
                if !key.trim().eq_ignore_ascii_case("sitemap") {
                    return None;
                }
                value.split_whitespace().next().map(str::to_string)
            })
            .collect()
    }

    /// Returns the first `Sitemap:` URL, if any
    pub fn sitemap(&self) -> Option<String> {
        self.sitemaps().into_iter().next()
    }
}
