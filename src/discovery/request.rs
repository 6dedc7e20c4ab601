use super::DiscoveryMode;
use crate::config::DiscoveryConfig;
use crate::url::{normalize_url, site_base};
use crate::UrlResult;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Settings of one discovery run
///
/// Built from the seed URL the user entered; everything a source needs is
/// carried here rather than in shared state.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    seed: Url,
    base: Url,
    crawl_depth: u32,
    mode: DiscoveryMode,
    cancel: CancellationToken,
}

impl DiscoveryRequest {
    /// Creates a request in [`DiscoveryMode::Auto`]
    ///
    /// # Errors
    ///
    /// Returns `UrlError` if `seed` is not an absolute HTTP(S) URL with a host.
    ///
    /// # Example
    ///
    /// ```
    /// use a11y_sweep::DiscoveryRequest;
    ///
    /// let request = DiscoveryRequest::new("https://example.com/docs#intro", 2).unwrap();
    /// assert_eq!(request.seed().as_str(), "https://example.com/docs");
    /// assert_eq!(request.base().as_str(), "https://example.com/docs/");
    /// ```
    pub fn new(seed: &str, crawl_depth: u32) -> UrlResult<Self> {
        Ok(Self {
            seed: normalize_url(seed)?,
            base: site_base(seed)?,
            crawl_depth,
            mode: DiscoveryMode::Auto,
            cancel: CancellationToken::new(),
        })
    }

    /// Creates a request using the depth and mode of a `[discovery]` section
    pub fn from_config(seed: &str, config: &DiscoveryConfig) -> UrlResult<Self> {
        Ok(Self::new(seed, config.crawl_depth)?.with_mode(config.mode))
    }

    pub fn with_mode(mut self, mode: DiscoveryMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_crawl_depth(mut self, crawl_depth: u32) -> Self {
        self.crawl_depth = crawl_depth;
        self
    }

    /// Replaces the cancellation token, e.g. with a child of a process-wide one
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// The seed as entered, without fragment
    pub fn seed(&self) -> &Url {
        &self.seed
    }

    /// The site base every discovered URL lives under
    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn crawl_depth(&self) -> u32 {
        self.crawl_depth
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Asks the sources to stop at their next checkpoint
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}
