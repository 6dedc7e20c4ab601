use crate::discovery::DiscoveryMode;
use crate::ConfigError;
use serde::Deserialize;

/// Default User-Agent header sent with every request
pub const DEFAULT_HTTP_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default directory for audit results
pub const DEFAULT_RESULTS_DIRECTORY: &str = "data/accessibility_results";

/// Main configuration structure for a11y-sweep
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    pub audit: Option<AuditConfig>,
    pub output: Option<OutputConfig>,
}

impl Config {
    /// Returns the audit section, which is required to run audits
    pub fn require_audit(&self) -> Result<&AuditConfig, ConfigError> {
        self.audit
            .as_ref()
            .ok_or(ConfigError::MissingSection("audit"))
    }

    /// Returns the output section, falling back to defaults
    pub fn output_or_default(&self) -> OutputConfig {
        self.output.clone().unwrap_or_default()
    }
}

/// URL discovery behavior
#[derive(Debug, Clone, Deserialize)]
pub struct DiscoveryConfig {
    /// Maximum link depth followed by the crawler from the seed
    #[serde(rename = "crawl-depth", default = "default_crawl_depth")]
    pub crawl_depth: u32,

    /// How URLs are discovered
    #[serde(default)]
    pub mode: DiscoveryMode,

    /// Upper bound for every single HTTP fetch (seconds)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Maximum number of page fetches in flight during a crawl
    #[serde(
        rename = "max-concurrent-requests",
        default = "default_max_concurrent_requests"
    )]
    pub max_concurrent_requests: usize,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            crawl_depth: default_crawl_depth(),
            mode: DiscoveryMode::default(),
            request_timeout_secs: default_request_timeout(),
            max_concurrent_requests: default_max_concurrent_requests(),
        }
    }
}

/// User agent identification
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// User-Agent header value
    #[serde(default = "default_http_user_agent")]
    pub http: String,

    /// Agent token matched against robots.txt groups
    #[serde(default = "default_robots_agent")]
    pub robots: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            http: default_http_user_agent(),
            robots: default_robots_agent(),
        }
    }
}

/// External audit engine invocation
#[derive(Debug, Clone, Deserialize)]
pub struct AuditConfig {
    /// Executable that audits one URL and prints a JSON report
    pub command: String,

    /// Arguments placed before the URL
    #[serde(default)]
    pub args: Vec<String>,

    /// Upper bound for one engine invocation (seconds)
    #[serde(rename = "timeout-secs", default = "default_audit_timeout")]
    pub timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Root of the `{domain}/{timestamp}/` results tree
    #[serde(rename = "results-directory", default = "default_results_directory")]
    pub results_directory: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            results_directory: default_results_directory(),
        }
    }
}

fn default_crawl_depth() -> u32 {
    3
}

fn default_request_timeout() -> u64 {
    10
}

fn default_max_concurrent_requests() -> usize {
    4
}

fn default_audit_timeout() -> u64 {
    120
}

fn default_http_user_agent() -> String {
    DEFAULT_HTTP_USER_AGENT.to_string()
}

fn default_robots_agent() -> String {
    "*".to_string()
}

fn default_results_directory() -> String {
    DEFAULT_RESULTS_DIRECTORY.to_string()
}
