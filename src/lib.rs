//! a11y-sweep: site discovery and accessibility audit dispatch
//!
//! This crate discovers the reachable, same-site HTML pages of a website
//! (sitemaps first, a bounded same-origin crawl as fallback) and hands the
//! resulting URL set to an external accessibility audit engine, persisting
//! one timestamped results directory per run.

pub mod audit;
pub mod config;
pub mod crawler;
pub mod discovery;
pub mod results;
pub mod robots;
pub mod sitemap;
pub mod sweep;
pub mod url;

use thiserror::Error;

/// Errors that end a sweep before or after discovery
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Results error: {0}")]
    Results(#[from] results::ResultsError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Missing config section: [{0}]")]
    MissingSection(&'static str),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for a11y-sweep operations
pub type Result<T> = std::result::Result<T, SweepError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use discovery::{DiscoveryMode, DiscoveryRequest, Orchestrator, UrlSet, UrlSource};
pub use sweep::{sweep, sweep_url, SweepOutcome};
pub use crate::url::{is_in_scope, site_base, UrlFilter};
