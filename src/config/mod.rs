//! Configuration module for a11y-sweep
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; missing keys fall back to defaults.
//!
//! # Example
//!
//! ```no_run
//! use a11y_sweep::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("a11y-sweep.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.discovery.crawl_depth);
//! ```

mod parser;
mod types;
mod validation;

pub use types::{
    AuditConfig, Config, DiscoveryConfig, OutputConfig, UserAgentConfig, DEFAULT_HTTP_USER_AGENT,
    DEFAULT_RESULTS_DIRECTORY,
};

pub use parser::{load_config, parse_config};
