//! Crawler module for same-origin page discovery
//!
//! This module contains the fallback URL source, including:
//! - HTTP client construction and page fetching
//! - HTML link extraction with nofollow handling
//! - The frontier / visited-set bookkeeping
//! - The bounded breadth-first crawl itself

mod fetcher;
mod frontier;
mod parser;
mod site_crawler;

pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::{Frontier, QueuedUrl};
pub use parser::extract_links;
pub use site_crawler::SiteCrawler;
