//! URL handling module
//!
//! This module provides URL parsing and normalization, site-base derivation,
//! domain helpers, and the scope filter that decides whether a candidate URL
//! is an audit-worthy page of the site.

mod domain;
mod filter;
mod normalize;

pub use domain::{extract_domain, same_origin, site_domain};
pub use filter::{
    check_static, is_in_scope, is_under_base, Rejection, UrlFilter, IGNORED_EXTENSIONS,
};
pub use normalize::{normalize_url, parse_absolute, site_base, strip_fragment};
