use crate::UrlError;
use url::Url;

/// Parses an absolute HTTP(S) URL
///
/// # Arguments
///
/// * `url_str` - The URL string to parse
///
/// # Returns
///
/// * `Ok(Url)` - The parsed URL
/// * `Err(UrlError)` - The string is relative, malformed, not HTTP(S), or has no host
pub fn parse_absolute(url_str: &str) -> Result<Url, UrlError> {
    let url = Url::parse(url_str.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().map_or(true, str::is_empty) {
        return Err(UrlError::MissingHost);
    }

    Ok(url)
}

/// Normalizes a URL for membership in a URL set
///
/// The fragment is stripped (two URLs differing only by fragment are the same
/// page). Query strings are preserved.
///
/// # Examples
///
/// ```
/// use a11y_sweep::url::normalize_url;
///
/// let url = normalize_url("https://example.com/about#team").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = parse_absolute(url_str)?;
    url.set_fragment(None);
    Ok(url)
}

/// Strips the fragment from an already parsed URL
pub fn strip_fragment(url: &Url) -> Url {
    let mut stripped = url.clone();
    stripped.set_fragment(None);
    stripped
}

/// Derives the site base from a seed URL
///
/// The base is `scheme://host[:port]/path/`: query and fragment are dropped
/// and the path always ends with a slash, so that containment checks against
/// the base treat the seed path as a directory.
///
/// # Examples
///
/// ```
/// use a11y_sweep::site_base;
///
/// let base = site_base("https://example.com/docs?lang=en").unwrap();
/// assert_eq!(base.as_str(), "https://example.com/docs/");
///
/// let base = site_base("https://example.com").unwrap();
/// assert_eq!(base.as_str(), "https://example.com/");
/// ```
pub fn site_base(seed: &str) -> Result<Url, UrlError> {
    let mut url = parse_absolute(seed)?;
    url.set_fragment(None);
    url.set_query(None);

    let trimmed = url.path().trim_end_matches('/').to_string();
    url.set_path(&format!("{}/", trimmed));

    Ok(url)
}
