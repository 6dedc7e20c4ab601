use url::Url;

/// Extracts the lowercase host from a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use a11y_sweep::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Returns the site key used for results directories
///
/// The host with a leading `www.` removed. A non-default port is appended
/// with an underscore so the key stays a valid single path component.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use a11y_sweep::url::site_domain;
///
/// let url = Url::parse("https://www.example.com/about").unwrap();
/// assert_eq!(site_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(site_domain(&url), Some("localhost_8080".to_string()));
/// ```
pub fn site_domain(url: &Url) -> Option<String> {
    let host = extract_domain(url)?;
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();

    Some(match url.port() {
        Some(port) => format!("{}_{}", host, port),
        None => host,
    })
}

/// Checks whether two URLs share scheme, host and effective port
pub fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && extract_domain(a) == extract_domain(b)
        && a.port_or_known_default() == b.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_site_domain_strips_www_only_at_start() {
        let url = Url::parse("https://shop.www.example.com/").unwrap();
        assert_eq!(site_domain(&url), Some("shop.www.example.com".to_string()));
    }

    #[test]
    fn test_site_domain_default_port_omitted() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(site_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_same_origin() {
        let a = Url::parse("https://example.com/a").unwrap();
        let b = Url::parse("https://EXAMPLE.com:443/b").unwrap();
        let c = Url::parse("http://example.com/a").unwrap();
        let d = Url::parse("https://example.com.evil.com/a").unwrap();

        assert!(same_origin(&a, &b));
        assert!(!same_origin(&a, &c));
        assert!(!same_origin(&a, &d));
    }
}
