use url::Url;

/// Extracts the crawl domain from a URL
///
/// The domain is the lowercase host followed by `:port` when the URL carries
/// a non-default port, so two servers on the same host but different ports
/// are different domains. Returns None if the URL has no host.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use site_archiver::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(extract_domain(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

/// Returns the lowercase host of a URL without any port
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_simple_domain() {
        let url = Url::parse("https://example.com/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://blog.example.com/post").unwrap();
        assert_eq!(extract_domain(&url), Some("blog.example.com".to_string()));
    }

    #[test]
    fn test_extract_with_port() {
        let url = Url::parse("https://example.com:8080/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com:8080".to_string()));
        assert_eq!(extract_host(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_default_port_is_not_part_of_domain() {
        let url = Url::parse("https://example.com:443/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_mixed_case() {
        let url = Url::parse("https://Example.COM/").unwrap();
        assert_eq!(extract_domain(&url), Some("example.com".to_string()));
    }

    #[test]
    fn test_extract_ipv6() {
        let url = Url::parse("http://[::1]:3000/").unwrap();
        assert_eq!(extract_domain(&url), Some("[::1]:3000".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:someone@example.com").unwrap();
        assert_eq!(extract_domain(&url), None);
        assert_eq!(extract_host(&url), None);
    }
}
