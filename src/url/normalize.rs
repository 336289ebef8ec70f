use crate::UrlError;
use std::fmt;
use url::Url;

/// Query parameters that identify distinct content and survive normalization
pub const KEPT_QUERY_PARAMS: &[&str] = &["id", "p", "page", "post", "article"];

/// Canonical deduplication identity for a crawled URL
///
/// Always of the form `scheme://host[:port]/path[?filtered-query]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    /// Returns the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the key back into a URL
    ///
    /// Keys produced by [`normalize_url`] always parse.
    pub fn to_url(&self) -> Result<Url, UrlError> {
        Url::parse(&self.0).map_err(|e| UrlError::Parse(e.to_string()))
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Normalizes a resolved URL into its deduplication key
///
/// # Normalization Steps
///
/// 1. Keep scheme, host (with explicit port) and path as parsed
/// 2. Drop the fragment
/// 3. Keep only whitelisted query parameters (`id`, `p`, `page`, `post`,
///    `article`), in order of first occurrence; a repeated name keeps its
///    last value
/// 4. Drop query pairs without `=`, and the `?` when nothing is left
///
/// Two URLs that differ only in dropped parameters or fragment produce the
/// same key. Normalizing the URL of a key yields the key again.
///
/// # Examples
///
/// ```
/// use site_archiver::url::normalize_url;
/// use url::Url;
///
/// let url = Url::parse("https://example.com/post?utm_source=x&id=7#top").unwrap();
/// assert_eq!(normalize_url(&url).as_str(), "https://example.com/post?id=7");
/// ```
pub fn normalize_url(url: &Url) -> NormalizedKey {
    let mut key = format!("{}://", url.scheme());

    if let Some(host) = url.host_str() {
        key.push_str(host);
    }
    if let Some(port) = url.port() {
        key.push_str(&format!(":{}", port));
    }

    let path = url.path();
    if !path.starts_with('/') {
        key.push('/');
    }
    key.push_str(path);

    let params = filter_query_params(url.query().unwrap_or(""));
    if !params.is_empty() {
        let query = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");
        key.push('?');
        key.push_str(&query);
    }

    NormalizedKey(key)
}

/// Parses a string and normalizes it
///
/// Fails when the string is not an absolute URL with a host.
pub fn normalize_str(url_str: &str) -> Result<NormalizedKey, UrlError> {
    let url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;
    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }
    Ok(normalize_url(&url))
}

/// Keeps whitelisted `name=value` pairs in first-occurrence order
fn filter_query_params(query: &str) -> Vec<(&str, &str)> {
    let mut params: Vec<(&str, &str)> = Vec::new();

    for pair in query.split('&') {
        let Some((name, value)) = pair.split_once('=') else {
            continue;
        };
        if !KEPT_QUERY_PARAMS.contains(&name) {
            continue;
        }
        match params.iter_mut().find(|(existing, _)| *existing == name) {
            Some(slot) => slot.1 = value,
            None => params.push((name, value)),
        }
    }

    params
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(s: &str) -> String {
        normalize_url(&Url::parse(s).unwrap()).as_str().to_string()
    }

    #[test]
    fn test_remove_fragment() {
        assert_eq!(key("https://example.com/page#section"), "https://example.com/page");
    }

    #[test]
    fn test_drop_unlisted_params() {
        assert_eq!(
            key("https://example.com/page?utm_source=twitter&ref=home"),
            "https://example.com/page"
        );
    }

    #[test]
    fn test_keep_whitelisted_params_in_original_order() {
        assert_eq!(
            key("https://example.com/read?post=3&sort=asc&id=9&p=2"),
            "https://example.com/read?post=3&id=9&p=2"
        );
    }

    #[test]
    fn test_repeated_param_keeps_first_position_last_value() {
        assert_eq!(
            key("https://example.com/list?page=1&id=4&page=2"),
            "https://example.com/list?page=2&id=4"
        );
    }

    #[test]
    fn test_pairs_without_value_are_ignored() {
        assert_eq!(key("https://example.com/a?id&page"), "https://example.com/a");
        assert_eq!(key("https://example.com/a?&&=&"), "https://example.com/a");
    }

    #[test]
    fn test_trailing_slash_is_preserved() {
        assert_eq!(key("https://example.com/docs/"), "https://example.com/docs/");
        assert_ne!(key("https://example.com/docs/"), key("https://example.com/docs"));
    }

    #[test]
    fn test_empty_path_becomes_root() {
        assert_eq!(key("https://example.com"), "https://example.com/");
    }

    #[test]
    fn test_host_is_lowercased_by_parser() {
        assert_eq!(key("https://EXAMPLE.com/Page"), "https://example.com/Page");
    }

    #[test]
    fn test_explicit_port_kept() {
        assert_eq!(key("http://127.0.0.1:8080/a?id=1"), "http://127.0.0.1:8080/a?id=1");
        assert_eq!(key("https://example.com:443/a"), "https://example.com/a");
    }

    #[test]
    fn test_fragment_and_params_collapse_to_same_key() {
        assert_eq!(
            key("https://example.com/a?id=1&x=2#one"),
            key("https://example.com/a?x=3&id=1#two")
        );
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "https://example.com/",
            "https://example.com/a/b?id=1&utm_medium=mail#frag",
            "http://127.0.0.1:3000/x?page=2&page=3&article=z",
            "https://example.com/%C3%A9t%C3%A9?p=%20",
            "https://example.com/a?id=1=2",
            "https://[::1]:8443/v6?post=1",
        ];
        for sample in samples {
            let once = normalize_url(&Url::parse(sample).unwrap());
            let twice = normalize_url(&once.to_url().unwrap());
            assert_eq!(once, twice, "not idempotent for {}", sample);
        }
    }

    #[test]
    fn test_normalize_str() {
        assert_eq!(
            normalize_str("https://example.com/a#b").unwrap().as_str(),
            "https://example.com/a"
        );
        assert!(normalize_str("not a url").is_err());
        assert!(matches!(
            normalize_str("mailto:someone@example.com"),
            Err(UrlError::MissingDomain)
        ));
    }
}
