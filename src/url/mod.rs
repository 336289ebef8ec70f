//! URL handling module for Site-Archiver
//!
//! This module provides URL normalization, domain extraction, domain matching,
//! and resolution of raw `href` values found in page markup.

mod domain;
mod matcher;
mod normalize;

use crate::UrlError;
use url::Url;

// Re-export main functions
pub use domain::{extract_domain, extract_host};
pub use matcher::matches_domain;
pub use normalize::{normalize_str, normalize_url, NormalizedKey, KEPT_QUERY_PARAMS};

/// Resolves a raw `href` against the URL of the page it was found on
///
/// Only hrefs that start with `http`, `/` or `#` are considered; relative
/// paths such as `page.html`, as well as `javascript:`, `mailto:` and `tel:`
/// links, are dropped here. The joined URL must have a host.
///
/// # Arguments
///
/// * `href` - The untrusted href value
/// * `base_url` - The URL of the page containing the link
///
/// # Returns
///
/// * `Some(Url)` - The absolute URL
/// * `None` - The href was empty, of an unsupported form, or unparseable
///
/// # Examples
///
/// ```
/// use site_archiver::url::resolve_href;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/blog/post").unwrap();
/// let url = resolve_href("/about", &base).unwrap();
/// assert_eq!(url.as_str(), "https://example.com/about");
/// assert!(resolve_href("mailto:me@example.com", &base).is_none());
/// ```
pub fn resolve_href(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if !(href.starts_with("http") || href.starts_with('/') || href.starts_with('#')) {
        return None;
    }

    let resolved = base_url.join(href).ok()?;
    resolved.host_str()?;
    Some(resolved)
}

/// Parses and validates a seed URL
///
/// The seed must be an absolute HTTP(S) URL with a host.
///
/// # Returns
///
/// * `Ok(Url)` - The parsed seed
/// * `Err(UrlError)` - The seed is malformed, has another scheme, or no host
pub fn parse_seed(seed: &str) -> Result<Url, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS schemes are supported, got: {}",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingDomain);
    }

    Ok(url)
}
