/// Checks if a host belongs to a domain
///
/// A host matches when it is the domain itself or any of its subdomains:
/// `facebook.com` matches `facebook.com` and `m.facebook.com`, but not
/// `notfacebook.com`. Matching is label-aligned, so short domains such as
/// `t.co` never match inside unrelated hosts.
///
/// # Examples
///
/// ```
/// use site_archiver::url::matches_domain;
///
/// assert!(matches_domain("facebook.com", "facebook.com"));
/// assert!(matches_domain("facebook.com", "m.facebook.com"));
/// assert!(!matches_domain("t.co", "test.com"));
/// ```
pub fn matches_domain(domain: &str, host: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    match host.strip_suffix(domain) {
        Some("") => true,
        Some(prefix) => prefix.ends_with('.'),
        None => false,
    }
}
