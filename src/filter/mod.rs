//! Link admission filter
//!
//! Decides whether a link discovered on a page may enter the frontier. The
//! decision is a short-circuit chain evaluated in a fixed order; the first
//! rule that matches rejects the link:
//!
//! 1. Non-fetchable scheme (anything but `http`/`https`)
//! 2. Social or tracking host
//! 3. Blacklisted keyword in `path?query#fragment`
//! 4. Blacklisted URL pattern
//! 5. Blacklisted link text, CSS class or element id
//! 6. Host outside the crawl domain
//!
//! The filter is pure: it performs no I/O and the same inputs always give the
//! same decision.

mod policy;

pub use policy::{
    LinkPolicy, PolicyTables, BUILTIN_TABLES, LINK_CLASSES, LINK_IDS, LINK_TEXTS,
    SOCIAL_DOMAINS, URL_KEYWORDS, URL_PATTERNS,
};

use crate::url::{extract_domain, extract_host};
use std::fmt;
use url::Url;

/// Presentation metadata of a link element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkMeta {
    /// Visible text of the element
    pub text: String,
    /// CSS classes, in document order
    pub classes: Vec<String>,
    /// The `id` attribute, if any
    pub id: Option<String>,
}

/// A resolved link plus the metadata the filter may inspect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkCandidate {
    pub url: Url,
    pub meta: Option<LinkMeta>,
}

impl LinkCandidate {
    /// Creates a candidate without metadata
    pub fn new(url: Url) -> Self {
        Self { url, meta: None }
    }

    /// Creates a candidate carrying link metadata
    pub fn with_meta(url: Url, meta: LinkMeta) -> Self {
        Self {
            url,
            meta: Some(meta),
        }
    }
}

/// Why a link was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RejectReason {
    UnsupportedScheme,
    SocialDomain,
    Keyword,
    Pattern,
    LinkText,
    LinkClass,
    LinkId,
    OffDomain,
}

impl RejectReason {
    /// Short, stable label used in logs and reports
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::UnsupportedScheme => "unsupported_scheme",
            Self::SocialDomain => "social_domain",
            Self::Keyword => "keyword",
            Self::Pattern => "pattern",
            Self::LinkText => "link_text",
            Self::LinkClass => "link_class",
            Self::LinkId => "link_id",
            Self::OffDomain => "off_domain",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of evaluating a link
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Admit,
    Reject(RejectReason),
}

impl Decision {
    pub fn is_admit(&self) -> bool {
        matches!(self, Self::Admit)
    }
}

/// Link filter bound to one crawl domain
#[derive(Debug, Clone)]
pub struct LinkFilter {
    domain: String,
    policy: LinkPolicy,
}

impl LinkFilter {
    /// Creates a filter for the given crawl domain (`host[:port]`)
    pub fn new(domain: impl Into<String>, policy: LinkPolicy) -> Self {
        Self {
            domain: domain.into().to_lowercase(),
            policy,
        }
    }

    /// The crawl domain this filter scopes links to
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Returns true if the candidate may be queued
    pub fn admits(&self, candidate: &LinkCandidate) -> bool {
        self.evaluate(candidate).is_admit()
    }

    /// Evaluates the rule chain for one candidate
    pub fn evaluate(&self, candidate: &LinkCandidate) -> Decision {
        let url = &candidate.url;

        if url.as_str().is_empty() || !matches!(url.scheme(), "http" | "https") {
            return Decision::Reject(RejectReason::UnsupportedScheme);
        }

        let host = extract_host(url).unwrap_or_default();
        if let Some(domain) = self.policy.social_domain(&host) {
            tracing::trace!("{} rejected: social domain {}", url, domain);
            return Decision::Reject(RejectReason::SocialDomain);
        }

        let locator = format!(
            "{}?{}#{}",
            url.path(),
            url.query().unwrap_or(""),
            url.fragment().unwrap_or("")
        )
        .to_lowercase();
        if let Some(keyword) = self.policy.url_keyword(&locator) {
            tracing::trace!("{} rejected: keyword {:?}", url, keyword);
            return Decision::Reject(RejectReason::Keyword);
        }

        if let Some(pattern) = self.policy.url_pattern(&url.as_str().to_lowercase()) {
            tracing::trace!("{} rejected: pattern {}", url, pattern);
            return Decision::Reject(RejectReason::Pattern);
        }

        if let Some(meta) = &candidate.meta {
            if let Some(reason) = self.check_meta(meta) {
                tracing::trace!("{} rejected: {}", url, reason);
                return Decision::Reject(reason);
            }
        }

        if extract_domain(url).as_deref() != Some(self.domain.as_str()) {
            return Decision::Reject(RejectReason::OffDomain);
        }

        Decision::Admit
    }

    fn check_meta(&self, meta: &LinkMeta) -> Option<RejectReason> {
        let text = meta.text.trim().to_lowercase();
        if self.policy.link_text(&text).is_some() {
            return Some(RejectReason::LinkText);
        }

        let classes = meta.classes.join(" ").to_lowercase();
        if self.policy.link_class(&classes).is_some() {
            return Some(RejectReason::LinkClass);
        }

        let id = meta.id.as_deref().unwrap_or("").to_lowercase();
        if self.policy.link_id(&id).is_some() {
            return Some(RejectReason::LinkId);
        }

        None
    }
}
