//! The content extraction seam between the coordinator and the network
//!
//! The coordinator only ever sees `ContentExtractor`; the HTTP-backed
//! implementation lives in `fetcher`, tests plug in in-memory ones.

use crate::filter::LinkMeta;
use async_trait::async_trait;
use url::Url;

/// A link exactly as found in page markup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLink {
    /// The untrusted `href` value
    pub href: String,

    /// Text, classes and id of the link element
    pub meta: LinkMeta,
}

impl RawLink {
    /// Creates a link with no metadata
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            meta: LinkMeta::default(),
        }
    }
}

/// What an extractor produced for one page
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// The Markdown document to archive
    pub document: String,

    /// Links found on the page, in document order
    pub links: Vec<RawLink>,

    /// URL to resolve relative links against when it differs from the
    /// requested one (after redirects)
    pub base_url: Option<Url>,

    /// True if the document is an error document
    pub failed: bool,
}

impl Extraction {
    /// A successful extraction
    pub fn success(document: impl Into<String>, links: Vec<RawLink>) -> Self {
        Self {
            document: document.into(),
            links,
            base_url: None,
            failed: false,
        }
    }

    /// An error document for a page that could not be converted
    ///
    /// The document still gets archived, so a failed page shows up in the
    /// index like any other.
    pub fn failure(url: &Url, reason: &str) -> Self {
        Self {
            document: format!(
                "# Conversion error\n\nUnable to convert {}: {}\n",
                url, reason
            ),
            links: Vec::new(),
            base_url: None,
            failed: true,
        }
    }

    /// Sets the URL relative links resolve against
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = Some(base_url);
        self
    }
}

/// Turns a URL into a Markdown document plus its raw links
///
/// Implementations never fail: problems are reported through
/// `Extraction::failure`.
#[async_trait]
pub trait ContentExtractor: Send + Sync {
    /// Extracts the page at `url`, found at crawl depth `depth`
    async fn extract(&self, url: &Url, depth: u32) -> Extraction;
}
