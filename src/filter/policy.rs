//! Static policy tables for link admission
//!
//! The tables are plain ordered lists so they can be inspected and tested on
//! their own; [`LinkPolicy`] compiles them into the form the filter consumes.

use regex::Regex;

/// Social networks, link shorteners and payment hosts never worth archiving
pub const SOCIAL_DOMAINS: &[&str] = &[
    "facebook.com",
    "twitter.com",
    "x.com",
    "linkedin.com",
    "instagram.com",
    "youtube.com",
    "github.com",
    "pinterest.com",
    "reddit.com",
    "tumblr.com",
    "snapchat.com",
    "whatsapp.com",
    "tiktok.com",
    "paypal.com",
    "t.co",
    "bit.ly",
    "tinyurl.com",
];

/// Substrings of `path?query#fragment` that mark boilerplate or chrome URLs
pub const URL_KEYWORDS: &[&str] = &[
    // comments and discussion
    "comment",
    "reply",
    "replies",
    "respond",
    "discussion",
    "feedback",
    "repondre",
    "reponse",
    // sharing and social widgets
    "share",
    "subscribe",
    "follow",
    "social",
    "partager",
    "newsletter",
    // navigation chrome and dynamic widgets
    "navbar",
    "sidebar",
    "breadcrumb",
    "widget",
    "popup",
    "modal",
    "lightbox",
    "carousel",
    "slideshow",
    // advertising and tracking
    "advert",
    "banner",
    "tracking",
    "analytics",
    "beacon",
    // authentication and accounts
    "login",
    "logout",
    "signin",
    "signup",
    "register",
    "account",
    "profile",
    "dashboard",
    "settings",
    "preferences",
    "parametres",
    "connexion",
    "inscription",
    // e-commerce
    "cart",
    "basket",
    "checkout",
    "payment",
    "purchase",
    "/shop",
    "boutique",
    "panier",
    "commande",
    "acheter",
    "paiement",
    // legal
    "cookie",
    "privacy",
    "terms",
    "gdpr",
    "rgpd",
    "disclaimer",
    "legal",
    "copyright",
    "cgv",
    "cgu",
    // contact and help desks
    "contact",
    "faq",
    // search, listings and pagination
    "search",
    "recherche",
    "sitemap",
    "pagination",
    "/page/",
    "/tag/",
    "/category/",
    "sort=",
    "filter=",
    // feeds
    "feed",
    "rss",
    // CMS internals
    "wp-admin",
    "wp-login",
    "wp-json",
    "wp-includes",
    "wp-content",
    "xmlrpc",
    "trackback",
    "pingback",
    "/admin",
    // actions and machine endpoints
    "action=",
    "do=",
    "cmd=",
    "ajax",
    "callback",
    "jsonp",
    "print",
    "download",
    "donate",
];

/// Patterns matched against the lower-cased absolute URL
pub const URL_PATTERNS: &[&str] = &[
    r"#content",
    r"#comment",
    r"#respond",
    r"#reply-\d+",
    r"/comment-\d+",
    r"/reply-\d+",
    r"[?&]replytocom=",
    r"[?&]comment_id=",
    r"[?&]reply_id=",
    r"/feed/?$",
    r"/rss/?$",
    r"/atom/?$",
    r"\.rss$",
    r"\.xml$",
    r"\.(jpg|jpeg|png|gif|webp|svg|exe|mp3|mp4|avi|mov)$",
];

/// Phrases in the visible link text
pub const LINK_TEXTS: &[&str] = &[
    "leave a comment",
    "post a comment",
    "laisser un commentaire",
    "commentaire",
    "comment",
    "reply",
    "répondre",
    "réponse",
    "share",
    "partager",
    "follow",
    "subscribe",
    "s'abonner",
    "newsletter",
    "rss",
    "feed",
];

/// Tokens searched in the space-joined CSS classes of the link
pub const LINK_CLASSES: &[&str] = &[
    "comment",
    "reply",
    "share",
    "social",
    "follow",
    "subscribe",
    "newsletter",
    "feed",
    "widget",
    "sidebar",
    "footer",
    "header",
    "nav",
];

/// Tokens searched in the element id of the link
pub const LINK_IDS: &[&str] = &["comment", "reply", "share", "social"];

/// Compiled link admission policy
///
/// Built from the static tables by [`LinkPolicy::builtin`], or from custom
/// tables with [`LinkPolicy::new`]. Every table entry is lower-case and
/// matched against lower-cased input.
#[derive(Debug, Clone)]
pub struct LinkPolicy {
    social_domains: Vec<String>,
    url_keywords: Vec<String>,
    url_patterns: Vec<Regex>,
    link_texts: Vec<String>,
    link_classes: Vec<String>,
    link_ids: Vec<String>,
}

/// Raw policy tables, borrowed
#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyTables<'a> {
    pub social_domains: &'a [&'a str],
    pub url_keywords: &'a [&'a str],
    pub url_patterns: &'a [&'a str],
    pub link_texts: &'a [&'a str],
    pub link_classes: &'a [&'a str],
    pub link_ids: &'a [&'a str],
}

/// The tables shipped with the crate
pub const BUILTIN_TABLES: PolicyTables<'static> = PolicyTables {
    social_domains: SOCIAL_DOMAINS,
    url_keywords: URL_KEYWORDS,
    url_patterns: URL_PATTERNS,
    link_texts: LINK_TEXTS,
    link_classes: LINK_CLASSES,
    link_ids: LINK_IDS,
};

fn lowered(entries: &[&str]) -> Vec<String> {
    entries.iter().map(|e| e.to_lowercase()).collect()
}

impl LinkPolicy {
    /// Compiles a policy from raw tables
    ///
    /// # Returns
    ///
    /// * `Ok(LinkPolicy)` - All patterns compiled
    /// * `Err(regex::Error)` - One of the URL patterns is not a valid regex
    pub fn new(tables: PolicyTables<'_>) -> Result<Self, regex::Error> {
        let url_patterns = tables
            .url_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            social_domains: lowered(tables.social_domains),
            url_keywords: lowered(tables.url_keywords),
            url_patterns,
            link_texts: lowered(tables.link_texts),
            link_classes: lowered(tables.link_classes),
            link_ids: lowered(tables.link_ids),
        })
    }

    /// Compiles the built-in tables
    pub fn builtin() -> Result<Self, regex::Error> {
        Self::new(BUILTIN_TABLES)
    }

    /// A policy that rejects nothing beyond scheme and domain scoping
    pub fn permissive() -> Self {
        Self {
            social_domains: Vec::new(),
            url_keywords: Vec::new(),
            url_patterns: Vec::new(),
            link_texts: Vec::new(),
            link_classes: Vec::new(),
            link_ids: Vec::new(),
        }
    }

    /// Returns the social domain the host belongs to, if any
    pub fn social_domain(&self, host: &str) -> Option<&str> {
        self.social_domains
            .iter()
            .find(|d| crate::url::matches_domain(d, host))
            .map(String::as_str)
    }

    /// Returns the first keyword contained in the lower-cased locator
    pub fn url_keyword(&self, locator: &str) -> Option<&str> {
        self.url_keywords
            .iter()
            .find(|k| locator.contains(k.as_str()))
            .map(String::as_str)
    }

    /// Returns the first pattern matching the lower-cased URL
    pub fn url_pattern(&self, url: &str) -> Option<&str> {
        self.url_patterns
            .iter()
            .find(|re| re.is_match(url))
            .map(Regex::as_str)
    }

    /// Returns the first phrase contained in the lower-cased link text
    pub fn link_text(&self, text: &str) -> Option<&str> {
        self.link_texts
            .iter()
            .find(|t| text.contains(t.as_str()))
            .map(String::as_str)
    }

    /// Returns the first token contained in the lower-cased class list
    pub fn link_class(&self, classes: &str) -> Option<&str> {
        self.link_classes
            .iter()
            .find(|c| classes.contains(c.as_str()))
            .map(String::as_str)
    }

    /// Returns the first token contained in the lower-cased element id
    pub fn link_id(&self, id: &str) -> Option<&str> {
        self.link_ids
            .iter()
            .find(|i| id.contains(i.as_str()))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_patterns_compile() {
        assert!(LinkPolicy::builtin().is_ok());
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let tables = PolicyTables {
            url_patterns: &["(unclosed"],
            ..PolicyTables::default()
        };
        assert!(LinkPolicy::new(tables).is_err());
    }

    #[test]
    fn test_tables_are_lowercase() {
        for table in [
            SOCIAL_DOMAINS,
            URL_KEYWORDS,
            URL_PATTERNS,
            LINK_TEXTS,
            LINK_CLASSES,
            LINK_IDS,
        ] {
            for entry in table {
                assert_eq!(*entry, entry.to_lowercase().as_str());
            }
        }
    }

    #[test]
    fn test_keywords_leave_plain_content_paths_alone() {
        let policy = LinkPolicy::builtin().unwrap();
        for locator in [
            "/about?#",
            "/docs/getting-started?#",
            "/blog/2024/05/hello-world?#",
            "/team?#",
            "/article?id=4#",
        ] {
            assert_eq!(policy.url_keyword(locator), None, "{}", locator);
        }
    }

    #[test]
    fn test_legal_account_and_shop_paths_are_keywords() {
        let policy = LinkPolicy::builtin().unwrap();
        for locator in [
            "/mentions-legales?#",
            "/legal/notice?#",
            "/copyright?#",
            "/cgv?#",
            "/cgu?#",
            "/account/settings?#",
            "/user/preferences?#",
            "/shop/item-3?#",
            "/boutique?#",
            "/commande/42?#",
            "/acheter?#",
            "/contact-us?#",
            "/faq?#",
        ] {
            assert!(policy.url_keyword(locator).is_some(), "{}", locator);
        }
        assert_eq!(policy.url_keyword("/events/workshop-2024?#"), None);
    }

    #[test]
    fn test_keyword_lookup() {
        let policy = LinkPolicy::builtin().unwrap();
        assert_eq!(policy.url_keyword("/wp-admin/edit.php?#"), Some("wp-admin"));
        assert_eq!(policy.url_keyword("/blog/page/2?#"), Some("/page/"));
        assert_eq!(policy.url_keyword("/checkout?#"), Some("checkout"));
    }

    #[test]
    fn test_pattern_lookup() {
        let policy = LinkPolicy::builtin().unwrap();
        assert!(policy.url_pattern("https://ex.com/post#reply-42").is_some());
        assert!(policy.url_pattern("https://ex.com/photo.jpeg").is_some());
        assert!(policy.url_pattern("https://ex.com/blog/atom/").is_some());
        assert!(policy.url_pattern("https://ex.com/post?replytocom=3").is_some());
        assert!(policy.url_pattern("https://ex.com/guide").is_none());
    }

    #[test]
    fn test_social_domain_lookup() {
        let policy = LinkPolicy::builtin().unwrap();
        assert_eq!(policy.social_domain("www.facebook.com"), Some("facebook.com"));
        assert_eq!(policy.social_domain("t.co"), Some("t.co"));
        assert_eq!(policy.social_domain("test.com"), None);
    }

    #[test]
    fn test_permissive_policy_matches_nothing() {
        let policy = LinkPolicy::permissive();
        assert_eq!(policy.social_domain("facebook.com"), None);
        assert_eq!(policy.url_keyword("/wp-admin/"), None);
        assert_eq!(policy.url_pattern("https://ex.com/a.png"), None);
        assert_eq!(policy.link_text("leave a comment"), None);
    }
}
