use serde::Deserialize;

/// Browser-like user agent sent with every request unless configured
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Main configuration structure for Site-Archiver
///
/// Every section and key is optional; missing values take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum depth to crawl from the seed URL
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Maximum number of pages to crawl
    #[serde(rename = "max-pages")]
    pub max_pages: u32,

    /// Pause between two fetches (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 2,
            max_pages: 50,
            delay_ms: 1000,
            timeout_secs: 15,
        }
    }
}

/// User agent configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// The full `User-Agent` header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Archive root directory
    pub root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: "site_archive".to_string(),
        }
    }
}

/// Values given on the command line, applied over the file configuration
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub max_depth: Option<u32>,
    pub max_pages: Option<u32>,
    pub delay_ms: Option<u64>,
    pub root: Option<String>,
}

impl Config {
    /// Applies command-line overrides in place
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(max_depth) = overrides.max_depth {
            self.crawler.max_depth = max_depth;
        }
        if let Some(max_pages) = overrides.max_pages {
            self.crawler.max_pages = max_pages;
        }
        if let Some(delay_ms) = overrides.delay_ms {
            self.crawler.delay_ms = delay_ms;
        }
        if let Some(root) = &overrides.root {
            self.output.root = root.clone();
        }
    }
}
