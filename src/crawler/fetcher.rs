//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with the configured user agent and timeout
//! - GET requests with redirects followed by the client
//! - Error classification
//! - The HTTP-backed `ContentExtractor`

use crate::config::Config;
use crate::crawler::extractor::{ContentExtractor, Extraction};
use crate::crawler::parser::{parse_html, render_document};
use async_trait::async_trait;
use chrono::Local;
use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use url::Url;

/// Maximum number of redirects followed for one request
pub const MAX_REDIRECTS: usize = 10;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: Url,
        /// HTTP status code
        status_code: u16,
        /// Content-Type header value
        content_type: String,
        /// Page body content
        body: String,
    },

    /// Page is not HTML (Content-Type mismatch)
    ContentMismatch {
        /// The actual Content-Type received
        content_type: String,
    },

    /// Non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Human-readable reason for a failed fetch, None on success
    pub fn failure_reason(&self) -> Option<String> {
        match self {
            Self::Success { .. } => None,
            Self::ContentMismatch { content_type } => {
                Some(format!("unsupported content type '{}'", content_type))
            }
            Self::HttpError { status_code } => Some(format!("HTTP status {}", status_code)),
            Self::NetworkError { error } => Some(error.clone()),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `user_agent` - The `User-Agent` header value
/// * `timeout` - Whole-request timeout
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_archiver::crawler::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client("Mozilla/5.0", Duration::from_secs(15)).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// # Outcomes
///
/// | Condition | Result |
/// |-----------|--------|
/// | 2xx with HTML or no Content-Type | Success |
/// | 2xx with another Content-Type | ContentMismatch |
/// | Any other status | HttpError |
/// | Timeout, refused connection, body read failure | NetworkError |
pub async fn fetch_url(client: &Client, url: &Url) -> FetchResult {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else if e.is_redirect() {
                format!("Redirect error: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().clone();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.is_empty() && !content_type.to_lowercase().contains("html") {
        return FetchResult::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            content_type,
            body,
        },
        Err(e) => FetchResult::NetworkError {
            error: e.to_string(),
        },
    }
}

/// `ContentExtractor` that fetches pages over HTTP and converts the HTML
#[derive(Debug, Clone)]
pub struct HttpExtractor {
    client: Client,
}

impl HttpExtractor {
    /// Builds an extractor from the user agent and timeout in `config`
    pub fn new(config: &Config) -> Result<Self, reqwest::Error> {
        let client = build_http_client(
            &config.user_agent.value,
            Duration::from_secs(config.crawler.timeout_secs),
        )?;
        Ok(Self { client })
    }

    /// Wraps an already configured client
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ContentExtractor for HttpExtractor {
    async fn extract(&self, url: &Url, depth: u32) -> Extraction {
        let result = fetch_url(&self.client, url).await;

        match result {
            FetchResult::Success {
                final_url,
                status_code,
                body,
                ..
            } => {
                tracing::debug!("Fetched {} ({}, {} bytes)", url, status_code, body.len());
                let page = parse_html(&body);
                let converted_at = Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                let document = render_document(&page, url, depth, &converted_at);

                let extraction = Extraction::success(document, page.links);
                if final_url != *url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                    extraction.with_base_url(final_url)
                } else {
                    extraction
                }
            }
            other => {
                let reason = other
                    .failure_reason()
                    .unwrap_or_else(|| "unknown error".to_string());
                tracing::warn!("Failed to fetch {}: {}", url, reason);
                Extraction::failure(url, &reason)
            }
        }
    }
}
