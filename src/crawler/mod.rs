//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - The breadth-first frontier with its page budget
//! - The `ContentExtractor` seam and its HTTP implementation
//! - HTML to Markdown conversion and link extraction
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod parser;

pub use coordinator::{run_crawl, Coordinator};
pub use extractor::{ContentExtractor, Extraction, RawLink};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpExtractor, MAX_REDIRECTS};
pub use frontier::{Frontier, FrontierEntry, FrontierState};
pub use parser::{parse_html, render_document, ParsedPage};
