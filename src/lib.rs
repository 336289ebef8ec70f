//! Site-Archiver: a single-domain web archiver
//!
//! This crate crawls one website breadth-first from a seed URL, converts each
//! visited page to Markdown, and writes a navigable archive to disk together
//! with an `INDEX.md` manifest.

pub mod archive;
pub mod config;
pub mod crawler;
pub mod filter;
pub mod output;
pub mod state;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Site-Archiver operations
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("Invalid filter pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Failed to create archive root {path}: {source}")]
    RootUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write page {url}: {source}")]
    PageWrite {
        url: String,
        source: std::io::Error,
    },

    #[error("Failed to write manifest {path}: {source}")]
    Manifest {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, ContentExtractor, Coordinator, HttpExtractor};
pub use filter::{LinkFilter, LinkPolicy};
pub use output::CrawlReport;
pub use state::CrawlPhase;
pub use url::{extract_domain, normalize_url, NormalizedKey};
