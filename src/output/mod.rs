//! Output module for crawl results
//!
//! This module handles:
//! - Generating the `INDEX.md` manifest of an archive
//! - Collecting and printing the crawl report

pub mod manifest;
pub mod stats;

pub use manifest::{format_manifest, write_manifest, ManifestHeader, MANIFEST_FILE};
pub use stats::{print_report, CrawlReport};
