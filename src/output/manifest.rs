//! `INDEX.md` manifest generation
//!
//! The manifest sits at the archive root and lists every archived page in
//! crawl order, linking to its file relative to the root.

use crate::archive::ArchiveEntry;
use crate::ArchiveError;
use chrono::{DateTime, Local};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use url::Url;

/// File name of the manifest at the archive root
pub const MANIFEST_FILE: &str = "INDEX.md";

/// Run-level information shown at the top of the manifest
#[derive(Debug, Clone)]
pub struct ManifestHeader {
    /// The seed URL as given by the user
    pub seed: String,

    /// When the archive was created
    pub created_at: DateTime<Local>,

    /// Number of pages the crawl popped from the frontier
    pub page_count: u32,

    /// Configured depth limit
    pub max_depth: u32,
}

impl ManifestHeader {
    /// Creates a header stamped with the current local time
    pub fn new(seed: impl Into<String>, page_count: u32, max_depth: u32) -> Self {
        Self {
            seed: seed.into(),
            created_at: Local::now(),
            page_count,
            max_depth,
        }
    }
}

/// Writes the manifest to `root/INDEX.md`
///
/// # Arguments
///
/// * `root` - The archive root directory
/// * `header` - Run-level information
/// * `entries` - Archived pages, in crawl order
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written manifest
/// * `Err(ArchiveError::Manifest)` - The file could not be written
pub fn write_manifest(
    root: &Path,
    header: &ManifestHeader,
    entries: &[ArchiveEntry],
) -> Result<PathBuf, ArchiveError> {
    let path = root.join(MANIFEST_FILE);
    let markdown = format_manifest(header, entries);

    let result = File::create(&path).and_then(|mut file| file.write_all(markdown.as_bytes()));
    result.map_err(|source| ArchiveError::Manifest {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Formats the manifest as Markdown
///
/// Each entry renders as `- [<url path>](<relative file>) (depth N)`.
pub fn format_manifest(header: &ManifestHeader, entries: &[ArchiveEntry]) -> String {
    let mut md = String::new();

    md.push_str(&format!("# Site archive: {}\n\n", header.seed));
    md.push_str(&format!(
        "**Created:** {}\n",
        header.created_at.format("%Y-%m-%d %H:%M:%S")
    ));
    md.push_str(&format!("**Pages converted:** {}\n", header.page_count));
    md.push_str(&format!("**Max depth:** {}\n\n", header.max_depth));

    md.push_str("## Pages\n\n");
    for entry in entries {
        md.push_str(&format!(
            "- [{}]({}) (depth {})\n",
            entry_label(&entry.url),
            entry.link_path(),
            entry.depth
        ));
    }

    md
}

/// The URL path with its query, or the raw URL if it does not parse
fn entry_label(url: &str) -> String {
    match Url::parse(url) {
        Ok(parsed) => match parsed.query() {
            Some(query) => format!("{}?{}", parsed.path(), query),
            None => parsed.path().to_string(),
        },
        Err(_) => url.to_string(),
    }
}
