//! Mapping of page URLs to archive file paths
//!
//! Every URL maps to exactly one primary path through a deterministic chain:
//! the sanitized `root/host/dirs/file.md`, then a shorter file name, then a
//! hashed file name, then the flat `root/short/<hash>.md`.

use crate::url::extract_domain;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use url::Url;

/// Longest path, in characters, the resolver will hand out
pub const MAX_PATH_CHARS: usize = 240;

/// Per-segment truncation lengths
pub const HOST_SEGMENT_CHARS: usize = 100;
pub const DIR_SEGMENT_CHARS: usize = 50;
pub const FILE_SEGMENT_CHARS: usize = 100;
pub const SHORT_FILE_CHARS: usize = 50;

/// Hex characters of the URL digest used in hashed file names
pub const HASH_CHARS: usize = 12;

/// Extension of archived documents
pub const DOC_EXTENSION: &str = "md";

/// Directory under the root holding flat hashed fallbacks
pub const SHORT_DIR: &str = "short";

const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Makes one path segment safe for the filesystem
///
/// Forbidden characters (`<>:"/\|?*`) and control characters become `_`,
/// the special segments `.` and `..` become `_`, and the result is cut to
/// `max_chars` characters.
pub fn sanitize_segment(segment: &str, max_chars: usize) -> String {
    if segment == "." || segment == ".." {
        return "_".to_string();
    }

    segment
        .chars()
        .map(|c| {
            if FORBIDDEN_CHARS.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .take(max_chars)
        .collect()
}

/// First 12 hex characters of the SHA-256 digest of a URL
pub fn url_hash(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    let mut hash = hex::encode(digest);
    hash.truncate(HASH_CHARS);
    hash
}

fn char_len(path: &Path) -> usize {
    path.to_string_lossy().chars().count()
}

/// Resolves archive paths under one root directory
#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves the primary archive path of a URL
    ///
    /// # Resolution Steps
    ///
    /// 1. Host segment (100 chars), directory segments (50 chars) and file
    ///    name (100 chars) are sanitized; an empty path or a trailing slash
    ///    gives `index`, and a query string is appended to the file name as
    ///    `_query`
    /// 2. Compose `root/host/dirs/file.md`
    /// 3. Over 240 characters: cut the file name to 50 characters
    /// 4. Still over: use the URL hash as file name, keeping directories
    /// 5. Still over: fall back to `root/short/<hash>.md`
    ///
    /// # Examples
    ///
    /// ```
    /// use site_archiver::archive::PathResolver;
    /// use std::path::Path;
    /// use url::Url;
    ///
    /// let resolver = PathResolver::new("site_archive");
    /// let url = Url::parse("https://example.com/docs/intro").unwrap();
    /// assert_eq!(
    ///     resolver.resolve(&url),
    ///     Path::new("site_archive/example.com/docs/intro.md")
    /// );
    /// ```
    pub fn resolve(&self, url: &Url) -> PathBuf {
        let host = extract_domain(url).unwrap_or_else(|| "unknown-host".to_string());
        let host = sanitize_segment(&host, HOST_SEGMENT_CHARS);

        let mut segments: Vec<&str> = url.path().split('/').filter(|s| !s.is_empty()).collect();
        // `/docs/` is a directory page, kept apart from `/docs`
        let last = if url.path().ends_with('/') {
            None
        } else {
            segments.pop()
        };

        let dirs: Vec<String> = segments
            .iter()
            .map(|s| sanitize_segment(s, DIR_SEGMENT_CHARS))
            .collect();

        let mut file_name = last.unwrap_or("index").to_string();
        if let Some(query) = url.query().filter(|q| !q.is_empty()) {
            file_name.push('_');
            file_name.push_str(query);
        }
        let file_name = sanitize_segment(&file_name, FILE_SEGMENT_CHARS);

        let mut page_dir = self.root.join(&host);
        for dir in &dirs {
            page_dir.push(dir);
        }

        let full_path = page_dir.join(format!("{}.{}", file_name, DOC_EXTENSION));
        if char_len(&full_path) <= MAX_PATH_CHARS {
            return full_path;
        }

        let shorter: String = file_name.chars().take(SHORT_FILE_CHARS).collect();
        let full_path = page_dir.join(format!("{}.{}", shorter, DOC_EXTENSION));
        if char_len(&full_path) <= MAX_PATH_CHARS {
            tracing::debug!("Shortened file name for {}", url);
            return full_path;
        }

        let full_path = page_dir.join(format!("{}.{}", url_hash(url.as_str()), DOC_EXTENSION));
        if char_len(&full_path) <= MAX_PATH_CHARS {
            tracing::debug!("Hashed file name for {}", url);
            return full_path;
        }

        tracing::debug!("Flat hashed path for {}", url);
        self.short_path(url)
    }

    /// Flat fallback path `root/short/<hash>.md`
    pub fn short_path(&self, url: &Url) -> PathBuf {
        self.root
            .join(SHORT_DIR)
            .join(format!("{}.{}", url_hash(url.as_str()), DOC_EXTENSION))
    }
}
