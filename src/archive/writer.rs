//! Archive writer: persists converted pages and keeps the index entries

use crate::archive::path::PathResolver;
use crate::output::manifest::{write_manifest, ManifestHeader};
use crate::ArchiveError;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// One successfully archived page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    /// Source URL of the page
    pub url: String,

    /// Crawl depth of the page
    pub depth: u32,

    /// Output file, relative to the archive root
    pub path: PathBuf,

    /// Whether the flat `short/` fallback was used
    pub fallback: bool,
}

impl ArchiveEntry {
    /// Relative path with `/` separators, for use in Markdown links
    pub fn link_path(&self) -> String {
        self.path
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                _ => None,
            })
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Writes pages under one archive root, in crawl order
#[derive(Debug)]
pub struct ArchiveWriter {
    resolver: PathResolver,
    entries: Vec<ArchiveEntry>,
}

impl ArchiveWriter {
    /// Creates the archive root and a writer for it
    ///
    /// # Returns
    ///
    /// * `Ok(ArchiveWriter)` - The root exists and is a directory
    /// * `Err(ArchiveError::RootUnavailable)` - The root could not be created
    pub fn create(root: impl Into<PathBuf>) -> Result<Self, ArchiveError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|source| ArchiveError::RootUnavailable {
            path: root.clone(),
            source,
        })?;

        Ok(Self {
            resolver: PathResolver::new(root),
            entries: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        self.resolver.root()
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Entries written so far, in crawl order
    pub fn entries(&self) -> &[ArchiveEntry] {
        &self.entries
    }

    /// Writes one page and records its index entry
    ///
    /// Parent directories are created as needed. If the primary path cannot
    /// be written the page goes to `root/short/<hash>.md` instead.
    ///
    /// # Returns
    ///
    /// * `Ok(ArchiveEntry)` - The page was written; the entry is recorded
    /// * `Err(ArchiveError::PageWrite)` - Both the primary path and the
    ///   fallback failed; nothing is recorded
    pub fn write_page(
        &mut self,
        url: &Url,
        depth: u32,
        document: &str,
    ) -> Result<ArchiveEntry, ArchiveError> {
        let primary = self.resolver.resolve(url);

        let (path, fallback) = match write_file(&primary, document) {
            Ok(()) => (primary, false),
            Err(e) => {
                let short = self.resolver.short_path(url);
                if short == primary {
                    return Err(ArchiveError::PageWrite {
                        url: url.to_string(),
                        source: e,
                    });
                }
                tracing::warn!(
                    "Cannot write {} ({}), falling back to {}",
                    primary.display(),
                    e,
                    short.display()
                );
                write_file(&short, document).map_err(|source| ArchiveError::PageWrite {
                    url: url.to_string(),
                    source,
                })?;
                (short, true)
            }
        };

        let relative = path
            .strip_prefix(self.resolver.root())
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.clone());

        let entry = ArchiveEntry {
            url: url.to_string(),
            depth,
            path: relative,
            fallback,
        };
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Writes the `INDEX.md` manifest for the entries recorded so far
    pub fn finish(&self, header: &ManifestHeader) -> Result<PathBuf, ArchiveError> {
        write_manifest(self.resolver.root(), header, &self.entries)
    }
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)
}
