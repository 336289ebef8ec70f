//! On-disk archive layout
//!
//! # Components
//!
//! - `PathResolver`: deterministic URL to file path mapping under the root
//! - `ArchiveWriter`: writes pages, keeps entries, and emits the manifest

mod path;
mod writer;

pub use path::{
    sanitize_segment, url_hash, PathResolver, DOC_EXTENSION, HASH_CHARS, MAX_PATH_CHARS,
    SHORT_DIR,
};
pub use writer::{ArchiveEntry, ArchiveWriter};
