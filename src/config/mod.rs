//! Configuration module for Site-Archiver
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. Every key has a default, so running without a file is the same as
//! running with an empty one.
//!
//! # Example
//!
//! ```no_run
//! use site_archiver::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("archiver.toml")).unwrap();
//! println!("Crawler will use max depth: {}", config.crawler.max_depth);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, ConfigOverrides, CrawlerConfig, OutputConfig, UserAgentConfig, DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::{validate, MAX_DEPTH_LIMIT};
