//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the orchestrator's per-iteration phase machine

mod crawl_phase;

pub use crawl_phase::CrawlPhase;
