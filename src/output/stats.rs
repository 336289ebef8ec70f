//! Crawl report collected while the coordinator runs
//!
//! This module provides the counters a crawl accumulates and prints them
//! once the crawl is over.

use crate::filter::RejectReason;
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Counters and outcome of one crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Seed URL the crawl started from
    pub seed: String,

    /// Archive root directory
    pub archive_root: PathBuf,

    /// Pages popped from the frontier
    pub pages_crawled: u32,

    /// Pages written to disk
    pub pages_written: u32,

    /// Pages both extracted and written without error
    pub pages_clean: u32,

    /// Pages whose extraction failed (an error document was written instead)
    pub extraction_failures: u32,

    /// Pages that could not be written at all
    pub write_failures: u32,

    /// Raw links found on pages below the depth limit
    pub links_seen: u64,

    /// Raw links that did not resolve to an absolute URL
    pub links_unresolved: u64,

    /// Links that passed the filter
    pub links_admitted: u64,

    /// Admitted links the frontier actually queued
    pub links_queued: u64,

    /// Filter rejections by reason
    pub rejections: BTreeMap<RejectReason, u64>,

    /// Deepest level a crawled page was at
    pub deepest_level: u32,

    /// Wall-clock duration of the crawl
    pub duration: Duration,

    /// Where the manifest was written, if it was
    pub manifest_path: Option<PathBuf>,

    /// Why the manifest could not be written, if it was not
    pub manifest_error: Option<String>,
}

impl CrawlReport {
    /// Creates an empty report for a crawl
    pub fn new(seed: impl Into<String>, archive_root: impl Into<PathBuf>) -> Self {
        Self {
            seed: seed.into(),
            archive_root: archive_root.into(),
            ..Self::default()
        }
    }

    /// Counts one filter rejection
    pub fn record_rejection(&mut self, reason: RejectReason) {
        *self.rejections.entry(reason).or_insert(0) += 1;
    }

    /// Total number of filter rejections
    pub fn total_rejections(&self) -> u64 {
        self.rejections.values().sum()
    }

    /// Percentage of crawled pages that were extracted and written cleanly
    pub fn success_rate(&self) -> f64 {
        if self.pages_crawled == 0 {
            return 0.0;
        }
        (self.pages_clean as f64 / self.pages_crawled as f64) * 100.0
    }

    /// Returns true if the manifest was written
    pub fn is_complete(&self) -> bool {
        self.manifest_path.is_some()
    }
}

/// Prints the report to stdout in a formatted manner
///
/// # Arguments
///
/// * `report` - The report to display
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Report ===\n");

    println!("Overview:");
    println!("  Seed: {}", report.seed);
    println!("  Archive: {}", report.archive_root.display());
    println!("  Duration: {:.1}s", report.duration.as_secs_f64());
    println!();

    println!("Pages:");
    println!("  Crawled: {}", report.pages_crawled);
    println!("  Written: {}", report.pages_written);
    println!("  Extraction failures: {}", report.extraction_failures);
    println!("  Write failures: {}", report.write_failures);
    println!("  Deepest level: {}", report.deepest_level);
    println!();

    println!("Links:");
    println!("  Seen: {}", report.links_seen);
    println!("  Unresolved: {}", report.links_unresolved);
    println!("  Admitted: {}", report.links_admitted);
    println!("  Queued: {}", report.links_queued);
    println!();

    if !report.rejections.is_empty() {
        println!("Rejections ({}):", report.total_rejections());
        let mut counts: Vec<_> = report.rejections.iter().collect();
        counts.sort_by(|a, b| b.1.cmp(a.1));

        for (reason, count) in counts {
            println!("  {}: {}", reason, count);
        }
        println!();
    }

    match (&report.manifest_path, &report.manifest_error) {
        (Some(path), _) => println!("Manifest: {}", path.display()),
        (None, Some(error)) => println!("Manifest NOT written: {}", error),
        (None, None) => println!("Manifest: not written"),
    }

    println!(
        "Success Rate: {:.1}% ({} / {} pages converted)",
        report.success_rate(),
        report.pages_clean,
        report.pages_crawled
    );
}
