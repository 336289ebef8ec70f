//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the main crawl loop that coordinates all aspects of
//! the crawling process, including:
//! - Seeding the frontier and creating the archive root
//! - Driving the extractor one page at a time
//! - Resolving, filtering and queueing discovered links
//! - Writing pages and, at the end, the manifest
//!
//! Control flow is strictly sequential: a page is fetched, its links are
//! queued and its document is written before the next page is popped.

use crate::archive::ArchiveWriter;
use crate::config::Config;
use crate::crawler::extractor::{ContentExtractor, Extraction, RawLink};
use crate::crawler::frontier::{Frontier, FrontierEntry, FrontierState};
use crate::filter::{Decision, LinkCandidate, LinkFilter, LinkPolicy};
use crate::output::{CrawlReport, ManifestHeader};
use crate::state::CrawlPhase;
use crate::url::{extract_domain, normalize_url, parse_seed, resolve_href};
use crate::{ArchiveError, UrlError};
use std::time::{Duration, Instant};
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator<E: ContentExtractor> {
    extractor: E,
    frontier: Frontier,
    filter: LinkFilter,
    writer: ArchiveWriter,
    phase: CrawlPhase,
    report: CrawlReport,
    seed: String,
    delay: Duration,
    started: Instant,
}

impl<E: ContentExtractor> Coordinator<E> {
    /// Creates a new coordinator instance
    ///
    /// # Arguments
    ///
    /// * `config` - The crawler configuration
    /// * `seed` - The seed URL; its host (and port) becomes the crawl domain
    /// * `extractor` - Source of page documents and links
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run, archive root created
    /// * `Err(ArchiveError)` - Invalid seed, or the archive root could not
    ///   be created
    pub fn new(config: &Config, seed: &str, extractor: E) -> Result<Self, ArchiveError> {
        let seed_url = parse_seed(seed)?;
        let domain = extract_domain(&seed_url).ok_or(UrlError::MissingDomain)?;

        let filter = LinkFilter::new(domain, LinkPolicy::builtin()?);
        let frontier = Frontier::new(
            normalize_url(&seed_url),
            config.crawler.max_depth,
            config.crawler.max_pages,
        );
        let writer = ArchiveWriter::create(&config.output.root)?;

        Ok(Self {
            extractor,
            frontier,
            filter,
            writer,
            phase: CrawlPhase::Running,
            report: CrawlReport::new(seed, &config.output.root),
            seed: seed.to_string(),
            delay: Duration::from_millis(config.crawler.delay_ms),
            started: Instant::now(),
        })
    }

    /// Replaces the link policy, keeping the crawl domain
    pub fn with_policy(mut self, policy: LinkPolicy) -> Self {
        self.filter = LinkFilter::new(self.filter.domain().to_string(), policy);
        self
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    pub fn writer(&self) -> &ArchiveWriter {
        &self.writer
    }

    pub fn report(&self) -> &CrawlReport {
        &self.report
    }

    /// Runs the crawl to completion and writes the manifest
    ///
    /// Page-level failures never abort the crawl; a manifest failure is
    /// recorded in the returned report.
    pub async fn run(mut self) -> Result<CrawlReport, ArchiveError> {
        tracing::info!(
            "Starting crawl of {} (domain {}, max depth {}, max pages {})",
            self.seed,
            self.filter.domain(),
            self.frontier.max_depth(),
            self.frontier.max_pages()
        );

        while self.step().await? {
            if !self.delay.is_zero() && self.frontier.state() == FrontierState::HasWork {
                tokio::time::sleep(self.delay).await;
            }
        }

        Ok(self.finish())
    }

    /// Processes one frontier entry
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - A page was processed
    /// * `Ok(false)` - The frontier is exhausted and the crawl is done
    pub async fn step(&mut self) -> Result<bool, ArchiveError> {
        if self.phase.is_terminal() {
            return Ok(false);
        }

        let entry = match self.frontier.pop() {
            Some(entry) => entry,
            None => {
                if self.frontier.state() == FrontierState::Exhausted {
                    tracing::info!(
                        "Page limit of {} reached, {} queued URLs dropped",
                        self.frontier.max_pages(),
                        self.frontier.pending_len()
                    );
                } else {
                    tracing::info!("Frontier is empty, crawl complete");
                }
                self.transition(CrawlPhase::Done)?;
                return Ok(false);
            }
        };

        self.process_entry(entry).await?;
        Ok(true)
    }

    async fn process_entry(&mut self, entry: FrontierEntry) -> Result<(), ArchiveError> {
        let url = entry.key.to_url()?;

        self.report.pages_crawled += 1;
        self.report.deepest_level = self.report.deepest_level.max(entry.depth);
        tracing::info!(
            "[{}/{}] depth {}: {}",
            self.frontier.page_count(),
            self.frontier.max_pages(),
            entry.depth,
            url
        );

        self.transition(CrawlPhase::Fetching)?;
        let mut extraction = self.extractor.extract(&url, entry.depth).await;
        if extraction.failed {
            self.report.extraction_failures += 1;
            if extraction.document.trim().is_empty() {
                extraction = Extraction::failure(&url, "extractor returned no document");
            }
        }

        self.transition(CrawlPhase::Filtering)?;
        if entry.depth < self.frontier.max_depth() {
            let base = self.link_base(&url, extraction.base_url.as_ref());
            self.admit_links(&base, &extraction.links, entry.depth);
        }

        self.transition(CrawlPhase::Persisting)?;
        match self
            .writer
            .write_page(&url, entry.depth, &extraction.document)
        {
            Ok(written) => {
                self.report.pages_written += 1;
                if !extraction.failed {
                    self.report.pages_clean += 1;
                }
                tracing::debug!("Wrote {} to {}", url, written.path.display());
            }
            Err(e) => {
                self.report.write_failures += 1;
                tracing::error!("Skipping {}: {}", url, e);
            }
        }

        self.transition(CrawlPhase::Running)
    }

    /// Base URL for the links of a page
    ///
    /// A redirect target is used only while it stays on the crawl domain;
    /// otherwise links resolve against the requested URL.
    fn link_base(&self, requested: &Url, redirected: Option<&Url>) -> Url {
        match redirected {
            Some(target) if extract_domain(target).as_deref() == Some(self.filter.domain()) => {
                target.clone()
            }
            Some(target) => {
                tracing::debug!(
                    "{} left the crawl domain, resolving links against {}",
                    target,
                    requested
                );
                requested.clone()
            }
            None => requested.clone(),
        }
    }

    /// Resolves, filters and offers the links of one page
    fn admit_links(&mut self, base: &Url, links: &[RawLink], depth: u32) {
        let mut queued = 0u32;

        for link in links {
            self.report.links_seen += 1;

            let url = match resolve_href(&link.href, base) {
                Some(url) => url,
                None => {
                    self.report.links_unresolved += 1;
                    tracing::debug!("Dropping unresolvable href {:?}", link.href);
                    continue;
                }
            };

            let candidate = LinkCandidate::with_meta(url, link.meta.clone());
            match self.filter.evaluate(&candidate) {
                Decision::Admit => {
                    self.report.links_admitted += 1;
                    if self.frontier.offer(normalize_url(&candidate.url), depth + 1) {
                        self.report.links_queued += 1;
                        queued += 1;
                    }
                }
                Decision::Reject(reason) => {
                    tracing::debug!("Rejected {} ({})", candidate.url, reason);
                    self.report.record_rejection(reason);
                }
            }
        }

        if !links.is_empty() {
            tracing::debug!(
                "{} of {} links queued from {}",
                queued,
                links.len(),
                base
            );
        }
    }

    fn transition(&mut self, next: CrawlPhase) -> Result<(), ArchiveError> {
        if !self.phase.can_transition_to(next) {
            return Err(ArchiveError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }
        tracing::trace!("Phase {} -> {}", self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Writes the manifest and closes the report
    fn finish(mut self) -> CrawlReport {
        let header = ManifestHeader::new(
            self.seed.clone(),
            self.frontier.page_count(),
            self.frontier.max_depth(),
        );

        match self.writer.finish(&header) {
            Ok(path) => {
                tracing::info!("Manifest written to {}", path.display());
                self.report.manifest_path = Some(path);
            }
            Err(e) => {
                tracing::error!("{}", e);
                self.report.manifest_error = Some(e.to_string());
            }
        }

        self.report.duration = self.started.elapsed();
        tracing::info!(
            "Crawl completed: {} pages crawled, {} written in {:?}",
            self.report.pages_crawled,
            self.report.pages_written,
            self.report.duration
        );

        self.report
    }
}

/// Runs a complete crawl from `seed` with the given extractor
///
/// # Arguments
///
/// * `config` - The crawler configuration
/// * `seed` - The seed URL
/// * `extractor` - Source of page documents and links
///
/// # Returns
///
/// * `Ok(CrawlReport)` - The crawl ran to completion
/// * `Err(ArchiveError)` - The crawl could not start
pub async fn run_crawl<E: ContentExtractor>(
    config: &Config,
    seed: &str,
    extractor: E,
) -> Result<CrawlReport, ArchiveError> {
    Coordinator::new(config, seed, extractor)?.run().await
}
