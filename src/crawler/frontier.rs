//! Crawl frontier: pending queue, visited set and page budget
//!
//! The frontier is the whole traversal state of one crawl. It is owned by the
//! coordinator and mutated through `&mut self` only; entries are served in
//! FIFO order, which makes the traversal breadth-first.

use crate::url::NormalizedKey;
use std::collections::{HashSet, VecDeque};

/// A URL waiting to be crawled, with its distance from the seed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    pub key: NormalizedKey,
    pub depth: u32,
}

/// Observable state of the frontier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontierState {
    /// Nothing pending, budget left
    Empty,
    /// At least one entry pending and budget left
    HasWork,
    /// The page budget is spent
    Exhausted,
}

/// Breadth-first frontier with duplicate suppression
#[derive(Debug)]
pub struct Frontier {
    /// Entries in discovery order
    queue: VecDeque<FrontierEntry>,

    /// Keys currently in `queue`, for constant-time membership checks
    pending: HashSet<NormalizedKey>,

    /// Keys already handed out by `pop`
    visited: HashSet<NormalizedKey>,

    page_count: u32,
    max_pages: u32,
    max_depth: u32,
}

impl Frontier {
    /// Creates a frontier holding the seed at depth 0
    ///
    /// # Arguments
    ///
    /// * `seed` - Normalized seed URL
    /// * `max_depth` - Deepest level that may be queued
    /// * `max_pages` - Maximum number of entries `pop` will ever return
    pub fn new(seed: NormalizedKey, max_depth: u32, max_pages: u32) -> Self {
        let mut frontier = Self {
            queue: VecDeque::new(),
            pending: HashSet::new(),
            visited: HashSet::new(),
            page_count: 0,
            max_pages,
            max_depth,
        };
        frontier.pending.insert(seed.clone());
        frontier.queue.push_back(FrontierEntry {
            key: seed,
            depth: 0,
        });
        frontier
    }

    /// Returns the next entry to crawl
    ///
    /// Returns None when the page budget is spent or nothing is pending.
    /// Entries whose key was visited after they were queued are skipped.
    /// The returned key is marked visited and counted against the budget.
    pub fn pop(&mut self) -> Option<FrontierEntry> {
        loop {
            if self.page_count >= self.max_pages {
                return None;
            }

            let entry = self.queue.pop_front()?;
            self.pending.remove(&entry.key);

            if !self.visited.insert(entry.key.clone()) {
                tracing::trace!("Skipping already visited {}", entry.key);
                continue;
            }

            self.page_count += 1;
            return Some(entry);
        }
    }

    /// Offers a discovered key at the given depth
    ///
    /// The key is appended to the tail unless it is deeper than the depth
    /// limit, already visited, or already pending.
    ///
    /// # Returns
    ///
    /// * `true` - The key was queued
    /// * `false` - The offer was ignored
    pub fn offer(&mut self, key: NormalizedKey, depth: u32) -> bool {
        if depth > self.max_depth {
            return false;
        }
        if self.visited.contains(&key) || self.pending.contains(&key) {
            return false;
        }

        self.pending.insert(key.clone());
        self.queue.push_back(FrontierEntry { key, depth });
        true
    }

    /// Returns the current state of the frontier
    pub fn state(&self) -> FrontierState {
        if self.page_count >= self.max_pages {
            FrontierState::Exhausted
        } else if self.queue.is_empty() {
            FrontierState::Empty
        } else {
            FrontierState::HasWork
        }
    }

    /// Returns true if the key was already handed out by `pop`
    pub fn is_visited(&self, key: &NormalizedKey) -> bool {
        self.visited.contains(key)
    }

    /// Number of entries `pop` has returned so far
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Number of entries waiting in the queue
    pub fn pending_len(&self) -> usize {
        self.queue.len()
    }

    /// Number of visited keys
    pub fn visited_len(&self) -> usize {
        self.visited.len()
    }

    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    pub fn max_pages(&self) -> u32 {
        self.max_pages
    }
}
