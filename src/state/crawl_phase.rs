/// Phase definitions for the crawl orchestrator
///
/// One iteration of the crawl loop walks `Running -> Fetching -> Filtering ->
/// Persisting -> Running`; `Done` is entered from `Running` once the frontier
/// has nothing more to give. Pages at the depth limit still pass through
/// `Filtering`, with nothing to filter.
use std::fmt;

/// Represents the phase the orchestrator is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Between pages, about to pop the frontier
    Running,

    /// Waiting on the content extractor
    Fetching,

    /// Resolving and filtering the links of the current page
    Filtering,

    /// Writing the current page and its index entry
    Persisting,

    /// The frontier is exhausted
    Done,
}

impl CrawlPhase {
    /// Returns true if the phase is terminal
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns true if the transition `self -> next` is allowed
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (*self, next),
            (Self::Running, Self::Fetching)
                | (Self::Running, Self::Done)
                | (Self::Fetching, Self::Filtering)
                | (Self::Filtering, Self::Persisting)
                | (Self::Persisting, Self::Running)
        )
    }

    /// Short lowercase label
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Fetching => "fetching",
            Self::Filtering => "filtering",
            Self::Persisting => "persisting",
            Self::Done => "done",
        }
    }

    /// Returns all phases
    pub fn all_phases() -> Vec<Self> {
        vec![
            Self::Running,
            Self::Fetching,
            Self::Filtering,
            Self::Persisting,
            Self::Done,
        ]
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
