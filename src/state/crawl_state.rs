//! Lifecycle states of a single crawler instance
//!
//! A crawler is single use: it starts `Idle`, enters `Traversing` on the one
//! call to `crawl`, and ends `Finished` once the frontier is exhausted or the
//! crawl is cancelled. There is no transition back to `Idle`.

use std::fmt;

/// Represents where a crawler is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlState {
    /// Constructed, root validated and frontier seeded, not yet crawling
    Idle,

    /// Inside the traversal loop
    Traversing,

    /// Traversal returned; the frontier is consumed
    Finished,
}

impl CrawlState {
    /// Returns true if `next` is a legal successor of this state
    pub fn can_transition_to(&self, next: CrawlState) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::Traversing) | (Self::Traversing, Self::Finished)
        )
    }

    /// Returns true while the root may still be replaced
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Traversing => "traversing",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for CrawlState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_transitions() {
        assert!(CrawlState::Idle.can_transition_to(CrawlState::Traversing));
        assert!(CrawlState::Traversing.can_transition_to(CrawlState::Finished));
    }

    #[test]
    fn test_no_reentry() {
        assert!(!CrawlState::Finished.can_transition_to(CrawlState::Traversing));
        assert!(!CrawlState::Finished.can_transition_to(CrawlState::Idle));
        assert!(!CrawlState::Traversing.can_transition_to(CrawlState::Traversing));
        assert!(!CrawlState::Idle.can_transition_to(CrawlState::Finished));
    }

    #[test]
    fn test_predicates() {
        assert!(CrawlState::Idle.is_idle());
        assert!(!CrawlState::Traversing.is_idle());
        assert!(!CrawlState::Finished.is_idle());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", CrawlState::Idle), "idle");
        assert_eq!(format!("{}", CrawlState::Traversing), "traversing");
        assert_eq!(format!("{}", CrawlState::Finished), "finished");
    }
}
