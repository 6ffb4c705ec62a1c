use std::fmt;

/// Result of visiting a single frontier entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageOutcome {
    /// Page was fetched, analyzed, and its links offered to the frontier
    Processed,

    /// Page could not be fetched or parsed and was skipped
    Unavailable,
}

impl PageOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for PageOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
