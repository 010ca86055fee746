//! Query state machine.
//!
//! ```text
//!              Input
//!             ┌─────┐
//!             ▼     │
//!        ┌──────────┴┐  SelectSuggestion / SearchCommit  ┌──────────┐
//!   ────►│ Browsing  ├──────────────────────────────────►│ Filtered │
//!        └───────────┘◄──────────────────────────────────┴────┬─────┘
//!             ▲              Reset (fetch completed)          │
//!             └───────────────────────────────────────────────┘
//!                                  Input
//! ```

/// Which commit produced the current filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Commit {
    /// Explicit search: every name starting with the query.
    Prefix,
    /// Suggestion picked: names equal to the query.
    Exact,
}

/// Top-level phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Typing; suggestions are live and results show the full dataset.
    #[default]
    Browsing,
    /// A commit narrowed the results.
    Filtered(Commit),
}

/// The user's query and whether it has been committed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Raw input, case preserved.
    pub query: String,

    /// Current phase.
    pub phase: Phase,
}

impl QueryState {
    /// Browsing state with the given query.
    pub fn browsing(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            phase: Phase::Browsing,
        }
    }

    /// Filtered state with the given query and commit kind.
    pub fn filtered(query: impl Into<String>, commit: Commit) -> Self {
        Self {
            query: query.into(),
            phase: Phase::Filtered(commit),
        }
    }

    /// True after a search or selection, false after reset or input.
    pub fn committed(&self) -> bool {
        matches!(self.phase, Phase::Filtered(_))
    }

    /// Whether the reset control should be offered.
    pub fn show_reset(&self) -> bool {
        self.committed()
    }
}
