//! Query Engine
//!
//! The QueryEngine owns the dataset and the query state and keeps the
//! derived view in sync:
//! - Commands run through the pure reducer
//! - Reset and startup issue fetch tickets
//! - Fetch completions replace the dataset (single writer)
//!
//! ## Reset Flow
//!
//! ```text
//! Command::Reset
//!        │
//!        ▼
//! reducer emits Effect::Refetch
//!        │
//!        ▼
//! ticket issued ──► FetchTicket(n), loading = true
//!        │
//!        ▼
//! caller runs Fetcher::fetch_all()
//!        │
//!        ▼
//! complete_fetch(ticket, result)
//!        │
//!   ┌────┴──────────────┐
//!   │ ticket == latest? │
//!   └────┬──────────┬───┘
//!       yes         no ──► discarded (a later fetch was issued)
//!        │
//!   ┌────┴────┐
//!   ▼         ▼
//!  Ok        Err
//! replace    keep dataset,
//! dataset,   set notice
//! clear query
//! ```

use atlas_core::{Dataset, FetchError, Record};
use tokio::sync::watch;

use crate::command::{Command, Effect};
use crate::reducer::{transition, DerivedView};
use crate::state::QueryState;

mod observable_directory;

use observable_directory::{Directory, ObservableDirectory};

// =============================================================================
// Snapshot
// =============================================================================

/// Read model broadcast to the rendering layer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Current query text.
    pub query: String,

    /// Suggestions and results.
    pub view: DerivedView,

    /// Whether the reset control is shown.
    pub show_reset: bool,

    /// Whether a fetch is in flight.
    pub loading: bool,

    /// Message from the last failed fetch.
    pub notice: Option<String>,

    /// Size of the full dataset.
    pub dataset_len: usize,
}

/// Identifies one issued fetch. Later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(pub u64);

// =============================================================================
// Query Engine
// =============================================================================

/// The QueryEngine holds the authoritative dataset and query.
///
/// ## Reactive State
///
/// Every change is broadcast - subscribe via `subscribe()`.
pub struct QueryEngine {
    directory: ObservableDirectory,
}

impl QueryEngine {
    /// Create an engine with an empty dataset.
    pub fn new() -> Self {
        Self {
            directory: ObservableDirectory::new(),
        }
    }

    /// Subscribe to snapshot changes.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.directory.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.directory.snapshot()
    }

    /// Current query state.
    pub fn query_state(&self) -> QueryState {
        self.directory.with(|d| d.state.clone())
    }

    /// Copy of the current dataset.
    pub fn dataset(&self) -> Dataset {
        self.directory.with(|d| d.dataset.clone())
    }

    // =========================================================================
    // Commands
    // =========================================================================

    /// Apply a command.
    ///
    /// Returns a ticket when the command requires a refetch; the caller is
    /// expected to run the fetch and hand the result to `complete_fetch`.
    pub fn dispatch(&self, command: Command) -> Option<FetchTicket> {
        tracing::debug!("Dispatching {:?}", command);

        // Transition and ticket land in one write so no reader sees a reset
        // without its loading flag
        let ticket = self.directory.mutate(|d| {
            let result = transition(&d.dataset, &d.state, command);
            if let Some(warning) = &result.warning {
                tracing::warn!("{}", warning);
            }
            d.state = result.state;
            match result.effect {
                Some(Effect::Refetch) => Some(issue_ticket(d)),
                None => None,
            }
        });

        if let Some(ticket) = ticket {
            tracing::debug!("Issued fetch ticket {}", ticket.0);
        }
        ticket
    }

    /// Typed text changed. Returns the suggestions.
    pub fn on_input(&self, text: impl Into<String>) -> Vec<Record> {
        self.dispatch(Command::Input(text.into()));
        self.snapshot().view.suggestions
    }

    /// A suggestion was picked. Returns the results.
    pub fn on_select_suggestion(&self, name: impl Into<String>) -> Vec<Record> {
        self.dispatch(Command::SelectSuggestion(name.into()));
        self.snapshot().view.results
    }

    /// Search button or Enter. Returns the results.
    pub fn on_search_commit(&self) -> Vec<Record> {
        self.dispatch(Command::SearchCommit);
        self.snapshot().view.results
    }

    /// Reset requested. Returns the ticket of the refetch to run.
    pub fn on_reset(&self) -> Option<FetchTicket> {
        self.dispatch(Command::Reset)
    }

    // =========================================================================
    // Fetch Lifecycle
    // =========================================================================

    /// Issue a new fetch ticket and mark the engine as loading.
    ///
    /// Any ticket issued earlier becomes stale.
    pub fn begin_fetch(&self) -> FetchTicket {
        let ticket = self.directory.mutate(issue_ticket);
        tracing::debug!("Issued fetch ticket {}", ticket.0);
        ticket
    }

    /// Apply a fetch outcome.
    ///
    /// Only the most recently issued ticket is applied; returns false for a
    /// stale one. On success the dataset is replaced and the query cleared.
    /// On failure the previous dataset and query are kept and the error is
    /// surfaced as the snapshot notice.
    pub fn complete_fetch(
        &self,
        ticket: FetchTicket,
        result: Result<Dataset, FetchError>,
    ) -> bool {
        self.directory.mutate_if(|d| {
            if ticket.0 != d.latest_ticket {
                tracing::warn!(
                    "Discarding stale fetch {} (latest is {})",
                    ticket.0,
                    d.latest_ticket
                );
                return false;
            }

            d.loading = false;
            match result {
                Ok(dataset) => {
                    tracing::info!("Loaded {} records", dataset.len());
                    d.dataset = dataset;
                    d.state = QueryState::default();
                    d.notice = None;
                }
                Err(e) => {
                    tracing::error!("Fetch failed: {} - keeping {} records", e, d.dataset.len());
                    d.notice = Some(e.to_string());
                }
            }
            true
        })
    }
}

fn issue_ticket(d: &mut Directory) -> FetchTicket {
    d.latest_ticket += 1;
    d.loading = true;
    FetchTicket(d.latest_ticket)
}

impl Default for QueryEngine {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn countries() -> Dataset {
        vec![
            Record::new("France", "fr.png").with_capital("Paris"),
            Record::new("Germany", "de.png").with_capital("Berlin"),
            Record::new("Fiji", "fj.png").with_capital("Suva"),
        ]
    }

    fn names(records: &[Record]) -> Vec<&str> {
        records.iter().map(|r| r.name.as_str()).collect()
    }

    fn loaded_engine() -> QueryEngine {
        let engine = QueryEngine::new();
        let ticket = engine.begin_fetch();
        assert!(engine.complete_fetch(ticket, Ok(countries())));
        engine
    }

    #[test]
    fn test_engine_new_is_empty() {
        let engine = QueryEngine::new();
        let snapshot = engine.snapshot();

        assert_eq!(snapshot, Snapshot::default());
        assert!(engine.on_input("F").is_empty());
        assert!(engine.on_search_commit().is_empty());
    }

    #[test]
    fn test_full_walkthrough() {
        let engine = loaded_engine();
        assert_eq!(engine.snapshot().view.results, countries());

        assert_eq!(names(&engine.on_input("F")), vec!["France", "Fiji"]);
        assert!(!engine.snapshot().show_reset);

        assert_eq!(names(&engine.on_search_commit()), vec!["France", "Fiji"]);
        assert!(engine.snapshot().show_reset);

        let results = engine.on_select_suggestion("Fiji");
        assert_eq!(names(&results), vec!["Fiji"]);
        let snapshot = engine.snapshot();
        assert!(snapshot.view.suggestions.is_empty());
        assert!(snapshot.show_reset);
        assert_eq!(snapshot.query, "Fiji");

        let ticket = engine.on_reset().unwrap();
        assert!(engine.snapshot().loading);
        // State is kept until the refetch lands
        assert!(engine.snapshot().show_reset);

        assert!(engine.complete_fetch(ticket, Ok(countries())));
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.view.results, countries());
        assert!(!snapshot.show_reset);
        assert!(!snapshot.loading);
        assert!(snapshot.query.is_empty());
        assert!(snapshot.view.suggestions.is_empty());
    }

    #[test]
    fn test_dispatch_reset_issues_ticket() {
        let engine = loaded_engine();
        assert!(engine.dispatch(Command::Input("G".into())).is_none());
        assert!(engine.dispatch(Command::SearchCommit).is_none());

        let ticket = engine.dispatch(Command::Reset);
        assert_eq!(ticket, Some(FetchTicket(2)));
    }

    #[test]
    fn test_reset_reflects_new_source_state() {
        let engine = loaded_engine();
        engine.on_search_commit();

        let ticket = engine.on_reset().unwrap();
        let fresh = vec![Record::new("Tuvalu", "tv.png").with_capital("Funafuti")];
        engine.complete_fetch(ticket, Ok(fresh.clone()));

        assert_eq!(engine.dataset(), fresh);
        assert_eq!(engine.snapshot().view.results, fresh);
    }

    #[test]
    fn test_failed_fetch_keeps_dataset_and_query() {
        let engine = loaded_engine();
        engine.on_input("Ge");
        engine.on_search_commit();

        let ticket = engine.on_reset().unwrap();
        let applied = engine.complete_fetch(
            ticket,
            Err(FetchError::Timeout {
                duration: Duration::from_secs(10),
            }),
        );

        assert!(applied);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.dataset_len, 3);
        assert_eq!(names(&snapshot.view.results), vec!["Germany"]);
        assert!(snapshot.show_reset);
        assert!(!snapshot.loading);
        assert!(snapshot.notice.unwrap().contains("timeout"));
    }

    #[test]
    fn test_failed_first_fetch_leaves_empty_dataset() {
        let engine = QueryEngine::new();
        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket, Err(FetchError::Status { code: 503 }));

        let snapshot = engine.snapshot();
        assert_eq!(snapshot.dataset_len, 0);
        assert_eq!(snapshot.notice.as_deref(), Some("Source returned status 503"));
        assert!(engine.on_search_commit().is_empty());
    }

    #[test]
    fn test_success_clears_notice() {
        let engine = QueryEngine::new();
        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket, Err(FetchError::Http("refused".into())));
        assert!(engine.snapshot().notice.is_some());

        let ticket = engine.begin_fetch();
        engine.complete_fetch(ticket, Ok(countries()));
        assert!(engine.snapshot().notice.is_none());
    }

    #[test]
    fn test_later_issued_fetch_wins() {
        let engine = loaded_engine();
        let first = engine.on_reset().unwrap();
        let second = engine.on_reset().unwrap();
        assert!(second > first);

        let newest = vec![Record::new("Nauru", "nr.png")];
        assert!(engine.complete_fetch(second, Ok(newest.clone())));
        // The earlier fetch lands late and is ignored
        assert!(!engine.complete_fetch(first, Ok(countries())));

        assert_eq!(engine.dataset(), newest);
        assert!(!engine.snapshot().loading);
    }

    #[test]
    fn test_stale_fetch_keeps_loading_flag() {
        let engine = loaded_engine();
        let first = engine.on_reset().unwrap();
        let _second = engine.on_reset().unwrap();

        assert!(!engine.complete_fetch(first, Ok(Vec::new())));
        assert!(engine.snapshot().loading);
        assert_eq!(engine.snapshot().dataset_len, 3);
    }

    #[test]
    fn test_invalid_selection_is_not_fatal() {
        let engine = loaded_engine();
        let results = engine.on_select_suggestion("Atlantis");

        assert!(results.is_empty());
        assert!(engine.snapshot().show_reset);
        assert!(engine.query_state().committed());
    }

    #[test]
    fn test_subscribe_broadcasts_changes() {
        let engine = loaded_engine();
        let rx = engine.subscribe();
        assert_eq!(rx.borrow().dataset_len, 3);

        engine.on_input("Fr");
        assert_eq!(names(&rx.borrow().view.suggestions), vec!["France"]);

        engine.on_select_suggestion("France");
        assert!(rx.borrow().show_reset);
        assert!(rx.borrow().view.suggestions.is_empty());
    }

    #[test]
    fn test_reset_broadcasts_loading() {
        let engine = loaded_engine();
        let rx = engine.subscribe();
        engine.on_search_commit();

        let ticket = engine.on_reset();
        assert_eq!(ticket, Some(FetchTicket(2)));
        assert!(rx.borrow().loading);
        assert!(rx.borrow().show_reset);
    }

    #[test]
    fn test_concurrent_dispatch_broadcasts_final_state() {
        let engine = loaded_engine();
        let rx = engine.subscribe();

        for _ in 0..50 {
            std::thread::scope(|scope| {
                for t in 0..4 {
                    let engine = &engine;
                    scope.spawn(move || {
                        for i in 0..50 {
                            engine.dispatch(Command::Input(format!("F{}{}", t, i)));
                        }
                    });
                }
            });
            assert_eq!(*rx.borrow(), engine.snapshot());
        }
    }
}
