//! Backend integration for the Atlas browser.
//!
//! This module provides the bridge between the terminal frontend and the
//! query engine. The `Backend` trait is frontend-independent and mockable
//! for testing.
//!
//! ## Reactive State
//!
//! The engine broadcasts every change via `tokio::sync::watch`. The frontend
//! subscribes and re-renders whenever a new snapshot arrives, including when
//! a background refetch completes.

use std::sync::Arc;

use atlas_engine::{Command, FetchTicket, QueryEngine, Snapshot};
use atlas_fetch::Fetcher;
use futures::future::BoxFuture;
use tokio::sync::watch;

// =============================================================================
// Backend Trait
// =============================================================================

/// Trait for backend operations.
///
/// Fetches come back as futures so the caller decides how to run them: the
/// initial load is awaited, refetches are spawned.
pub trait Backend: Send + Sync {
    /// Subscribe to snapshot changes.
    fn subscribe(&self) -> watch::Receiver<Snapshot>;

    /// Current snapshot.
    fn snapshot(&self) -> Snapshot;

    /// Apply a command.
    ///
    /// Returns the pending refetch when the command needs one. The future
    /// resolves to whether its result was applied.
    fn dispatch(&self, command: Command) -> Option<BoxFuture<'static, bool>>;

    /// Load the dataset for the first time.
    fn initialize(&self) -> BoxFuture<'static, bool>;
}

// =============================================================================
// Runtime Backend
// =============================================================================

/// Real backend: a QueryEngine fed by a Fetcher.
pub struct RuntimeBackend {
    engine: Arc<QueryEngine>,
    fetcher: Arc<dyn Fetcher>,
}

impl RuntimeBackend {
    /// Create a new runtime backend.
    pub fn new(engine: Arc<QueryEngine>, fetcher: Arc<dyn Fetcher>) -> Self {
        Self { engine, fetcher }
    }

    /// Run the fetch for an issued ticket and hand the result to the engine.
    fn run_fetch(&self, ticket: FetchTicket) -> BoxFuture<'static, bool> {
        let engine = self.engine.clone();
        let fetch = self.fetcher.fetch_all();

        Box::pin(async move {
            let result = fetch.await;
            engine.complete_fetch(ticket, result)
        })
    }
}

impl Backend for RuntimeBackend {
    fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.engine.subscribe()
    }

    fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    fn dispatch(&self, command: Command) -> Option<BoxFuture<'static, bool>> {
        self.engine
            .dispatch(command)
            .map(|ticket| self.run_fetch(ticket))
    }

    fn initialize(&self) -> BoxFuture<'static, bool> {
        let ticket = self.engine.begin_fetch();
        self.run_fetch(ticket)
    }
}

// =============================================================================
// Mock Backend for Testing
// =============================================================================


// =============================================================================
// Tests
// =============================================================================
