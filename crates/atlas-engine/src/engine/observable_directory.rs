//! Observable directory with automatic change notifications.
//!
//! Mutation = notification. Every method that changes the directory also
//! broadcasts a fresh snapshot, so subscribers never miss a change. The
//! broadcast happens under the write lock, so the last value on the channel
//! is always the directory's current state.

use atlas_core::Dataset;
use parking_lot::RwLock;
use tokio::sync::watch;

use super::Snapshot;
use crate::reducer::derive;
use crate::state::QueryState;

// =============================================================================
// Directory
// =============================================================================

/// Everything the engine owns.
#[derive(Debug, Default)]
pub(crate) struct Directory {
    /// Records from the last successful fetch.
    pub dataset: Dataset,

    /// Query and phase.
    pub state: QueryState,

    /// Most recently issued fetch ticket. Zero before the first fetch.
    pub latest_ticket: u64,

    /// Whether the latest fetch is still in flight.
    pub loading: bool,

    /// Message from the last failed fetch.
    pub notice: Option<String>,
}

impl Directory {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            query: self.state.query.clone(),
            view: derive(&self.dataset, &self.state),
            show_reset: self.state.show_reset(),
            loading: self.loading,
            notice: self.notice.clone(),
            dataset_len: self.dataset.len(),
        }
    }
}

// =============================================================================
// ObservableDirectory
// =============================================================================

/// A directory that broadcasts every change.
///
/// Uses `parking_lot::RwLock` for the directory and `tokio::sync::watch` for
/// broadcasts. Readers run concurrently; writes are exclusive.
pub(crate) struct ObservableDirectory {
    inner: RwLock<Directory>,
    tx: watch::Sender<Snapshot>,
    rx: watch::Receiver<Snapshot>,
}

impl ObservableDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(Snapshot::default());
        Self {
            inner: RwLock::new(Directory::default()),
            tx,
            rx,
        }
    }

    /// Mutate the directory and broadcast the result.
    pub fn mutate<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Directory) -> R,
    {
        let mut inner = self.inner.write();
        let result = f(&mut inner);
        self.tx.send_replace(inner.snapshot());
        result
    }

    /// Mutate the directory, broadcasting only when the closure returns true.
    pub fn mutate_if<F>(&self, f: F) -> bool
    where
        F: FnOnce(&mut Directory) -> bool,
    {
        let mut inner = self.inner.write();
        let changed = f(&mut inner);
        if changed {
            self.tx.send_replace(inner.snapshot());
        }
        changed
    }

    /// Read the directory with a closure.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Directory) -> R,
    {
        let inner = self.inner.read();
        f(&inner)
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.inner.read().snapshot()
    }

    /// Subscribe to changes. The receiver sees the current snapshot first.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.rx.clone()
    }
}

impl Default for ObservableDirectory {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
