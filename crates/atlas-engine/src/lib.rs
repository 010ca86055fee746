//! Query engine for the Atlas country browser.
//!
//! This crate turns a dataset and a query into what the UI shows:
//! - `transition` - the pure reducer over a closed set of commands
//! - `derive` - suggestions and results computed from dataset + state
//! - `QueryEngine` - the observable, single-writer store that owns both

pub mod command;
pub mod engine;
pub mod reducer;
pub mod state;

pub use command::{Command, Effect, Transition};
pub use engine::{FetchTicket, QueryEngine, Snapshot};
pub use reducer::{derive, exact_matches, prefix_matches, suggestions_for, transition, DerivedView};
pub use state::{Commit, Phase, QueryState};

pub use atlas_core::{Dataset, FetchError, QueryError, Record};
