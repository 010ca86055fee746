//! Terminal frontend for the Atlas country browser.
//!
//! This crate provides the line-oriented user interface including:
//! - Backend integration (engine + fetcher)
//! - Key mapping from input lines to commands
//! - Rendering of engine snapshots
//! - The interactive loop

pub mod app;
pub mod args;
pub mod backend;
pub mod keymap;
pub mod render;

// Re-export commonly used types
pub use app::run_browser;
pub use args::CliArgs;
pub use backend::{Backend, RuntimeBackend};
pub use keymap::{parse_line, UiAction, HELP};
pub use render::{card, render};
