//! Command-line arguments.

use std::path::PathBuf;

use atlas_core::AppConfig;
use clap::Parser;

/// Browse the world's countries from the terminal.
///
/// Set RUST_LOG=debug for verbose logs on stderr.
#[derive(Debug, Clone, Default, PartialEq, Eq, Parser)]
#[command(name = "atlas", version)]
pub struct CliArgs {
    /// Read settings from this file instead of the default
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Load countries from a local JSON file
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Load countries from this endpoint
    #[arg(long, value_name = "URL")]
    pub url: Option<String>,
}

impl CliArgs {
    /// Apply overrides on top of a loaded config.
    ///
    /// `--url` clears a configured file so the endpoint is actually used.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.url {
            config.source.url = url.clone();
            config.source.file = None;
        }
        if let Some(file) = &self.file {
            config.source.file = Some(file.clone());
        }
    }
}
