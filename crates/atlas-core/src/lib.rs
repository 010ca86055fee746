//! Core types for the Atlas country browser.
//!
//! This crate contains shared data structures that are used across all Atlas crates:
//! - Record and Dataset types for the country directory
//! - Configuration types and loading
//! - Error types

mod config;
mod error;
mod record;

pub use config::{
    config_dir, config_path, load_config, AppConfig, DisplayConfig, SourceConfig,
    DEFAULT_SOURCE_URL,
};
pub use error::{ConfigError, FetchError, QueryError};
pub use record::{Dataset, Record};
