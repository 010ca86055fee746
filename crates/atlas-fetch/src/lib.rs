//! Country data sources for the Atlas country browser.
//!
//! The query engine only knows `Fetcher::fetch_all`. This crate provides:
//! - `HttpFetcher` for the REST Countries API
//! - `FileFetcher` for a local JSON file in the same shape
//! - Wire types and the mapping/validation into `Record`s

pub mod fetcher;
pub mod file;
pub mod http;
pub mod wire;

pub use fetcher::{fetcher_from_config, Fetcher};
pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use wire::{parse_dataset, to_dataset, CountryWire};
