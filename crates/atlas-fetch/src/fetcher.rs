//! The fetch collaborator.

use std::sync::Arc;

use atlas_core::{Dataset, FetchError, SourceConfig};
use futures::future::BoxFuture;

use crate::file::FileFetcher;
use crate::http::HttpFetcher;

/// Produces the full dataset.
///
/// Returns a future so the caller decides where to run it. Called once at
/// startup and once per reset.
#[cfg_attr(test, mockall::automock)]
pub trait Fetcher: Send + Sync {
    /// Fetch every record from the source.
    fn fetch_all(&self) -> BoxFuture<'static, Result<Dataset, FetchError>>;
}

/// Build the fetcher the source config asks for.
///
/// A configured file wins over the URL.
pub fn fetcher_from_config(config: &SourceConfig) -> Result<Arc<dyn Fetcher>, FetchError> {
    match &config.file {
        Some(path) => {
            tracing::info!("Reading countries from {}", path.display());
            Ok(Arc::new(FileFetcher::new(path.clone())))
        }
        None => {
            tracing::info!("Fetching countries from {}", config.url);
            Ok(Arc::new(HttpFetcher::new(&config.url, config.timeout())?))
        }
    }
}
