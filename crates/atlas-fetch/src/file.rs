//! Local JSON file source.

use std::path::PathBuf;

use atlas_core::{Dataset, FetchError};
use futures::future::BoxFuture;

use crate::fetcher::Fetcher;
use crate::wire::parse_dataset;

/// Reads the country list from a JSON file in the REST Countries shape.
///
/// The file is read again on every fetch, so editing it and resetting shows
/// the new contents.
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetcher for FileFetcher {
    fn fetch_all(&self) -> BoxFuture<'static, Result<Dataset, FetchError>> {
        let path = self.path.clone();

        Box::pin(async move {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| FetchError::Io(format!("{}: {}", path.display(), e)))?;
            parse_dataset(&bytes)
        })
    }
}
