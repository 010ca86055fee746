//! HTTP source backed by reqwest.

use std::time::Duration;

use atlas_core::{Dataset, FetchError};
use futures::future::BoxFuture;

use crate::fetcher::Fetcher;
use crate::wire::{to_dataset, CountryWire};

/// Fetches the country list from an HTTP endpoint.
pub struct HttpFetcher {
    client: reqwest::Client,
    url: String,
    timeout: Duration,
}

impl HttpFetcher {
    /// Create a fetcher for the given endpoint.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("atlas/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Http(e.to_string()))?;

        Ok(Self {
            client,
            url: url.into(),
            timeout,
        })
    }
}

async fn get_countries(client: reqwest::Client, url: String) -> Result<Dataset, FetchError> {
    let response = client
        .get(&url)
        .send()
        .await
        .map_err(|e| FetchError::Http(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            code: status.as_u16(),
        });
    }

    let countries: Vec<CountryWire> = response
        .json()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(to_dataset(countries))
}

impl Fetcher for HttpFetcher {
    fn fetch_all(&self) -> BoxFuture<'static, Result<Dataset, FetchError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        let timeout = self.timeout;

        Box::pin(async move {
            match tokio::time::timeout(timeout, get_countries(client, url)).await {
                Ok(result) => result,
                Err(_) => Err(FetchError::Timeout { duration: timeout }),
            }
        })
    }
}
