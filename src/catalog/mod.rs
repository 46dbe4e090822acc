//! Catalog service client
//!
//! The catalog exposes the registered URLs as a paginated listing:
//! `GET {endpoint}/p/{page}` returns one page of bound URL values and an
//! empty page terminates the listing. The rest of the pipeline only sees
//! the resulting ordered `Vec<String>`.

use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;
use thiserror::Error;

/// Errors raised while loading URLs from the catalog
///
/// Any of these is fatal to the run: with no URL list there is nothing to
/// probe and nothing to persist.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Catalog endpoint unreachable: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned malformed data: {0}")]
    Malformed(String),
}

/// One page of the catalog listing
#[derive(Debug, Deserialize)]
struct UrlPage {
    urls: Vec<UrlEntry>,
}

/// A single bound URL row, as the catalog's query layer returns it
#[derive(Debug, Deserialize)]
struct UrlEntry {
    base_url: BoundValue,
}

#[derive(Debug, Deserialize)]
struct BoundValue {
    value: String,
}

/// Client for the catalog's paginated URL listing
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: Client,
    endpoint: String,
}

impl CatalogClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    /// Loads the full ordered URL list, page by page, stopping at the first
    /// empty page.
    pub async fn load_urls(&self) -> Result<Vec<String>, LoadError> {
        let start = Instant::now();
        let mut urls = Vec::new();
        let mut page = 0u32;

        loop {
            page += 1;
            let page_url = format!("{}/p/{}", self.endpoint, page);
            let response = self
                .client
                .get(&page_url)
                .send()
                .await?
                .error_for_status()?;

            let body: UrlPage = response
                .json()
                .await
                .map_err(|e| LoadError::Malformed(e.to_string()))?;

            if body.urls.is_empty() {
                break;
            }
            urls.extend(body.urls.into_iter().map(|entry| entry.base_url.value));
        }

        tracing::info!(
            "The catalog endpoint returned {} URLs, query time: {:?}",
            urls.len(),
            start.elapsed()
        );
        Ok(urls)
    }
}
