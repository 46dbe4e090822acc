//! Batch persister
//!
//! Partitions the run's status records into fixed-size pages and submits
//! each page to the persistence backend as one typed batch-write request.
//! Submission is sequential across pages, and a failed page is logged and
//! skipped, never aborting the remaining pages: partial persistence is
//! acceptable, silent total failure is not.

use crate::probe::StatusRecord;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

/// Errors raised by a single page submission to the backend
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("Backend rejected submission: {0}")]
    Http(#[from] reqwest::Error),
}

/// One batched write request, the wire body for a page of records.
///
/// The backend receives structured data only; no query text is ever built
/// from record values.
#[derive(Debug, Serialize)]
pub struct StatusBatch<'a> {
    pub statuses: &'a [StatusRecord],
}

/// Client for the persistence backend's batch-write interface
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    endpoint: String,
}

impl BackendClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Self { client, endpoint }
    }

    /// Submits one page of status records as a single batch write.
    pub async fn submit(&self, page: &[StatusRecord]) -> Result<(), PersistError> {
        self.client
            .post(&self.endpoint)
            .json(&StatusBatch { statuses: page })
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    /// Bulk-deletes the prior run's status annotations for the given URLs.
    pub async fn delete_statuses(&self, urls: &[String]) -> Result<(), PersistError> {
        self.client
            .delete(&self.endpoint)
            .json(&urls)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}

/// Per-run persistence outcome, for the summary log
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PersistOutcome {
    /// Pages accepted by the backend
    pub pages_submitted: usize,

    /// Pages the backend rejected (logged and skipped)
    pub pages_failed: usize,
}

impl PersistOutcome {
    pub fn pages_total(&self) -> usize {
        self.pages_submitted + self.pages_failed
    }
}

/// Number of pages a record set partitions into
pub fn page_count(records: usize, page_size: usize) -> usize {
    records.div_ceil(page_size.max(1))
}

/// Submits all records to the backend in contiguous pages of `page_size`
/// (the last page may be shorter). Pages go out strictly one at a time; a
/// rejected page is logged with its index and size and the loop moves on.
pub async fn persist_all(
    backend: &BackendClient,
    records: &[StatusRecord],
    page_size: usize,
) -> PersistOutcome {
    let page_size = page_size.max(1);
    let total = page_count(records.len(), page_size);
    tracing::info!(
        "Persisting {} records in {} pages of up to {}",
        records.len(),
        total,
        page_size
    );

    let mut outcome = PersistOutcome::default();
    for (index, page) in records.chunks(page_size).enumerate() {
        match backend.submit(page).await {
            Ok(()) => {
                tracing::debug!("Persisted page {}/{} ({} records)", index + 1, total, page.len());
                outcome.pages_submitted += 1;
            }
            Err(e) => {
                tracing::error!(
                    "Failed to persist page {}/{} ({} records): {}",
                    index + 1,
                    total,
                    page.len(),
                    e
                );
                outcome.pages_failed += 1;
            }
        }
    }
    outcome
}

/// Refresh mode: bulk-deletes the prior run's annotations, then inserts the
/// fresh records.
///
/// The two phases are not transactional. A crash between the delete and the
/// inserts leaves the affected entities with no current status annotation
/// until the next successful run; both phases are logged so an interrupted
/// run is diagnosable. A failed delete is logged and the insert phase still
/// runs.
pub async fn refresh_then_persist(
    backend: &BackendClient,
    records: &[StatusRecord],
    page_size: usize,
) -> PersistOutcome {
    let urls: Vec<String> = records.iter().map(|r| r.url.clone()).collect();
    tracing::info!("Refresh: deleting prior status for {} URLs", urls.len());
    if let Err(e) = backend.delete_statuses(&urls).await {
        tracing::error!("Bulk delete of prior status failed: {}", e);
    }

    tracing::info!("Refresh: inserting fresh status records");
    persist_all(backend, records, page_size).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_count_is_deterministic() {
        assert_eq!(page_count(0, 100), 0);
        assert_eq!(page_count(1, 100), 1);
        assert_eq!(page_count(100, 100), 1);
        assert_eq!(page_count(101, 100), 2);
        assert_eq!(page_count(250, 100), 3);
        assert_eq!(page_count(300, 100), 3);
    }

    #[test]
    fn test_page_count_guards_zero_page_size() {
        assert_eq!(page_count(5, 0), 5);
    }

    #[test]
    fn test_outcome_totals() {
        let outcome = PersistOutcome {
            pages_submitted: 2,
            pages_failed: 1,
        };
        assert_eq!(outcome.pages_total(), 3);
    }

    // Submission sequencing and the skip-failed-page policy are covered
    // with wiremock in tests/pipeline_tests.rs.
}
