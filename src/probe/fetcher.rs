//! HEAD probe pool
//!
//! This module issues the actual network probes:
//! - Building the shared HTTP client with the clamped per-probe timeout
//! - One HEAD request per URL, headers only, no body
//! - A bounded pool of concurrent probes via `buffer_unordered`
//! - Routing transport failures through the classifier's error path

use crate::config::{clamp_timeout, clamp_workers};
use crate::probe::{classify, Aggregator, ProbeOutcome};
use futures::stream::{self, StreamExt};
use reqwest::{redirect::Policy, Client};
use std::time::{Duration, Instant};
use url::Url;

/// Maximum redirect hops to follow before reqwest reports a redirect error
const MAX_REDIRECT_HOPS: usize = 10;

/// Builds the HTTP client shared by all probe workers.
///
/// The per-probe timeout is applied at the client level and clamped to the
/// configured ceiling; redirects are followed up to [`MAX_REDIRECT_HOPS`] so
/// the final resolved URL is observable on the response.
pub fn build_http_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(clamp_timeout(timeout))
        .redirect(Policy::limited(MAX_REDIRECT_HOPS))
        .build()
}

/// Probes every URL with a bounded pool of concurrent workers, feeding each
/// resulting status record into the aggregator.
///
/// `worker_count` above the ceiling is silently capped. Each URL gets
/// exactly one probe attempt; a timeout or transport failure becomes a
/// synthetic error record rather than a fault. Returns only once every URL
/// has produced a record.
pub async fn probe_all(
    client: &Client,
    urls: Vec<String>,
    worker_count: usize,
    aggregator: &Aggregator,
) {
    let workers = clamp_workers(worker_count);

    stream::iter(urls)
        .map(|url| async move {
            let record = classify(probe_one(client, &url).await);
            tracing::debug!(
                "Probed {} with response code: {} ({})",
                record.url,
                record.status_code,
                record.count_label()
            );
            aggregator.record(record);
        })
        .buffer_unordered(workers)
        .collect::<Vec<()>>()
        .await;
}

/// Issues a single HEAD probe and captures the raw outcome.
///
/// Redirect detection compares the response's resolved URL against the
/// normalized form of the requested URL; they differ only when at least one
/// redirect was followed.
async fn probe_one(client: &Client, url: &str) -> ProbeOutcome {
    let requested = Url::parse(url).ok();
    let start = Instant::now();

    match client.head(url).send().await {
        Ok(response) => {
            let elapsed = start.elapsed();
            let status = response.status();
            let final_url = response.url();
            let redirected = requested.map_or(false, |u| u != *final_url);

            ProbeOutcome::Response {
                url: url.to_string(),
                status_code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("").to_string(),
                final_url: final_url.to_string(),
                redirected,
                elapsed,
            }
        }
        Err(e) => ProbeOutcome::Failed {
            url: url.to_string(),
            error: e.to_string(),
        },
    }
}
