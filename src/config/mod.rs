//! Run configuration
//!
//! Settings for a single checker run: where the catalog/persistence endpoint
//! lives, how many concurrent probes to issue, and how long each probe may
//! take. Worker count and timeout are clamped to operator-meaningful
//! ceilings rather than rejected, so a misconfigured cron job still makes
//! forward progress.

use crate::ConfigError;
use std::time::Duration;

/// Ceiling on concurrent probe workers; bounds pressure on the local network
/// stack and the probed hosts.
pub const MAX_WORKERS: usize = 256;

/// Ceiling on the per-probe timeout. A larger value over thousands of dead
/// URLs makes the run effectively never finish.
pub const MAX_TIMEOUT_SECS: u64 = 10;

/// Default number of probe workers
pub const DEFAULT_WORKERS: usize = 8;

/// Default per-probe timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 1;

/// Default number of status records per persistence page
pub const DEFAULT_PAGE_SIZE: usize = 100;

/// Configuration for one checker run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Base URL of the catalog/persistence endpoint
    pub endpoint: String,

    /// Number of concurrent probe workers (clamped to [1, MAX_WORKERS])
    pub workers: usize,

    /// Per-probe timeout (clamped to MAX_TIMEOUT_SECS)
    pub timeout: Duration,

    /// Number of status records submitted per persistence page
    pub page_size: usize,

    /// Whether to bulk-delete the previous run's status annotations before
    /// inserting fresh ones
    pub refresh: bool,
}

impl RunConfig {
    /// Builds a run configuration, applying the worker and timeout clamps.
    ///
    /// Values above the ceilings are silently capped, never rejected; the
    /// clamp is logged at debug level so an operator can see it took effect.
    pub fn new(
        endpoint: String,
        workers: usize,
        timeout_secs: u64,
    ) -> std::result::Result<Self, ConfigError> {
        if endpoint.is_empty() {
            return Err(ConfigError::MissingEndpoint);
        }
        if url::Url::parse(&endpoint).is_err() {
            return Err(ConfigError::InvalidEndpoint(endpoint));
        }

        Ok(Self {
            endpoint,
            workers: clamp_workers(workers),
            timeout: clamp_timeout(Duration::from_secs(timeout_secs)),
            page_size: DEFAULT_PAGE_SIZE,
            refresh: false,
        })
    }
}

/// Clamps the worker count to [1, MAX_WORKERS]
pub fn clamp_workers(workers: usize) -> usize {
    if workers > MAX_WORKERS {
        tracing::debug!("Worker count {} capped to {}", workers, MAX_WORKERS);
        MAX_WORKERS
    } else {
        workers.max(1)
    }
}

/// Clamps the per-probe timeout to MAX_TIMEOUT_SECS
pub fn clamp_timeout(timeout: Duration) -> Duration {
    let ceiling = Duration::from_secs(MAX_TIMEOUT_SECS);
    if timeout > ceiling {
        tracing::debug!("Timeout {:?} capped to {:?}", timeout, ceiling);
        ceiling
    } else {
        timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workers_above_ceiling_are_capped() {
        assert_eq!(clamp_workers(300), 256);
        assert_eq!(clamp_workers(257), 256);
    }

    #[test]
    fn test_workers_within_ceiling_pass_through() {
        assert_eq!(clamp_workers(8), 8);
        assert_eq!(clamp_workers(256), 256);
    }

    #[test]
    fn test_zero_workers_become_one() {
        assert_eq!(clamp_workers(0), 1);
    }

    #[test]
    fn test_timeout_above_ceiling_is_capped() {
        assert_eq!(
            clamp_timeout(Duration::from_secs(60)),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_timeout_within_ceiling_passes_through() {
        assert_eq!(
            clamp_timeout(Duration::from_secs(1)),
            Duration::from_secs(1)
        );
        assert_eq!(
            clamp_timeout(Duration::from_millis(500)),
            Duration::from_millis(500)
        );
    }

    #[test]
    fn test_config_clamps_on_construction() {
        let config = RunConfig::new("http://catalog.example.com".to_string(), 1000, 99).unwrap();
        assert_eq!(config.workers, 256);
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.page_size, 100);
    }

    #[test]
    fn test_empty_endpoint_is_rejected() {
        let err = RunConfig::new(String::new(), 8, 1).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEndpoint));
    }

    #[test]
    fn test_unparseable_endpoint_is_rejected() {
        let err = RunConfig::new("not a url".to_string(), 8, 1).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint(_)));
    }
}
