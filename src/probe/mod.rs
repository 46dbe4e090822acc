//! Probing engine
//!
//! This module contains the three pieces of the fetch side of the pipeline:
//! - `classifier`: maps a raw probe outcome to a structured status record
//! - `fetcher`: the bounded-concurrency HEAD probe pool
//! - `aggregator`: thread-safe collection of records and per-label counts

pub mod aggregator;
pub mod classifier;
pub mod fetcher;

pub use aggregator::Aggregator;
pub use classifier::{classify, status_family_label, ProbeOutcome, StatusRecord};
pub use fetcher::{build_http_client, probe_all};
