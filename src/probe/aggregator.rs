//! Thread-safe result aggregation
//!
//! Workers complete in arbitrary order and all report into one aggregator.
//! The append of the record and the increment of its count label happen
//! under a single lock, so the final counts always sum to exactly the
//! number of `record` calls made.

use crate::probe::StatusRecord;
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-label occurrence counts for one run
pub type ResponseCounts = HashMap<String, u64>;

#[derive(Debug, Default)]
struct Inner {
    records: Vec<StatusRecord>,
    counts: ResponseCounts,
}

/// Collector of status records and per-label counts
///
/// `record` takes `&self` and is safe to call concurrently from every fetch
/// worker. No ordering guarantee is made on the record collection.
#[derive(Debug, Default)]
pub struct Aggregator {
    inner: Mutex<Inner>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed probe: appends the record and increments the
    /// counter for its label as one indivisible update.
    pub fn record(&self, record: StatusRecord) {
        let label = record.count_label();
        let mut inner = self.inner.lock().unwrap();
        *inner.counts.entry(label).or_insert(0) += 1;
        inner.records.push(record);
    }

    /// Number of records collected so far
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the aggregator, handing ownership of the collected records
    /// and counts to the caller. Called once, after the fetch engine has
    /// drained its queue.
    pub fn into_parts(self) -> (Vec<StatusRecord>, ResponseCounts) {
        let inner = self.inner.into_inner().unwrap();
        (inner.records, inner.counts)
    }
}
