//! Status classification
//!
//! Pure mapping from a raw probe outcome to a [`StatusRecord`]. A genuine
//! HTTP response is bucketed into its status family; a transport failure
//! (timeout, connection refused, DNS) becomes a synthetic record with a
//! fixed sentinel code. No shared state; safe to call from any worker.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

/// Sentinel status code for probes that failed at the transport level
pub const ERROR_STATUS_CODE: u16 = 408;

/// Status message carried by synthetic error records
pub const ERROR_STATUS_MESSAGE: &str = "ERROR";

/// Count label for synthetic error records
pub const TIMED_OUT_LABEL: &str = "TIMED OUT";

/// Count label for responses with a blank reason phrase
pub const EMPTY_RESPONSE_LABEL: &str = "EMPTY RESPONSE";

/// Raw outcome of a single probe, before classification
#[derive(Debug)]
pub enum ProbeOutcome {
    /// The probe got an HTTP response back
    Response {
        /// The URL that was probed
        url: String,
        /// HTTP status code
        status_code: u16,
        /// Reason phrase (may be empty)
        reason: String,
        /// URL the response actually came from, after any redirects
        final_url: String,
        /// Whether at least one redirect was followed
        redirected: bool,
        /// Elapsed time for the probe
        elapsed: Duration,
    },

    /// The probe itself failed (timeout, connection error, DNS failure, ...)
    Failed {
        /// The URL that was probed
        url: String,
        /// Captured failure description
        error: String,
    },
}

/// The classified outcome of probing one URL
///
/// This is also the wire payload handed to the persistence backend, one
/// record per URL per run.
#[derive(Debug, Clone, Serialize)]
pub struct StatusRecord {
    /// The probed URL
    pub url: String,

    /// When the probe completed (UTC, serialized RFC 3339)
    pub checked_at: DateTime<Utc>,

    /// HTTP status code, or [`ERROR_STATUS_CODE`] for failed probes
    pub status_code: u16,

    /// Status code rounded down to the nearest hundred
    pub status_family_code: u16,

    /// Human label for the status family
    pub status_family_label: &'static str,

    /// Reason phrase, or [`ERROR_STATUS_MESSAGE`] for failed probes
    pub status_message: String,

    /// Probe duration in milliseconds; 0 for failed probes
    pub response_time: u64,

    /// Final URL if the probe followed at least one redirect; empty otherwise
    pub redirect_target: String,

    /// Failure description for failed probes; empty for genuine responses
    pub error_detail: String,
}

impl StatusRecord {
    /// The label this record contributes to the response counts.
    ///
    /// Failed probes count as "TIMED OUT"; responses with a blank reason
    /// phrase count as "EMPTY RESPONSE"; everything else counts under its
    /// uppercased reason phrase.
    pub fn count_label(&self) -> String {
        if !self.error_detail.is_empty() {
            return TIMED_OUT_LABEL.to_string();
        }
        let label = self.status_message.trim().to_uppercase();
        if label.is_empty() {
            EMPTY_RESPONSE_LABEL.to_string()
        } else {
            label
        }
    }
}

/// Looks up the human label for a status family code.
///
/// The table is exhaustive for the standard HTTP ranges. A family outside
/// {100, 200, 300, 400, 500} is a programming error upstream, not a runtime
/// condition, so it panics rather than being swallowed.
pub fn status_family_label(family_code: u16) -> &'static str {
    match family_code {
        100 => "Informational message",
        200 => "Success message",
        300 => "Redirected message",
        400 => "Client error",
        500 => "Server error",
        other => panic!("status family {} outside the HTTP ranges", other),
    }
}

/// Classifies a raw probe outcome into a [`StatusRecord`].
pub fn classify(outcome: ProbeOutcome) -> StatusRecord {
    match outcome {
        ProbeOutcome::Response {
            url,
            status_code,
            reason,
            final_url,
            redirected,
            elapsed,
        } => {
            let status_family_code = status_code - (status_code % 100);
            let redirect_target = if redirected { final_url } else { String::new() };

            StatusRecord {
                url,
                checked_at: Utc::now(),
                status_code,
                status_family_code,
                status_family_label: status_family_label(status_family_code),
                status_message: reason,
                response_time: elapsed.as_millis() as u64,
                redirect_target,
                error_detail: String::new(),
            }
        }

        ProbeOutcome::Failed { url, error } => StatusRecord {
            url,
            checked_at: Utc::now(),
            status_code: ERROR_STATUS_CODE,
            status_family_code: 400,
            status_family_label: status_family_label(400),
            status_message: ERROR_STATUS_MESSAGE.to_string(),
            response_time: 0,
            redirect_target: String::new(),
            error_detail: error,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_outcome(status_code: u16, reason: &str) -> ProbeOutcome {
        ProbeOutcome::Response {
            url: "http://foo".to_string(),
            status_code,
            reason: reason.to_string(),
            final_url: "http://foo/".to_string(),
            redirected: false,
            elapsed: Duration::from_millis(12),
        }
    }

    #[test]
    fn test_classify_200() {
        let record = classify(response_outcome(200, "OK"));
        assert_eq!(record.status_code, 200);
        assert_eq!(record.status_family_code, 200);
        assert_eq!(record.status_family_label, "Success message");
        assert_eq!(record.status_message, "OK");
        assert_eq!(record.redirect_target, "");
        assert_eq!(record.error_detail, "");
        assert_eq!(record.response_time, 12);
    }

    #[test]
    fn test_classify_301_without_redirect_history() {
        let record = classify(response_outcome(301, "Moved"));
        assert_eq!(record.status_family_code, 300);
        assert_eq!(record.status_family_label, "Redirected message");
        assert_eq!(record.redirect_target, "");
    }

    #[test]
    fn test_classify_301_with_redirect_history() {
        let record = classify(ProbeOutcome::Response {
            url: "http://moved".to_string(),
            status_code: 301,
            reason: "Moved".to_string(),
            final_url: "http://new-url".to_string(),
            redirected: true,
            elapsed: Duration::from_millis(5),
        });
        assert_eq!(record.status_family_code, 300);
        assert_eq!(record.redirect_target, "http://new-url");
    }

    #[test]
    fn test_classify_404() {
        let record = classify(response_outcome(404, "Not Found"));
        assert_eq!(record.status_family_code, 400);
        assert_eq!(record.status_family_label, "Client error");
    }

    #[test]
    fn test_classify_500() {
        let record = classify(response_outcome(503, "Service Unavailable"));
        assert_eq!(record.status_family_code, 500);
        assert_eq!(record.status_family_label, "Server error");
    }

    #[test]
    fn test_classify_failed_probe() {
        let record = classify(ProbeOutcome::Failed {
            url: "http://dead".to_string(),
            error: "connection timed out".to_string(),
        });
        assert_eq!(record.status_code, 408);
        assert_eq!(record.status_family_code, 400);
        assert_eq!(record.status_family_label, "Client error");
        assert_eq!(record.status_message, "ERROR");
        assert_eq!(record.error_detail, "connection timed out");
        assert_eq!(record.redirect_target, "");
        assert_eq!(record.response_time, 0);
    }

    #[test]
    fn test_family_math_over_sample_codes() {
        for (code, family) in [
            (100u16, 100u16),
            (101, 100),
            (200, 200),
            (204, 200),
            (301, 300),
            (404, 400),
            (418, 400),
            (500, 500),
            (599, 500),
        ] {
            let record = classify(response_outcome(code, "x"));
            assert_eq!(record.status_family_code, family);
            assert_eq!(
                record.status_family_label,
                status_family_label(family),
                "code {}",
                code
            );
        }
    }

    #[test]
    #[should_panic(expected = "outside the HTTP ranges")]
    fn test_family_label_panics_outside_table() {
        status_family_label(600);
    }

    #[test]
    fn test_count_label_uppercases_reason() {
        let record = classify(response_outcome(200, "Ok"));
        assert_eq!(record.count_label(), "OK");
    }

    #[test]
    fn test_count_label_empty_reason() {
        let record = classify(response_outcome(200, ""));
        assert_eq!(record.count_label(), "EMPTY RESPONSE");
    }

    #[test]
    fn test_count_label_failed_probe() {
        let record = classify(ProbeOutcome::Failed {
            url: "http://dead".to_string(),
            error: "dns error".to_string(),
        });
        assert_eq!(record.count_label(), "TIMED OUT");
    }

    #[test]
    fn test_record_serializes_to_backend_shape() {
        let record = classify(response_outcome(200, "OK"));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["url"], "http://foo");
        assert_eq!(json["status_code"], 200);
        assert_eq!(json["status_family_label"], "Success message");
        assert!(json["checked_at"].as_str().unwrap().contains('T'));
    }
}
