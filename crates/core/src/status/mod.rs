//! Dump status model.
//!
//! Fetches a dump's `dumpstatus.json` readiness document and exposes it as a
//! typed, queryable structure. A `DumpStatus` lives for the single query that
//! produced it; nothing is cached or refreshed.

mod client;
mod types;

pub use client::{dump_status_url, StatusClient};
pub use types::{DumpStatus, FileEntry, Job, JobStatus, StatusReport};

use thiserror::Error;

/// Errors that can occur when retrieving the status document.
#[derive(Debug, Error)]
pub enum StatusError {
    /// Transport failure (connection, timeout, body read).
    #[error("failed to fetch dump status from {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The mirror answered with a non-success status code.
    #[error("dump status request to {url} failed with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// The body is not JSON or lacks required keys.
    #[error("failed to parse dump status: {0}")]
    Parse(String),
}

impl StatusError {
    /// Whether the failure happened before a document was received.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. } | Self::HttpStatus { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StatusError::HttpStatus {
            url: "https://example.org/dumpstatus.json".to_string(),
            status: 404,
        };
        assert_eq!(
            err.to_string(),
            "dump status request to https://example.org/dumpstatus.json failed with HTTP 404"
        );
        assert!(err.is_network());

        let err = StatusError::Parse("missing field `version`".to_string());
        assert!(!err.is_network());
    }
}
