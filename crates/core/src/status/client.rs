//! HTTP retrieval of the status document.

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::date::DumpDate;
use crate::metrics::STATUS_FETCHES;

use super::types::{DumpStatus, StatusReport};
use super::StatusError;

/// Builds `{mirror}/{wiki}/{date}/dumpstatus.json`.
pub fn dump_status_url(mirror_url: &str, wiki: &str, date: &DumpDate) -> String {
    format!(
        "{}/{}/{}/dumpstatus.json",
        mirror_url.trim_end_matches('/'),
        wiki,
        date
    )
}

/// Fetches and parses status documents.
#[derive(Debug, Clone)]
pub struct StatusClient {
    client: Client,
    timeout: Duration,
}

impl StatusClient {
    /// Create a status client over a shared HTTP client.
    ///
    /// `timeout` bounds the whole status request, body included.
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    /// Issue a single GET for `url` and parse the body.
    pub async fn fetch(&self, url: &str) -> Result<DumpStatus, StatusError> {
        info!("retrieving dump status from {}", url);

        let result = self.fetch_inner(url).await;
        let label = match &result {
            Ok(_) => "ok",
            Err(StatusError::Parse(_)) => "parse_error",
            Err(_) => "network_error",
        };
        STATUS_FETCHES.with_label_values(&[label]).inc();

        if let Err(e) = &result {
            warn!("dump status retrieval failed: {}", e);
        }
        result
    }

    async fn fetch_inner(&self, url: &str) -> Result<DumpStatus, StatusError> {
        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|source| StatusError::Network {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|source| StatusError::Network {
                url: url.to_string(),
                source,
            })?;
        debug!(bytes = body.len(), "received dump status document");

        DumpStatus::from_json(&body)
    }

    /// Fetch the status of the `wiki` dump published on `date`.
    pub async fn fetch_dump(
        &self,
        mirror_url: &str,
        wiki: &str,
        date: &DumpDate,
    ) -> Result<StatusReport, StatusError> {
        let url = dump_status_url(mirror_url, wiki, date);
        let status = self.fetch(&url).await?;
        Ok(StatusReport { url, status })
    }
}
