//! Mock downloader for testing.

use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::fetcher::{Downloader, FetchError};

/// Mock implementation of the Downloader trait.
///
/// Records every requested URL, writes a fixed body to the destination and
/// fails with HTTP 500 for URLs registered through [`MockDownloader::fail_on`].
#[derive(Debug, Clone)]
pub struct MockDownloader {
    requests: Arc<Mutex<Vec<String>>>,
    failures: Arc<Mutex<HashSet<String>>>,
    body: Arc<Vec<u8>>,
}

impl Default for MockDownloader {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDownloader {
    /// Create a new mock downloader.
    pub fn new() -> Self {
        Self::with_body(b"mock body".to_vec())
    }

    /// Create a mock that writes `body` for every download.
    pub fn with_body(body: Vec<u8>) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            failures: Arc::new(Mutex::new(HashSet::new())),
            body: Arc::new(body),
        }
    }

    /// Make downloads of `url` fail.
    pub fn fail_on(&self, url: &str) {
        self.failures.lock().unwrap().insert(url.to_string());
    }

    /// URLs requested so far, in order (failed ones included).
    pub fn requested_urls(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Downloader for MockDownloader {
    fn name(&self) -> &str {
        "mock"
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64, FetchError> {
        self.requests.lock().unwrap().push(url.to_string());

        if self.failures.lock().unwrap().contains(url) {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: 500,
            });
        }

        tokio::fs::write(destination, self.body.as_slice())
            .await
            .map_err(|e| FetchError::Io {
                path: destination.to_path_buf(),
                source: e,
            })?;

        Ok(self.body.len() as u64)
    }
}
