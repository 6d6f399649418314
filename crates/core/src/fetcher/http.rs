//! reqwest-backed downloader.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tokio::fs::{self, File};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info};

use super::traits::Downloader;
use super::FetchError;

/// Bytes between progress log lines.
const PROGRESS_INTERVAL_BYTES: u64 = 1024 * 1024 * 1024;

/// Write buffer size.
const WRITE_BUFFER_SIZE: usize = 1024 * 1024;

/// Streams HTTP response bodies to disk.
///
/// The body is written to `{destination}.part` and renamed into place once the
/// transfer completes, so a file at the destination name is always complete.
/// A failed transfer leaves its `.part` file behind; the next attempt
/// truncates it.
#[derive(Debug, Clone)]
pub struct HttpDownloader {
    client: Client,
}

impl HttpDownloader {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

/// `{destination}.part`
pub(crate) fn part_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}

#[async_trait]
impl Downloader for HttpDownloader {
    fn name(&self) -> &str {
        "http"
    }

    async fn download(&self, url: &str, destination: &Path) -> Result<u64, FetchError> {
        let request_error = |source| FetchError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let expected = response.content_length();
        debug!(url, expected_bytes = ?expected, "response headers received");

        let part = part_path(destination);
        let file = File::create(&part)
            .await
            .map_err(|e| FetchError::io(&part, e))?;
        let mut writer = BufWriter::with_capacity(WRITE_BUFFER_SIZE, file);

        let mut stream = response.bytes_stream();
        let mut total = 0u64;
        let mut next_progress = PROGRESS_INTERVAL_BYTES;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(request_error)?;
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| FetchError::io(&part, e))?;
            total += chunk.len() as u64;

            if total >= next_progress {
                match expected {
                    Some(len) => info!(
                        "{}: {} of {} MiB",
                        destination.display(),
                        total >> 20,
                        len >> 20
                    ),
                    None => info!("{}: {} MiB", destination.display(), total >> 20),
                }
                next_progress += PROGRESS_INTERVAL_BYTES;
            }
        }

        writer
            .flush()
            .await
            .map_err(|e| FetchError::io(&part, e))?;
        drop(writer);

        fs::rename(&part, destination)
            .await
            .map_err(|e| FetchError::io(destination, e))?;

        Ok(total)
    }
}
