//! Trait definitions for the fetcher module.

use std::path::Path;

use async_trait::async_trait;

use super::FetchError;

/// Transfers one remote file to a local path.
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Returns the name of this downloader implementation.
    fn name(&self) -> &str;

    /// Downloads `url` into `destination`, returning the number of bytes
    /// written. The destination's parent directory must exist.
    async fn download(&self, url: &str, destination: &Path) -> Result<u64, FetchError>;
}
