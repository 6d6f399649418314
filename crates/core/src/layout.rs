//! On-disk layout of downloaded dumps.
//!
//! ```text
//! {data_path}/wikipedia-raw-{wp_date}/{job}/{file}
//! {data_path}/wikipedia-raw-{wp_date}/pageviewcomplete/{file}
//! {data_path}/wikidata-raw-{wd_date}/{file}
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::debug;

use crate::date::DumpDate;
use crate::PAGEVIEWS_JOB;

/// Errors that can occur while preparing directories.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Failed to create a directory.
    #[error("failed to create directory: {path}")]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Directory layout for one Wikipedia/Wikidata snapshot pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpLayout {
    data_path: PathBuf,
    wp_date: DumpDate,
    wd_date: DumpDate,
}

impl DumpLayout {
    /// An empty `data_path` resolves relative to the working directory.
    pub fn new(data_path: impl Into<PathBuf>, wp_date: DumpDate, wd_date: DumpDate) -> Self {
        Self {
            data_path: data_path.into(),
            wp_date,
            wd_date,
        }
    }

    pub fn data_path(&self) -> &Path {
        &self.data_path
    }

    /// `{data_path}/wikipedia-raw-{wp_date}`
    pub fn wikipedia_root(&self) -> PathBuf {
        self.data_path.join(format!("wikipedia-raw-{}", self.wp_date))
    }

    /// Directory for a status-driven job.
    pub fn job_dir(&self, job_name: &str) -> PathBuf {
        self.wikipedia_root().join(job_name)
    }

    /// Directory for the pageview-complete daily files.
    pub fn pageview_dir(&self) -> PathBuf {
        self.job_dir(PAGEVIEWS_JOB)
    }

    /// `{data_path}/wikidata-raw-{wd_date}`
    pub fn wikidata_root(&self) -> PathBuf {
        self.data_path.join(format!("wikidata-raw-{}", self.wd_date))
    }
}

/// Creates `path` and any missing parents. Existing directories are fine.
pub async fn ensure_dir(path: &Path) -> Result<(), LayoutError> {
    debug!("ensuring directory {}", path.display());
    fs::create_dir_all(path)
        .await
        .map_err(|source| LayoutError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            source,
        })
}
