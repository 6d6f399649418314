//! Types for the fetcher module.

use std::path::PathBuf;

use serde::Serialize;

/// One file to fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchItem {
    /// Name of the file inside the target directory.
    pub file_name: String,
    /// Absolute download URL.
    pub url: String,
}

/// A logical unit to fetch into a single directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchPlan {
    /// Job name, used for logging and metrics.
    pub job_name: String,
    pub target_dir: PathBuf,
    pub items: Vec<FetchItem>,
}

impl FetchPlan {
    pub fn new(job_name: impl Into<String>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            job_name: job_name.into(),
            target_dir: target_dir.into(),
            items: Vec::new(),
        }
    }

    /// Appends an item.
    pub fn push(&mut self, file_name: impl Into<String>, url: impl Into<String>) {
        self.items.push(FetchItem {
            file_name: file_name.into(),
            url: url.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Summary of an executed plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub job_name: String,
    /// Files fetched over the network.
    pub downloaded: usize,
    /// Files left alone because they already existed.
    pub skipped: usize,
    /// Bytes written for downloaded files.
    pub bytes: u64,
}
