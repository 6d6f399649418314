//! Types for the dump orchestrator.

use std::path::PathBuf;

use thiserror::Error;

use crate::date::DumpDate;
use crate::fetcher::{FetchError, FetchReport};
use crate::layout::LayoutError;
use crate::readiness::{Readiness, ReadinessError};
use crate::status::StatusError;
use crate::{PAGEVIEWS_JOB, WIKIDATA_JOB};

/// Errors that can occur during a download run.
#[derive(Debug, Error)]
pub enum OrchestratorError {
    /// HTTP client could not be constructed.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Status document retrieval or parsing failed.
    #[error(transparent)]
    Status(#[from] StatusError),

    /// A requested job is unknown to the status document.
    #[error(transparent)]
    Readiness(#[from] ReadinessError),

    /// Directory preparation failed.
    #[error(transparent)]
    Layout(#[from] LayoutError),

    /// A file download failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Parameters of one download run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    /// Wikipedia snapshot date.
    pub wp_date: DumpDate,
    /// Wikidata snapshot date.
    pub wd_date: DumpDate,
    /// Top level data directory.
    pub data_path: PathBuf,
    pub mirror_url: String,
    pub wiki: String,
    /// Requested job names, pseudo-jobs included.
    pub jobs: Vec<String>,
}

/// Requested jobs split by acquisition strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobSelection {
    /// `pageviewcomplete` was requested.
    pub pageviews: bool,
    /// `wikidata` was requested.
    pub wikidata: bool,
    /// Everything else, in request order without duplicates.
    pub status_jobs: Vec<String>,
}

impl JobSelection {
    /// Partitions `requested` without modifying it. Blank names are ignored.
    pub fn from_requested<S: AsRef<str>>(requested: &[S]) -> Self {
        let mut selection = Self::default();

        for name in requested {
            let name = name.as_ref().trim();
            match name {
                "" => {}
                PAGEVIEWS_JOB => selection.pageviews = true,
                WIKIDATA_JOB => selection.wikidata = true,
                _ => {
                    if !selection.status_jobs.iter().any(|j| j == name) {
                        selection.status_jobs.push(name.to_string());
                    }
                }
            }
        }

        selection
    }

    /// Whether anything lands under `wikipedia-raw-{date}`.
    pub fn needs_wikipedia_root(&self) -> bool {
        self.pageviews || !self.status_jobs.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        !self.pageviews && !self.wikidata && self.status_jobs.is_empty()
    }
}

/// Result of a download run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// At least one requested job is not done; nothing was written.
    NotReady(Readiness),
    /// All plans ran to completion.
    Completed {
        readiness: Readiness,
        /// One report per executed plan, in execution order.
        reports: Vec<FetchReport>,
    },
}

impl DownloadOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, DownloadOutcome::Completed { .. })
    }

    pub fn readiness(&self) -> &Readiness {
        match self {
            DownloadOutcome::NotReady(readiness) => readiness,
            DownloadOutcome::Completed { readiness, .. } => readiness,
        }
    }
}
