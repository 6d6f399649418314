//! Job fetchers.
//!
//! Every acquisition strategy reduces to a [`FetchPlan`]: a target directory
//! plus `(file name, URL)` pairs. Plans are executed sequentially by
//! [`fetch_plan`], which skips any file already present in the target
//! directory and stops at the first failure.
//!
//! Three plan sources exist:
//!
//! - status-driven jobs, whose files are listed in `dumpstatus.json`
//! - the pageview-complete series for the month before the Wikipedia snapshot
//! - the single Wikidata JSON archive

mod executor;
mod http;
mod plans;
mod traits;
mod types;

pub use executor::fetch_plan;
pub use http::HttpDownloader;
pub use plans::{pageview_plan, status_job_plan, wikidata_plan};
pub use traits::Downloader;
pub use types::{FetchItem, FetchPlan, FetchReport};

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching files.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport failure while requesting or streaming a file.
    #[error("failed to download {url}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The mirror answered with a non-success status code.
    #[error("download of {url} failed with HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Local I/O failure while writing a file.
    #[error("I/O error on {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file name that would escape the target directory.
    #[error("refusing to write file with unsafe name '{name}'")]
    InvalidFileName { name: String },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
