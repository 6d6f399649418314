//! Dump download orchestrator.
//!
//! Sequences one download run:
//! - **Status**: fetch `dumpstatus.json` once
//! - **Gate**: all requested status-driven jobs must be `done`, otherwise
//!   nothing is written, pseudo-jobs included
//! - **Layout**: create only the directories the request needs
//! - **Fetch**: pageview-complete series, then status-driven jobs, then the
//!   Wikidata archive

mod runner;
mod types;

pub use runner::{build_http_client, DumpOrchestrator};
pub use types::{DownloadOutcome, DownloadRequest, JobSelection, OrchestratorError};
