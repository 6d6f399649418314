//! Readiness-gated, idempotent downloading of Wikimedia dumps.
//!
//! A dump is ready when every requested job in its `dumpstatus.json` is
//! `done`. Only then are files fetched, each one skipped if already on disk.

pub mod config;
pub mod date;
pub mod fetcher;
pub mod layout;
pub mod metrics;
pub mod orchestrator;
pub mod readiness;
pub mod status;
pub mod testing;

/// Pseudo-job for the pageview-complete daily series.
pub const PAGEVIEWS_JOB: &str = "pageviewcomplete";

/// Pseudo-job for the Wikidata JSON archive.
pub const WIKIDATA_JOB: &str = "wikidata";

pub use config::{
    load_config, load_config_from_env, load_config_from_str, parse_job_list, validate_config,
    Config, ConfigError, DownloadConfig, MirrorConfig, DEFAULT_JOBS, DEFAULT_MIRROR_URL,
    DEFAULT_WIKI,
};
pub use date::{days_in_month, DateError, DumpDate, YearMonth};
pub use fetcher::{
    fetch_plan, pageview_plan, status_job_plan, wikidata_plan, Downloader, FetchError, FetchItem,
    FetchPlan, FetchReport, HttpDownloader,
};
pub use layout::{ensure_dir, DumpLayout, LayoutError};
pub use orchestrator::{
    build_http_client, DownloadOutcome, DownloadRequest, DumpOrchestrator, JobSelection,
    OrchestratorError,
};
pub use readiness::{evaluate, require_job, JobReadiness, Readiness, ReadinessError};
pub use status::{
    dump_status_url, DumpStatus, FileEntry, Job, JobStatus, StatusClient, StatusError,
    StatusReport,
};
