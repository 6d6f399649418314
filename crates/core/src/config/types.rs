use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default Wikimedia dump mirror.
pub const DEFAULT_MIRROR_URL: &str = "https://dumps.wikimedia.org";

/// Default wiki identifier.
pub const DEFAULT_WIKI: &str = "enwiki";

/// Jobs downloaded when none are requested explicitly.
pub const DEFAULT_JOBS: &[&str] = &[
    "pageviewcomplete",
    "pagetable",
    "pagepropstable",
    "redirecttable",
    "articlesdump",
    "wikidata",
];

/// Root configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub mirror: MirrorConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Mirror and HTTP client configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MirrorConfig {
    /// Base URL of the dump mirror (e.g., "https://dumps.wikimedia.org")
    #[serde(default = "default_mirror_url")]
    pub url: String,
    /// Wiki identifier (e.g., "enwiki")
    #[serde(default = "default_wiki")]
    pub wiki: String,
    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// TCP connect timeout in seconds (default: 30)
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout for the status document in seconds (default: 60).
    /// File downloads have no overall timeout since archives can be very large.
    #[serde(default = "default_status_timeout")]
    pub status_timeout_secs: u64,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            url: default_mirror_url(),
            wiki: default_wiki(),
            user_agent: default_user_agent(),
            connect_timeout_secs: default_connect_timeout(),
            status_timeout_secs: default_status_timeout(),
        }
    }
}

fn default_mirror_url() -> String {
    DEFAULT_MIRROR_URL.to_string()
}

fn default_wiki() -> String {
    DEFAULT_WIKI.to_string()
}

fn default_user_agent() -> String {
    format!("wikidump/{}", env!("CARGO_PKG_VERSION"))
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_status_timeout() -> u64 {
    60
}

/// Download configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DownloadConfig {
    /// Top level data directory. Empty means the working directory.
    #[serde(default)]
    pub data_path: PathBuf,
    /// Jobs to download when none are given on the command line
    #[serde(default = "default_jobs")]
    pub jobs: Vec<String>,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::new(),
            jobs: default_jobs(),
        }
    }
}

fn default_jobs() -> Vec<String> {
    DEFAULT_JOBS.iter().map(|s| s.to_string()).collect()
}

/// Splits a comma-delimited job list, trimming whitespace and dropping blanks.
pub fn parse_job_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
