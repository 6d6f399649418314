//! Command line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Readiness-gated downloader for Wikimedia dumps.
#[derive(Parser, Debug)]
#[command(name = "wikidump", version, about)]
pub struct Cli {
    /// TOML configuration file. Without it, defaults plus `WIKIDUMP_*`
    /// environment variables are used.
    #[arg(long, global = true, env = "WIKIDUMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log filter used when `RUST_LOG` is not set.
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,

    /// Write Prometheus metrics in text format to this file on exit.
    #[arg(long, global = true)]
    pub metrics_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the per-job status of a Wikipedia dump.
    Status(StatusArgs),
    /// Download jobs once all of them are done.
    Download(DownloadArgs),
}

/// Mirror selection shared by both subcommands.
#[derive(Args, Debug, Clone, Default)]
pub struct MirrorArgs {
    /// Dump mirror base URL.
    #[arg(long)]
    pub mirror_url: Option<String>,

    /// Wiki identifier, e.g. `enwiki`.
    #[arg(long)]
    pub wiki: Option<String>,
}

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Wikipedia dump date (YYYYMMDD).
    pub wp_yyyymmdd: String,

    #[command(flatten)]
    pub mirror: MirrorArgs,

    /// Print the parsed status document as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Wikipedia dump date (YYYYMMDD).
    pub wp_yyyymmdd: String,

    /// Wikidata dump date (YYYYMMDD).
    pub wd_yyyymmdd: String,

    /// Top level data directory.
    #[arg(long)]
    pub data_path: Option<PathBuf>,

    #[command(flatten)]
    pub mirror: MirrorArgs,

    /// Comma separated job list.
    #[arg(long)]
    pub jobs: Option<String>,
}
