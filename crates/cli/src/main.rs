mod cli;
mod metrics;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wikidump_core::{
    load_config, load_config_from_env, parse_job_list, validate_config, Config, DownloadOutcome,
    DownloadRequest, DumpDate, DumpOrchestrator,
};

use cli::{Cli, Command, DownloadArgs, MirrorArgs, StatusArgs};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            load_config(path).with_context(|| format!("Failed to load config from {:?}", path))?
        }
        None => load_config_from_env().context("Failed to load config from environment")?,
    };

    let result = match cli.command {
        Command::Status(args) => {
            apply_mirror_args(&mut config, &args.mirror);
            status(&config, &args).await
        }
        Command::Download(args) => {
            apply_mirror_args(&mut config, &args.mirror);
            apply_download_args(&mut config, &args);
            download(&config, &args).await
        }
    };

    if let Some(path) = &cli.metrics_file {
        metrics::write_metrics_file(path)
            .with_context(|| format!("Failed to write metrics to {:?}", path))?;
    }

    result
}

fn apply_mirror_args(config: &mut Config, args: &MirrorArgs) {
    if let Some(url) = &args.mirror_url {
        config.mirror.url = url.clone();
    }
    if let Some(wiki) = &args.wiki {
        config.mirror.wiki = wiki.clone();
    }
}

fn apply_download_args(config: &mut Config, args: &DownloadArgs) {
    if let Some(data_path) = &args.data_path {
        config.download.data_path = data_path.clone();
    }
    if let Some(jobs) = &args.jobs {
        config.download.jobs = parse_job_list(jobs);
    }
}

fn parse_date(value: &str, what: &str) -> Result<DumpDate> {
    value
        .parse()
        .with_context(|| format!("Invalid {} dump date '{}'", what, value))
}

async fn status(config: &Config, args: &StatusArgs) -> Result<()> {
    validate_config(config).context("Configuration validation failed")?;
    let wp_date = parse_date(&args.wp_yyyymmdd, "Wikipedia")?;

    let orchestrator =
        DumpOrchestrator::from_config(&config.mirror).context("Failed to create orchestrator")?;
    let report = orchestrator
        .get_dump_status(&wp_date, &config.mirror.url, &config.mirror.wiki)
        .await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

async fn download(config: &Config, args: &DownloadArgs) -> Result<()> {
    validate_config(config).context("Configuration validation failed")?;
    let request = DownloadRequest {
        wp_date: parse_date(&args.wp_yyyymmdd, "Wikipedia")?,
        wd_date: parse_date(&args.wd_yyyymmdd, "Wikidata")?,
        data_path: config.download.data_path.clone(),
        mirror_url: config.mirror.url.clone(),
        wiki: config.mirror.wiki.clone(),
        jobs: config.download.jobs.clone(),
    };

    let orchestrator =
        DumpOrchestrator::from_config(&config.mirror).context("Failed to create orchestrator")?;
    match orchestrator.download_jobs(&request).await? {
        DownloadOutcome::NotReady(readiness) => {
            warn!(
                "Dump {} is not ready yet, waiting on: {}",
                request.wp_date,
                readiness.blocking_jobs().join(", ")
            );
        }
        DownloadOutcome::Completed { reports, .. } => {
            for report in &reports {
                info!(
                    job = %report.job_name,
                    downloaded = report.downloaded,
                    skipped = report.skipped,
                    bytes = report.bytes,
                    "job complete"
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_config() {
        let mut config = Config::default();
        let cli = Cli::try_parse_from([
            "wikidump",
            "download",
            "20200920",
            "20200921",
            "--mirror-url",
            "https://mirror.example.org",
            "--data-path",
            "/data",
            "--jobs",
            "pagetable,wikidata",
        ])
        .unwrap();

        match cli.command {
            Command::Download(args) => {
                apply_mirror_args(&mut config, &args.mirror);
                apply_download_args(&mut config, &args);
            }
            other => panic!("expected download, got {:?}", other),
        }

        assert_eq!(config.mirror.url, "https://mirror.example.org");
        assert_eq!(config.mirror.wiki, "enwiki");
        assert_eq!(config.download.data_path, PathBuf::from("/data"));
        assert_eq!(config.download.jobs, vec!["pagetable", "wikidata"]);
    }

    #[test]
    fn test_missing_flags_keep_config() {
        let mut config = Config::default();
        apply_mirror_args(&mut config, &MirrorArgs::default());
        assert_eq!(config.mirror.url, "https://dumps.wikimedia.org");
    }

    #[test]
    fn test_parse_date_error_names_argument() {
        let err = parse_date("2020-09-20", "Wikidata").unwrap_err();
        assert!(err.to_string().contains("Wikidata"));
        assert!(parse_date("20200920", "Wikipedia").is_ok());
    }
}
