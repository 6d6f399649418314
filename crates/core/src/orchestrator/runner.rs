//! Dump orchestrator implementation.

use std::time::Duration;

use reqwest::Client;
use tracing::{info, warn};

use crate::config::MirrorConfig;
use crate::date::DumpDate;
use crate::fetcher::{
    fetch_plan, pageview_plan, status_job_plan, wikidata_plan, Downloader, FetchPlan,
    HttpDownloader,
};
use crate::layout::{ensure_dir, DumpLayout};
use crate::readiness;
use crate::status::{StatusClient, StatusReport};

use super::types::{DownloadOutcome, DownloadRequest, JobSelection, OrchestratorError};

/// Build the HTTP client shared by status retrieval and downloads.
pub fn build_http_client(config: &MirrorConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(&config.user_agent)
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .build()
}

/// Drives status retrieval, readiness gating and fetching for one run at a
/// time. Runs are strictly sequential; one file is in flight at most.
pub struct DumpOrchestrator<D: Downloader> {
    status_client: StatusClient,
    downloader: D,
}

impl DumpOrchestrator<HttpDownloader> {
    /// Create an orchestrator that talks HTTP to the configured mirror.
    pub fn from_config(config: &MirrorConfig) -> Result<Self, OrchestratorError> {
        let client = build_http_client(config)?;
        let status_client = StatusClient::new(
            client.clone(),
            Duration::from_secs(config.status_timeout_secs),
        );
        Ok(Self::new(status_client, HttpDownloader::new(client)))
    }
}

impl<D: Downloader> DumpOrchestrator<D> {
    pub fn new(status_client: StatusClient, downloader: D) -> Self {
        Self {
            status_client,
            downloader,
        }
    }

    pub fn downloader(&self) -> &D {
        &self.downloader
    }

    /// Read-only status query.
    pub async fn get_dump_status(
        &self,
        wp_date: &DumpDate,
        mirror_url: &str,
        wiki: &str,
    ) -> Result<StatusReport, OrchestratorError> {
        Ok(self
            .status_client
            .fetch_dump(mirror_url, wiki, wp_date)
            .await?)
    }

    /// Downloads the requested jobs if every status-driven one is done.
    ///
    /// The status document is fetched even when only pseudo-jobs were
    /// requested, and a not-ready status-driven job blocks the pseudo-jobs
    /// too. Unknown job names fail before any directory is created.
    pub async fn download_jobs(
        &self,
        request: &DownloadRequest,
    ) -> Result<DownloadOutcome, OrchestratorError> {
        let selection = JobSelection::from_requested(&request.jobs);
        info!(
            pageviews = selection.pageviews,
            wikidata = selection.wikidata,
            jobs = ?selection.status_jobs,
            "jobs to download"
        );

        let report = self
            .status_client
            .fetch_dump(&request.mirror_url, &request.wiki, &request.wp_date)
            .await?;

        let readiness = readiness::evaluate(&report.status, &selection.status_jobs)?;
        if !readiness.proceed {
            warn!(
                "not all requested jobs are done (blocked by: {}), nothing downloaded",
                readiness.blocking_jobs().join(", ")
            );
            return Ok(DownloadOutcome::NotReady(readiness));
        }

        let layout = DumpLayout::new(&request.data_path, request.wp_date, request.wd_date);

        if selection.needs_wikipedia_root() {
            let root = layout.wikipedia_root();
            info!("wikipedia_dumps_path: {}", root.display());
            ensure_dir(&root).await?;
        }

        if selection.wikidata {
            let root = layout.wikidata_root();
            info!("wikidata_dumps_path: {}", root.display());
            ensure_dir(&root).await?;
        }

        let mut plans: Vec<FetchPlan> = Vec::new();

        if selection.pageviews {
            plans.push(pageview_plan(
                &request.wp_date,
                &request.mirror_url,
                layout.pageview_dir(),
            ));
        }

        for name in &selection.status_jobs {
            let job = readiness::require_job(&report.status, name)?;
            plans.push(status_job_plan(job, &request.mirror_url, layout.job_dir(name)));
        }

        if selection.wikidata {
            plans.push(wikidata_plan(
                &request.wd_date,
                &request.mirror_url,
                layout.wikidata_root(),
            ));
        }

        let mut reports = Vec::with_capacity(plans.len());
        for plan in &plans {
            ensure_dir(&plan.target_dir).await?;
            reports.push(fetch_plan(&self.downloader, plan).await?);
        }

        Ok(DownloadOutcome::Completed { readiness, reports })
    }
}
