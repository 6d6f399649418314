//! Sequential, skip-if-exists execution of fetch plans.

use std::path::{Component, Path};

use tokio::fs;
use tracing::info;

use crate::metrics::{BYTES_DOWNLOADED, FILES_DOWNLOADED, FILES_SKIPPED};

use super::traits::Downloader;
use super::types::{FetchPlan, FetchReport};
use super::FetchError;

/// Whether `name` is a single plain path component.
fn is_plain_file_name(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(c)), None) if c == name
    )
}

/// Executes `plan` one file at a time.
///
/// A file whose name already exists in the target directory is skipped without
/// any network request. The existence check is advisory: concurrent runs
/// against the same directory can both download the same file.
///
/// The first failure aborts the remaining items; files written before it stay
/// on disk.
pub async fn fetch_plan<D>(downloader: &D, plan: &FetchPlan) -> Result<FetchReport, FetchError>
where
    D: Downloader + ?Sized,
{
    let mut report = FetchReport {
        job_name: plan.job_name.clone(),
        ..Default::default()
    };

    for item in &plan.items {
        if !is_plain_file_name(&item.file_name) {
            return Err(FetchError::InvalidFileName {
                name: item.file_name.clone(),
            });
        }

        let out = plan.target_dir.join(&item.file_name);
        info!(
            "downloading {} from {} to {}",
            plan.job_name,
            item.url,
            out.display()
        );

        let exists = fs::try_exists(&out)
            .await
            .map_err(|e| FetchError::io(&out, e))?;
        if exists {
            info!("{} exists, skipping", out.display());
            FILES_SKIPPED.with_label_values(&[&plan.job_name]).inc();
            report.skipped += 1;
            continue;
        }

        let bytes = downloader.download(&item.url, &out).await?;

        FILES_DOWNLOADED.with_label_values(&[&plan.job_name]).inc();
        BYTES_DOWNLOADED
            .with_label_values(&[&plan.job_name])
            .inc_by(bytes);
        report.downloaded += 1;
        report.bytes += bytes;
    }

    info!(
        job = %plan.job_name,
        downloaded = report.downloaded,
        skipped = report.skipped,
        bytes = report.bytes,
        "fetch complete"
    );

    Ok(report)
}
