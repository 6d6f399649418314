//! Testing utilities and mock implementations.
//!
//! # Example
//!
//! ```rust,ignore
//! use wikidump_core::testing::{fixtures, MockDownloader};
//!
//! let downloader = MockDownloader::new();
//! downloader.fail_on("https://mirror.test/broken.gz");
//!
//! let status = fixtures::dump_status(vec![
//!     fixtures::job("pagetable", "done", &["enwiki-20200920-page.sql.gz"]),
//!     fixtures::job("articlesdump", "waiting", &[]),
//! ]);
//! ```

mod mock_downloader;

pub use mock_downloader::MockDownloader;

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::collections::BTreeMap;
    use std::path::Path;

    use crate::orchestrator::DownloadRequest;
    use crate::status::{DumpStatus, FileEntry, Job, JobStatus};

    /// Wikipedia snapshot used by fixtures.
    pub const WP_DATE: &str = "20200920";

    /// Wikidata snapshot used by fixtures.
    pub const WD_DATE: &str = "20200921";

    /// Create a job whose files live under `/enwiki/20200920/`.
    pub fn job(name: &str, status: &str, files: &[&str]) -> Job {
        let files = files
            .iter()
            .map(|file_name| {
                (
                    file_name.to_string(),
                    FileEntry {
                        name: file_name.to_string(),
                        sha1: String::new(),
                        md5: String::new(),
                        size: 1024,
                        url: format!("/enwiki/{}/{}", WP_DATE, file_name),
                    },
                )
            })
            .collect();

        Job {
            name: name.to_string(),
            status: JobStatus::from(status),
            files,
            updated: "2020-09-21 08:00:00".to_string(),
        }
    }

    /// Create a status document from jobs.
    pub fn dump_status(jobs: Vec<Job>) -> DumpStatus {
        let jobs: BTreeMap<String, Job> = jobs.into_iter().map(|j| (j.name.clone(), j)).collect();
        DumpStatus {
            jobs,
            version: "0.8".to_string(),
        }
    }

    /// Render a status document the way a mirror serves it.
    pub fn status_json(status: &DumpStatus) -> serde_json::Value {
        let jobs: serde_json::Map<String, serde_json::Value> = status
            .jobs
            .values()
            .map(|job| {
                let files: serde_json::Map<String, serde_json::Value> = job
                    .files
                    .values()
                    .map(|f| {
                        (
                            f.name.clone(),
                            serde_json::json!({
                                "size": f.size,
                                "url": f.url,
                                "sha1": f.sha1,
                                "md5": f.md5,
                            }),
                        )
                    })
                    .collect();
                (
                    job.name.clone(),
                    serde_json::json!({
                        "status": job.status.as_str(),
                        "updated": job.updated,
                        "files": files,
                    }),
                )
            })
            .collect();

        serde_json::json!({ "version": status.version, "jobs": jobs })
    }

    /// Create a download request for the fixture snapshots.
    pub fn download_request(mirror_url: &str, data_path: &Path, jobs: &[&str]) -> DownloadRequest {
        DownloadRequest {
            wp_date: WP_DATE.parse().expect("fixture date"),
            wd_date: WD_DATE.parse().expect("fixture date"),
            data_path: data_path.to_path_buf(),
            mirror_url: mirror_url.to_string(),
            wiki: "enwiki".to_string(),
            jobs: jobs.iter().map(|s| s.to_string()).collect(),
        }
    }
}
