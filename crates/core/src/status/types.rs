//! Parsed representation of a `dumpstatus.json` document.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use super::StatusError;

/// Completion state of a dump job.
///
/// Upstream vocabulary is open-ended; only `done` and `waiting` carry meaning
/// here. Anything else is kept verbatim and treated as not ready.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Done,
    Waiting,
    Other(String),
}

impl JobStatus {
    /// The raw upstream string.
    pub fn as_str(&self) -> &str {
        match self {
            JobStatus::Done => "done",
            JobStatus::Waiting => "waiting",
            JobStatus::Other(s) => s,
        }
    }

    /// Whether the job has finished publishing.
    pub fn is_done(&self) -> bool {
        matches!(self, JobStatus::Done)
    }

    /// Report marker: check for done, cross for waiting, nothing otherwise.
    pub fn marker(&self) -> &'static str {
        match self {
            JobStatus::Done => "\u{2705}",
            JobStatus::Waiting => "\u{274c}",
            JobStatus::Other(_) => "",
        }
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s {
            "done" => JobStatus::Done,
            "waiting" => JobStatus::Waiting,
            other => JobStatus::Other(other.to_string()),
        }
    }
}

impl From<String> for JobStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "done" => JobStatus::Done,
            "waiting" => JobStatus::Waiting,
            _ => JobStatus::Other(s),
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One downloadable artifact of a job.
///
/// `sha1`, `md5` and `size` are advertised by upstream but never verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub sha1: String,
    pub md5: String,
    pub size: u64,
    /// Path relative to the mirror root.
    pub url: String,
}

/// A named group of files with its own readiness status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Job {
    pub name: String,
    pub status: JobStatus,
    pub files: BTreeMap<String, FileEntry>,
    pub updated: String,
}

impl Job {
    /// Sum of the advertised file sizes.
    pub fn total_size(&self) -> u64 {
        self.files.values().map(|f| f.size).sum()
    }
}

/// The upstream readiness document for one dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DumpStatus {
    pub jobs: BTreeMap<String, Job>,
    pub version: String,
}

impl DumpStatus {
    /// Parses a `dumpstatus.json` body.
    pub fn from_json(body: &str) -> Result<Self, StatusError> {
        let raw: RawDumpStatus =
            serde_json::from_str(body).map_err(|e| StatusError::Parse(e.to_string()))?;
        Ok(raw.into())
    }

    /// Looks up a job by name.
    pub fn job(&self, name: &str) -> Option<&Job> {
        self.jobs.get(name)
    }

    /// All job names, sorted.
    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.keys().map(String::as_str).collect()
    }

    /// Human-readable status, one `"{name}: {status} {marker}"` line per job
    /// sorted by job name.
    pub fn report(&self) -> String {
        self.jobs
            .values()
            .map(|job| format!("{}: {} {}", job.name, job.status, job.status.marker()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Result of a read-only status query.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Where the document was fetched from.
    pub url: String,
    pub status: DumpStatus,
}

impl fmt::Display for StatusReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.status.report())
    }
}

// ============================================================================
// Wire format (private)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawDumpStatus {
    version: String,
    jobs: BTreeMap<String, RawJob>,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    status: String,
    updated: String,
    #[serde(default)]
    files: Option<BTreeMap<String, RawFile>>,
}

#[derive(Debug, Deserialize)]
struct RawFile {
    #[serde(default)]
    sha1: Option<String>,
    #[serde(default)]
    md5: Option<String>,
    #[serde(default)]
    size: Option<u64>,
    #[serde(default)]
    url: Option<String>,
}

impl From<RawDumpStatus> for DumpStatus {
    fn from(raw: RawDumpStatus) -> Self {
        let jobs = raw
            .jobs
            .into_iter()
            .map(|(name, job)| {
                let files = job
                    .files
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(file_name, file)| {
                        let entry = FileEntry {
                            name: file_name.clone(),
                            sha1: file.sha1.unwrap_or_default(),
                            md5: file.md5.unwrap_or_default(),
                            size: file.size.unwrap_or(0),
                            url: file.url.unwrap_or_default(),
                        };
                        (file_name, entry)
                    })
                    .collect();

                let job = Job {
                    name: name.clone(),
                    status: JobStatus::from(job.status),
                    files,
                    updated: job.updated,
                };
                (name, job)
            })
            .collect();

        DumpStatus {
            jobs,
            version: raw.version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "version": "0.8",
        "jobs": {
            "pagetable": {
                "status": "done",
                "updated": "2020-09-21 08:12:45",
                "files": {
                    "enwiki-20200920-page.sql.gz": {
                        "size": 2046314024,
                        "url": "/enwiki/20200920/enwiki-20200920-page.sql.gz",
                        "md5": "d41d8cd98f00b204e9800998ecf8427e",
                        "sha1": "da39a3ee5e6b4b0d3255bfef95601890afd80709"
                    }
                }
            },
            "articlesdump": {
                "status": "waiting",
                "updated": "2020-09-20 00:00:00"
            },
            "abstractsdump": {
                "status": "in-progress",
                "updated": "2020-09-21 10:00:00",
                "files": {
                    "enwiki-20200920-abstract.xml.gz": {
                        "url": "/enwiki/20200920/enwiki-20200920-abstract.xml.gz"
                    }
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_sample() {
        let status = DumpStatus::from_json(SAMPLE).unwrap();
        assert_eq!(status.version, "0.8");
        assert_eq!(status.jobs.len(), 3);

        let page = status.job("pagetable").unwrap();
        assert_eq!(page.status, JobStatus::Done);
        assert_eq!(page.updated, "2020-09-21 08:12:45");
        let file = &page.files["enwiki-20200920-page.sql.gz"];
        assert_eq!(file.name, "enwiki-20200920-page.sql.gz");
        assert_eq!(file.size, 2_046_314_024);
        assert_eq!(file.url, "/enwiki/20200920/enwiki-20200920-page.sql.gz");
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let status = DumpStatus::from_json(SAMPLE).unwrap();

        let articles = status.job("articlesdump").unwrap();
        assert!(articles.files.is_empty());

        let abstracts = status.job("abstractsdump").unwrap();
        let file = &abstracts.files["enwiki-20200920-abstract.xml.gz"];
        assert_eq!(file.sha1, "");
        assert_eq!(file.md5, "");
        assert_eq!(file.size, 0);
        assert_eq!(abstracts.total_size(), 0);
    }

    #[test]
    fn test_null_optional_fields_default() {
        let body = r#"{"version": "1", "jobs": {"x": {"status": "done", "updated": "",
            "files": {"a": {"sha1": null, "size": null, "url": "/a"}}}}}"#;
        let status = DumpStatus::from_json(body).unwrap();
        let file = &status.jobs["x"].files["a"];
        assert_eq!(file.sha1, "");
        assert_eq!(file.size, 0);
    }

    #[test]
    fn test_missing_required_keys_is_parse_error() {
        let no_version = r#"{"jobs": {}}"#;
        assert!(matches!(
            DumpStatus::from_json(no_version),
            Err(StatusError::Parse(_))
        ));

        let no_jobs = r#"{"version": "0.8"}"#;
        assert!(matches!(
            DumpStatus::from_json(no_jobs),
            Err(StatusError::Parse(_))
        ));

        let no_status = r#"{"version": "0.8", "jobs": {"x": {"updated": ""}}}"#;
        assert!(matches!(
            DumpStatus::from_json(no_status),
            Err(StatusError::Parse(_))
        ));

        let no_updated = r#"{"version": "0.8", "jobs": {"x": {"status": "done"}}}"#;
        assert!(matches!(
            DumpStatus::from_json(no_updated),
            Err(StatusError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        assert!(matches!(
            DumpStatus::from_json("<html>not json</html>"),
            Err(StatusError::Parse(_))
        ));
    }

    #[test]
    fn test_report_sorted_with_markers() {
        let status = DumpStatus::from_json(SAMPLE).unwrap();
        let report = status.report();
        let lines: Vec<&str> = report.lines().collect();
        assert_eq!(
            lines,
            vec![
                "abstractsdump: in-progress ",
                "articlesdump: waiting \u{274c}",
                "pagetable: done \u{2705}",
            ]
        );
    }

    #[test]
    fn test_report_empty_document() {
        let status = DumpStatus::from_json(r#"{"version": "0.8", "jobs": {}}"#).unwrap();
        assert_eq!(status.report(), "");
        assert!(status.job_names().is_empty());
    }

    #[test]
    fn test_job_status_vocabulary() {
        assert_eq!(JobStatus::from("done"), JobStatus::Done);
        assert_eq!(JobStatus::from("waiting"), JobStatus::Waiting);
        assert_eq!(
            JobStatus::from("Done"),
            JobStatus::Other("Done".to_string())
        );
        assert_eq!(JobStatus::Done.marker(), "\u{2705}");
        assert_eq!(JobStatus::Waiting.marker(), "\u{274c}");
        assert_eq!(JobStatus::from("failed").marker(), "");
        assert_eq!(JobStatus::from("failed").as_str(), "failed");
        assert!(JobStatus::Done.is_done());
        assert!(!JobStatus::Waiting.is_done());
    }

    #[test]
    fn test_status_report_serializes_status_as_string() {
        let status = DumpStatus::from_json(SAMPLE).unwrap();
        let report = StatusReport {
            url: "https://example.org/enwiki/20200920/dumpstatus.json".to_string(),
            status,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["status"]["jobs"]["pagetable"]["status"], "done");
        assert_eq!(json["status"]["version"], "0.8");
    }
}
