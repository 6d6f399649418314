//! Readiness gate.
//!
//! Decides, from a single status snapshot, whether a batch of status-driven
//! jobs may be downloaded. The decision is all-or-nothing: one job that is not
//! `done` blocks the whole batch.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::metrics::GATE_DECISIONS;
use crate::status::{DumpStatus, Job, JobStatus};

/// Errors raised while evaluating readiness.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReadinessError {
    /// A requested job is not listed in the status document.
    #[error("job '{job}' not in dump status jobs [{}]", .available.join(", "))]
    UnknownJob { job: String, available: Vec<String> },
}

/// Readiness of one requested job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobReadiness {
    pub name: String,
    pub status: JobStatus,
}

impl fmt::Display for JobReadiness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.name, self.status, self.status.marker())
    }
}

/// Outcome of the gate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Readiness {
    /// True iff every requested job is `done`.
    pub proceed: bool,
    /// Per-job lines in request order.
    pub jobs: Vec<JobReadiness>,
}

impl Readiness {
    /// Names of the requested jobs that are not `done`.
    pub fn blocking_jobs(&self) -> Vec<&str> {
        self.jobs
            .iter()
            .filter(|j| !j.status.is_done())
            .map(|j| j.name.as_str())
            .collect()
    }
}

/// Looks up `name`, failing with [`ReadinessError::UnknownJob`] if absent.
pub fn require_job<'a>(status: &'a DumpStatus, name: &str) -> Result<&'a Job, ReadinessError> {
    status.job(name).ok_or_else(|| ReadinessError::UnknownJob {
        job: name.to_string(),
        available: status.job_names().iter().map(|s| s.to_string()).collect(),
    })
}

/// Evaluates `requested` against `status`.
///
/// Every name is resolved before anything is decided, so an unknown job fails
/// the call even when another job would already have blocked the batch.
pub fn evaluate<S: AsRef<str>>(
    status: &DumpStatus,
    requested: &[S],
) -> Result<Readiness, ReadinessError> {
    let mut jobs = Vec::with_capacity(requested.len());

    for name in requested {
        let name = name.as_ref();
        let job = require_job(status, name)?;

        jobs.push(JobReadiness {
            name: name.to_string(),
            status: job.status.clone(),
        });
    }

    for job in &jobs {
        info!("{}", job);
    }

    let proceed = jobs.iter().all(|j| j.status.is_done());
    GATE_DECISIONS
        .with_label_values(&[if proceed { "proceed" } else { "not_ready" }])
        .inc();

    Ok(Readiness { proceed, jobs })
}
