//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Status document retrieval
//! - Readiness gate decisions
//! - File downloads (per job)

use once_cell::sync::Lazy;
use prometheus::{IntCounterVec, Opts};

// =============================================================================
// Status
// =============================================================================

/// Status document fetches by result.
pub static STATUS_FETCHES: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "wikidump_status_fetches_total",
            "Total dump status document fetches",
        ),
        &["result"], // "ok", "network_error", "parse_error"
    )
    .unwrap()
});

/// Readiness gate decisions.
pub static GATE_DECISIONS: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "wikidump_gate_decisions_total",
            "Readiness gate evaluations by decision",
        ),
        &["decision"], // "proceed", "not_ready"
    )
    .unwrap()
});

// =============================================================================
// Downloads
// =============================================================================

/// Files fetched over the network.
pub static FILES_DOWNLOADED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("wikidump_files_downloaded_total", "Files downloaded"),
        &["job"],
    )
    .unwrap()
});

/// Files skipped because they already existed on disk.
pub static FILES_SKIPPED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "wikidump_files_skipped_total",
            "Files skipped because they were already present",
        ),
        &["job"],
    )
    .unwrap()
});

/// Bytes written by downloads.
pub static BYTES_DOWNLOADED: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("wikidump_bytes_downloaded_total", "Bytes downloaded"),
        &["job"],
    )
    .unwrap()
});

// =============================================================================
// Helper functions
// =============================================================================

/// Get all core metrics for registration in a registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(STATUS_FETCHES.clone()),
        Box::new(GATE_DECISIONS.clone()),
        Box::new(FILES_DOWNLOADED.clone()),
        Box::new(FILES_SKIPPED.clone()),
        Box::new(BYTES_DOWNLOADED.clone()),
    ]
}
