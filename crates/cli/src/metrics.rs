//! Prometheus registry for the command line tool.
//!
//! A run is short-lived, so metrics are written once to a textfile instead of
//! being served.

use std::path::Path;

use once_cell::sync::Lazy;
use prometheus::{Encoder, Registry, TextEncoder};

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

fn register_metrics(registry: &Registry) {
    for metric in wikidump_core::metrics::all_metrics() {
        registry.register(metric).unwrap();
    }
}

/// Encode all metrics in Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Write the encoded metrics to `path`, replacing it atomically.
pub fn write_metrics_file(path: &Path) -> std::io::Result<()> {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    std::fs::write(&tmp, encode_metrics())?;
    std::fs::rename(&tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wikidump_core::metrics::FILES_DOWNLOADED;

    #[test]
    fn test_write_metrics_file() {
        FILES_DOWNLOADED.with_label_values(&["cli-test"]).inc();

        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("wikidump.prom");
        write_metrics_file(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("wikidump_files_downloaded_total{job=\"cli-test\"}"));
        assert!(!temp.path().join("wikidump.prom.tmp").exists());
    }
}
