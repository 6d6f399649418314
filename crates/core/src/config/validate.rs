use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::{types::Config, ConfigError};

/// Wiki database names: lowercase letters, digits and underscores
/// (e.g. `enwiki`, `zh_min_nanwiki`).
static WIKI_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").unwrap());

/// Validate configuration
/// Currently validates:
/// - Mirror URL is http(s)
/// - Wiki identifier is a plain database name
/// - Timeouts are not 0
/// - At least one job is configured
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let url = &config.mirror.url;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::ValidationError(format!(
            "mirror.url must be an http(s) URL, got '{}'",
            url
        )));
    }

    if !WIKI_PATTERN.is_match(&config.mirror.wiki) {
        return Err(ConfigError::ValidationError(format!(
            "mirror.wiki '{}' is not a valid wiki identifier",
            config.mirror.wiki
        )));
    }

    if config.mirror.connect_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "mirror.connect_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.mirror.status_timeout_secs == 0 {
        return Err(ConfigError::ValidationError(
            "mirror.status_timeout_secs cannot be 0".to_string(),
        ));
    }

    if config.download.jobs.is_empty() {
        return Err(ConfigError::ValidationError(
            "download.jobs cannot be empty".to_string(),
        ));
    }

    Ok(())
}
