//! Configuration to acknowledge user preferences as well as set defaults.
//!
//! Specifically, we try to find a postscan.toml, and if present we load settings from there.
//! This provides the service endpoint, the upload allow-list and limits, and where to log.
//! Command-line flags override anything set here.

use facet::Facet;
use std::fs;
use std::path::Path;

/// Service used when nothing else is configured.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000/analyze";
/// Upload allow-list used when nothing else is configured.
pub const DEFAULT_ACCEPT: &str = ".pdf,.png,.jpg,.jpeg,.txt";
/// Largest upload in megabytes when nothing else is configured.
pub const DEFAULT_MAX_SIZE_MB: f64 = 15.0;
/// Request timeout in seconds when nothing else is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "postscan.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// User preferences loaded from postscan.toml or falling back to defaults.
pub struct Config {
    #[facet(default = DEFAULT_ENDPOINT.to_string())]
    /// Full URL of the `/analyze` endpoint.
    pub endpoint: String,
    #[facet(default = DEFAULT_ACCEPT.to_string())]
    /// Comma-separated extensions and MIME patterns accepted for upload.
    pub accept: String,
    #[facet(default = DEFAULT_MAX_SIZE_MB)]
    /// Largest accepted file in megabytes.
    pub max_size_mb: f64,
    #[facet(default = DEFAULT_TIMEOUT_SECS)]
    /// Seconds to wait for the service before giving up.
    pub timeout_secs: u64,
    #[facet(default)]
    /// File to write logs to; logging is off in the TUI without one.
    pub log_file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            accept: DEFAULT_ACCEPT.to_string(),
            max_size_mb: DEFAULT_MAX_SIZE_MB,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from postscan.toml in the working directory if present.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults if it is missing or invalid.
    pub fn load_from(path: &Path) -> Self {
        if let Ok(contents) = fs::read_to_string(path) {
            if let Ok(config) = facet_toml::from_str::<Self>(&contents) {
                return config;
            }
        }
        Self::default()
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
