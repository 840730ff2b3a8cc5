use super::{Config, DEFAULT_ACCEPT, DEFAULT_ENDPOINT};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_missing_file_uses_defaults() {
    let config = Config::load_from(std::path::Path::new("/nonexistent/postscan.toml"));
    assert_eq!(config, Config::default());
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.accept, DEFAULT_ACCEPT);
}

#[test]
fn test_full_file_overrides_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "endpoint = \"https://analyzer.example.com/analyze\"\naccept = \".pdf\"\nmax_size_mb = 5.0\ntimeout_secs = 30\nlog_file = \"postscan.log\""
    )
    .unwrap();

    let config = Config::load_from(file.path());
    assert_eq!(config.endpoint, "https://analyzer.example.com/analyze");
    assert_eq!(config.accept, ".pdf");
    assert!((config.max_size_mb - 5.0).abs() < f64::EPSILON);
    assert_eq!(config.timeout_secs, 30);
    assert_eq!(config.log_file.as_deref(), Some("postscan.log"));
}

#[test]
fn test_invalid_file_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "endpoint = [not toml").unwrap();
    assert_eq!(Config::load_from(file.path()), Config::default());
}
