//! Error types surfaced to the user.

/// Reasons a selected file is refused before upload.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// Neither the extension nor the declared MIME type is on the allow-list.
    #[error("Invalid file type. Allowed: {allowed}")]
    InvalidType {
        /// The allow-list as configured.
        allowed: String,
    },
    /// File exceeds the configured size limit.
    #[error("File too large. Max {max_size_mb} MB.")]
    TooLarge {
        /// Configured limit in megabytes.
        max_size_mb: f64,
    },
}

/// Failures talking to the analysis service.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The file could not be opened for the request body.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the file being uploaded.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// Request could not be built or sent, or the body could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The service answered with a non-success status.
    #[error("service returned {status}{}", detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided `error` message, when the body carried one.
        detail: Option<String>,
    },
    /// The body was not JSON.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}
