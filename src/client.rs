//! Upload of a validated file to the analysis service.
//!
//! The request is a multipart `POST` with a single `file` field. Any non-success status is an
//! error; a success body must be JSON but its fields are decoded leniently by
//! [`AnalysisResponse::from_value`].

use crate::analysis::AnalysisResponse;
use crate::error::UploadError;
use crate::validate::FileMeta;
use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;
use serde_json::Value;
use std::time::Duration;

/// Name of the multipart field carrying the file.
pub const FILE_FIELD: &str = "file";

/// Something that can turn an uploaded file into an analysis.
pub trait Analyzer: Send + Sync {
    /// Upload `file` and decode the service's answer.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the request fails, the service answers
    /// with a non-success status, or the body is not JSON.
    fn analyze(&self, file: &FileMeta) -> Result<AnalysisResponse, UploadError>;
}

/// HTTP client for a single configured `/analyze` endpoint.
pub struct AnalysisClient {
    endpoint: String,
    http: Client,
}

impl AnalysisClient {
    /// Build a client for `endpoint` with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, UploadError> {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("postscan/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            endpoint: endpoint.into(),
            http,
        })
    }

    #[must_use]
    /// The URL uploads are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Analyzer for AnalysisClient {
    fn analyze(&self, file: &FileMeta) -> Result<AnalysisResponse, UploadError> {
        let part = Part::file(&file.path)
            .map_err(|source| UploadError::Read {
                path: file.path.display().to_string(),
                source,
            })?
            .file_name(file.name.clone())
            .mime_str(&file.mime_type)?;
        let form = Form::new().part(FILE_FIELD, part);

        tracing::info!(endpoint = %self.endpoint, file = %file.name, size = file.size, "Uploading");
        let response = self.http.post(&self.endpoint).multipart(form).send()?;
        let status = response.status();
        let body = response.text()?;

        if !status.is_success() {
            let detail = error_detail(&body);
            tracing::error!(status = status.as_u16(), detail = ?detail, "Analysis request failed");
            return Err(UploadError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        let value: Value = serde_json::from_str(&body)?;
        tracing::info!(file = %file.name, "Analysis received");
        Ok(AnalysisResponse::from_value(&value))
    }
}

/// The service reports failures as `{"error": "..."}`.
fn error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value.get("error")?.as_str().map(str::to_owned)
}

#[cfg(test)]
#[path = "tests/client.rs"]
mod tests;
