//! File gating before upload.
//!
//! Only metadata is inspected here: the file name, the MIME type it declares, and its size. The
//! allow-list mixes extension tokens (`.pdf`) with MIME fragments (`image/*`) in one
//! comma-separated string, the same shape as an HTML `accept` attribute.

use crate::error::ValidationError;
use std::path::{Path, PathBuf};
use std::{fs, io};

/// Bytes per megabyte for the size limit.
const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

#[derive(Clone, Debug, PartialEq)]
/// The properties of a file the validator is allowed to look at.
pub struct FileMeta {
    /// Where the file lives on disk.
    pub path: PathBuf,
    /// File name as shown to the user and sent in the upload.
    pub name: String,
    /// Declared MIME type, derived from the extension.
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileMeta {
    /// Stat a file without reading it.
    ///
    /// # Errors
    ///
    /// Returns an error if the path does not exist or is not a regular file.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a file", path.display()),
            ));
        }
        let name = path
            .file_name()
            .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
        Ok(Self {
            path: path.to_path_buf(),
            mime_type: mime_for_name(&name).to_string(),
            name,
            size: metadata.len(),
        })
    }
}

#[must_use]
/// MIME type a browser would declare for a file with this name.
pub fn mime_for_name(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Parsed allow-list.
pub struct AcceptList {
    /// Extension tokens including the leading dot, lower-cased.
    pub extensions: Vec<String>,
    /// MIME fragments with `*` removed, lower-cased.
    pub mime_fragments: Vec<String>,
}

impl AcceptList {
    #[must_use]
    /// Split a comma-separated `accept` string into extension and MIME tokens.
    pub fn parse(accept: &str) -> Self {
        let mut list = Self::default();
        for token in accept.split(',').map(|t| t.trim().to_lowercase()) {
            if token.is_empty() {
                continue;
            }
            if token.starts_with('.') {
                list.extensions.push(token);
            } else {
                list.mime_fragments.push(token.replace('*', ""));
            }
        }
        list
    }

    #[must_use]
    /// An empty list accepts everything.
    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty() && self.mime_fragments.is_empty()
    }

    #[must_use]
    /// Whether the file's name or declared type is allowed.
    pub fn allows(&self, file: &FileMeta) -> bool {
        if self.is_empty() {
            return true;
        }
        let name = file.name.to_lowercase();
        let mime = file.mime_type.to_lowercase();
        self.extensions.iter().any(|ext| name.ends_with(ext))
            || self.mime_fragments.iter().any(|frag| mime.contains(frag))
    }
}

/// Check a file against the allow-list and size limit.
///
/// Type is checked first; a file that fails both reports the type error.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidType`] or [`ValidationError::TooLarge`].
pub fn validate(file: &FileMeta, accept: &str, max_size_mb: f64) -> Result<(), ValidationError> {
    if !AcceptList::parse(accept).allows(file) {
        return Err(ValidationError::InvalidType {
            allowed: accept.to_string(),
        });
    }
    #[allow(clippy::cast_precision_loss)]
    let size = file.size as f64;
    if size > max_size_mb * BYTES_PER_MB {
        return Err(ValidationError::TooLarge { max_size_mb });
    }
    Ok(())
}

/// Upload target holding the allow-list, the size limit and the last rejection.
pub struct DropZone {
    /// Label shown in the drop zone border.
    pub label: String,
    /// Comma-separated allow-list; empty allows every type.
    pub accept: String,
    /// Largest accepted file in megabytes.
    pub max_size_mb: f64,
    /// Message from the last rejected file, cleared on each new attempt.
    pub error: Option<String>,
}

impl DropZone {
    #[must_use]
    /// Drop zone with the given allow-list and limit.
    pub fn new(label: impl Into<String>, accept: impl Into<String>, max_size_mb: f64) -> Self {
        Self {
            label: label.into(),
            accept: accept.into(),
            max_size_mb,
            error: None,
        }
    }

    /// Validate a single file, recording the rejection message.
    pub fn check(&mut self, file: &FileMeta) -> bool {
        self.error = None;
        match validate(file, &self.accept, self.max_size_mb) {
            Ok(()) => true,
            Err(e) => {
                tracing::info!(file = %file.name, reason = %e, "File rejected");
                self.error = Some(e.to_string());
                false
            }
        }
    }

    /// Take the first of `files`, validate it, and pass it on if accepted.
    ///
    /// An empty selection clears any earlier rejection and returns `None`. A path that cannot be stat'ed is
    /// reported like any other rejection.
    pub fn handle_files<R>(
        &mut self,
        files: &[PathBuf],
        on_file_selected: impl FnOnce(FileMeta) -> R,
    ) -> Option<R> {
        self.error = None;
        let path = files.first()?;
        let file = match FileMeta::from_path(path) {
            Ok(file) => file,
            Err(e) => {
                self.error = Some(format!("Cannot open {}: {e}", path.display()));
                return None;
            }
        };
        if !self.check(&file) {
            return None;
        }
        Some(on_file_selected(file))
    }
}

#[cfg(test)]
#[path = "tests/validate.rs"]
mod tests;
