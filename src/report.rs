//! One-shot analysis for `--print`: validate, upload, and render the panels as text or JSON.

use crate::app_state::AppState;
use crate::client::Analyzer;
use crate::section::Section;
use serde::Serialize;
use std::path::Path;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// One panel of headless output.
pub struct PanelReport {
    /// Panel heading, e.g. `Analysis`.
    pub panel: &'static str,
    /// Raw panel text.
    pub text: String,
    /// The text split into sections.
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Result of analysing a single file without the interface.
pub enum Report {
    /// The file never reached the service; carries the rejection message.
    Rejected(String),
    /// The upload ran. `failed` is set when the panels hold the warning strings.
    Uploaded {
        /// Every visible panel, in display order.
        panels: Vec<PanelReport>,
        /// Whether the upload failed.
        failed: bool,
        /// Status line text, if any.
        message: Option<String>,
    },
}

impl Report {
    #[must_use]
    /// Whether the run should exit non-zero.
    pub fn is_failure(&self) -> bool {
        match self {
            Self::Rejected(_) => true,
            Self::Uploaded { failed, .. } => *failed,
        }
    }
}

#[must_use]
/// Validate `file`, upload it synchronously and collect the resulting panels.
pub fn run_once(app: &mut AppState, analyzer: &dyn Analyzer, file: &Path) -> Report {
    let Some(ticket) = app.select_files(&[file.to_path_buf()]) else {
        let reason = app.drop_zone.error.as_deref().unwrap_or("No file selected");
        return Report::Rejected(reason.to_string());
    };

    let result = analyzer.analyze(&ticket.file);
    let failed = result.is_err();
    app.finish_upload(ticket.generation, result);

    Report::Uploaded {
        panels: panel_reports(app),
        failed,
        message: app.message.clone(),
    }
}

#[must_use]
/// Every visible panel with its text and sections.
pub fn panel_reports(app: &AppState) -> Vec<PanelReport> {
    app.panels
        .kinds()
        .into_iter()
        .map(|kind| PanelReport {
            panel: kind.heading(),
            text: app.panels.text(kind).to_string(),
            sections: app.sections(kind),
        })
        .collect()
}

#[must_use]
/// Plain text: a `## Heading` per panel, then each section's title and content.
pub fn render_text(panels: &[PanelReport]) -> String {
    let mut out = String::new();
    for panel in panels {
        out.push_str("## ");
        out.push_str(panel.panel);
        out.push('\n');
        for section in &panel.sections {
            out.push('\n');
            out.push_str(&section.title);
            out.push('\n');
            out.push_str(&section.content);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

/// Pretty-printed JSON array of `{panel, text, sections}`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_json(panels: &[PanelReport]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(panels)
}

#[cfg(test)]
#[path = "tests/report.rs"]
mod tests;
