//! The analysis service's response and the panel text built from it.
//!
//! The service forwards language-model output, so field shapes are not guaranteed. Every field is
//! decoded on its own from a [`serde_json::Value`]: a missing or wrong-typed field falls back to
//! its placeholder without affecting the others.

use serde_json::Value;

/// Initial text of the analysis panel.
pub const ANALYSIS_PLACEHOLDER: &str = "Your post analysis will appear here...";
/// Initial text of the recommendations panel.
pub const RECOMMENDATIONS_PLACEHOLDER: &str = "Your recommendations will appear here...";
/// Initial text of the rewrite panel.
pub const REWRITE_PLACEHOLDER: &str = "Your polished post";

/// Analysis panel text after a failed request.
pub const ANALYSIS_ERROR: &str = "⚠️ Error fetching analysis.";
/// Recommendations panel text after a failed request.
pub const RECOMMENDATIONS_ERROR: &str = "⚠️ Error fetching recommendations.";
/// Rewrite panel text after a failed request.
pub const REWRITE_ERROR: &str = "⚠️ Error fetching rewrite.";

const NOT_AVAILABLE: &str = "N/A";
const NO_ISSUES: &str = "None";
const NO_REWRITE: &str = "No rewrite returned.";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
/// Decoded `/analyze` payload.
pub struct AnalysisResponse {
    /// Text the service extracted from the upload, when echoed back.
    pub extracted_text: Option<String>,
    /// Overall tone, e.g. `positive`.
    pub sentiment: Option<String>,
    /// Reading difficulty, e.g. `easy`.
    pub readability: Option<String>,
    /// Problems found with the post.
    pub issues: Vec<String>,
    /// Suggested hashtags.
    pub hashtags: Vec<String>,
    /// Suggested call to action.
    pub call_to_action: Option<String>,
    /// Rewritten post.
    pub improved_post: Option<String>,
}

impl AnalysisResponse {
    #[must_use]
    /// Pick fields out of a response body, tolerating any shape.
    pub fn from_value(body: &Value) -> Self {
        let analysis = body.get("analysis").unwrap_or(&Value::Null);
        let suggestions = analysis.get("suggestions").unwrap_or(&Value::Null);
        Self {
            extracted_text: text_field(body.get("extracted_text")),
            sentiment: text_field(analysis.get("sentiment")),
            readability: text_field(analysis.get("readability")),
            issues: list_field(analysis.get("issues")),
            hashtags: list_field(suggestions.get("hashtags")),
            call_to_action: text_field(suggestions.get("call-to-action")),
            improved_post: text_field(suggestions.get("improved_post")),
        }
    }
}

/// Scalar as display text; empty strings count as missing.
fn text_field(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        v @ (Value::Number(_) | Value::Bool(_)) => Some(v.to_string()),
        _ => None,
    }
}

/// Array of scalars as display text; anything else is an empty list.
fn list_field(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(|v| text_field(Some(v))).collect(),
        _ => Vec::new(),
    }
}

fn join_or(items: &[String], sep: &str, fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(sep)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Which result panel has focus.
pub enum PanelKind {
    /// Sentiment, readability and issues.
    Analysis,
    /// Hashtags and call to action.
    Recommendations,
    /// Rewritten post.
    Rewrite,
    /// Text the service extracted from the upload.
    Extracted,
}

impl PanelKind {
    #[must_use]
    /// Heading drawn above the panel.
    pub fn heading(self) -> &'static str {
        match self {
            Self::Analysis => "Analysis",
            Self::Recommendations => "Recommendations",
            Self::Rewrite => "AI Rewrite",
            Self::Extracted => "Extracted Text",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
/// Text of every result panel, replaced as a whole on each response.
pub struct Panels {
    /// Analysis panel text.
    pub analysis: String,
    /// Recommendations panel text.
    pub recommendations: String,
    /// Rewrite panel text.
    pub rewrite: String,
    /// Extracted text panel, shown only when present.
    pub extracted: Option<String>,
}

impl Default for Panels {
    fn default() -> Self {
        Self {
            analysis: ANALYSIS_PLACEHOLDER.to_string(),
            recommendations: RECOMMENDATIONS_PLACEHOLDER.to_string(),
            rewrite: REWRITE_PLACEHOLDER.to_string(),
            extracted: None,
        }
    }
}

impl Panels {
    #[must_use]
    /// Interpolate response fields into panel text.
    pub fn from_response(resp: &AnalysisResponse) -> Self {
        let or_na = |field: Option<&str>| field.unwrap_or(NOT_AVAILABLE).to_string();
        let analysis = format!(
            "\nSentiment: {}\nReadability: {}\nIssues: {}\n",
            or_na(resp.sentiment.as_deref()),
            or_na(resp.readability.as_deref()),
            join_or(&resp.issues, ", ", NO_ISSUES),
        );
        let recommendations = format!(
            "\nHashtags: {}\nCall-to-Action: {}\n",
            join_or(&resp.hashtags, " ", NOT_AVAILABLE),
            or_na(resp.call_to_action.as_deref()),
        );
        Self {
            analysis,
            recommendations,
            rewrite: resp
                .improved_post
                .clone()
                .unwrap_or_else(|| NO_REWRITE.to_string()),
            extracted: resp.extracted_text.clone(),
        }
    }

    #[must_use]
    /// Fixed warnings shown when the request failed.
    pub fn error() -> Self {
        Self {
            analysis: ANALYSIS_ERROR.to_string(),
            recommendations: RECOMMENDATIONS_ERROR.to_string(),
            rewrite: REWRITE_ERROR.to_string(),
            extracted: None,
        }
    }

    #[must_use]
    /// Panels currently worth showing, in display order.
    pub fn kinds(&self) -> Vec<PanelKind> {
        let mut kinds = vec![
            PanelKind::Analysis,
            PanelKind::Recommendations,
            PanelKind::Rewrite,
        ];
        if self.extracted.is_some() {
            kinds.push(PanelKind::Extracted);
        }
        kinds
    }

    #[must_use]
    /// Raw text of one panel, as copied to the clipboard.
    pub fn text(&self, kind: PanelKind) -> &str {
        match kind {
            PanelKind::Analysis => &self.analysis,
            PanelKind::Recommendations => &self.recommendations,
            PanelKind::Rewrite => &self.rewrite,
            PanelKind::Extracted => self.extracted.as_deref().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
#[path = "tests/analysis.rs"]
mod tests;
