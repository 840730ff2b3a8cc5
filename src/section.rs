//! Section representation for loosely structured analysis text.
//!
//! The analysis service answers with short blobs such as `Sentiment: positive`. A section is one
//! labelled block of such a blob: a capitalised label ending in a colon at the start of a line,
//! followed by everything up to the next label. Sections are recomputed from the panel text on
//! every render, so parsing is a pure function of its input.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

/// Characters allowed after the leading capital, at most.
pub const TITLE_TAIL_MAX: usize = 100;

/// Title used when a blob has content but no recognisable labels.
pub const FALLBACK_TITLE: &str = "Notes";

/// Title used when a label trims down to nothing.
pub const UNTITLED: &str = "Untitled";

static HEADING: LazyLock<Regex> = LazyLock::new(|| {
    let pattern = format!(r"(?m)^([A-Z][A-Za-z0-9_ \t/&+\-]{{1,{TITLE_TAIL_MAX}}}):");
    Regex::new(&pattern).expect("heading pattern is valid")
});

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
/// Titled block of text extracted from a larger response blob.
pub struct Section {
    /// Label text without the trailing colon.
    pub title: String,
    /// Trimmed text following the label, possibly empty.
    pub content: String,
}

impl Section {
    #[must_use]
    /// Build a section from anything string-like.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }
}

#[must_use]
/// Split text into titled sections in order of appearance.
///
/// Whitespace-only input yields no sections. Input without any label yields a single
/// [`FALLBACK_TITLE`] section holding the trimmed text. Text before the first label is not part
/// of any section.
pub fn parse_sections(text: &str) -> Vec<Section> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // (title, start of the label line, end of the colon)
    let labels: Vec<(&str, usize, usize)> = HEADING
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let title = caps.get(1)?;
            Some((title.as_str(), whole.start(), whole.end()))
        })
        .collect();

    if labels.is_empty() {
        return vec![Section::new(FALLBACK_TITLE, trimmed)];
    }

    labels
        .iter()
        .enumerate()
        .map(|(i, &(title, _, body_start))| {
            let body_end = labels.get(i + 1).map_or(text.len(), |next| next.1);
            let title = match title.trim() {
                "" => UNTITLED,
                t => t,
            };
            Section::new(title, text[body_start..body_end].trim())
        })
        .collect()
}

#[must_use]
/// Render sections back into `Title: content` lines.
///
/// This is the text the parser reads best, and what a copy of parsed sections looks like.
pub fn render_sections(sections: &[Section]) -> String {
    sections
        .iter()
        .map(|s| {
            if s.content.is_empty() {
                format!("{}:", s.title)
            } else {
                format!("{}: {}", s.title, s.content)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
#[path = "tests/section.rs"]
mod tests;
