//! Turning what the user typed, pasted or passed on the command line into file paths.
//!
//! Terminals deliver a dropped file as a bracketed paste of its path. Depending on the terminal
//! that path may be quoted, shell-escaped, or a `file://` URL, and several files may arrive
//! separated by newlines.

use std::path::PathBuf;

#[must_use]
/// Paths contained in a paste or typed argument, in order.
pub fn parse_dropped_paths(text: &str) -> Vec<PathBuf> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(clean_path)
        .collect()
}

fn clean_path(raw: &str) -> PathBuf {
    if let Some(inner) = strip_quotes(raw, '\'') {
        return literal_or_url(inner);
    }
    if let Some(inner) = strip_quotes(raw, '"') {
        return literal_or_url(inner);
    }
    if raw.starts_with("file://") {
        return literal_or_url(raw);
    }
    if cfg!(windows) {
        PathBuf::from(raw)
    } else {
        PathBuf::from(unescape_shell(raw))
    }
}

/// `file://` URLs are percent-decoded; anything else is taken as written.
fn literal_or_url(s: &str) -> PathBuf {
    if s.starts_with("file://") {
        if let Some(path) = url::Url::parse(s).ok().and_then(|u| u.to_file_path().ok()) {
            return path;
        }
    }
    PathBuf::from(s)
}

fn strip_quotes(s: &str, quote: char) -> Option<&str> {
    s.strip_prefix(quote)?.strip_suffix(quote)
}

/// Undo backslash escapes such as `my\ file.pdf`.
fn unescape_shell(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
#[path = "tests/input.rs"]
mod tests;
