use super::{AppState, CommandOutcome, View};
use crate::analysis::{AnalysisResponse, PanelKind, Panels, ANALYSIS_ERROR};
use crate::clipboard::Clipboard;
use crate::error::UploadError;
use crate::validate::DropZone;
use std::path::PathBuf;
use tempfile::TempDir;

#[derive(Default)]
struct RecordingClipboard {
    copied: Vec<String>,
    fail: bool,
}

impl Clipboard for RecordingClipboard {
    fn copy(&mut self, text: &str) -> Result<(), arboard::Error> {
        if self.fail {
            return Err(arboard::Error::ClipboardNotSupported);
        }
        self.copied.push(text.to_string());
        Ok(())
    }
}

fn app() -> AppState {
    AppState::new(DropZone::new("Upload", ".pdf,.png,.jpg,.jpeg,.txt", 15.0))
}

fn write_file(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, b"Big news! We launched today.").unwrap();
    path
}

fn response(sentiment: &str) -> AnalysisResponse {
    AnalysisResponse {
        sentiment: Some(sentiment.to_string()),
        improved_post: Some("Rewritten".to_string()),
        ..AnalysisResponse::default()
    }
}

#[test]
fn test_starts_with_placeholders() {
    let app = app();
    assert_eq!(app.panels, Panels::default());
    assert!(!app.loading);
    assert_eq!(app.sections(PanelKind::Rewrite)[0].content, "Your polished post");
}

#[test]
fn test_accepted_file_starts_loading() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "post.txt");
    let mut app = app();

    let ticket = app.select_files(&[path]).expect("file should be accepted");
    assert_eq!(ticket.generation, 1);
    assert_eq!(ticket.file.name, "post.txt");
    assert_eq!(ticket.file.mime_type, "text/plain");
    assert!(app.loading);
    assert_eq!(app.current_file.as_deref(), Some("post.txt"));
}

#[test]
fn test_rejected_file_makes_no_request() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "post.exe");
    let mut app = app();

    assert!(app.select_files(&[path]).is_none());
    assert!(!app.loading);
    assert_eq!(app.generation, 0);
    assert!(app
        .drop_zone
        .error
        .as_deref()
        .unwrap()
        .starts_with("Invalid file type"));
}

#[test]
fn test_no_file_is_silent() {
    let mut app = app();
    assert!(app.select_files(&[]).is_none());
    assert!(app.drop_zone.error.is_none());
    assert!(app.message.is_none());
}

#[test]
fn test_success_replaces_panels() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    let ticket = app.select_files(&[write_file(&dir, "a.png")]).unwrap();

    assert!(app.finish_upload(ticket.generation, Ok(response("positive"))));
    assert!(!app.loading);
    assert_eq!(app.sections(PanelKind::Analysis)[0].content, "positive");
    assert_eq!(app.panels.rewrite, "Rewritten");
}

#[test]
fn test_failure_shows_fixed_warnings() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    let ticket = app.select_files(&[write_file(&dir, "a.png")]).unwrap();

    let err = UploadError::Status {
        status: 500,
        detail: Some("No text found in file".to_string()),
    };
    assert!(app.finish_upload(ticket.generation, Err(err)));
    assert_eq!(app.panels, Panels::error());
    assert_eq!(app.current_text(), ANALYSIS_ERROR);
    assert_eq!(
        app.message.as_deref(),
        Some("Error: service returned 500: No text found in file")
    );
}

#[test]
fn test_stale_response_is_discarded() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    let first = app.select_files(&[write_file(&dir, "first.png")]).unwrap();
    let second = app.select_files(&[write_file(&dir, "second.png")]).unwrap();
    assert_eq!(second.generation, first.generation + 1);

    assert!(app.finish_upload(second.generation, Ok(response("newer"))));
    assert!(!app.finish_upload(first.generation, Ok(response("older"))));
    assert_eq!(app.sections(PanelKind::Analysis)[0].content, "newer");
    assert!(!app.loading);
}

#[test]
fn test_loading_stays_until_latest_completes() {
    let dir = TempDir::new().unwrap();
    let mut app = app();
    let first = app.select_files(&[write_file(&dir, "first.png")]).unwrap();
    let _second = app.select_files(&[write_file(&dir, "second.png")]).unwrap();

    assert!(!app.finish_upload(first.generation, Ok(response("older"))));
    assert!(app.loading);
    assert_eq!(app.panels, Panels::default());
}

#[test]
fn test_panel_navigation_wraps() {
    let mut app = app();
    assert_eq!(app.current_panel, PanelKind::Analysis);
    app.prev_panel();
    assert_eq!(app.current_panel, PanelKind::Rewrite);
    app.next_panel();
    app.next_panel();
    assert_eq!(app.current_panel, PanelKind::Recommendations);
}

#[test]
fn test_extracted_panel_appears_with_text() {
    let mut app = app();
    app.generation = 1;
    let resp = AnalysisResponse {
        extracted_text: Some("raw".to_string()),
        ..AnalysisResponse::default()
    };
    app.finish_upload(1, Ok(resp));
    app.prev_panel();
    assert_eq!(app.current_panel, PanelKind::Extracted);
    assert_eq!(app.current_text(), "raw");

    // A failure drops the extracted panel and moves focus back.
    app.finish_upload(1, Err(UploadError::Status { status: 502, detail: None }));
    assert_eq!(app.current_panel, PanelKind::Analysis);
}

#[test]
fn test_copy_current_panel() {
    let mut app = app();
    let mut clipboard = RecordingClipboard::default();
    app.next_panel();
    app.copy_current(&mut clipboard);
    assert_eq!(
        clipboard.copied,
        vec!["Your recommendations will appear here...".to_string()]
    );
    assert_eq!(app.message.as_deref(), Some("Copied Recommendations"));
}

#[test]
fn test_copy_failure_is_reported() {
    let mut app = app();
    let mut clipboard = RecordingClipboard {
        fail: true,
        ..RecordingClipboard::default()
    };
    app.copy_current(&mut clipboard);
    assert!(app.message.as_deref().unwrap().starts_with("Copy failed"));
}

#[test]
fn test_open_command_queues_upload() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "cmd.pdf");
    let mut app = app();
    let mut clipboard = RecordingClipboard::default();

    app.start_command(&format!("open {}", path.display()));
    assert_eq!(app.current_view, View::Command);
    match app.run_command(&mut clipboard) {
        CommandOutcome::Upload(ticket) => assert_eq!(ticket.file.name, "cmd.pdf"),
        other => panic!("expected upload, got {other:?}"),
    }
    assert_eq!(app.current_view, View::Panels);
    assert!(app.command_buffer.is_empty());
}

#[test]
fn test_other_commands() {
    let mut app = app();
    let mut clipboard = RecordingClipboard::default();

    app.start_command("open");
    assert_eq!(app.run_command(&mut clipboard), CommandOutcome::Continue);
    assert_eq!(app.message.as_deref(), Some("Usage: :open <path>"));

    app.start_command("y");
    assert_eq!(app.run_command(&mut clipboard), CommandOutcome::Continue);
    assert_eq!(clipboard.copied.len(), 1);

    app.start_command("frobnicate");
    app.run_command(&mut clipboard);
    assert_eq!(app.message.as_deref(), Some("Unknown command: frobnicate"));

    app.start_command("q");
    assert_eq!(app.run_command(&mut clipboard), CommandOutcome::Quit);
}

#[test]
fn test_paste_is_a_drop() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "dropped.jpeg");
    let mut app = app();
    let ticket = app
        .handle_paste(&format!("'{}'\n", path.display()))
        .expect("pasted path should be accepted");
    assert_eq!(ticket.file.mime_type, "image/jpeg");
}

#[test]
fn test_paste_keeps_literal_percent_in_name() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sale%20off.png");
    let mut app = app();
    let ticket = app
        .handle_paste(&path.display().to_string())
        .expect("existing file should be accepted");
    assert_eq!(ticket.file.name, "sale%20off.png");
    assert!(app.drop_zone.error.is_none());
}

#[cfg(not(windows))]
#[test]
fn test_single_quoted_paste_keeps_backslash() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "a\\b.png");
    let mut app = app();
    let ticket = app
        .handle_paste(&format!("'{}'", path.display()))
        .expect("quoted path should be taken as written");
    assert_eq!(ticket.file.name, "a\\b.png");
}
