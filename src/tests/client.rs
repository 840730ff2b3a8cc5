use super::{AnalysisClient, Analyzer};
use crate::analysis::Panels;
use crate::app_state::AppState;
use crate::error::UploadError;
use crate::validate::{DropZone, FileMeta};
use std::io::Read;
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tempfile::TempDir;
use tiny_http::{Header, Response, Server};

/// Serve one request with a canned answer, handing back what was received.
fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<(String, String)>) {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let handle = thread::spawn(move || {
        let mut request = server.recv().unwrap();
        let mut received = String::new();
        request.as_reader().read_to_string(&mut received).unwrap();
        let content_type = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Content-Type"))
            .map(|h| h.value.to_string())
            .unwrap_or_default();
        let header = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap();
        let response = Response::from_string(body)
            .with_status_code(status)
            .with_header(header);
        request.respond(response).unwrap();
        (content_type, received)
    });
    (format!("http://127.0.0.1:{port}/analyze"), handle)
}

fn sample_file(dir: &TempDir) -> FileMeta {
    let path = dir.path().join("post.txt");
    std::fs::write(&path, "Big news! We launched today.").unwrap();
    FileMeta::from_path(&path).unwrap()
}

fn client(endpoint: &str) -> AnalysisClient {
    AnalysisClient::new(endpoint, Duration::from_secs(10)).unwrap()
}

#[test]
fn test_upload_sends_multipart_file_field() {
    let dir = TempDir::new().unwrap();
    let file = sample_file(&dir);
    let (endpoint, handle) = serve_once(
        200,
        r##"{"extracted_text":"Big news!","analysis":{"sentiment":"positive","readability":"easy","issues":[],"suggestions":{"improved_post":"Better post","hashtags":["#news"],"call-to-action":"Follow us"}}}"##,
    );

    let resp = client(&endpoint).analyze(&file).unwrap();
    let (content_type, received) = handle.join().unwrap();

    assert!(content_type.starts_with("multipart/form-data"));
    assert!(received.contains(r#"name="file""#));
    assert!(received.contains(r#"filename="post.txt""#));
    assert!(received.contains("Content-Type: text/plain"));
    assert!(received.contains("Big news! We launched today."));

    assert_eq!(resp.sentiment.as_deref(), Some("positive"));
    assert_eq!(resp.improved_post.as_deref(), Some("Better post"));
    assert_eq!(resp.hashtags, vec!["#news"]);
    assert_eq!(resp.extracted_text.as_deref(), Some("Big news!"));
}

#[test]
fn test_error_status_carries_server_message() {
    let dir = TempDir::new().unwrap();
    let file = sample_file(&dir);
    let (endpoint, handle) = serve_once(400, r#"{"error":"Unsupported file type"}"#);

    let err = client(&endpoint).analyze(&file).unwrap_err();
    handle.join().unwrap();

    match err {
        UploadError::Status { status, detail } => {
            assert_eq!(status, 400);
            assert_eq!(detail.as_deref(), Some("Unsupported file type"));
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[test]
fn test_non_json_body_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file = sample_file(&dir);
    let (endpoint, handle) = serve_once(200, "<html>oops</html>");

    let err = client(&endpoint).analyze(&file).unwrap_err();
    handle.join().unwrap();
    assert!(matches!(err, UploadError::Decode(_)));
}

#[test]
fn test_unreachable_service() {
    let dir = TempDir::new().unwrap();
    let file = sample_file(&dir);
    // Bind then drop to get a port nothing listens on.
    let port = {
        let server = Server::http("127.0.0.1:0").unwrap();
        server.server_addr().to_ip().unwrap().port()
    };
    let err = client(&format!("http://127.0.0.1:{port}/analyze"))
        .analyze(&file)
        .unwrap_err();
    assert!(matches!(err, UploadError::Transport(_)));
}

#[test]
fn test_failed_upload_shows_warning_panels() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("post.png");
    std::fs::write(&path, [0u8; 32]).unwrap();
    let (endpoint, handle) = serve_once(500, r#"{"error":"Failed to analyze: boom"}"#);

    let mut app = AppState::new(DropZone::new("Upload", ".pdf,.png", 15.0));
    let ticket = app.select_files(&[path]).unwrap();
    let result = client(&endpoint).analyze(&ticket.file);
    handle.join().unwrap();

    assert!(app.finish_upload(ticket.generation, result));
    assert_eq!(app.panels, Panels::error());
    assert_eq!(app.panels.analysis, "⚠️ Error fetching analysis.");
    assert_eq!(app.panels.recommendations, "⚠️ Error fetching recommendations.");
    assert_eq!(app.panels.rewrite, "⚠️ Error fetching rewrite.");
    assert!(!app.loading);
}
