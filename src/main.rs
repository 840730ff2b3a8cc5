//! postscan: upload a post, read the analysis.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use postscan::analysis::AnalysisResponse;
use postscan::app_state::{self, AppState, CommandOutcome, UploadTicket};
use postscan::client::{AnalysisClient, Analyzer};
use postscan::clipboard::SystemClipboard;
use postscan::error::UploadError;
use postscan::report::{self, Report};
use postscan::validate::DropZone;
use postscan::{config, telemetry, ui};
use ratatui::crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

/// How often the UI wakes to check for finished uploads.
const TICK: Duration = Duration::from_millis(100);

type Completion = (u64, Result<AnalysisResponse, UploadError>);

#[derive(Parser)]
#[command(name = "postscan")]
#[command(about = "Analyze social media content from the terminal", long_about = None)]
struct Args {
    /// File to analyze on startup
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// URL of the analysis endpoint
    #[arg(long, env = "POSTSCAN_ENDPOINT")]
    endpoint: Option<String>,

    /// Allowed file extensions and MIME patterns, comma-separated
    #[arg(long, value_name = "LIST")]
    accept: Option<String>,

    /// Largest accepted file in megabytes
    #[arg(long, value_name = "MB")]
    max_size_mb: Option<f64>,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Write logs to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<String>,

    /// Print the analysis of FILE instead of opening the interface
    #[arg(long, requires = "file")]
    print: bool,

    /// With --print, emit the sections as JSON
    #[arg(long, requires = "print")]
    json: bool,
}

fn main() -> io::Result<ExitCode> {
    let args = Args::parse();
    let mut cfg = config::Config::load();

    // Override config with command line args
    if let Some(endpoint) = args.endpoint {
        cfg.endpoint = endpoint;
    }
    if let Some(accept) = args.accept {
        cfg.accept = accept;
    }
    if let Some(max_size_mb) = args.max_size_mb {
        cfg.max_size_mb = max_size_mb;
    }
    if let Some(timeout) = args.timeout {
        cfg.timeout_secs = timeout;
    }
    if args.log_file.is_some() {
        cfg.log_file = args.log_file;
    }

    if args.print {
        telemetry::init_stderr()?;
    } else if let Some(ref log_file) = cfg.log_file {
        telemetry::init_file(Path::new(log_file))?;
    }

    let client = AnalysisClient::new(cfg.endpoint.clone(), Duration::from_secs(cfg.timeout_secs))
        .map_err(io::Error::other)?;
    tracing::info!(endpoint = client.endpoint(), "Analysis client ready");

    let state = AppState::new(DropZone::new("Upload", cfg.accept.clone(), cfg.max_size_mb));

    match (args.print, args.file) {
        (true, Some(file)) => run_headless(state, &client, &file, args.json),
        (_, file) => {
            run_tui(state, Arc::new(client), file)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run_headless(
    mut app: AppState,
    analyzer: &dyn Analyzer,
    file: &Path,
    json: bool,
) -> io::Result<ExitCode> {
    let outcome = report::run_once(&mut app, analyzer, file);
    let failed = outcome.is_failure();
    match outcome {
        Report::Rejected(reason) => eprintln!("{reason}"),
        Report::Uploaded { panels, message, .. } => {
            let rendered = if json {
                report::render_json(&panels).map_err(io::Error::other)?
            } else {
                report::render_text(&panels)
            };
            writeln!(io::stdout().lock(), "{}", rendered.trim_end())?;
            if let Some(msg) = message {
                eprintln!("{msg}");
            }
        }
    }
    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

/// Runs uploads off the UI thread and reports back over a channel.
struct Uploader {
    analyzer: Arc<dyn Analyzer>,
    tx: mpsc::Sender<Completion>,
}

impl Uploader {
    fn spawn(&self, ticket: UploadTicket) {
        let analyzer = Arc::clone(&self.analyzer);
        let tx = self.tx.clone();
        thread::spawn(move || {
            let result = analyzer.analyze(&ticket.file);
            // The receiver is gone only when the UI has exited.
            let _ = tx.send((ticket.generation, result));
        });
    }
}

fn run_tui(
    mut app: AppState,
    analyzer: Arc<dyn Analyzer>,
    initial: Option<PathBuf>,
) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let uploader = Uploader { analyzer, tx };
    if let Some(path) = initial {
        if let Some(ticket) = app.select_files(&[path]) {
            uploader.spawn(ticket);
        }
    }

    let mut clipboard = SystemClipboard::default();
    let result = run_app(&mut terminal, &mut app, &uploader, &rx, &mut clipboard);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut AppState,
    uploader: &Uploader,
    rx: &mpsc::Receiver<Completion>,
    clipboard: &mut SystemClipboard,
) -> io::Result<()> {
    loop {
        while let Ok((generation, result)) = rx.try_recv() {
            app.finish_upload(generation, result);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }

        match event::read()? {
            Event::Paste(text) => match app.current_view {
                app_state::View::Command => app.command_buffer.push_str(text.trim()),
                app_state::View::Panels => {
                    if let Some(ticket) = app.handle_paste(&text) {
                        uploader.spawn(ticket);
                    }
                }
            },
            Event::Key(key) if key.kind == KeyEventKind::Press => match app.current_view {
                app_state::View::Panels => match key.code {
                    KeyCode::Char('q') => return Ok(()),
                    KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_panel(),
                    KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.prev_panel(),
                    KeyCode::Down | KeyCode::Char('j') => app.scroll_down(),
                    KeyCode::Up | KeyCode::Char('k') => app.scroll_up(),
                    KeyCode::Char('y' | 'c') => app.copy_current(clipboard),
                    KeyCode::Char('o') => app.start_command("open "),
                    KeyCode::Char(':') => app.start_command(""),
                    _ => {}
                },
                app_state::View::Command => match key.code {
                    KeyCode::Char(c) => {
                        app.command_buffer.push(c);
                    }
                    KeyCode::Backspace => {
                        app.command_buffer.pop();
                    }
                    KeyCode::Enter => match app.run_command(clipboard) {
                        CommandOutcome::Quit => return Ok(()),
                        CommandOutcome::Upload(ticket) => uploader.spawn(ticket),
                        CommandOutcome::Continue => {}
                    },
                    KeyCode::Esc => app.cancel_command(),
                    _ => {}
                },
            },
            _ => {}
        }
    }
}
