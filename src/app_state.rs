//! The state record behind the terminal UI.
//!
//! The event loop owns a single `AppState` and is the only thing that mutates it. Panel text is
//! never edited in place: each response (or failure) replaces the whole [`Panels`] value, and the
//! sections drawn from it are recomputed on every frame.
//!
//! Uploads run off the UI thread. Every accepted file is stamped with a generation number, and
//! only the completion carrying the latest generation is applied. A slow answer for an earlier
//! file therefore never overwrites the panels for a newer one.

use crate::analysis::{AnalysisResponse, PanelKind, Panels};
use crate::clipboard::Clipboard;
use crate::error::UploadError;
use crate::input;
use crate::section::{parse_sections, Section};
use crate::validate::{DropZone, FileMeta};
use std::path::PathBuf;

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
/// Determines which UI screen renders and how input is interpreted.
pub enum View {
    /// Result panels with navigation keys active.
    Panels,
    /// Captures vim-style command input after ':' keystroke.
    Command,
}

#[derive(Debug, Clone, PartialEq)]
/// An accepted file waiting to be sent, tagged with its upload generation.
pub struct UploadTicket {
    /// Generation the completion must carry to be applied.
    pub generation: u64,
    /// The validated file.
    pub file: FileMeta,
}

#[derive(Debug, Clone, PartialEq)]
/// What the event loop should do after a command is entered.
pub enum CommandOutcome {
    /// Keep running.
    Continue,
    /// Leave the application.
    Quit,
    /// Start uploading a file.
    Upload(UploadTicket),
}

/// Single source of truth for the UI.
pub struct AppState {
    /// Text of every result panel.
    pub panels: Panels,
    /// Allow-list, size limit and last rejection.
    pub drop_zone: DropZone,
    /// Set while the latest upload is in flight.
    pub loading: bool,
    /// Number of uploads started so far; the latest one owns the panels.
    pub generation: u64,
    /// Active UI screen determining input handling.
    pub current_view: View,
    /// Panel with focus for scrolling and copying.
    pub current_panel: PanelKind,
    /// Vertical scroll offset of the focused panel.
    pub scroll: u16,
    /// Accumulates vim-style command input after ':' is pressed.
    pub command_buffer: String,
    /// Status feedback displayed in the help bar.
    pub message: Option<String>,
    /// Name of the file whose analysis is (or will be) shown.
    pub current_file: Option<String>,
}

impl AppState {
    #[must_use]
    /// Fresh state with placeholder panels.
    pub fn new(drop_zone: DropZone) -> Self {
        Self {
            panels: Panels::default(),
            drop_zone,
            loading: false,
            generation: 0,
            current_view: View::Panels,
            current_panel: PanelKind::Analysis,
            scroll: 0,
            command_buffer: String::new(),
            message: None,
            current_file: None,
        }
    }

    /// Validate the first of `files` and, if accepted, start a new upload generation.
    ///
    /// Returns `None` when nothing was selected or the file was rejected; the rejection reason
    /// is left on the drop zone and no request is made.
    pub fn select_files(&mut self, files: &[PathBuf]) -> Option<UploadTicket> {
        self.message = None;
        let file = self.drop_zone.handle_files(files, |file| file)?;
        self.generation += 1;
        self.loading = true;
        self.current_file = Some(file.name.clone());
        tracing::info!(generation = self.generation, file = %file.name, "Upload queued");
        Some(UploadTicket {
            generation: self.generation,
            file,
        })
    }

    /// Treat pasted text as dropped files.
    pub fn handle_paste(&mut self, text: &str) -> Option<UploadTicket> {
        self.select_files(&input::parse_dropped_paths(text))
    }

    /// Apply a finished upload if it belongs to the latest generation.
    ///
    /// Returns whether the panels were replaced.
    pub fn finish_upload(
        &mut self,
        generation: u64,
        result: Result<AnalysisResponse, UploadError>,
    ) -> bool {
        if generation != self.generation {
            tracing::debug!(generation, latest = self.generation, "Discarding stale response");
            return false;
        }
        self.loading = false;
        self.scroll = 0;
        match result {
            Ok(resp) => {
                self.panels = Panels::from_response(&resp);
                self.message = None;
            }
            Err(e) => {
                tracing::error!(error = %e, generation, "Upload failed");
                self.panels = Panels::error();
                self.message = Some(format!("Error: {e}"));
            }
        }
        if !self.panels.kinds().contains(&self.current_panel) {
            self.current_panel = PanelKind::Analysis;
        }
        true
    }

    #[must_use]
    /// Raw text of the focused panel.
    pub fn current_text(&self) -> &str {
        self.panels.text(self.current_panel)
    }

    #[must_use]
    /// Sections of one panel, parsed fresh.
    pub fn sections(&self, kind: PanelKind) -> Vec<Section> {
        parse_sections(self.panels.text(kind))
    }

    /// Move focus to the next panel, wrapping around.
    pub fn next_panel(&mut self) {
        self.step_panel(1);
    }

    /// Move focus to the previous panel, wrapping around.
    pub fn prev_panel(&mut self) {
        self.step_panel(-1);
    }

    fn step_panel(&mut self, delta: isize) {
        let kinds = self.panels.kinds();
        let pos = kinds
            .iter()
            .position(|k| *k == self.current_panel)
            .unwrap_or(0);
        #[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
        let next = (pos as isize + delta).rem_euclid(kinds.len() as isize) as usize;
        self.current_panel = kinds[next];
        self.scroll = 0;
    }

    /// Scroll the focused panel down one line.
    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    /// Scroll the focused panel up one line.
    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    /// Copy the focused panel's text, reporting the outcome on the status line.
    pub fn copy_current(&mut self, clipboard: &mut impl Clipboard) {
        let heading = self.current_panel.heading();
        match clipboard.copy(self.current_text()) {
            Ok(()) => {
                tracing::info!(panel = heading, "Copied to clipboard");
                self.message = Some(format!("Copied {heading}"));
            }
            Err(e) => {
                tracing::warn!(panel = heading, error = %e, "Clipboard copy failed");
                self.message = Some(format!("Copy failed: {e}"));
            }
        }
    }

    /// Enter command mode, optionally with text already typed.
    pub fn start_command(&mut self, prefill: &str) {
        self.current_view = View::Command;
        self.command_buffer.clear();
        self.command_buffer.push_str(prefill);
        self.message = None;
    }

    /// Leave command mode without running anything.
    pub fn cancel_command(&mut self) {
        self.current_view = View::Panels;
        self.command_buffer.clear();
    }

    /// Run the buffered command and return to the panels.
    pub fn run_command(&mut self, clipboard: &mut impl Clipboard) -> CommandOutcome {
        let cmd = std::mem::take(&mut self.command_buffer);
        self.current_view = View::Panels;

        let (name, arg) = match cmd.trim().split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (cmd.trim(), ""),
        };

        match name {
            "q" | "q!" | "quit" => CommandOutcome::Quit,
            "o" | "open" | "e" => {
                if arg.is_empty() {
                    self.message = Some("Usage: :open <path>".to_string());
                    return CommandOutcome::Continue;
                }
                self.select_files(&input::parse_dropped_paths(arg))
                    .map_or(CommandOutcome::Continue, CommandOutcome::Upload)
            }
            "y" | "copy" => {
                self.copy_current(clipboard);
                CommandOutcome::Continue
            }
            "" => CommandOutcome::Continue,
            _ => {
                self.message = Some(format!("Unknown command: {cmd}"));
                CommandOutcome::Continue
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/app_state.rs"]
mod tests;
