//! The UI renders the application state into something visible.
//!
//! The screen is a header, the drop zone, one column per result panel, and a help bar that
//! doubles as the command line. Panel text is parsed into sections on every draw.

use crate::analysis::PanelKind;
use crate::app_state::{AppState, View};
use crate::section::Section;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TITLE: &str = "📊 Social Media Analyzer";
const TAGLINE: &str = "Upload your content and let AI refine it";

/// Renders the whole screen from the current application state.
pub fn draw(f: &mut Frame, app: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Length(5), // Drop zone
            Constraint::Min(0),    // Panels
            Constraint::Length(3), // Help / command
        ])
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_drop_zone(f, app, chunks[1]);
    draw_panels(f, app, chunks[2]);
    draw_help(f, app, chunks[3]);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            TITLE,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(Color::DarkGray))),
    ]);
    f.render_widget(header, area);
}

fn draw_drop_zone(f: &mut Frame, app: &AppState, area: Rect) {
    let zone = &app.drop_zone;
    let border = if app.current_view == View::Command {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut lines = vec![Line::from(
        "Drag & drop a file here (or paste its path), or press o to choose",
    )];
    if !zone.accept.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("Allowed: {} | Max {} MB", zone.accept, zone.max_size_mb),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let status = if let Some(ref error) = zone.error {
        Span::styled(error.clone(), Style::default().fg(Color::Red))
    } else if app.loading {
        Span::styled("⏳ Processing...", Style::default().fg(Color::Yellow))
    } else if let Some(ref name) = app.current_file {
        Span::styled(format!("📄 {name}"), Style::default().fg(Color::Blue))
    } else {
        Span::raw("")
    };
    lines.push(Line::from(status));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(zone.label.as_str()),
    );
    f.render_widget(widget, area);
}

/// Section blocks as styled lines: bold title, then the content.
fn section_lines(sections: &[Section]) -> Vec<Line<'_>> {
    let mut lines = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            section.title.as_str(),
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
        lines.extend(section.content.lines().map(Line::from));
    }
    lines
}

fn draw_panels(f: &mut Frame, app: &AppState, area: Rect) {
    let kinds = app.panels.kinds();
    #[allow(clippy::cast_possible_truncation)]
    let constraints = vec![Constraint::Ratio(1, kinds.len() as u32); kinds.len()];
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (kind, column) in kinds.into_iter().zip(columns.iter()) {
        draw_panel(f, app, kind, *column);
    }
}

fn draw_panel(f: &mut Frame, app: &AppState, kind: PanelKind, area: Rect) {
    let focused = kind == app.current_panel;
    let border = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let sections = app.sections(kind);
    let scroll = if focused { app.scroll } else { 0 };
    let widget = Paragraph::new(section_lines(&sections))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(kind.heading()),
        );
    f.render_widget(widget, area);
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    if app.current_view == View::Command {
        let command_text = format!(":{}", app.command_buffer);
        let command_widget = Paragraph::new(command_text)
            .block(Block::default().borders(Borders::ALL).title("Command"));
        f.render_widget(command_widget, area);
        return;
    }

    let help_text = if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        "Tab/←/→: Panel | ↑/↓: Scroll | y: Copy | o: Open file | :q Quit".to_string()
    };
    let help = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}

#[cfg(test)]
#[path = "tests/ui.rs"]
mod tests;
