//! Screen rendering for the demo application.
//!
//! The screen is a bordered help panel with a status line; the note stack is
//! drawn over it last so notes sit on top of everything.

use std::time::Instant;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::app::App;
use crate::notify::{self, NoteKind};
use crate::theme::{BORDER_STYLE, MUTED_COLOR, kind_color};

// ============================================================================
// Constants
// ============================================================================

const TITLE: &str = " notestack ";

const KEY_HELP: [(&str, &str); 5] = [
    ("x", "close newest note"),
    ("c", "clear all notes"),
    ("f", "pause / resume feed"),
    ("click", "dismiss a note"),
    ("q", "quit"),
];

// ============================================================================
// Main Render Entry Point
// ============================================================================

/// Draws the whole screen for `app` at time `now`.
pub fn render(app: &App, frame: &mut Frame, now: Instant) {
    let area = frame.area();

    let block = create_border_block(TITLE);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(inner);

    frame.render_widget(Paragraph::new(help_lines()), chunks[0]);
    render_status(app, frame, chunks[1]);

    notify::render_notes(frame, area, app.notifier(), now);
}

// ============================================================================
// Internal Rendering Functions
// ============================================================================

#[must_use]
fn create_border_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(BORDER_STYLE)
        .title(title)
        .title_style(Style::new().fg(MUTED_COLOR).add_modifier(Modifier::BOLD))
}

fn help_lines() -> Vec<Line<'static>> {
    let key_style = Style::new().add_modifier(Modifier::BOLD);
    let muted = Style::new().fg(MUTED_COLOR);

    let mut lines = vec![Line::from(Span::styled("Press a key to show a note:", muted))];
    lines.extend(NoteKind::ALL.into_iter().map(|kind| {
        Line::from(vec![
            Span::styled(format!("  {:<6}", &kind.as_str()[..1]), key_style),
            Span::styled(kind.as_str(), Style::new().fg(kind_color(kind))),
        ])
    }));
    lines.push(Line::default());
    lines.extend(KEY_HELP.into_iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(format!("  {key:<6}"), key_style),
            Span::styled(action, muted),
        ])
    }));
    lines
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let notifier = app.notifier();
    let feed = match app.feed_state() {
        None => "off",
        Some(true) => "running",
        Some(false) => "paused",
    };
    let status = format!(
        "notes: {}  closed: {}  corner: {}  feed: {feed}",
        notifier.len(),
        app.closed_count(),
        notifier.config().corner,
    );
    frame.render_widget(
        Paragraph::new(Span::styled(status, Style::new().fg(MUTED_COLOR))),
        area,
    );
}

// ============================================================================
// Tests
// ============================================================================
