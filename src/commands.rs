//! Command pattern for input handling in the demo screen.
//!
//! Key and mouse events are translated into [`AppCommand`]s by pure
//! functions, so key bindings can be tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::notify::NoteKind;

// ============================================================================
// App Commands
// ============================================================================

/// All commands the demo application can execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    /// Exit the application.
    Quit,
    /// Show a sample note of the given kind.
    Show(NoteKind),
    /// Remove the most recently created note.
    CloseNewest,
    /// Remove every note.
    ClearAll,
    /// Pause or resume the background note feed.
    ToggleFeed,
    /// Dismiss whatever note covers the clicked cell.
    ClickAt { column: u16, row: u16 },
    /// No action to perform (unhandled input).
    Noop,
}

// ============================================================================
// Input Mapping
// ============================================================================

/// Maps a key event to a command.
#[must_use]
pub fn map_key(key: KeyEvent) -> AppCommand {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return AppCommand::Quit;
    }
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => AppCommand::Quit,
        KeyCode::Char('s') => AppCommand::Show(NoteKind::Success),
        KeyCode::Char('i') => AppCommand::Show(NoteKind::Info),
        KeyCode::Char('w') => AppCommand::Show(NoteKind::Warning),
        KeyCode::Char('d') => AppCommand::Show(NoteKind::Danger),
        KeyCode::Char('x') | KeyCode::Backspace => AppCommand::CloseNewest,
        KeyCode::Char('c') => AppCommand::ClearAll,
        KeyCode::Char('f') => AppCommand::ToggleFeed,
        _ => AppCommand::Noop,
    }
}

/// Maps a mouse event to a command. Only left clicks do anything.
#[must_use]
pub fn map_mouse(mouse: MouseEvent) -> AppCommand {
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => AppCommand::ClickAt {
            column: mouse.column,
            row: mouse.row,
        },
        _ => AppCommand::Noop,
    }
}

// ============================================================================
// Tests
// ============================================================================
