//! Theme and styling constants for notes and the demo screen.

use ratatui::style::{Color, Modifier, Style};

use crate::notify::NoteKind;

// ============================================================================
// Color Constants
// ============================================================================

/// Success notes.
pub const SUCCESS_COLOR: Color = Color::Green;

/// Info notes.
pub const INFO_COLOR: Color = Color::Cyan;

/// Warning notes.
pub const WARNING_COLOR: Color = Color::Yellow;

/// Danger notes.
pub const DANGER_COLOR: Color = Color::Red;

/// Muted text color.
pub const MUTED_COLOR: Color = Color::Gray;

/// Note background.
pub const NOTE_BG_COLOR: Color = Color::Rgb(26, 27, 38);

// ============================================================================
// Style Constants
// ============================================================================

/// Default border style for chrome around the demo screen.
pub const BORDER_STYLE: Style = Style::new().fg(Color::DarkGray);

/// Style of the close glyph in a note's top border.
pub const CLOSE_STYLE: Style = Style::new().fg(MUTED_COLOR).add_modifier(Modifier::BOLD);

/// Returns the accent color for a note kind.
#[must_use]
pub const fn kind_color(kind: NoteKind) -> Color {
    match kind {
        NoteKind::Success => SUCCESS_COLOR,
        NoteKind::Info => INFO_COLOR,
        NoteKind::Warning => WARNING_COLOR,
        NoteKind::Danger => DANGER_COLOR,
    }
}
