//! Drawing notes onto a ratatui buffer.
//!
//! Notes can sit partly (or entirely) outside the viewport while they slide
//! in, so each note is drawn into its own scratch buffer first and then
//! copied cell by cell into the frame, clipped to the target area.

use std::time::Instant;

use ratatui::{
    Frame,
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    symbols::border,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use super::layout::Position;
use super::note::Note;
use super::notifier::Notifier;
use crate::theme::{CLOSE_STYLE, NOTE_BG_COLOR, kind_color};

// ============================================================================
// Constants
// ============================================================================

/// Below this opacity a fading note is drawn dimmed.
const DIM_BELOW_OPACITY: f64 = 0.5;

/// Close glyph drawn in the top-right border.
const CLOSE_GLYPH: &str = " × ";

// ============================================================================
// Public API
// ============================================================================

/// Renders every active note of `notifier` over `area`.
///
/// Notes are painted lowest z-index first so higher ones end up on top.
/// Call this after the rest of the frame has been drawn.
pub fn render_notes(frame: &mut Frame, area: Rect, notifier: &Notifier, now: Instant) {
    render_notes_to_buffer(frame.buffer_mut(), area, notifier, now);
}

/// Same as [`render_notes`], drawing straight into a buffer.
pub fn render_notes_to_buffer(buf: &mut Buffer, area: Rect, notifier: &Notifier, now: Instant) {
    for note in notifier.paint_order() {
        let opacity = note.opacity(now);
        if opacity <= 0.0 {
            continue;
        }

        let width = u16::try_from(note.outer_width(false)).unwrap_or(0);
        let height = u16::try_from(note.outer_height(false)).unwrap_or(0);
        if width == 0 || height == 0 {
            continue;
        }

        let mut scratch = Buffer::empty(Rect::new(0, 0, width, height));
        NoteWidget::new(note).render(scratch.area, &mut scratch);

        blit(
            &scratch,
            buf,
            area,
            note.current_position(now),
            opacity < DIM_BELOW_OPACITY,
        );
    }
}

// ============================================================================
// Note Widget
// ============================================================================

/// A single note box: rounded border in the kind's color, close glyph in
/// the top-right corner, caption in bold.
#[derive(Debug, Clone, Copy)]
pub struct NoteWidget<'a> {
    note: &'a Note,
}

impl<'a> NoteWidget<'a> {
    #[must_use]
    pub fn new(note: &'a Note) -> Self {
        Self { note }
    }
}

impl Widget for NoteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = create_note_block(self.note);
        let inner = block.inner(area);
        block.render(area, buf);

        let text_area = Rect::new(
            inner.x.saturating_add(1),
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        Paragraph::new(note_lines(self.note)).render(text_area, buf);
    }
}

#[must_use]
fn create_note_block(note: &Note) -> Block<'static> {
    let color = kind_color(note.kind());
    Block::default()
        .borders(Borders::ALL)
        .border_set(border::ROUNDED)
        .border_style(Style::new().fg(color))
        .title_top(Line::from(Span::styled(CLOSE_GLYPH, CLOSE_STYLE)).right_aligned())
        .style(Style::new().bg(NOTE_BG_COLOR))
}

fn note_lines(note: &Note) -> Vec<Line<'static>> {
    let color = kind_color(note.kind());
    note.lines()
        .iter()
        .map(|words| {
            let mut spans = Vec::with_capacity(words.len() * 2);
            for (i, word) in words.iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw(" "));
                }
                let mut style = Style::new().fg(color);
                if word.bold {
                    style = style.add_modifier(Modifier::BOLD);
                }
                spans.push(Span::styled(word.text.clone(), style));
            }
            Line::from(spans)
        })
        .collect()
}

// ============================================================================
// Internal Helpers
// ============================================================================

/// Copies `src` into `dst` with its top-left corner at `at` (relative to
/// `area`), dropping every cell that falls outside `area`.
fn blit(src: &Buffer, dst: &mut Buffer, area: Rect, at: Position, dim: bool) {
    let (left, top) = (i32::from(area.x), i32::from(area.y));
    let (right, bottom) = (left + i32::from(area.width), top + i32::from(area.height));

    for sy in 0..src.area.height {
        let ty = top.saturating_add(at.y).saturating_add(i32::from(sy));
        if ty < top || ty >= bottom {
            continue;
        }
        for sx in 0..src.area.width {
            let tx = left.saturating_add(at.x).saturating_add(i32::from(sx));
            if tx < left || tx >= right {
                continue;
            }
            let (Ok(tx), Ok(ty)) = (u16::try_from(tx), u16::try_from(ty)) else {
                continue;
            };
            if let (Some(cell), Some(target)) = (src.cell((sx, sy)), dst.cell_mut((tx, ty))) {
                *target = cell.clone();
                if dim {
                    target.set_style(Style::new().add_modifier(Modifier::DIM));
                }
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
