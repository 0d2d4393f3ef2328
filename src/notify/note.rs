//! A single notification banner.
//!
//! A [`Note`] owns everything about one banner on screen: its validated
//! content, the wrapped text lines it renders, its box size, and the motion
//! and fade state of its element. Notes never touch the stack directly; the
//! [`Notifier`](super::Notifier) decides where each note goes.

use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};

use ratatui::text::Span;

use super::error::{NotifyError, Violation};
use super::layout::{NoteSize, Position, Viewport};

// ============================================================================
// Constants
// ============================================================================

/// Duration of every `move_to` animation.
pub const ANIMATE_DURATION: Duration = Duration::from_millis(500);

/// Duration of the fade-out that precedes automatic removal.
pub const FADE_DURATION: Duration = Duration::from_millis(400);

/// Stacking order used when neither the note nor the notifier sets one.
pub const DEFAULT_Z_INDEX: i32 = 9;

/// Empty rows kept below each note.
pub const MARGIN_BOTTOM: u16 = 1;

/// Narrowest box a note shrinks to, borders included.
pub const MIN_NOTE_WIDTH: u16 = 12;

/// Widest box a note grows to, borders included.
pub const MAX_NOTE_WIDTH: u16 = 60;

/// Cells taken by the left/right border and inner padding.
const CHROME_WIDTH: u16 = 4;

/// Rows taken by the top and bottom border.
const CHROME_HEIGHT: u16 = 2;

// ============================================================================
// Identifiers and Kinds
// ============================================================================

/// Identifier assigned to a note by its notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoteId(pub u64);

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Visual flavour of a note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteKind {
    Success,
    Info,
    Warning,
    Danger,
}

impl NoteKind {
    pub const ALL: [NoteKind; 4] = [
        NoteKind::Success,
        NoteKind::Info,
        NoteKind::Warning,
        NoteKind::Danger,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Danger => "danger",
        }
    }
}

impl fmt::Display for NoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteKind {
    type Err = NotifyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NotifyError::invalid(Violation::UnknownKind(s.to_string())))
    }
}

// ============================================================================
// Options
// ============================================================================

/// Options for creating a note.
///
/// Callers fill in the content fields; `kind` is stamped by the typed
/// notifier methods and `id` by the notifier itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteOptions {
    pub id: Option<NoteId>,
    pub kind: Option<NoteKind>,
    pub caption: Option<String>,
    pub message: Option<String>,
    pub z_index: Option<i32>,
    /// Delay before the note fades out and removes itself.
    pub message_fadeout: Option<Duration>,
}

impl NoteOptions {
    /// Options with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// Options with only a caption.
    #[must_use]
    pub fn caption(caption: impl Into<String>) -> Self {
        Self {
            caption: Some(caption.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = Some(caption.into());
        self
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = Some(z_index);
        self
    }

    #[must_use]
    pub fn with_fadeout(mut self, delay: Duration) -> Self {
        self.message_fadeout = Some(delay);
        self
    }

    /// Checks every constraint and returns all violations at once.
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.kind.is_none() {
            violations.push(Violation::MissingKind);
        }
        if self.id.is_none() {
            violations.push(Violation::MissingId);
        }
        if self.caption.is_none() && self.message.is_none() {
            violations.push(Violation::MissingContent);
        }
        violations
    }
}

// ============================================================================
// Text
// ============================================================================

/// One word of note text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Word {
    pub text: String,
    /// Caption words render bold.
    pub bold: bool,
}

impl Word {
    fn width(&self) -> u16 {
        display_width(&self.text)
    }
}

/// Terminal columns taken by `text`; wide characters count double.
fn display_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

/// Splits caption and message into words, appending the `:` separator to
/// the caption when both are present.
fn words(caption: Option<&str>, message: Option<&str>) -> Vec<Word> {
    let mut words: Vec<Word> = Vec::new();

    if let Some(caption) = caption {
        words.extend(caption.split_whitespace().map(|text| Word {
            text: text.to_string(),
            bold: true,
        }));
        if message.is_some() {
            match words.last_mut() {
                Some(last) => last.text.push(':'),
                None => words.push(Word {
                    text: ":".to_string(),
                    bold: true,
                }),
            }
        }
    }

    if let Some(message) = message {
        words.extend(message.split_whitespace().map(|text| Word {
            text: text.to_string(),
            bold: false,
        }));
    }

    words
}

/// Greedy word wrap. Words wider than `max_width` are split across lines.
fn wrap(words: &[Word], max_width: u16) -> Vec<Vec<Word>> {
    let max_width = max_width.max(1);
    let mut lines: Vec<Vec<Word>> = Vec::new();
    let mut line: Vec<Word> = Vec::new();
    let mut line_width: u16 = 0;

    for word in words {
        for piece in split_long(word, max_width) {
            let needed = if line.is_empty() {
                piece.width()
            } else {
                line_width + 1 + piece.width()
            };
            if needed > max_width && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
                line_width = piece.width();
            } else {
                line_width = needed;
            }
            line.push(piece);
        }
    }

    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

fn split_long(word: &Word, max_width: u16) -> Vec<Word> {
    if word.width() <= max_width {
        return vec![word.clone()];
    }
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut width: u16 = 0;
    for ch in word.text.chars() {
        let mut buf = [0u8; 4];
        let ch_width = display_width(ch.encode_utf8(&mut buf));
        if width + ch_width > max_width && !piece.is_empty() {
            pieces.push(std::mem::take(&mut piece));
            width = 0;
        }
        piece.push(ch);
        width = width.saturating_add(ch_width);
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
        .into_iter()
        .map(|text| Word {
            text,
            bold: word.bold,
        })
        .collect()
}

fn line_width(line: &[Word]) -> u16 {
    let words: u16 = line.iter().map(Word::width).sum();
    let spaces = u16::try_from(line.len().saturating_sub(1)).unwrap_or(u16::MAX);
    words.saturating_add(spaces)
}

// ============================================================================
// Element State
// ============================================================================

/// Position animation of a note's element.
#[derive(Debug, Clone, Copy)]
struct Motion {
    from: Position,
    to: Position,
    started: Option<Instant>,
}

impl Motion {
    fn at(position: Position) -> Self {
        Self {
            from: position,
            to: position,
            started: None,
        }
    }

    fn progress(&self, now: Instant) -> f64 {
        match self.started {
            Some(started) => {
                let elapsed = now.saturating_duration_since(started).as_secs_f64();
                (elapsed / ANIMATE_DURATION.as_secs_f64()).clamp(0.0, 1.0)
            }
            None => 1.0,
        }
    }

    fn current(&self, now: Instant) -> Position {
        let p = self.progress(now);
        if p >= 1.0 {
            return self.to;
        }
        let eased = swing(p);
        let lerp = |from: i32, to: i32| -> i32 {
            (f64::from(from) + (f64::from(to) - f64::from(from)) * eased).round() as i32
        };
        Position::new(lerp(self.from.x, self.to.x), lerp(self.from.y, self.to.y))
    }
}

/// Slow at both ends, fast in the middle.
fn swing(p: f64) -> f64 {
    0.5 - (p * std::f64::consts::PI).cos() / 2.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Fade {
    Scheduled { due: Instant },
    Fading { started: Instant },
}

// ============================================================================
// Note
// ============================================================================

/// One rendered, dismissible notification banner.
#[derive(Debug, Clone)]
pub struct Note {
    id: NoteId,
    kind: NoteKind,
    caption: Option<String>,
    message: Option<String>,
    z_index: i32,
    words: Vec<Word>,
    lines: Vec<Vec<Word>>,
    width: u16,
    height: u16,
    motion: Motion,
    fade: Option<Fade>,
    attached: bool,
}

impl Note {
    /// Validates `options` and builds a detached-from-layout note.
    ///
    /// The note starts at the origin, measured for an unbounded viewport;
    /// the notifier measures and positions it before it is shown.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::InvalidOptions`] listing every violated
    /// constraint when options are missing, or lack a kind, an id, or both
    /// caption and message.
    pub fn new(options: Option<NoteOptions>) -> Result<Self, NotifyError> {
        let options = options.ok_or_else(|| NotifyError::invalid(Violation::MissingOptions))?;

        let violations = options.validate();
        let (Some(id), Some(kind), true) = (options.id, options.kind, violations.is_empty()) else {
            return Err(NotifyError::InvalidOptions { violations });
        };

        let words = words(options.caption.as_deref(), options.message.as_deref());
        let mut note = Self {
            id,
            kind,
            caption: options.caption,
            message: options.message,
            z_index: options.z_index.unwrap_or(DEFAULT_Z_INDEX),
            words,
            lines: Vec::new(),
            width: 0,
            height: 0,
            motion: Motion::at(Position::default()),
            fade: None,
            attached: true,
        };
        note.measure(Viewport::new(u16::MAX, u16::MAX), 0);
        Ok(note)
    }

    #[must_use]
    pub fn id(&self) -> NoteId {
        self.id
    }

    #[must_use]
    pub fn kind(&self) -> NoteKind {
        self.kind
    }

    #[must_use]
    pub fn caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    #[must_use]
    pub fn z_index(&self) -> i32 {
        self.z_index
    }

    /// Wrapped text lines as last measured.
    #[must_use]
    pub fn lines(&self) -> &[Vec<Word>] {
        &self.lines
    }

    /// The note's text as a single line, e.g. `Note: Check this`.
    #[must_use]
    pub fn text(&self) -> String {
        self.words
            .iter()
            .map(|word| word.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Returns `false` once the note has been removed.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    // ------------------------------------------------------------------------
    // Measurement
    // ------------------------------------------------------------------------

    /// Re-wraps the text for the viewport and updates the box size.
    ///
    /// The box is at most as wide as the viewport minus the horizontal
    /// padding on both sides, clamped to
    /// [`MIN_NOTE_WIDTH`]..=[`MAX_NOTE_WIDTH`].
    pub fn measure(&mut self, viewport: Viewport, horizontal_padding: i32) {
        let padding = u16::try_from(horizontal_padding.max(0)).unwrap_or(u16::MAX);
        let available = viewport.width.saturating_sub(padding.saturating_mul(2));
        let max_box = available.clamp(MIN_NOTE_WIDTH, MAX_NOTE_WIDTH);

        self.lines = wrap(&self.words, max_box - CHROME_WIDTH);

        let text_width = self.lines.iter().map(|line| line_width(line)).max().unwrap_or(0);
        self.width = (text_width + CHROME_WIDTH).max(MIN_NOTE_WIDTH);
        let rows = u16::try_from(self.lines.len()).unwrap_or(u16::MAX);
        self.height = rows.saturating_add(CHROME_HEIGHT);
    }

    /// Box width, plus horizontal margins when requested (there are none).
    #[must_use]
    pub fn outer_width(&self, _include_margins: bool) -> i32 {
        i32::from(self.width)
    }

    /// Box height, plus the bottom margin when requested.
    #[must_use]
    pub fn outer_height(&self, include_margins: bool) -> i32 {
        let margin = if include_margins { MARGIN_BOTTOM } else { 0 };
        i32::from(self.height) + i32::from(margin)
    }

    /// Outer size with margins, as used by the layout engine.
    #[must_use]
    pub fn outer_size(&self) -> NoteSize {
        NoteSize {
            width: self.outer_width(true),
            height: self.outer_height(true),
        }
    }

    // ------------------------------------------------------------------------
    // Positioning
    // ------------------------------------------------------------------------

    /// Places the note immediately, cancelling any animation.
    pub fn position(&mut self, x: i32, y: i32) {
        self.motion = Motion::at(Position::new(x, y));
    }

    /// Animates from wherever the note is right now to `(x, y)`.
    ///
    /// An animation already in flight is replaced, not queued, so repeated
    /// relayouts never build up a backlog.
    pub fn move_to(&mut self, x: i32, y: i32, now: Instant) {
        let target = Position::new(x, y);
        if target == self.motion.to {
            return;
        }
        self.motion = Motion {
            from: self.motion.current(now),
            to: target,
            started: Some(now),
        };
    }

    /// Where the note is drawn at `now`.
    #[must_use]
    pub fn current_position(&self, now: Instant) -> Position {
        self.motion.current(now)
    }

    /// Where the note is heading (or sits, if not animating).
    #[must_use]
    pub fn target_position(&self) -> Position {
        self.motion.to
    }

    // ------------------------------------------------------------------------
    // Fade-out and removal
    // ------------------------------------------------------------------------

    /// Schedules a fade-out that starts after `delay`.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::MissingFadeoutDelay`] when `delay` is `None`;
    /// nothing is scheduled in that case. A delay too large to represent as
    /// an instant means the note never fades.
    pub fn message_fadeout(&mut self, delay: Option<Duration>, now: Instant) -> Result<(), NotifyError> {
        let delay = delay.ok_or_else(|| NotifyError::invalid(Violation::MissingFadeoutDelay))?;
        self.fade = match now.checked_add(delay) {
            Some(due) => Some(Fade::Scheduled { due }),
            None => {
                tracing::debug!(id = %self.id, ?delay, "fade-out delay out of range, note stays");
                None
            }
        };
        Ok(())
    }

    /// Advances the fade state. Returns `true` once the fade has finished
    /// and the note should be removed.
    pub fn advance_fade(&mut self, now: Instant) -> bool {
        match self.fade {
            Some(Fade::Scheduled { due }) if now >= due => {
                self.fade = Some(Fade::Fading { started: due });
                self.advance_fade(now)
            }
            Some(Fade::Fading { started }) => now.saturating_duration_since(started) >= FADE_DURATION,
            _ => false,
        }
    }

    /// Visibility between 1.0 (opaque) and 0.0 (gone).
    #[must_use]
    pub fn opacity(&self, now: Instant) -> f64 {
        match self.fade {
            Some(Fade::Fading { started }) => {
                let elapsed = now.saturating_duration_since(started).as_secs_f64();
                (1.0 - elapsed / FADE_DURATION.as_secs_f64()).clamp(0.0, 1.0)
            }
            _ => 1.0,
        }
    }

    /// Detaches the note's element.
    ///
    /// Returns `true` the first time only, so the owner can run its close
    /// hook exactly once no matter how often removal is requested.
    pub fn remove(&mut self) -> bool {
        if !self.attached {
            return false;
        }
        self.attached = false;
        self.fade = None;
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn valid(kind: NoteKind) -> NoteOptions {
        NoteOptions {
            id: Some(NoteId(7)),
            kind: Some(kind),
            ..NoteOptions::message("Saved")
        }
    }

    #[rstest]
    #[case::success(NoteKind::Success)]
    #[case::info(NoteKind::Info)]
    #[case::warning(NoteKind::Warning)]
    #[case::danger(NoteKind::Danger)]
    fn test_valid_note_keeps_input(#[case] kind: NoteKind) {
        let note = Note::new(Some(valid(kind).with_caption("Done"))).unwrap();

        assert_eq!(note.id(), NoteId(7));
        assert_eq!(note.kind(), kind);
        assert_eq!(note.caption(), Some("Done"));
        assert_eq!(note.message(), Some("Saved"));
        assert_eq!(note.z_index(), DEFAULT_Z_INDEX);
        assert!(note.is_attached());
    }

    #[test]
    fn test_missing_options() {
        let err = Note::new(None).unwrap_err();
        assert_eq!(err.violations(), &[Violation::MissingOptions]);
    }

    #[test]
    fn test_every_violation_is_reported() {
        let err = Note::new(Some(NoteOptions::default())).unwrap_err();
        assert_eq!(
            err.violations(),
            &[
                Violation::MissingKind,
                Violation::MissingId,
                Violation::MissingContent
            ]
        );
    }

    #[rstest]
    #[case::no_kind(NoteOptions { kind: None, ..valid(NoteKind::Info) }, Violation::MissingKind)]
    #[case::no_id(NoteOptions { id: None, ..valid(NoteKind::Info) }, Violation::MissingId)]
    #[case::no_content(NoteOptions { message: None, ..valid(NoteKind::Info) }, Violation::MissingContent)]
    fn test_single_violation(#[case] options: NoteOptions, #[case] expected: Violation) {
        let err = Note::new(Some(options)).unwrap_err();
        assert_eq!(err.violations(), &[expected]);
    }

    #[test]
    fn test_unknown_kind_name() {
        let err = "urgent".parse::<NoteKind>().unwrap_err();
        assert!(err.contains(&Violation::UnknownKind("urgent".into())));
        assert_eq!("Danger".parse::<NoteKind>(), Ok(NoteKind::Danger));
    }

    #[test]
    fn test_text_with_caption_and_message() {
        let note = Note::new(Some(valid(NoteKind::Warning).with_caption("Note").with_message("Check this"))).unwrap();
        assert_eq!(note.text(), "Note: Check this");

        let bold: Vec<bool> = note.lines()[0].iter().map(|w| w.bold).collect();
        assert_eq!(bold, vec![true, false, false]);
    }

    #[test]
    fn test_text_with_single_field() {
        let caption_only = NoteOptions {
            id: Some(NoteId(1)),
            kind: Some(NoteKind::Info),
            ..NoteOptions::caption("Heads up")
        };
        assert_eq!(Note::new(Some(caption_only)).unwrap().text(), "Heads up");
        assert_eq!(Note::new(Some(valid(NoteKind::Info))).unwrap().text(), "Saved");
    }

    #[test]
    fn test_wrap_respects_width() {
        let words = words(None, Some("one two three four five six"));
        let lines = wrap(&words, 9);

        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line_width(line) <= 9));
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let words = words(None, Some("abcdefghij"));
        let lines = wrap(&words, 4);
        let texts: Vec<&str> = lines.iter().map(|l| l[0].text.as_str()).collect();
        assert_eq!(texts, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn test_wide_characters_count_double() {
        let mut note = Note::new(Some(valid(NoteKind::Success).with_message("保存しました完了です"))).unwrap();
        note.measure(Viewport::new(80, 24), 2);

        assert_eq!(note.lines().len(), 1);
        assert_eq!(note.outer_width(false), 20 + i32::from(CHROME_WIDTH));
    }

    #[test]
    fn test_wrap_splits_wide_words_by_display_width() {
        let words = words(None, Some("保存しました"));
        let lines = wrap(&words, 5);
        let texts: Vec<&str> = lines.iter().map(|l| l[0].text.as_str()).collect();

        assert_eq!(texts, vec!["保存", "しま", "した"]);
        assert!(lines.iter().all(|line| line_width(line) <= 5));
    }

    #[test]
    fn test_measure_wraps_on_narrow_viewport() {
        let mut note = Note::new(Some(
            valid(NoteKind::Info).with_message("Deploy finished for all twelve regions"),
        ))
        .unwrap();

        note.measure(Viewport::new(200, 50), 2);
        let wide_height = note.outer_height(false);
        assert_eq!(wide_height, 3);

        note.measure(Viewport::new(30, 50), 2);
        assert!(note.outer_height(false) > wide_height);
        assert!(note.outer_width(true) <= 26);
    }

    #[test]
    fn test_outer_height_margins() {
        let note = Note::new(Some(valid(NoteKind::Info))).unwrap();
        assert_eq!(
            note.outer_height(true),
            note.outer_height(false) + i32::from(MARGIN_BOTTOM)
        );
        assert_eq!(note.outer_width(true), note.outer_width(false));
    }

    #[test]
    fn test_move_to_animates_and_settles() {
        let start = Instant::now();
        let mut note = Note::new(Some(valid(NoteKind::Info))).unwrap();
        note.position(0, 40);
        note.move_to(0, 20, start);

        assert_eq!(note.current_position(start), Position::new(0, 40));

        let mid = note.current_position(start + ANIMATE_DURATION / 2);
        assert_eq!(mid, Position::new(0, 30));

        let end = start + ANIMATE_DURATION;
        assert_eq!(note.current_position(end), Position::new(0, 20));
    }

    #[test]
    fn test_move_to_interrupts_in_flight_animation() {
        let start = Instant::now();
        let mut note = Note::new(Some(valid(NoteKind::Info))).unwrap();
        note.position(0, 40);
        note.move_to(0, 20, start);

        let later = start + ANIMATE_DURATION / 2;
        note.move_to(0, 10, later);

        assert_eq!(note.current_position(later), Position::new(0, 30));
        assert_eq!(note.target_position(), Position::new(0, 10));
        assert_eq!(
            note.current_position(later + ANIMATE_DURATION),
            Position::new(0, 10)
        );
    }

    #[test]
    fn test_position_is_immediate() {
        let now = Instant::now();
        let mut note = Note::new(Some(valid(NoteKind::Info))).unwrap();
        note.move_to(5, 5, now);
        note.position(-3, 60);

        assert_eq!(note.current_position(now), Position::new(-3, 60));
        assert_eq!(note.target_position(), Position::new(-3, 60));
    }

    #[test]
    fn test_fadeout_requires_delay() {
        let now = Instant::now();
        let mut note = Note::new(Some(valid(NoteKind::Info))).unwrap();

        let err = note.message_fadeout(None, now).unwrap_err();
        assert!(err.contains(&Violation::MissingFadeoutDelay));
        assert!(!note.advance_fade(now + Duration::from_secs(3600)));
    }

    #[test]
    fn test_fadeout_lifecycle() {
        let now = Instant::now();
        let delay = Duration::from_millis(1000);
        let mut note = Note::new(Some(valid(NoteKind::Info))).unwrap();
        note.message_fadeout(Some(delay), now).unwrap();

        assert!(!note.advance_fade(now + delay / 2));
        assert_eq!(note.opacity(now + delay / 2), 1.0);

        assert!(!note.advance_fade(now + delay + FADE_DURATION / 2));
        let opacity = note.opacity(now + delay + FADE_DURATION / 2);
        assert!(opacity > 0.0 && opacity < 1.0);

        assert!(note.advance_fade(now + delay + FADE_DURATION));
    }

    #[test]
    fn test_huge_fadeout_delay_never_fades() {
        let now = Instant::now();
        let mut note = Note::new(Some(valid(NoteKind::Info))).unwrap();
        note.message_fadeout(Some(Duration::MAX), now).unwrap();

        let much_later = now + Duration::from_secs(60 * 60 * 24 * 365);
        assert!(!note.advance_fade(much_later));
        assert_eq!(note.opacity(much_later), 1.0);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut note = Note::new(Some(valid(NoteKind::Info))).unwrap();
        assert!(note.remove());
        assert!(!note.remove());
        assert!(!note.is_attached());
    }
}
