//! Demo application state and main loop.
//!
//! The [`App`] owns a [`Notifier`] sized to the terminal, turns key and
//! mouse input into notes, and optionally drains a background feed that
//! produces timestamped notes.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use color_eyre::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::{mpsc, watch};
use tokio::time::interval;

use crate::commands::{self, AppCommand};
use crate::notify::{NoteId, NoteKind, NoteOptions, Notifier, Viewport};
use crate::tui::Tui;
use crate::ui;

// ============================================================================
// Constants
// ============================================================================

/// How often fades advance and the screen is redrawn.
pub const TICK_RATE: Duration = Duration::from_millis(50);

/// How often the background feed emits a note.
pub const FEED_INTERVAL: Duration = Duration::from_secs(3);

/// Sample content per kind: (caption, message).
const SAMPLES: [(NoteKind, &str, &str); 4] = [
    (NoteKind::Success, "Saved", "Your changes were written to disk"),
    (NoteKind::Info, "Heads up", "A new version is available"),
    (NoteKind::Warning, "Note", "Check this"),
    (NoteKind::Danger, "Error", "Connection to the server was lost"),
];

// ============================================================================
// Feed
// ============================================================================

/// A note produced by the background feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    pub kind: NoteKind,
    pub caption: String,
    pub message: String,
}

impl FeedItem {
    /// Builds the `sequence`-th feed item, stamped with `at`.
    #[must_use]
    pub fn sample(sequence: usize, at: chrono::DateTime<chrono::Local>) -> Self {
        let (kind, _, message) = SAMPLES[sequence % SAMPLES.len()];
        Self {
            kind,
            caption: at.format("%H:%M:%S").to_string(),
            message: message.to_string(),
        }
    }
}

/// Emits a [`FeedItem`] every [`FEED_INTERVAL`] while enabled.
///
/// Stops once the receiving side is dropped.
async fn feed_task(tx: mpsc::UnboundedSender<FeedItem>, enabled: watch::Receiver<bool>) {
    let mut ticker = interval(FEED_INTERVAL);
    let mut sequence = 0usize;
    loop {
        ticker.tick().await;
        if !*enabled.borrow() {
            continue;
        }
        let item = FeedItem::sample(sequence, chrono::Local::now());
        sequence = sequence.wrapping_add(1);
        if tx.send(item).is_err() {
            tracing::debug!("feed receiver dropped, stopping feed");
            break;
        }
    }
}

// ============================================================================
// App
// ============================================================================

/// Demo application state.
#[derive(Debug)]
pub struct App {
    notifier: Notifier,
    default_fadeout: Option<Duration>,
    feed_rx: Option<mpsc::UnboundedReceiver<FeedItem>>,
    feed_enabled: watch::Sender<bool>,
    closed: Arc<AtomicUsize>,
    sample: usize,
    pub exit: bool,
}

impl App {
    /// Creates the app around a notifier. Notes created from the keyboard or
    /// the feed fade out after `default_fadeout` when it is set.
    #[must_use]
    pub fn new(mut notifier: Notifier, default_fadeout: Option<Duration>) -> Self {
        let closed = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&closed);
        notifier.on_close(move |note| {
            counter.fetch_add(1, Ordering::Relaxed);
            tracing::info!(id = %note.id(), kind = %note.kind(), "note closed");
        });

        let (feed_enabled, _) = watch::channel(false);
        Self {
            notifier,
            default_fadeout,
            feed_rx: None,
            feed_enabled,
            closed,
            sample: 0,
            exit: false,
        }
    }

    #[must_use]
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut Notifier {
        &mut self.notifier
    }

    /// Number of notes closed so far, by any path.
    #[must_use]
    pub fn closed_count(&self) -> usize {
        self.closed.load(Ordering::Relaxed)
    }

    /// `None` when the feed was never started, otherwise whether it is running.
    #[must_use]
    pub fn feed_state(&self) -> Option<bool> {
        self.feed_rx.as_ref().map(|_| *self.feed_enabled.borrow())
    }

    /// Spawns the background feed. Must be called inside a tokio runtime.
    pub fn start_feed(&mut self) {
        if self.feed_rx.is_some() {
            return;
        }
        let (tx, rx) = mpsc::unbounded_channel();
        self.feed_enabled.send_replace(true);
        let enabled = self.feed_enabled.subscribe();
        tokio::spawn(feed_task(tx, enabled));
        self.feed_rx = Some(rx);
        tracing::info!(interval = ?FEED_INTERVAL, "feed started");
    }

    // ========================================================================
    // Main Loop
    // ========================================================================

    /// Runs the main application loop until the user quits.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal operations fail.
    pub async fn run(&mut self, terminal: &mut Tui) -> Result<()> {
        let mut last_tick = Instant::now();
        terminal.draw(|frame| ui::render(self, frame, Instant::now()))?;

        while !self.exit {
            self.drain_feed(Instant::now())?;

            let timeout = TICK_RATE
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);

            if event::poll(timeout)? {
                let command = match event::read()? {
                    Event::Key(key)
                        if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                    {
                        commands::map_key(key)
                    }
                    Event::Mouse(mouse) => commands::map_mouse(mouse),
                    Event::Resize(width, height) => {
                        self.resize(Viewport::new(width, height), Instant::now());
                        AppCommand::Noop
                    }
                    _ => AppCommand::Noop,
                };
                self.handle_command(command, Instant::now())?;
            }

            if last_tick.elapsed() >= TICK_RATE {
                let now = Instant::now();
                self.tick(now);
                terminal.draw(|frame| ui::render(self, frame, now))?;
                last_tick = now;
            }
        }

        Ok(())
    }

    // ========================================================================
    // State Updates
    // ========================================================================

    /// Applies a command.
    ///
    /// # Errors
    ///
    /// Returns an error if a note cannot be created.
    pub fn handle_command(&mut self, command: AppCommand, now: Instant) -> Result<()> {
        match command {
            AppCommand::Quit => self.exit = true,
            AppCommand::Show(kind) => {
                self.show_sample(kind, now)?;
            }
            AppCommand::CloseNewest => {
                if let Some(id) = self.notifier.newest() {
                    self.notifier.remove(id, now);
                }
            }
            AppCommand::ClearAll => {
                let removed = self.notifier.clear(now);
                tracing::debug!(removed, "cleared notes");
            }
            AppCommand::ToggleFeed => {
                if self.feed_rx.is_some() {
                    let enabled = !*self.feed_enabled.borrow();
                    self.feed_enabled.send_replace(enabled);
                    tracing::info!(enabled, "feed toggled");
                }
            }
            AppCommand::ClickAt { column, row } => {
                if let Some(id) = self.notifier.note_at(column, row, now) {
                    self.notifier.remove(id, now);
                }
            }
            AppCommand::Noop => {}
        }
        Ok(())
    }

    /// Advances fades; notes whose fade finished are removed.
    pub fn tick(&mut self, now: Instant) -> Vec<NoteId> {
        self.notifier.tick(now)
    }

    /// Relays out every note for a new terminal size.
    pub fn resize(&mut self, viewport: Viewport, now: Instant) {
        self.notifier.resize(viewport, now);
    }

    /// Shows a note, applying the default fade-out unless `options` sets one.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid.
    pub fn show_note(&mut self, kind: NoteKind, options: NoteOptions, now: Instant) -> Result<NoteId> {
        let options = self.with_default_fadeout(options);
        Ok(self.notifier.notify(kind, options, now)?)
    }

    /// Shows a note whose kind is given by name, as on the command line.
    ///
    /// # Errors
    ///
    /// Returns an error if the kind is unknown or the options are invalid.
    pub fn show_named(&mut self, kind: &str, options: NoteOptions, now: Instant) -> Result<NoteId> {
        let options = self.with_default_fadeout(options);
        Ok(self.notifier.notify_named(kind, options, now)?)
    }

    fn with_default_fadeout(&self, options: NoteOptions) -> NoteOptions {
        match (options.message_fadeout, self.default_fadeout) {
            (None, Some(delay)) => options.with_fadeout(delay),
            _ => options,
        }
    }

    /// Shows one feed item as a note.
    ///
    /// # Errors
    ///
    /// Returns an error if the note cannot be created.
    pub fn show_feed_item(&mut self, item: FeedItem, now: Instant) -> Result<NoteId> {
        let options = NoteOptions::message(item.message).with_caption(item.caption);
        self.show_note(item.kind, options, now)
    }

    fn show_sample(&mut self, kind: NoteKind, now: Instant) -> Result<NoteId> {
        let (_, caption, message) = SAMPLES
            .into_iter()
            .find(|(k, _, _)| *k == kind)
            .unwrap_or(SAMPLES[0]);
        self.sample = self.sample.wrapping_add(1);
        let options =
            NoteOptions::message(format!("{message} ({})", self.sample)).with_caption(caption);
        self.show_note(kind, options, now)
    }

    fn drain_feed(&mut self, now: Instant) -> Result<()> {
        let mut items = Vec::new();
        if let Some(rx) = self.feed_rx.as_mut() {
            while let Ok(item) = rx.try_recv() {
                items.push(item);
            }
        }
        for item in items {
            self.show_feed_item(item, now)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::note::{ANIMATE_DURATION, FADE_DURATION};
    use crate::notify::{Corner, NotifierConfig};
    use chrono::TimeZone;
    use rstest::rstest;

    fn app(default_fadeout: Option<Duration>) -> App {
        let notifier = Notifier::new(
            NotifierConfig {
                corner: Corner::TopLeft,
                horizontal_padding: 2,
                vertical_padding: 1,
                ..NotifierConfig::default()
            },
            Viewport::new(80, 24),
        );
        App::new(notifier, default_fadeout)
    }

    #[rstest]
    #[case::success(NoteKind::Success)]
    #[case::info(NoteKind::Info)]
    #[case::warning(NoteKind::Warning)]
    #[case::danger(NoteKind::Danger)]
    fn test_show_creates_note_of_kind(#[case] kind: NoteKind) {
        let now = Instant::now();
        let mut app = app(None);
        app.handle_command(AppCommand::Show(kind), now).unwrap();

        let id = app.notifier().newest().unwrap();
        let note = app.notifier().note(id).unwrap();
        assert_eq!(note.kind(), kind);
        assert!(note.caption().is_some());
    }

    #[test]
    fn test_close_newest_and_clear() {
        let now = Instant::now();
        let mut app = app(None);
        for kind in NoteKind::ALL {
            app.handle_command(AppCommand::Show(kind), now).unwrap();
        }
        let newest = app.notifier().newest().unwrap();

        app.handle_command(AppCommand::CloseNewest, now).unwrap();
        assert_eq!(app.notifier().len(), 3);
        assert!(app.notifier().note(newest).is_none());
        assert_eq!(app.closed_count(), 1);

        app.handle_command(AppCommand::ClearAll, now).unwrap();
        assert!(app.notifier().is_empty());
        assert_eq!(app.closed_count(), 4);

        // Nothing left to close.
        app.handle_command(AppCommand::CloseNewest, now).unwrap();
        assert_eq!(app.closed_count(), 4);
    }

    #[test]
    fn test_click_dismisses_note_under_cursor() {
        let now = Instant::now();
        let mut app = app(None);
        app.handle_command(AppCommand::Show(NoteKind::Info), now).unwrap();
        let settled = now + ANIMATE_DURATION;

        app.handle_command(AppCommand::ClickAt { column: 70, row: 20 }, settled)
            .unwrap();
        assert_eq!(app.notifier().len(), 1);

        // Top-left corner with padding 2/1 puts the border at (2, 1).
        app.handle_command(AppCommand::ClickAt { column: 3, row: 2 }, settled)
            .unwrap();
        assert!(app.notifier().is_empty());
        assert_eq!(app.closed_count(), 1);
    }

    #[test]
    fn test_default_fadeout_removes_notes_on_tick() {
        let now = Instant::now();
        let delay = Duration::from_millis(1000);
        let mut app = app(Some(delay));
        app.handle_command(AppCommand::Show(NoteKind::Success), now).unwrap();

        assert!(app.tick(now + delay).is_empty());
        let removed = app.tick(now + delay + FADE_DURATION);
        assert_eq!(removed.len(), 1);
        assert!(app.notifier().is_empty());
        assert_eq!(app.closed_count(), 1);
    }

    #[test]
    fn test_feed_item_uses_timestamp_caption() {
        let at = chrono::Local.with_ymd_and_hms(2024, 5, 1, 9, 30, 15).unwrap();
        let item = FeedItem::sample(2, at);
        assert_eq!(item.kind, NoteKind::Warning);
        assert_eq!(item.caption, "09:30:15");

        let now = Instant::now();
        let mut app = app(None);
        let id = app.show_feed_item(item, now).unwrap();
        let note = app.notifier().note(id).unwrap();
        assert_eq!(note.text(), "09:30:15: Check this");
    }

    #[test]
    fn test_show_named_applies_default_fadeout() {
        let now = Instant::now();
        let delay = Duration::from_millis(200);
        let mut app = app(Some(delay));

        let id = app
            .show_named("Warning", NoteOptions::message("Check this"), now)
            .unwrap();
        assert_eq!(app.notifier().note(id).unwrap().kind(), NoteKind::Warning);
        assert_eq!(app.tick(now + delay + FADE_DURATION), vec![id]);
    }

    #[test]
    fn test_show_named_rejects_unknown_kind() {
        let mut app = app(None);
        let err = app
            .show_named("urgent", NoteOptions::message("x"), Instant::now())
            .unwrap_err();
        assert!(err.to_string().contains("unknown note kind 'urgent'"));
        assert!(app.notifier().is_empty());
    }

    #[test]
    fn test_toggle_feed_without_feed_is_noop() {
        let mut app = app(None);
        assert_eq!(app.feed_state(), None);
        app.handle_command(AppCommand::ToggleFeed, Instant::now()).unwrap();
        assert_eq!(app.feed_state(), None);
    }

    #[tokio::test]
    async fn test_toggle_feed_pauses_and_resumes() {
        let mut app = app(None);
        app.start_feed();
        assert_eq!(app.feed_state(), Some(true));

        app.handle_command(AppCommand::ToggleFeed, Instant::now()).unwrap();
        assert_eq!(app.feed_state(), Some(false));
        app.handle_command(AppCommand::ToggleFeed, Instant::now()).unwrap();
        assert_eq!(app.feed_state(), Some(true));
    }

    #[test]
    fn test_quit_sets_exit() {
        let mut app = app(None);
        app.handle_command(AppCommand::Quit, Instant::now()).unwrap();
        assert!(app.exit);
    }

    #[test]
    fn test_resize_relayouts() {
        let now = Instant::now();
        let mut app = app(None);
        app.handle_command(AppCommand::Show(NoteKind::Info), now).unwrap();
        app.resize(Viewport::new(40, 12), now);
        assert_eq!(app.notifier().viewport(), Viewport::new(40, 12));
    }
}
