//! The notifier: owns active notes and keeps them stacked.
//!
//! Every structural change (create, remove, resize) re-measures every note
//! against the current viewport and re-runs the corner's stacked layout from
//! scratch. Each note is then animated to its slot; animations already in
//! flight are replaced rather than queued.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::error::{NotifyError, Violation};
use super::layout::{Corner, NoteSize, Padding, Viewport};
use super::note::{DEFAULT_Z_INDEX, Note, NoteId, NoteKind, NoteOptions};

// ============================================================================
// Constants
// ============================================================================

/// Default distance between the stack and the left/right viewport edge.
pub const DEFAULT_HORIZONTAL_PADDING: i32 = 40;

/// Default distance between the stack and the top/bottom viewport edge.
pub const DEFAULT_VERTICAL_PADDING: i32 = 100;

// ============================================================================
// Configuration
// ============================================================================

/// Loosely typed notifier options, as read from configuration files.
///
/// All fields are optional; [`NotifierConfig::try_from`] fills in defaults
/// and rejects corner names it does not know.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotifierOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub horizontal_padding: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vertical_padding: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
}

/// Validated notifier configuration. Fixed for a notifier's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotifierConfig {
    pub corner: Corner,
    pub horizontal_padding: i32,
    pub vertical_padding: i32,
    /// Stacking order for notes that do not set their own.
    pub z_index: i32,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            corner: Corner::default(),
            horizontal_padding: DEFAULT_HORIZONTAL_PADDING,
            vertical_padding: DEFAULT_VERTICAL_PADDING,
            z_index: DEFAULT_Z_INDEX,
        }
    }
}

impl NotifierConfig {
    fn padding(&self) -> Padding {
        Padding {
            horizontal: self.horizontal_padding,
            vertical: self.vertical_padding,
        }
    }
}

impl TryFrom<NotifierOptions> for NotifierConfig {
    type Error = NotifyError;

    fn try_from(options: NotifierOptions) -> Result<Self, Self::Error> {
        let defaults = Self::default();
        let mut violations = Vec::new();

        let corner = match options.corner.as_deref() {
            Some(name) => name.parse::<Corner>().unwrap_or_else(|err| {
                violations.extend_from_slice(err.violations());
                defaults.corner
            }),
            None => defaults.corner,
        };

        let mut padding = |name: &'static str, value: Option<i32>, default: i32| {
            let value = value.unwrap_or(default);
            if value < 0 {
                violations.push(Violation::NegativePadding { name, value });
            }
            value
        };
        let horizontal_padding = padding(
            "horizontalPadding",
            options.horizontal_padding,
            defaults.horizontal_padding,
        );
        let vertical_padding = padding(
            "verticalPadding",
            options.vertical_padding,
            defaults.vertical_padding,
        );

        if !violations.is_empty() {
            return Err(NotifyError::InvalidOptions { violations });
        }
        Ok(Self {
            corner,
            horizontal_padding,
            vertical_padding,
            z_index: options.z_index.unwrap_or(defaults.z_index),
        })
    }
}

// ============================================================================
// Id Generation
// ============================================================================

/// Monotonic id source, starting at 0. Never reset, never reused.
#[derive(Debug, Default)]
struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    fn next_id(&mut self) -> NoteId {
        let id = NoteId(self.next);
        self.next += 1;
        id
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Hook invoked with every note the notifier removes.
pub type CloseHook = Box<dyn FnMut(&Note) + Send>;

/// Owns the active notes and lays them out in one screen corner.
pub struct Notifier {
    config: NotifierConfig,
    viewport: Viewport,
    notes: BTreeMap<NoteId, Note>,
    ids: IdGenerator,
    close_hook: Option<CloseHook>,
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("config", &self.config)
            .field("viewport", &self.viewport)
            .field("notes", &self.notes)
            .field("ids", &self.ids)
            .field("close_hook", &self.close_hook.is_some())
            .finish()
    }
}

impl Notifier {
    /// Creates an empty notifier for the given viewport.
    #[must_use]
    pub fn new(config: NotifierConfig, viewport: Viewport) -> Self {
        tracing::debug!(corner = %config.corner, ?viewport, "notifier created");
        Self {
            config,
            viewport,
            notes: BTreeMap::new(),
            ids: IdGenerator::default(),
            close_hook: None,
        }
    }

    /// Creates a notifier from loosely typed options.
    ///
    /// # Errors
    ///
    /// Returns an error when the corner name is not recognized.
    pub fn from_options(options: NotifierOptions, viewport: Viewport) -> Result<Self, NotifyError> {
        let config = NotifierConfig::try_from(options).inspect_err(|err| {
            tracing::warn!(%err, "rejected notifier options");
        })?;
        Ok(Self::new(config, viewport))
    }

    /// Installs the hook run whenever a note is removed.
    pub fn on_close(&mut self, hook: impl FnMut(&Note) + Send + 'static) {
        self.close_hook = Some(Box::new(hook));
    }

    #[must_use]
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn note(&self, id: NoteId) -> Option<&Note> {
        self.notes.get(&id)
    }

    /// Active notes in id order.
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.notes.values()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Id of the most recently created note still on screen.
    #[must_use]
    pub fn newest(&self) -> Option<NoteId> {
        self.notes.keys().next_back().copied()
    }

    /// Notes in paint order: lowest z-index first, then oldest first.
    #[must_use]
    pub fn paint_order(&self) -> Vec<&Note> {
        let mut notes: Vec<&Note> = self.notes.values().collect();
        notes.sort_by_key(|note| (note.z_index(), note.id()));
        notes
    }

    // ------------------------------------------------------------------------
    // Creation
    // ------------------------------------------------------------------------

    /// Shows a success note.
    ///
    /// # Errors
    ///
    /// Returns an error when neither caption nor message is set.
    pub fn success(&mut self, options: NoteOptions, now: Instant) -> Result<NoteId, NotifyError> {
        self.notify(NoteKind::Success, options, now)
    }

    /// Shows an info note.
    ///
    /// # Errors
    ///
    /// Returns an error when neither caption nor message is set.
    pub fn info(&mut self, options: NoteOptions, now: Instant) -> Result<NoteId, NotifyError> {
        self.notify(NoteKind::Info, options, now)
    }

    /// Shows a warning note.
    ///
    /// # Errors
    ///
    /// Returns an error when neither caption nor message is set.
    pub fn warning(&mut self, options: NoteOptions, now: Instant) -> Result<NoteId, NotifyError> {
        self.notify(NoteKind::Warning, options, now)
    }

    /// Shows a danger note.
    ///
    /// # Errors
    ///
    /// Returns an error when neither caption nor message is set.
    pub fn danger(&mut self, options: NoteOptions, now: Instant) -> Result<NoteId, NotifyError> {
        self.notify(NoteKind::Danger, options, now)
    }

    /// Shows a note of the given kind.
    ///
    /// # Errors
    ///
    /// Returns an error when neither caption nor message is set.
    pub fn notify(
        &mut self,
        kind: NoteKind,
        mut options: NoteOptions,
        now: Instant,
    ) -> Result<NoteId, NotifyError> {
        options.kind = Some(kind);
        self.create_note(options, now)
    }

    /// Shows a note whose kind is given by name, e.g. from the command line.
    ///
    /// # Errors
    ///
    /// Returns an error when the kind name is unknown or the options are
    /// invalid. Nothing is registered in either case.
    pub fn notify_named(
        &mut self,
        kind: &str,
        options: NoteOptions,
        now: Instant,
    ) -> Result<NoteId, NotifyError> {
        let kind = kind.parse::<NoteKind>().inspect_err(|err| {
            tracing::warn!(%err, "rejected note");
        })?;
        self.notify(kind, options, now)
    }

    fn create_note(&mut self, mut options: NoteOptions, now: Instant) -> Result<NoteId, NotifyError> {
        let id = self.ids.next_id();
        options.id = Some(id);
        options.z_index = options.z_index.or(Some(self.config.z_index));
        let fadeout: Option<Duration> = options.message_fadeout;

        let mut note = Note::new(Some(options)).inspect_err(|err| {
            tracing::warn!(%id, %err, "rejected note");
        })?;

        note.measure(self.viewport, self.config.horizontal_padding);
        let start = self
            .config
            .corner
            .initial_position(note.outer_size(), self.viewport, self.config.padding());
        note.position(start.x, start.y);

        if fadeout.is_some() {
            note.message_fadeout(fadeout, now)?;
        }

        tracing::debug!(%id, kind = %note.kind(), text = %note.text(), "note created");
        self.notes.insert(id, note);
        self.move_notes(now);
        Ok(id)
    }

    // ------------------------------------------------------------------------
    // Removal
    // ------------------------------------------------------------------------

    /// Removes a note, runs the close hook and restacks the rest.
    ///
    /// Removing a note that is already gone is a no-op returning `None`;
    /// the close hook never runs twice for the same note.
    pub fn remove(&mut self, id: NoteId, now: Instant) -> Option<Note> {
        let mut note = self.notes.remove(&id)?;
        if note.remove() {
            tracing::debug!(%id, "note removed");
            if let Some(hook) = self.close_hook.as_mut() {
                hook(&note);
            }
        }
        self.move_notes(now);
        Some(note)
    }

    /// Removes every note. Returns how many were removed.
    pub fn clear(&mut self, now: Instant) -> usize {
        let ids: Vec<NoteId> = self.notes.keys().copied().collect();
        ids.into_iter()
            .filter_map(|id| self.remove(id, now))
            .count()
    }

    /// Advances fade-outs, removing notes whose fade has finished.
    ///
    /// Returns the ids removed by this call.
    pub fn tick(&mut self, now: Instant) -> Vec<NoteId> {
        let expired: Vec<NoteId> = self
            .notes
            .iter_mut()
            .filter_map(|(id, note)| note.advance_fade(now).then_some(*id))
            .collect();

        expired
            .into_iter()
            .filter(|id| self.remove(*id, now).is_some())
            .collect()
    }

    // ------------------------------------------------------------------------
    // Layout
    // ------------------------------------------------------------------------

    /// Adopts a new viewport size and restacks every note.
    pub fn resize(&mut self, viewport: Viewport, now: Instant) {
        if viewport == self.viewport {
            return;
        }
        tracing::debug!(?viewport, "viewport resized");
        self.viewport = viewport;
        self.move_notes(now);
    }

    /// Re-measures every note and animates it to its stacked slot.
    fn move_notes(&mut self, now: Instant) {
        let viewport = self.viewport;
        let padding = self.config.horizontal_padding;

        let sizes: Vec<(NoteId, NoteSize)> = self
            .notes
            .iter_mut()
            .map(|(id, note)| {
                note.measure(viewport, padding);
                (*id, note.outer_size())
            })
            .collect();

        let slots = self
            .config
            .corner
            .stacked_layout(&sizes, viewport, self.config.padding());

        for (id, slot) in slots {
            if let Some(note) = self.notes.get_mut(&id) {
                note.move_to(slot.x, slot.y, now);
            }
        }
        tracing::trace!(notes = self.notes.len(), "notes restacked");
    }

    /// Topmost note covering the given cell, if any.
    #[must_use]
    pub fn note_at(&self, column: u16, row: u16, now: Instant) -> Option<NoteId> {
        let (column, row) = (i32::from(column), i32::from(row));
        self.paint_order()
            .into_iter()
            .rev()
            .find(|note| {
                let pos = note.current_position(now);
                column >= pos.x
                    && column < pos.x.saturating_add(note.outer_width(false))
                    && row >= pos.y
                    && row < pos.y.saturating_add(note.outer_height(false))
            })
            .map(Note::id)
    }
}

// ============================================================================
// Tests
// ============================================================================
